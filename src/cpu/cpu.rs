use std::path::Path;

use crate::{
    bus::{Bus, MemoryBus},
    cartridge::cartridge::Cartridge,
    cpu::{
        flags::{FLAG_NEGATIVE, FLAG_ZERO, POWER_ON_STATUS},
        opcodes::{self, Opcode},
    },
    error::{Error, Result},
};

/// Why the CPU stopped fetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// One of the `$x2` jam/kill opcodes.
    Jam(u8),
    /// BRK set the break bit.
    Break,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Terminal until the next power-on or ROM load.
    Halted(HaltReason),
}

pub struct CPU<B: Bus> {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    /// Instructions retired since power-on; compared against the master clock.
    pub internal_clock: u16,
    pub bus: B,
    pub state: RunState,
}

impl<B: Bus> CPU<B> {
    pub fn new(bus: B) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0xFD,
            pc: 0,
            status: POWER_ON_STATUS,
            internal_clock: 0,
            bus,
            state: RunState::Running,
        }
    }

    pub fn power_on(&mut self) {
        self.bus.power_on();

        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.status = POWER_ON_STATUS;
        self.internal_clock = 0;
        self.state = RunState::Running;

        if let Some(vector) = self.bus.reset_vector() {
            self.pc = vector;
        }

        log::info!("power on, PC=${:04X}", self.pc);
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.state, RunState::Halted(_))
    }

    pub(crate) fn halt(&mut self, reason: HaltReason) {
        log::debug!(
            "halted at ${:04X} after {} instructions: {:?}",
            self.pc,
            self.internal_clock,
            reason
        );
        self.state = RunState::Halted(reason);
    }

    /// Run until `internal_clock` catches up with `master_clock` or the CPU
    /// halts. Each instruction costs one unit of budget.
    pub fn sync(&mut self, master_clock: u16) -> Result<()> {
        while !self.is_halted() && self.internal_clock != master_clock {
            self.step()?;
        }
        Ok(())
    }

    /// Fetch, decode and execute one instruction.
    pub fn step(&mut self) -> Result<()> {
        if self.is_halted() {
            return Ok(());
        }

        let pc = self.pc;
        let code = self.fetch_byte();

        let Some(opcode) = opcodes::decode(code) else {
            log::debug!("unimplemented opcode ${:02X} at ${:04X}", code, pc);
            return Err(Error::UnimplementedOpcode { opcode: code, address: pc });
        };

        self.trace(pc, opcode);
        self.execute(opcode);
        self.internal_clock = self.internal_clock.wrapping_add(1);

        Ok(())
    }

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let byte = self.bus.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        byte
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    fn trace(&self, pc: u16, opcode: Opcode) {
        log::trace!(
            "{:04X}  {:02X} {}{}  A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc,
            opcode.code,
            if opcode.documented { ' ' } else { '*' },
            opcode.instruction.mnemonic(),
            self.a,
            self.x,
            self.y,
            self.status,
            self.sp,
            self.internal_clock
        );
    }

    // The stack pointer indexes memory directly: there is no $0100 page
    // offset, so the stack lives in $0000-$00FF alongside zero page.
    pub(crate) fn push(&mut self, value: u8) {
        self.bus.write(self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pop(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(self.sp as u16)
    }

    /// Low byte first, so the high byte sits on top of the stack.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push(value as u8);
        self.push((value >> 8) as u8);
    }

    pub(crate) fn pop_word(&mut self) -> u16 {
        let hi = self.pop() as u16;
        let lo = self.pop() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    pub(crate) fn flag(&self, flag: u8) -> bool {
        self.status & flag != 0
    }

    pub(crate) fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(FLAG_ZERO, value == 0);
        self.set_flag(FLAG_NEGATIVE, value & 0x80 != 0);
    }
}

impl CPU<MemoryBus> {
    /// Parse the iNES file at `path` and install its mapper.
    ///
    /// On error nothing is installed and the CPU is left untouched.
    pub fn load_rom(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let cartridge = Cartridge::load(path)?;
        self.install_cartridge(cartridge);
        Ok(())
    }

    pub fn install_cartridge(&mut self, cartridge: Cartridge) {
        let mapper = cartridge.into_mapper();
        let vector = mapper.description().reset_vector;

        self.bus.install_mapper(mapper);
        self.pc = vector;
        self.state = RunState::Running;
    }
}
