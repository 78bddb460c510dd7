//! Addressing modes and operand resolution.
//!
//! Resolving a mode consumes its operand bytes from the instruction stream and
//! yields where the instruction's operand lives.

use crate::bus::Bus;
use crate::cpu::cpu::CPU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    Implied,
    Accumulator,
    Relative,
    Immediate,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    /// JMP ($xxxx) only.
    Indirect,
    /// ($zz,X)
    IndexedIndirect,
    /// ($zz),Y
    IndirectIndexed,
}

impl AddressingMode {
    /// Operand bytes that follow the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            Self::Implied | Self::Accumulator => 0,
            Self::Relative
            | Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::IndexedIndirect
            | Self::IndirectIndexed => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }
}

/// Where a resolved operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Accumulator,
    Address(u16),
}

impl Operand {
    pub fn address(self) -> Option<u16> {
        match self {
            Self::Address(addr) => Some(addr),
            _ => None,
        }
    }
}

impl<B: Bus> CPU<B> {
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        let addr = match mode {
            AddressingMode::Implied => return Operand::None,
            AddressingMode::Accumulator => return Operand::Accumulator,
            AddressingMode::Relative | AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                addr
            }
            AddressingMode::Absolute => self.fetch_word(),
            AddressingMode::AbsoluteX => self.fetch_word().wrapping_add(self.x as u16),
            AddressingMode::AbsoluteY => self.fetch_word().wrapping_add(self.y as u16),
            AddressingMode::ZeroPage => self.fetch_byte() as u16,
            AddressingMode::ZeroPageX => self.fetch_byte().wrapping_add(self.x) as u16,
            AddressingMode::ZeroPageY => self.fetch_byte().wrapping_add(self.y) as u16,
            AddressingMode::Indirect => {
                let ptr = self.fetch_word();
                let lo = self.bus.read(ptr) as u16;

                // Page-boundary bug: the high byte never carries into the next page.
                let hi_addr = if ptr & 0x00FF == 0x00FF {
                    ptr & 0xFF00
                } else {
                    ptr.wrapping_add(1)
                };
                let hi = self.bus.read(hi_addr) as u16;

                (hi << 8) | lo
            }
            AddressingMode::IndexedIndirect => {
                let ptr = self.fetch_byte().wrapping_add(self.x);
                self.read_zero_page_word(ptr)
            }
            AddressingMode::IndirectIndexed => {
                let ptr = self.fetch_byte();
                self.read_zero_page_word(ptr).wrapping_add(self.y as u16)
            }
        };

        Operand::Address(addr)
    }

    /// Pointer fetch that stays inside page zero ($FF wraps to $00).
    fn read_zero_page_word(&mut self, ptr: u8) -> u16 {
        let lo = self.bus.read(ptr as u16) as u16;
        let hi = self.bus.read(ptr.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    pub(crate) fn read_operand(&mut self, operand: Operand) -> u8 {
        match operand {
            Operand::None => 0,
            Operand::Accumulator => self.a,
            Operand::Address(addr) => self.bus.read(addr),
        }
    }

    pub(crate) fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::None => {}
            Operand::Accumulator => self.a = value,
            Operand::Address(addr) => self.bus.write(addr, value),
        }
    }

    /// Resolve `mode` and read the byte it names.
    pub(crate) fn fetch_operand(&mut self, mode: AddressingMode) -> u8 {
        let operand = self.resolve(mode);
        self.read_operand(operand)
    }
}
