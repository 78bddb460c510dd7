//! Top-level console: owns the CPU (and through it the bus and cartridge) and
//! drives it from a master clock.

use std::path::Path;

use crate::bus::MemoryBus;
use crate::cpu::cpu::CPU;
use crate::error::Result;

pub struct Emulator {
    cpu: CPU<MemoryBus>,
    master_clock: u16,
}

impl Emulator {
    pub fn new() -> Self {
        Self {
            cpu: CPU::new(MemoryBus::new()),
            master_clock: 0,
        }
    }

    /// Reset registers, clear RAM and restart from the cartridge's reset vector.
    pub fn power_on(&mut self) {
        self.master_clock = 0;
        self.cpu.power_on();
    }

    /// Parse an iNES file and plug it in. On error the previous cartridge, if
    /// any, stays installed.
    pub fn load_rom(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.cpu.load_rom(path)
    }

    pub fn stopped(&self) -> bool {
        self.cpu.is_halted()
    }

    /// Advance the master clock by `cycles` and let the CPU catch up.
    pub fn step(&mut self, cycles: u16) -> Result<()> {
        self.master_clock = self.master_clock.wrapping_add(cycles);
        self.cpu.sync(self.master_clock)
    }

    pub fn cpu(&self) -> &CPU<MemoryBus> {
        &self.cpu
    }

    pub fn master_clock(&self) -> u16 {
        self.master_clock
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::cpu::{HaltReason, RunState};
    use crate::error::Error;
    use crate::test_utils::{PRG_BANK, nrom_128, write_temp_rom};

    fn boot(name: &str, program: &[u8]) -> Emulator {
        let path = write_temp_rom(name, &nrom_128(program));
        let mut emulator = Emulator::new();
        emulator.load_rom(&path).unwrap();
        emulator.power_on();
        let _ = std::fs::remove_file(path);
        emulator
    }

    #[test]
    fn nrom_128_starts_at_8000_and_is_mirrored_at_c000() {
        let emulator = boot("mirror", &[0xA9, 0x42, 0x02]);
        let ram = emulator.cpu().bus.ram();

        assert_eq!(emulator.cpu().pc, 0x8000);
        assert_eq!(ram[0x8000..0x8003], [0xA9, 0x42, 0x02]);
        assert_eq!(ram[0x8000..0x8000 + PRG_BANK], ram[0xC000..0xC000 + PRG_BANK]);
    }

    #[test]
    fn bad_magic_installs_nothing() {
        let mut bytes = nrom_128(&[]);
        bytes[0] = b'X';
        let path = write_temp_rom("bad-magic", &bytes);
        let mut emulator = Emulator::new();

        let result = emulator.load_rom(&path);
        let _ = std::fs::remove_file(path);

        assert!(matches!(result, Err(Error::InvalidMagic { .. })));
        assert!(emulator.cpu().bus.mapper().is_none());
        assert_eq!(emulator.cpu().bus.ram()[0x8000], 0);
    }

    #[test]
    fn jam_as_first_instruction_stops_after_one_step() {
        let mut emulator = boot("jam", &[0x02]);

        emulator.step(1024).unwrap();

        assert!(emulator.stopped());
        assert_eq!(emulator.cpu().internal_clock, 1);
        assert_eq!(emulator.cpu().state, RunState::Halted(HaltReason::Jam(0x02)));
    }

    #[test]
    fn step_runs_one_instruction_per_cycle_of_budget() {
        // PRG is padded with NOP.
        let mut emulator = boot("nops", &[]);

        emulator.step(100).unwrap();
        assert_eq!(emulator.cpu().internal_clock, 100);
        assert_eq!(emulator.cpu().pc, 0x8064);

        emulator.step(28).unwrap();
        assert_eq!(emulator.cpu().internal_clock, 128);
        assert_eq!(emulator.master_clock(), 128);
        assert!(!emulator.stopped());
    }

    #[test]
    fn program_writes_land_in_mirrored_ram() {
        // LDA #$5A; STA $0801; LDX $0001; JAM
        let mut emulator = boot("store", &[0xA9, 0x5A, 0x8D, 0x01, 0x08, 0xA6, 0x01, 0x02]);

        emulator.step(1024).unwrap();

        assert!(emulator.stopped());
        assert_eq!(emulator.cpu().x, 0x5A);
        assert_eq!(emulator.cpu().bus.ram()[0x0001], 0x5A);
        assert_eq!(emulator.cpu().bus.ram()[0x0801], 0);
    }

    #[test]
    fn power_on_clears_halt_and_restarts() {
        let mut emulator = boot("restart", &[0x02]);
        emulator.step(10).unwrap();
        assert!(emulator.stopped());

        emulator.power_on();

        assert!(!emulator.stopped());
        assert_eq!(emulator.cpu().pc, 0x8000);
        assert_eq!(emulator.cpu().status, 0x34);
        assert_eq!(emulator.master_clock(), 0);
        assert_eq!(emulator.cpu().bus.ram()[0x8000], 0x02);
    }

    #[test]
    fn loading_a_new_rom_replaces_the_old_one() {
        let mut emulator = boot("first", &[0x02]);
        emulator.step(1).unwrap();
        assert!(emulator.stopped());

        let path = write_temp_rom("second", &nrom_128(&[0xA2, 0x07, 0x12]));
        emulator.load_rom(&path).unwrap();
        let _ = std::fs::remove_file(path);

        assert!(!emulator.stopped());
        emulator.step(1024).unwrap();
        assert_eq!(emulator.cpu().x, 0x07);
        assert_eq!(emulator.cpu().state, RunState::Halted(HaltReason::Jam(0x12)));
    }

    #[test]
    fn unknown_opcode_surfaces_from_step() {
        let mut emulator = boot("unknown", &[0xEA, 0x8B]);

        match emulator.step(1024) {
            Err(Error::UnimplementedOpcode { opcode, address }) => {
                assert_eq!(opcode, 0x8B);
                assert_eq!(address, 0x8001);
            }
            other => panic!("expected UnimplementedOpcode, got {other:?}"),
        }
    }
}
