//! Mapper 0 (NROM): no bank switching, 16/32KB PRG, 8KB CHR.

use crate::cartridge::mapper::mapper::{Mapper, MapperDescription};

const PRG_BASE: usize = 0x8000;
const PRG_MIRROR_BASE: usize = 0xC000;
const PRG_BANK_SIZE: usize = 16 * 1024;

/// NROM mapper: fixed PRG and CHR, optionally 16KB PRG mirror.
pub struct Mapper0 {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
}

impl Mapper0 {
    /// Create Mapper0 with given PRG and CHR ROM. The mapper becomes their sole owner.
    pub fn new(prg_rom: Vec<u8>, chr_rom: Vec<u8>) -> Self {
        Self { prg_rom, chr_rom }
    }
}

impl Mapper for Mapper0 {
    fn name(&self) -> &'static str {
        "NROM"
    }

    fn map_memory(&self, memory: &mut [u8]) {
        copy_clamped(memory, PRG_BASE, &self.prg_rom);

        // 16KB boards are wired to appear twice in the 32KB window.
        if self.prg_rom.len() == PRG_BANK_SIZE {
            copy_clamped(memory, PRG_MIRROR_BASE, &self.prg_rom);
        }
    }

    fn description(&self) -> MapperDescription {
        MapperDescription {
            reset_vector: 0x8000,
            registers_start: 0,
            registers_end: 0,
        }
    }
}

impl Drop for Mapper0 {
    fn drop(&mut self) {
        log::debug!(
            "releasing NROM buffers: PRG {} bytes, CHR {} bytes",
            self.prg_rom.len(),
            self.chr_rom.len()
        );
    }
}

/// PRG images larger than the window are cut at the top of the address space.
fn copy_clamped(memory: &mut [u8], base: usize, bytes: &[u8]) {
    let end = memory.len().min(base + bytes.len());
    if base < end {
        memory[base..end].copy_from_slice(&bytes[..end - base]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_kib_prg_is_mirrored_at_c000() {
        let prg: Vec<u8> = (0..PRG_BANK_SIZE).map(|i| (i % 251) as u8).collect();
        let mapper = Mapper0::new(prg.clone(), Vec::new());
        let mut memory = vec![0u8; 0x10000];

        mapper.map_memory(&mut memory);

        assert_eq!(&memory[0x8000..0xC000], prg.as_slice());
        assert_eq!(&memory[0xC000..0x10000], prg.as_slice());
    }

    #[test]
    fn thirty_two_kib_prg_fills_the_window_once() {
        let mut prg = vec![0x11u8; 2 * PRG_BANK_SIZE];
        prg[PRG_BANK_SIZE] = 0x22;
        let mapper = Mapper0::new(prg, Vec::new());
        let mut memory = vec![0u8; 0x10000];

        mapper.map_memory(&mut memory);

        assert_eq!(memory[0x8000], 0x11);
        assert_eq!(memory[0xC000], 0x22);
        assert_eq!(memory[0xFFFF], 0x11);
    }

    #[test]
    fn description_has_fixed_reset_and_no_registers() {
        let mapper = Mapper0::new(vec![0; PRG_BANK_SIZE], vec![0; 8 * 1024]);
        let description = mapper.description();

        assert_eq!(description.reset_vector, 0x8000);
        assert!(!description.has_registers());
        assert!(!description.owns_register(0x8000));
        assert_eq!(mapper.chr_rom.len(), 8 * 1024);
    }

    #[test]
    fn register_window_bounds_are_inclusive() {
        let description = MapperDescription {
            reset_vector: 0x8000,
            registers_start: 0x8000,
            registers_end: 0x9FFF,
        };

        assert!(description.owns_register(0x8000));
        assert!(description.owns_register(0x9FFF));
        assert!(!description.owns_register(0xA000));
        assert!(!description.owns_register(0x7FFF));
    }
}
