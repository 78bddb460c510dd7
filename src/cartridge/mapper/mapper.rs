//! Mapper trait: cartridge projection into CPU space and register interception.

/// What a mapper exposes to the memory bus about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperDescription {
    /// Where execution starts after the ROM is loaded.
    pub reset_vector: u16,
    /// First address of the register window (inclusive).
    pub registers_start: u16,
    /// Last address of the register window (inclusive).
    pub registers_end: u16,
}

impl MapperDescription {
    /// `start == end == 0` declares that the mapper has no registers.
    pub fn has_registers(&self) -> bool {
        !(self.registers_start == 0 && self.registers_end == 0)
    }

    /// True when a bus write to `addr` belongs to the mapper instead of RAM.
    pub fn owns_register(&self, addr: u16) -> bool {
        self.has_registers() && (self.registers_start..=self.registers_end).contains(&addr)
    }
}

/// Trait for NES cartridge mappers. The bus owns exactly one, boxed.
///
/// Dropping the mapper releases its PRG/CHR buffers; the bus drops the old
/// mapper when a new ROM is installed.
pub trait Mapper {
    /// Short board name for logs, e.g. "NROM".
    fn name(&self) -> &'static str;
    /// Copy cartridge program bytes into the CPU address space.
    fn map_memory(&self, memory: &mut [u8]);
    /// Handle a CPU write inside the declared register window.
    fn register_write(&mut self, _addr: u16, _data: u8) {}
    /// Reset vector and register window.
    fn description(&self) -> MapperDescription;
}
