//! Memory bus and address decoding for the NES.
//!
//! Maps CPU addresses to RAM, the stubbed PPU/APU register windows, and the
//! cartridge mapper's register window.

use crate::cartridge::mapper::mapper::Mapper;

/// Whole CPU address space, so every 16-bit address has a backing byte.
pub const MEMORY_SIZE: usize = 0x10000;

/// Trait for memory access used by the CPU.
pub trait Bus {
    fn read(&mut self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);

    /// Little-endian; each byte is decoded independently.
    fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    fn write_word(&mut self, addr: u16, data: u16) {
        self.write(addr, data as u8);
        self.write(addr.wrapping_add(1), (data >> 8) as u8);
    }

    /// Called by the CPU on power-on, before the reset vector is read.
    fn power_on(&mut self) {}

    /// Entry point advertised by whatever is plugged into the bus.
    fn reset_vector(&self) -> Option<u16> {
        None
    }
}

/// Fold an address onto the physical cell it is wired to.
pub fn mirror(addr: u16) -> u16 {
    match addr & 0xE000 {
        // Internal RAM (2KB mirrored 4x in 0x0000-0x1FFF)
        0x0000 => addr & 0x07FF,
        // PPU registers (mirrored every 8 bytes in 0x2000-0x3FFF)
        0x2000 => addr & 0x2007,
        _ => addr,
    }
}

/// PPU ($2000-$2007) and APU/IO ($4000-$401F) windows. Those chips are not
/// emulated: reads are 0 and writes vanish.
pub fn is_io_register(addr: u16) -> bool {
    (addr & 0xFFF8) == 0x2000 || (addr & 0xFFE0) == 0x4000
}

/// Main NES bus: flat RAM image plus the installed cartridge mapper.
pub struct MemoryBus {
    ram: Box<[u8]>,
    mapper: Option<Box<dyn Mapper>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self {
            ram: vec![0; MEMORY_SIZE].into_boxed_slice(),
            mapper: None,
        }
    }

    /// Replace the mapper, dropping the previous one, and project its PRG.
    pub fn install_mapper(&mut self, mapper: Box<dyn Mapper>) {
        if let Some(old) = self.mapper.take() {
            log::debug!("replacing {} mapper", old.name());
        }
        mapper.map_memory(&mut self.ram);
        log::debug!("installed {} mapper", mapper.name());
        self.mapper = Some(mapper);
    }

    pub fn mapper(&self) -> Option<&dyn Mapper> {
        self.mapper.as_deref()
    }

    /// Zero RAM and, if a cartridge is present, project it again.
    pub fn clear(&mut self) {
        self.ram.fill(0);
        if let Some(mapper) = &self.mapper {
            mapper.map_memory(&mut self.ram);
        }
    }

    /// Raw view of the RAM image, without mirroring.
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }
}

impl Default for MemoryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MemoryBus {
    fn read(&mut self, addr: u16) -> u8 {
        let addr = mirror(addr);
        if is_io_register(addr) {
            return 0;
        }
        self.ram[addr as usize]
    }

    fn write(&mut self, addr: u16, data: u8) {
        let addr = mirror(addr);
        if is_io_register(addr) {
            return;
        }

        if let Some(mapper) = self.mapper.as_mut() {
            if mapper.description().owns_register(addr) {
                mapper.register_write(addr, data);
                return;
            }
        }

        self.ram[addr as usize] = data;
    }

    fn power_on(&mut self) {
        self.clear();
    }

    fn reset_vector(&self) -> Option<u16> {
        self.mapper().map(|mapper| mapper.description().reset_vector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::mapper::mapper::MapperDescription;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records register writes so tests can see what the bus delegated.
    struct LatchMapper {
        writes: Rc<RefCell<Vec<(u16, u8)>>>,
    }

    impl Mapper for LatchMapper {
        fn name(&self) -> &'static str {
            "latch"
        }

        fn map_memory(&self, memory: &mut [u8]) {
            memory[0x8000] = 0x4C;
        }

        fn register_write(&mut self, addr: u16, data: u8) {
            self.writes.borrow_mut().push((addr, data));
        }

        fn description(&self) -> MapperDescription {
            MapperDescription {
                reset_vector: 0x8000,
                registers_start: 0x8000,
                registers_end: 0xFFFF,
            }
        }
    }

    #[test]
    fn ram_is_mirrored_every_2kb() {
        let mut bus = MemoryBus::new();

        bus.write(0x0801, 0x5A);

        assert_eq!(bus.read(0x0001), 0x5A);
        assert_eq!(bus.read(0x1001), 0x5A);
        assert_eq!(bus.read(0x1801), 0x5A);
        assert_eq!(bus.ram()[0x0801], 0);
    }

    #[test]
    fn ppu_window_mirrors_every_8_bytes() {
        assert_eq!(mirror(0x2008), 0x2000);
        assert_eq!(mirror(0x3FFF), 0x2007);
        assert_eq!(mirror(0x4000), 0x4000);
    }

    #[test]
    fn io_windows_read_zero_and_drop_writes() {
        let mut bus = MemoryBus::new();

        bus.write(0x2008, 0xFF);
        bus.write(0x4015, 0xFF);

        assert_eq!(bus.read(0x2000), 0);
        assert_eq!(bus.read(0x2008), 0);
        assert_eq!(bus.read(0x4015), 0);
        assert_eq!(bus.ram()[0x2000], 0);
        assert_eq!(bus.ram()[0x4015], 0);
    }

    #[test]
    fn addresses_past_the_io_window_are_plain_memory() {
        let mut bus = MemoryBus::new();

        bus.write(0x4020, 0x12);
        bus.write(0x6000, 0x34);

        assert_eq!(bus.read(0x4020), 0x12);
        assert_eq!(bus.read(0x6000), 0x34);
    }

    #[test]
    fn words_are_little_endian_and_mirrored_per_byte() {
        let mut bus = MemoryBus::new();

        bus.write_word(0x07FF, 0xBEEF);

        assert_eq!(bus.read(0x07FF), 0xEF);
        // High byte lands on 0x0800, which folds onto 0x0000.
        assert_eq!(bus.read(0x0000), 0xBE);
        assert_eq!(bus.read_word(0x07FF), 0xBEEF);
    }

    #[test]
    fn writes_inside_register_window_go_to_the_mapper() {
        let writes = Rc::new(RefCell::new(Vec::new()));
        let mut bus = MemoryBus::new();
        bus.install_mapper(Box::new(LatchMapper {
            writes: Rc::clone(&writes),
        }));

        bus.write(0x8000, 0x01);
        bus.write(0x0010, 0x02);

        assert_eq!(*writes.borrow(), vec![(0x8000, 0x01)]);
        assert_eq!(bus.read(0x8000), 0x4C);
        assert_eq!(bus.read(0x0010), 0x02);
    }

    #[test]
    fn clear_reprojects_the_cartridge() {
        let mut bus = MemoryBus::new();
        bus.install_mapper(Box::new(LatchMapper {
            writes: Rc::new(RefCell::new(Vec::new())),
        }));
        bus.write(0x0200, 0x99);

        bus.clear();

        assert_eq!(bus.read(0x0200), 0);
        assert_eq!(bus.read(0x8000), 0x4C);
    }

    #[test]
    fn reset_vector_comes_from_the_mapper() {
        let mut bus = MemoryBus::new();
        assert_eq!(bus.reset_vector(), None);

        bus.install_mapper(Box::new(LatchMapper {
            writes: Rc::new(RefCell::new(Vec::new())),
        }));

        assert_eq!(bus.reset_vector(), Some(0x8000));
    }
}
