//! nes6502: a budgeted 6502 CPU core for NES cartridges, written in Rust.
//!
//! Runs the [6502](https://www.nesdev.org/wiki/CPU) instruction set (documented plus the stable
//! undocumented opcodes) against the NES [CPU memory map](https://www.nesdev.org/wiki/CPU_memory_map),
//! with cartridges loaded from [iNES](https://www.nesdev.org/wiki/INES) files.
//!
//! ## Modules (NESdev references)
//!
//! - **bus** – RAM mirroring, stubbed PPU/APU register windows, mapper register delegation
//! - **cartridge** – iNES loading; [Mapper](https://www.nesdev.org/wiki/Mapper) NROM (0)
//! - **config** – front-end run settings
//! - **cpu** – fetch/decode/execute, addressing modes, opcode table, halt states
//! - **emulator** – master clock and the `power_on`/`load_rom`/`step` surface
//! - **error** – load and execution failures

pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;
pub mod emulator;
pub mod error;

#[cfg(test)]
pub(crate) mod test_utils;

pub use emulator::Emulator;
pub use error::{Error, Result};
