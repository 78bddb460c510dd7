//! NES cartridge loading and mapper support.
//!
//! - **cartridge**: Loads iNES (.nes) files and builds the mapper.
//! - **mapper**: Mapper trait and NROM (0).
//! - **reader**: exact-read byte source used by the loader.

pub mod cartridge;
pub mod mapper;
pub mod reader;
