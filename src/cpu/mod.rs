//! 6502 CPU emulation for the NES.
//!
//! Documented instruction set plus the common undocumented opcodes, driven by
//! a 256-entry opcode table. Bus trait used for memory access.

pub mod addressing;
pub mod cpu;
mod execute;
pub mod flags;
pub mod opcodes;
