//! 6502 processor status register (P) flag bits.

pub const FLAG_CARRY: u8 = 1 << 0;
pub const FLAG_ZERO: u8 = 1 << 1;
pub const FLAG_INTERRUPT_DISABLE: u8 = 1 << 2;
pub const FLAG_DECIMAL: u8 = 1 << 3;  // Stored only; the 2A03 has no BCD adder
pub const FLAG_BREAK: u8 = 1 << 4;    // Only meaningful in a pushed copy of P
pub const FLAG_UNUSED: u8 = 1 << 5;   // Always 1 when pushed or pulled
pub const FLAG_OVERFLOW: u8 = 1 << 6;
pub const FLAG_NEGATIVE: u8 = 1 << 7;

/// P after power-on: interrupts disabled, B and bit 5 set ($34).
pub const POWER_ON_STATUS: u8 = FLAG_INTERRUPT_DISABLE | FLAG_BREAK | FLAG_UNUSED;
