//! iNES image builders shared by the cartridge, bus and emulator tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const PRG_BANK: usize = 16 * 1024;
pub const CHR_BANK: usize = 8 * 1024;

/// Header + optional trainer + PRG (`program` at offset 0, rest `0xEA`) + CHR.
pub fn build_ines(
    prg_16k: u8,
    chr_8k: u8,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
    program: &[u8],
) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k);
    bytes.push(chr_8k);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.extend_from_slice(&[0u8; 3]); // PRG-RAM size, flags 8, flags 9
    bytes.extend_from_slice(&[0u8; 5]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }

    let mut prg = vec![0xEAu8; prg_16k as usize * PRG_BANK];
    prg[..program.len()].copy_from_slice(program);
    bytes.extend_from_slice(&prg);
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k as usize * CHR_BANK));

    bytes
}

/// Single 16KB bank, no CHR, mapper 0.
pub fn nrom_128(program: &[u8]) -> Vec<u8> {
    build_ines(1, 0, 0, 0, None, program)
}

/// Write `bytes` to a fresh file under the system temp directory.
pub fn write_temp_rom(name: &str, bytes: &[u8]) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!(
        "nes6502-{}-{n}-{name}.nes",
        std::process::id()
    ));
    std::fs::write(&path, bytes).expect("write temp rom");
    path
}
