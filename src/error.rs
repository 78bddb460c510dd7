//! Fatal error conditions surfaced by the core.
//!
//! Two classes exist: cartridge I/O/format problems raised while loading a ROM,
//! and opcodes the dispatch table does not cover. Neither is recoverable; the
//! binary reports them and exits non-zero.

use std::fmt;
use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// The ROM file could not be opened or read.
    Io { path: PathBuf, source: io::Error },
    /// The ROM file ended before `wanted` more bytes could be read.
    UnexpectedEof { path: PathBuf, wanted: usize },
    /// The first four bytes were not `NES\x1A`.
    InvalidMagic { path: PathBuf, found: [u8; 4] },
    /// The header selects a mapper this core does not implement.
    UnsupportedMapper { path: PathBuf, id: u8 },
    /// The CPU fetched an opcode with no entry in the dispatch table.
    UnimplementedOpcode { opcode: u8, address: u16 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "could not read file '{}': {source}", path.display())
            }
            Self::UnexpectedEof { path, wanted } => write!(
                f,
                "file '{}' is smaller than expected: was trying to read {wanted} bytes",
                path.display()
            ),
            Self::InvalidMagic { path, found } => write!(
                f,
                "invalid magic in '{}': expected 4E 45 53 1A, got {:02X} {:02X} {:02X} {:02X}",
                path.display(),
                found[0],
                found[1],
                found[2],
                found[3]
            ),
            Self::UnsupportedMapper { path, id } => {
                write!(f, "unsupported mapper {id} in '{}'", path.display())
            }
            Self::UnimplementedOpcode { opcode, address } => {
                write!(f, "unimplemented opcode ${opcode:02X} at ${address:04X}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
