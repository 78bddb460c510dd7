//! NES cartridge loading from iNES format (.nes files).
//!
//! Implements the [iNES](https://www.nesdev.org/wiki/INES) format: 16-byte header (magic "NES\x1A",
//! PRG size in 16 KiB units, CHR size in 8 KiB units, flags 6–7 for mapper, etc.), an optional
//! 512-byte trainer, then PRG ROM, then CHR ROM. The [Mapper](https://www.nesdev.org/wiki/Mapper)
//! built from the header owns the ROM bytes from then on.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::cartridge::mapper::mapper::Mapper;
use crate::cartridge::mapper::mapper0::Mapper0;
use crate::cartridge::reader::RomReader;
use crate::error::{Error, Result};

const MAGIC: [u8; 4] = *b"NES\x1A";
const TRAINER_SIZE: usize = 512;
const PRG_UNIT: usize = 16 * 1024;
const CHR_UNIT: usize = 8 * 1024;
const FLAG6_TRAINER: u8 = 1 << 2;

/// Some dumpers leave "DiskDude!" garbage in bytes 7–15; a flags 7 of `0x44`
/// ('D') is treated as absent.
const FLAG7_GARBAGE: u8 = 0x44;

/// Cartridge: header metadata plus the mapper that owns PRG/CHR.
pub struct Cartridge {
    pub mapper: Box<dyn Mapper>,
    pub mapper_id: u8,
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub has_trainer: bool,
}

impl Cartridge {
    /// Load cartridge from an iNES file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse an iNES image from any byte source. `path` labels errors.
    pub fn from_reader<R: Read>(inner: R, path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = RomReader::new(inner, path);

        let mut magic = [0u8; 4];
        reader.read_into(&mut magic)?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic {
                path: reader.path().to_path_buf(),
                found: magic,
            });
        }

        let prg_banks = reader.read_byte()?;
        let chr_banks = reader.read_byte()?;
        let flags6 = reader.read_byte()?;
        let mut flags7 = reader.read_byte()?;

        // PRG-RAM size, flags 8, flags 9: not used by any supported board.
        reader.skip(3)?;
        // Reserved padding.
        reader.skip(5)?;

        if flags7 == FLAG7_GARBAGE {
            flags7 = 0;
        }
        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);

        let has_trainer = flags6 & FLAG6_TRAINER != 0;
        if has_trainer {
            reader.skip(TRAINER_SIZE)?;
        }

        let prg_rom = reader.read_bytes(prg_banks as usize * PRG_UNIT)?;
        let chr_rom = reader.read_bytes(chr_banks as usize * CHR_UNIT)?;

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Mapper0::new(prg_rom, chr_rom)),
            id => {
                return Err(Error::UnsupportedMapper {
                    path: reader.path().to_path_buf(),
                    id,
                });
            }
        };

        log::info!(
            "cartridge '{}': mapper {} ({}), PRG {} x 16KB, CHR {} x 8KB{}",
            reader.path().display(),
            mapper_id,
            mapper.name(),
            prg_banks,
            chr_banks,
            if has_trainer { ", trainer skipped" } else { "" }
        );

        Ok(Self {
            mapper,
            mapper_id,
            prg_banks,
            chr_banks,
            has_trainer,
        })
    }

    /// Hand the mapper over to the memory bus.
    pub fn into_mapper(self) -> Box<dyn Mapper> {
        self.mapper
    }
}
