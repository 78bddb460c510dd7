//! Sequential byte source for ROM containers.
//!
//! Every read is exact: a short read is a hard `UnexpectedEof`, never a
//! partially filled buffer.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub struct RomReader<R: Read> {
    inner: R,
    path: PathBuf,
}

impl<R: Read> RomReader<R> {
    /// `path` is only used to label errors.
    pub fn new(inner: R, path: impl AsRef<Path>) -> Self {
        Self {
            inner,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_into(&mut byte)?;
        Ok(byte[0])
    }

    pub fn read_bytes(&mut self, amount: usize) -> Result<Vec<u8>> {
        let mut bytes = vec![0u8; amount];
        self.read_into(&mut bytes)?;
        Ok(bytes)
    }

    pub fn read_into(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.inner.read_exact(bytes).map_err(|source| {
            if source.kind() == io::ErrorKind::UnexpectedEof {
                Error::UnexpectedEof {
                    path: self.path.clone(),
                    wanted: bytes.len(),
                }
            } else {
                Error::Io {
                    path: self.path.clone(),
                    source,
                }
            }
        })
    }

    /// Consume and discard `amount` bytes.
    pub fn skip(&mut self, amount: usize) -> Result<()> {
        self.read_bytes(amount).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_are_sequential() {
        let mut reader = RomReader::new(Cursor::new(vec![1, 2, 3, 4, 5]), "mem.nes");

        assert_eq!(reader.read_byte().unwrap(), 1);
        assert_eq!(reader.read_bytes(2).unwrap(), vec![2, 3]);
        reader.skip(1).unwrap();
        assert_eq!(reader.read_byte().unwrap(), 5);
    }

    #[test]
    fn short_read_is_an_error() {
        let mut reader = RomReader::new(Cursor::new(vec![1, 2]), "short.nes");

        match reader.read_bytes(4) {
            Err(Error::UnexpectedEof { path, wanted }) => {
                assert_eq!(path, PathBuf::from("short.nes"));
                assert_eq!(wanted, 4);
            }
            other => panic!("expected UnexpectedEof, got {other:?}"),
        }
    }
}
