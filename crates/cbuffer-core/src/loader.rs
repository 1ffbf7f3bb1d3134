//! Input loading and terminator normalization.
//!
//! The loader reads a whole file into memory and guarantees that the
//! resulting [`ByteSequence`] ends in a single `0x00` terminator:
//!
//! - a trailing `\n` or `\0` is overwritten with `0x00`
//! - anything else (including an empty file) gets `0x00` appended

use crate::error::{Error, Result};
use std::ops::Deref;
use std::path::Path;
use tracing::{debug, trace};

/// Byte value written at the end of every sequence
pub const TERMINATOR: u8 = 0x00;

const NEWLINE: u8 = 0x0a;

/// An immutable, terminator-normalized sequence of bytes.
///
/// Always holds at least one element, and the last element is always
/// [`TERMINATOR`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteSequence {
    data: Vec<u8>,
}

impl ByteSequence {
    /// Builds a sequence from raw bytes, applying terminator normalization
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        let mut data = data.into();

        match data.last().copied() {
            Some(last @ (NEWLINE | TERMINATOR)) => {
                trace!("Replacing trailing byte 0x{:02x} with terminator", last);
                let tail = data.len() - 1;
                data[tail] = TERMINATOR;
            }
            _ => {
                trace!("Appending terminator");
                data.push(TERMINATOR);
            }
        }

        Self { data }
    }

    /// Returns the bytes as a slice
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes including the terminator
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Consumes the sequence and returns the underlying bytes
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

impl AsRef<[u8]> for ByteSequence {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl Deref for ByteSequence {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

/// Load a file into a [`ByteSequence`].
///
/// Fails with [`Error::InputNotFound`] when `path` is not an existing
/// regular file. No validation is done on the content.
pub fn load(path: impl AsRef<Path>) -> Result<ByteSequence> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(Error::input_not_found(path));
    }

    let data = std::fs::read(path).map_err(|e| Error::file_read(path, e))?;
    debug!("Read {} bytes from {}", data.len(), path.display());

    Ok(ByteSequence::from_bytes(data))
}
