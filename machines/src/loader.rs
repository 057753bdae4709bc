//! Object image reading.
//!
//! An LC-3 object file is a big-endian stream of 16-bit words with no
//! header beyond the leading load address and no checksum. Byte-order
//! conversion to host order happens here and nowhere else.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("object image is empty")]
    Empty,

    #[error("object image ends in the middle of a word")]
    TruncatedWord,

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Decode a raw byte stream into host-order words.
pub fn parse_object(bytes: &[u8]) -> Result<Vec<u16>, LoadError> {
    if bytes.is_empty() {
        return Err(LoadError::Empty);
    }
    if bytes.len() % 2 != 0 {
        return Err(LoadError::TruncatedWord);
    }
    Ok(bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect())
}

/// Read and decode an object file, attaching the path to any IO failure.
pub fn read_object_file(path: &Path) -> Result<Vec<u16>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_object(&bytes)
}
