//! Input abstraction for ABC blobs.
//!
//! An ABC module usually arrives embedded in a larger container (a `DoABC` record of a movie
//! file), which is extracted by an external collaborator. This module accepts the extracted
//! blob either from disk or from memory and hands a plain byte slice to the decoder.
//!
//! # Key Components
//!
//! - [`crate::file::File`] - Loaded blob, independent of where the bytes live
//! - [`crate::file::Backend`] - Trait for data sources (memory-mapped files, owned buffers)
//! - [`crate::file::parser::Parser`] - Cursor used by every decoding stage
//! - [`crate::file::io`] - Low-level little-endian primitive reads
//!
//! # Thread Safety
//!
//! Backends are `Send + Sync`; a [`File`] can be shared across threads once loaded.

pub mod io;
pub mod parser;

mod memory;
mod physical;

use std::path::Path;

use crate::{Error::Empty, Result};
use memory::Memory;
use physical::Physical;

/// Source of the raw blob bytes.
///
/// Backends are `Send + Sync` so a loaded [`File`] can move between threads.
pub trait Backend: Send + Sync {
    /// The complete blob.
    fn data(&self) -> &[u8];

    /// Size of the blob in bytes.
    fn len(&self) -> usize {
        self.data().len()
    }
}

/// A loaded ABC blob.
///
/// # Examples
///
/// ```rust
/// use abcscope::File;
///
/// let file = File::from_mem(vec![0x10, 0x00, 0x2E, 0x00])?;
/// assert_eq!(file.len(), 4);
/// assert_eq!(&file.data()[2..], &[0x2E, 0x00]);
/// # Ok::<(), abcscope::Error>(())
/// ```
pub struct File {
    data: Box<dyn Backend>,
}

impl File {
    /// Loads a blob from disk by memory-mapping it.
    ///
    /// # Arguments
    /// * `file` - Path to the extracted ABC blob
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened,
    /// [`crate::Error::Error`] if it cannot be mapped, or [`crate::Error::Empty`] for an
    /// empty file.
    pub fn from_file(file: &Path) -> Result<File> {
        let input = Physical::new(file)?;
        Self::load(input)
    }

    /// Loads a blob from an owned memory buffer.
    ///
    /// # Arguments
    /// * `data` - The raw ABC bytes
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] if `data` is empty.
    pub fn from_mem(data: Vec<u8>) -> Result<File> {
        let input = Memory::new(data);
        Self::load(input)
    }

    fn load<T: Backend + 'static>(data: T) -> Result<File> {
        if data.len() == 0 {
            return Err(Empty);
        }

        Ok(File {
            data: Box::new(data),
        })
    }

    /// Returns the size of the blob in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the blob contains no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.len() == 0
    }

    /// Returns the complete blob.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        self.data.data()
    }
}
