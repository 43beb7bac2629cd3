//! Physical file backend for memory-mapped I/O.
//!
//! The [`crate::file::physical::Physical`] backend maps an extracted ABC blob directly into the
//! process's address space, so large modules are paged in on demand instead of being copied
//! up front.

use super::Backend;
use crate::{
    Error::{Error, FileError},
    Result,
};

use memmap2::Mmap;
use std::{fs, path::Path};

/// A blob mapped from disk.
#[derive(Debug)]
pub struct Physical {
    data: Mmap,
}

impl Physical {
    /// Maps the file at `path` read-only.
    ///
    /// # Arguments
    /// * `path` - Path to the blob on disk
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be opened or
    /// [`crate::Error::Error`] if memory mapping fails.
    #[allow(unsafe_code)]
    pub fn new(path: impl AsRef<Path>) -> Result<Physical> {
        let file = fs::File::open(path).map_err(FileError)?;

        // Read-only mapping; the blob must not be modified on disk while it is loaded.
        let data = unsafe { Mmap::map(&file) }.map_err(|error| Error(error.to_string()))?;

        Ok(Physical { data })
    }
}

impl Backend for Physical {
    fn data(&self) -> &[u8] {
        &self.data
    }
}
