//! Owned in-memory backend.

use super::Backend;

/// A blob the caller already holds in memory, e.g. a `DoABC` payload cut out of a movie file.
#[derive(Debug)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    /// Takes ownership of `data`.
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data(&self) -> &[u8] {
        &self.data
    }
}
