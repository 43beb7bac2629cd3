//! Low-level byte order and safe reading utilities for ABC parsing.
//!
//! This module provides bounds-checked, little-endian reads of fixed-width primitives from byte
//! buffers. ABC is a little-endian format throughout: the version header is a pair of `u16`
//! values, the integer constants of `hasnext2` are raw `i32`s and the double table stores
//! IEEE-754 `f64`s. Variable-length encodings (U30, S24) live on top of these primitives in
//! [`crate::file::parser::Parser`].
//!
//! # Key Components
//!
//! - [`crate::file::io::AbcIO`] - Trait defining little-endian conversion for primitive types
//! - [`crate::file::io::read_le`] - Read a value from the start of a buffer
//! - [`crate::file::io::read_le_at`] - Read a value at an offset and advance the offset
//!
//! # Examples
//!
//! ```rust,ignore
//! use abcscope::file::io::read_le_at;
//!
//! let data = [0x10, 0x00, 0x2E, 0x00];
//! let mut offset = 0;
//!
//! let minor: u16 = read_le_at(&data, &mut offset)?;
//! let major: u16 = read_le_at(&data, &mut offset)?;
//! assert_eq!((major, minor), (46, 16));
//! assert_eq!(offset, 4);
//! # Ok::<(), abcscope::Error>(())
//! ```
//!
//! # Error Handling
//!
//! All functions return [`crate::Error::OutOfBounds`] if there are insufficient bytes in the
//! buffer to complete the operation.

use crate::Result;

/// Trait for implementing type-specific safe binary data reading operations.
///
/// Each implementation defines a `Bytes` associated type that represents the fixed-size byte
/// array required for that particular type (e.g., `[u8; 4]` for `u32`).
pub trait AbcIO: Sized {
    /// Fixed-size byte array holding one encoded value
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Decode a value from its little-endian representation
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_abc_io {
    ($($ty:ty),* $(,)?) => {
        $(
            impl AbcIO for $ty {
                type Bytes = [u8; std::mem::size_of::<$ty>()];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }
            }
        )*
    };
}

impl_abc_io!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

/// Safely reads a value of type `T` in little-endian byte order from the start of a buffer.
///
/// # Arguments
/// * `data` - The byte buffer to read from
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than `T`.
pub fn read_le<T: AbcIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at `offset` and advances the
/// offset by the size of `T`.
///
/// The offset is only advanced if the read succeeds.
///
/// # Arguments
/// * `data` - The byte buffer to read from
/// * `offset` - The position to read at, updated on success
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_le_at<T: AbcIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let Some(end) = offset.checked_add(type_len) else {
        return Err(out_of_bounds_error!(*offset));
    };

    if end > data.len() {
        return Err(out_of_bounds_error!(*offset));
    }

    let Ok(read) = T::Bytes::try_from(&data[*offset..end]) else {
        return Err(out_of_bounds_error!(*offset));
    };

    *offset = end;
    Ok(T::from_le_bytes(read))
}
