//! Low-level byte stream parser for ABC decoding.
//!
//! This module provides the [`crate::file::parser::Parser`] type, a cursor-based binary data
//! parser for reading AVM2 module structures and method bytecode. It offers bounds-checked
//! access to binary data together with the variable-length encodings the format is built on.
//!
//! # Key Components
//!
//! ## Position
//! - [`crate::file::parser::Parser::pos`] - Get current position
//! - [`crate::file::parser::Parser::remaining`] - Bytes left after the cursor
//!
//! ## Data Access Methods
//! - [`crate::file::parser::Parser::read_le`] - Read primitive types (little-endian)
//! - [`crate::file::parser::Parser::read_bytes`] - Borrow a slice of raw bytes
//!
//! ## ABC Encodings
//! - [`crate::file::parser::Parser::read_u30`] - Variable-length unsigned integer
//! - [`crate::file::parser::Parser::read_s24`] - Signed 24-bit little-endian branch offset
//! - [`crate::file::parser::Parser::read_string_utf8`] - U30-length-prefixed UTF-8 string
//!
//! # Usage Examples
//!
//! ```rust
//! use abcscope::Parser;
//!
//! let data = [0x80, 0x01, 0xFC, 0xFF, 0xFF, 0x01, b'A'];
//! let mut parser = Parser::new(&data);
//!
//! assert_eq!(parser.read_u30()?, 128);
//! assert_eq!(parser.read_s24()?, -4);
//! assert_eq!(parser.read_string_utf8()?, "A");
//! assert!(!parser.has_more_data());
//! # Ok::<(), abcscope::Error>(())
//! ```

use crate::{
    file::io::{read_le_at, AbcIO},
    Result,
};

/// A generic binary data parser for reading ABC structures.
///
/// `Parser` maintains an internal position cursor over a borrowed byte slice and provides
/// bounds checking to prevent buffer overruns when reading malformed or truncated data.
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`crate::file::parser::Parser`] from a byte slice.
    ///
    /// # Arguments
    /// * `data` - The byte slice to read from
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use abcscope::Parser;
    /// let data = [0x01];
    /// let mut parser = Parser::new(&data);
    /// assert!(parser.has_more_data());
    ///
    /// let _byte = parser.read_le::<u8>()?;
    /// assert!(!parser.has_more_data());
    /// # Ok::<(), abcscope::Error>(())
    /// ```
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Get access to the underlying data buffer.
    #[must_use]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the number of bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Read a type `T` from the current position in little-endian format and advance the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use abcscope::Parser;
    /// let data = [0x10, 0x00, 0x2E, 0x00];
    /// let mut parser = Parser::new(&data);
    ///
    /// assert_eq!(parser.read_le::<u16>()?, 16);
    /// assert_eq!(parser.read_le::<u16>()?, 46);
    /// # Ok::<(), abcscope::Error>(())
    /// ```
    pub fn read_le<T: AbcIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a variable-length unsigned integer ("U30").
    ///
    /// Each byte contributes its low 7 bits, least significant group first; a set high bit
    /// signals that another byte follows. At most five bytes are consumed, and the fifth byte
    /// contributes all 8 of its bits. Bits shifted past 32 are silently dropped, so a 5-byte
    /// sequence may exceed the nominal 30-bit range; that value is returned unchanged.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the encoding is truncated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use abcscope::Parser;
    ///
    /// let mut parser = Parser::new(&[0x7F]);
    /// assert_eq!(parser.read_u30()?, 127);
    ///
    /// let mut parser = Parser::new(&[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]);
    /// assert_eq!(parser.read_u30()?, 0xFFFF_FFFF);
    /// # Ok::<(), abcscope::Error>(())
    /// ```
    pub fn read_u30(&mut self) -> Result<u32> {
        let mut value = 0u32;

        for index in 0..5 {
            let byte = self.read_le::<u8>()?;
            if index == 4 {
                value |= u32::from(byte) << 28;
                break;
            }

            value |= u32::from(byte & 0x7F) << (7 * index);
            if (byte & 0x80) == 0 {
                break;
            }
        }

        Ok(value)
    }

    /// Read a U30 and widen it to `usize`, for counts and lengths.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the encoding is truncated.
    pub fn read_u30_usize(&mut self) -> Result<usize> {
        Ok(self.read_u30()? as usize)
    }

    /// Read a signed 24-bit little-endian integer, as used by branch offsets.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if fewer than three bytes remain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use abcscope::Parser;
    ///
    /// let mut parser = Parser::new(&[0xFC, 0xFF, 0xFF, 0x10, 0x00, 0x00]);
    /// assert_eq!(parser.read_s24()?, -4);
    /// assert_eq!(parser.read_s24()?, 16);
    /// # Ok::<(), abcscope::Error>(())
    /// ```
    pub fn read_s24(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(3)?;
        let raw = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], 0]);

        Ok((raw << 8) >> 8)
    }

    /// Read a U30-length-prefixed UTF-8 string.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD` rather than rejected; compilers in
    /// the wild occasionally emit truncated multi-byte sequences in debug file names.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the declared length runs past the data.
    pub fn read_string_utf8(&mut self) -> Result<String> {
        let length = self.read_u30_usize()?;
        let bytes = self.read_bytes(length)?;

        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Calculates an end position safely with overflow checking.
    ///
    /// # Arguments
    /// * `length` - The length to add to the current position
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the calculation would overflow
    /// or if the resulting position exceeds the data bounds.
    pub fn calc_end_position(&self, length: usize) -> Result<usize> {
        let end = self
            .position
            .checked_add(length)
            .ok_or(out_of_bounds_error!(self.position))?;

        if end > self.data.len() {
            return Err(out_of_bounds_error!(self.position));
        }

        Ok(end)
    }

    /// Reads a slice of bytes of the specified length from the current position.
    ///
    /// # Arguments
    /// * `length` - The number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `length` bytes would exceed the data.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = self.calc_end_position(length)?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}
