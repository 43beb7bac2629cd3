use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds { position: None }
    };

    ($pos:expr) => {
        crate::Error::OutOfBounds {
            position: Some($pos),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every variant is fatal for the decode that produced it: a module either decodes completely or
/// not at all. The format is machine-generated, so any deviation means corrupt input or an
/// unsupported revision and the whole module is rejected.
///
/// # Error Categories
///
/// ## Structural Errors
/// - [`Error::Malformed`] - Corrupted or invalid module structure (bad tags, dangling indices)
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of the blob
/// - [`Error::Empty`] - Empty input provided
///
/// ## Format Errors
/// - [`Error::UnknownConstantKind`] - A typed constant used an undefined kind tag
/// - [`Error::UnknownTraitKind`] - A trait record used a kind nibble outside `0..=6`
/// - [`Error::UnknownOpcode`] - An instruction stream contained an undefined opcode byte
///
/// ## I/O Errors
/// - [`Error::FileError`] - Filesystem I/O errors
/// - [`Error::Error`] - Miscellaneous failures (e.g. memory mapping)
///
/// # Examples
///
/// ```rust
/// use abcscope::{AbcFile, Error};
///
/// match AbcFile::from_mem(vec![0x10, 0x00, 0x2E]) {
///     Ok(_) => println!("loaded"),
///     Err(Error::OutOfBounds { .. }) => println!("truncated module"),
///     Err(Error::Malformed { message, .. }) => println!("malformed: {}", message),
///     Err(e) => println!("other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The module is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected for
    /// debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the module.
    ///
    /// Raised for every short read: a truncated varint, a string whose declared length runs
    /// past the end of the blob, or a method body that ends in the middle of an operand.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds {
        /// Cursor position at which the read was attempted, when known
        position: Option<usize>,
    },

    /// A typed constant (optional parameter default, slot value) used an unknown kind tag.
    #[error("Unknown constant type - 0x{0:02X}")]
    UnknownConstantKind(u8),

    /// A trait record used a kind nibble outside of the defined range.
    #[error("Unrecognized trait kind - 0x{0:02X}")]
    UnknownTraitKind(u8),

    /// An instruction stream contained an opcode byte that is not part of the opcode table.
    #[error("Unknown opcode 0x{opcode:02X} at offset {offset}")]
    UnknownOpcode {
        /// The undefined opcode byte
        opcode: u8,
        /// Offset of the opcode within the method body code
        offset: usize,
    },

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps standard I/O errors that can occur while opening a module from disk.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
