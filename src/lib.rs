// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
// - 'file/physical.rs' opts back in to map a file into memory

//! # abcscope
//!
//! A decoder and disassembler for ActionScript Byte Code (ABC), the compiled module format
//! executed by the ActionScript Virtual Machine 2 and embedded in `DoABC` tags of SWF files.
//!
//! `abcscope` reads an extracted ABC blob into an immutable, index-addressed object model and
//! decodes method body bytecode into typed instructions on demand.
//!
//! ## Features
//!
//! - **Complete module model** - Constant pool, method signatures, metadata, classes, scripts
//!   and method bodies
//! - **Name resolution** - Multinames resolved to simple and qualified names, typed constants
//!   resolved to values
//! - **Lazy disassembly** - Each body is disassembled on first access and cached, safely
//!   across threads
//! - **Memory-mapped input** - Files are mapped instead of read where the platform allows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use abcscope::prelude::*;
//!
//! let abc = AbcFile::from_file("tests/samples/module.abc".as_ref())?;
//! println!("ABC {} with {} methods", abc.version(), abc.methods().len());
//!
//! for body in abc.method_bodies() {
//!     for operation in body.operations()? {
//!         println!("{operation}");
//!     }
//! }
//! # Ok::<(), abcscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`file`] - Input backends and the cursor [`Parser`] with the ABC primitive encodings
//! - [`metadata`] - The module object model and its loader, [`AbcFile`]
//! - [`disassembler`] - Opcode table and instruction decoder
//! - [`prelude`] - Convenient re-exports of commonly used types
//! - [`Error`] and [`Result`] - Error handling
//!
//! ## Error Handling
//!
//! Loading either yields a complete module or an error; there are no partial results.
//!
//! ```rust,no_run
//! use abcscope::{AbcFile, Error};
//!
//! match AbcFile::from_file("tests/samples/module.abc".as_ref()) {
//!     Ok(abc) => println!("Loaded ABC {}", abc.version()),
//!     Err(Error::OutOfBounds { position }) => println!("Truncated at {position:?}"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed: {message}"),
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! cargo +nightly fuzz run abcfile --release
//! ```

#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit tests
#[cfg(test)]
pub(crate) mod test;

pub mod file;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use abcscope::prelude::*;
///
/// let abc = AbcFile::from_file_with_config("tests/samples/module.abc".as_ref(), LoadConfig::eager())?;
/// println!("Found {} classes", abc.types().len());
/// # Ok::<(), abcscope::Error>(())
/// ```
pub mod prelude;

/// AVM2 opcode table and instruction decoder.
///
/// # Examples
///
/// ```rust
/// use abcscope::{disassembler::{decode_operation, Operand}, Parser};
///
/// let mut parser = Parser::new(&[0x24, 0xFF]); // pushbyte -1
/// let operation = decode_operation(&mut parser)?;
///
/// assert_eq!(operation.mnemonic(), "pushbyte");
/// assert_eq!(operation.operand, Operand::Int(-1));
/// # Ok::<(), abcscope::Error>(())
/// ```
pub mod disassembler;

/// The ABC module object model and its loader.
///
/// # Key Components
/// - [`AbcFile`] - A decoded module and the entry point for loading
/// - [`metadata::constantpool`] - Constant pool tables and name resolution
/// - [`metadata::method`] - Method signatures, bodies and exception handlers
/// - [`metadata::traits`] - Trait records attached to classes, scripts and bodies
/// - [`metadata::types`] - Instance and class records
pub mod metadata;

/// `abcscope` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `abcscope` Error type
///
/// The failure categories of every decoding operation.
pub use error::Error;

/// A decoded ABC module. See [`metadata::abcfile::AbcFile`].
pub use metadata::abcfile::AbcFile;

/// Load options for [`AbcFile`]. See [`metadata::config::LoadConfig`].
pub use metadata::config::LoadConfig;

/// Input file abstraction. See [`file::File`].
pub use file::File;

/// Binary cursor. See [`file::parser::Parser`].
pub use file::parser::Parser;
