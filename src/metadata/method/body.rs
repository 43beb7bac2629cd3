//! Method bodies and their lazily disassembled instruction lists.
//!
//! A body owns its raw code bytes. Instructions are decoded on first request through
//! [`MethodBody::operations`] and cached for the lifetime of the module; the code never changes
//! after decoding, so the cache is never invalidated.
//!
//! # Examples
//!
//! ```rust,no_run
//! use abcscope::AbcFile;
//!
//! let abc = AbcFile::from_file("tests/samples/module.abc".as_ref())?;
//! for body in abc.method_bodies() {
//!     println!("method {}: {} bytes of code", body.method, body.code.len());
//!     for operation in body.operations()? {
//!         println!("  {operation}");
//!     }
//! }
//! # Ok::<(), abcscope::Error>(())
//! ```

use std::sync::OnceLock;

use tracing::debug;

use crate::{
    disassembler::{decode_code, Operation},
    file::parser::Parser,
    metadata::{
        method::ExceptionInfo,
        traits::{read_traits, Trait},
    },
    Result,
};

/// A decoded method body.
#[derive(Debug)]
pub struct MethodBody {
    /// Index of the method signature this body implements
    pub method: u32,
    /// Maximum operand stack depth
    pub max_stack: u32,
    /// Number of local registers, parameters included
    pub local_count: u32,
    /// Scope stack depth on entry
    pub init_scope_depth: u32,
    /// Maximum scope stack depth
    pub max_scope_depth: u32,
    /// Raw instruction bytes
    pub code: Vec<u8>,
    /// Exception handlers, innermost first
    pub exceptions: Vec<ExceptionInfo>,
    /// Traits of the activation object
    pub traits: Vec<Trait>,
    operations: OnceLock<Vec<Operation>>,
}

impl MethodBody {
    /// Reads one method body record. The code is copied, not decoded.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and the trait decoding errors
    /// of [`crate::metadata::traits::Trait::read`].
    pub fn read(parser: &mut Parser) -> Result<MethodBody> {
        let method = parser.read_u30()?;
        let max_stack = parser.read_u30()?;
        let local_count = parser.read_u30()?;
        let init_scope_depth = parser.read_u30()?;
        let max_scope_depth = parser.read_u30()?;

        let code_length = parser.read_u30_usize()?;
        let code = parser.read_bytes(code_length)?.to_vec();

        let exception_count = parser.read_u30_usize()?;
        let mut exceptions = Vec::with_capacity(exception_count.min(parser.remaining()));
        for _ in 0..exception_count {
            exceptions.push(ExceptionInfo::read(parser)?);
        }

        let traits = read_traits(parser)?;

        Ok(MethodBody {
            method,
            max_stack,
            local_count,
            init_scope_depth,
            max_scope_depth,
            code,
            exceptions,
            traits,
            operations: OnceLock::new(),
        })
    }

    /// The decoded instructions of this body, decoding them on first access.
    ///
    /// Concurrent first calls may each decode the code; one result is kept and the others are
    /// dropped. Every call observes the same list.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownOpcode`] or [`crate::Error::OutOfBounds`] if the code is
    /// malformed. Nothing is cached on failure.
    pub fn operations(&self) -> Result<&[Operation]> {
        if let Some(operations) = self.operations.get() {
            return Ok(operations);
        }

        let decoded = decode_code(&self.code)?;
        debug!(
            method = self.method,
            operations = decoded.len(),
            "disassembled method body"
        );

        Ok(self.operations.get_or_init(|| decoded))
    }

    /// Returns `true` once the instruction list has been decoded.
    #[must_use]
    pub fn is_disassembled(&self) -> bool {
        self.operations.get().is_some()
    }

    /// Exception handlers whose protected range covers `offset`.
    pub fn handlers_at(&self, offset: usize) -> impl Iterator<Item = &ExceptionInfo> {
        self.exceptions
            .iter()
            .filter(move |handler| handler.covers(offset))
    }
}
