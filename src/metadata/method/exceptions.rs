//! Exception table entries of a method body.

use crate::{file::parser::Parser, Result};

/// One entry of a method body's exception table.
///
/// The protected range is `from..to` in the body's code; control transfers to `target` when an
/// exception matching `exception_type` is thrown inside it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ExceptionInfo {
    /// Start of the protected range (code offset)
    pub from: u32,
    /// End of the protected range (code offset, exclusive)
    pub to: u32,
    /// Handler entry point (code offset)
    pub target: u32,
    /// Multiname index of the caught type, `0` catches everything
    pub exception_type: u32,
    /// Multiname index of the catch variable, `0` if unnamed
    pub var_name: u32,
}

impl ExceptionInfo {
    /// Reads one exception table entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input.
    pub fn read(parser: &mut Parser) -> Result<ExceptionInfo> {
        Ok(ExceptionInfo {
            from: parser.read_u30()?,
            to: parser.read_u30()?,
            target: parser.read_u30()?,
            exception_type: parser.read_u30()?,
            var_name: parser.read_u30()?,
        })
    }

    /// Returns `true` if `offset` lies in the protected range.
    #[must_use]
    pub fn covers(&self, offset: usize) -> bool {
        (self.from as usize..self.to as usize).contains(&offset)
    }
}
