//! Script records: the entry points of a module.

use crate::{
    file::parser::Parser,
    metadata::traits::{read_traits, Trait},
    Result,
};

/// One script of a module. The last script is the module's entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInfo {
    /// Method index of the script initializer
    pub initializer: u32,
    /// Global traits defined by the script
    pub traits: Vec<Trait>,
}

impl ScriptInfo {
    /// Reads one script record.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and the trait decoding errors.
    pub fn read(parser: &mut Parser) -> Result<ScriptInfo> {
        Ok(ScriptInfo {
            initializer: parser.read_u30()?,
            traits: read_traits(parser)?,
        })
    }
}
