//! Load configuration for ABC modules
//!
//! Decoding always checks structure: every record must be complete and every tag known, and
//! indices between constant pool tables must resolve. This configuration controls the optional
//! work on top of that.

/// Configuration for [`crate::AbcFile`] loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadConfig {
    /// Verify that every index stored outside the constant pool (trait names, method and class
    /// references, exception types, metadata references) resolves after decoding
    pub validate_references: bool,

    /// Disassemble every method body during load instead of on first access
    /// A body that fails to disassemble fails the whole load
    pub disassemble: bool,

    /// Disassemble bodies on the rayon thread pool; only used together with `disassemble`
    pub parallel: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            validate_references: true,
            disassemble: false,
            parallel: false,
        }
    }
}

impl LoadConfig {
    /// Creates a minimal configuration for maximum load speed
    ///
    /// Only structural checks are performed, method bodies are disassembled lazily.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            validate_references: false,
            disassemble: false,
            parallel: false,
        }
    }

    /// Creates a configuration that validates references and disassembles every body up front,
    /// in parallel
    ///
    /// Loading fails if any body contains an undefined opcode or a truncated instruction.
    #[must_use]
    pub fn eager() -> Self {
        Self {
            validate_references: true,
            disassemble: true,
            parallel: true,
        }
    }
}
