//! # abcscope Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! abcscope library. Import this module to get quick access to the essential types for ABC
//! module analysis.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all abcscope operations
pub use crate::Error;

/// The result type used throughout abcscope
pub use crate::Result;

/// Options controlling validation and disassembly during loading
pub use crate::LoadConfig;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Main entry point for ABC module analysis
pub use crate::AbcFile;

/// Module version header
pub use crate::metadata::abcfile::AbcVersion;

/// Low-level file parsing utilities
pub use crate::{File, Parser};

// ================================================================================================
// Constant Pool
// ================================================================================================

/// Constant pool tables and name resolution
pub use crate::metadata::constantpool::{
    Constant, ConstantKind, ConstantPool, Multiname, Namespace, NamespaceKind, NamespaceSet,
    Value,
};

// ================================================================================================
// Module Records
// ================================================================================================

/// Method signatures, bodies and exception handlers
pub use crate::metadata::method::{ExceptionInfo, MethodBody, MethodDesc, MethodFlags};

/// Traits attached to classes, scripts and bodies
pub use crate::metadata::traits::{Trait, TraitAttributes, TraitData, TraitKind};

/// Classes, scripts and metadata entries
pub use crate::metadata::{
    annotation::{MetadataInfo, MetadataItem},
    script::ScriptInfo,
    types::{ClassInfo, InstanceFlags, InstanceInfo, TypeInfo},
};

// ================================================================================================
// Disassembly
// ================================================================================================

/// Decoded instructions and the opcode table
pub use crate::disassembler::{
    decode_code, decode_operation, decode_stream, Opcode, Operand, OperandKind, Operation,
};
