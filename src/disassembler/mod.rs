//! AVM2 instruction disassembler.
//!
//! Method bodies carry their code as raw bytes. This module turns those bytes into typed
//! [`Operation`] records, one per instruction, using a fixed opcode table that selects the
//! operand layout for each opcode byte.
//!
//! # Key Types
//! - [`Operation`] - A decoded instruction (offset, size, opcode, operand)
//! - [`Operand`] - The decoded operand payload
//! - [`Opcode`] - Defined opcodes with mnemonic and [`OperandKind`]
//!
//! # Main Functions
//! - [`decode_operation`] - Decode a single instruction
//! - [`decode_stream`] - Decode instructions until the parser is exhausted
//! - [`decode_code`] - Decode a complete code blob
//!
//! Most callers never use these directly; [`crate::metadata::method::MethodBody::operations`]
//! decodes a body on first access and caches the result.
//!
//! # Example
//! ```rust
//! use abcscope::disassembler::decode_code;
//!
//! let operations = decode_code(&[0xD0, 0x30, 0x47])?;
//! for operation in &operations {
//!     println!("{operation}");
//! }
//! # Ok::<(), abcscope::Error>(())
//! ```

mod decoder;
mod instruction;
mod opcodes;

pub use decoder::{decode_code, decode_operation, decode_stream};
pub use instruction::{Operand, Operation};
pub use opcodes::{Opcode, OpcodeInfo, OperandKind, OPCODES};
