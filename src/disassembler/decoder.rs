//! AVM2 instruction decoding.
//!
//! [`decode_operation`] reads one opcode byte, looks up its [`OperandKind`] in the opcode table
//! and decodes the operand bytes accordingly. [`decode_stream`] repeats that until the code is
//! exhausted. Any undefined opcode or truncated operand fails the whole stream.
//!
//! # Example: Decoding a Single Instruction
//!
//! ```rust
//! use abcscope::{Parser, disassembler::{decode_operation, Opcode, Operand}};
//!
//! let code = [0x24, 0xFF]; // pushbyte -1
//! let mut parser = Parser::new(&code);
//! let operation = decode_operation(&mut parser)?;
//! assert_eq!(operation.opcode, Opcode::PushByte);
//! assert_eq!(operation.operand, Operand::Int(-1));
//! # Ok::<(), abcscope::Error>(())
//! ```
//!
//! # Example: Decoding a Stream of Instructions
//!
//! ```rust
//! use abcscope::{Parser, disassembler::decode_stream};
//!
//! let code = [0xD0, 0x30, 0x47]; // getlocal0, pushscope, returnvoid
//! let mut parser = Parser::new(&code);
//! let operations = decode_stream(&mut parser)?;
//! assert_eq!(operations.len(), 3);
//! assert_eq!(operations[2].mnemonic(), "returnvoid");
//! # Ok::<(), abcscope::Error>(())
//! ```

use crate::{
    disassembler::{Opcode, Operand, OperandKind, Operation},
    file::parser::Parser,
    Error::UnknownOpcode,
    Result,
};

/// Decodes every instruction from the parser's current position to the end of its data.
///
/// # Arguments
/// * `parser` - Parser over the method body code
///
/// # Errors
/// Returns [`crate::Error::UnknownOpcode`] for an undefined opcode byte and
/// [`crate::Error::OutOfBounds`] if the code ends in the middle of an operand.
pub fn decode_stream(parser: &mut Parser) -> Result<Vec<Operation>> {
    let mut operations = Vec::new();

    while parser.has_more_data() {
        operations.push(decode_operation(parser)?);
    }

    Ok(operations)
}

/// Decodes a complete method body code blob.
///
/// # Errors
/// See [`decode_stream`].
pub fn decode_code(code: &[u8]) -> Result<Vec<Operation>> {
    decode_stream(&mut Parser::new(code))
}

/// Decodes the instruction at the parser's current position and advances past it.
///
/// # Errors
/// Returns [`crate::Error::UnknownOpcode`] for an undefined opcode byte and
/// [`crate::Error::OutOfBounds`] for a truncated operand.
pub fn decode_operation(parser: &mut Parser) -> Result<Operation> {
    let offset = parser.pos();
    let byte = parser.read_le::<u8>()?;

    let Some(opcode) = Opcode::from_byte(byte) else {
        return Err(UnknownOpcode {
            opcode: byte,
            offset,
        });
    };

    let operand = match opcode.operand_kind() {
        OperandKind::None => Operand::None,
        OperandKind::Label => Operand::Label(parser.pos()),
        OperandKind::Int => Operand::Int(decode_int(opcode, parser)?),
        OperandKind::UInt => Operand::UInt(parser.read_u30()?),
        OperandKind::Double => Operand::Double(parser.read_u30()?),
        OperandKind::IntInt => {
            Operand::IntInt(parser.read_le::<i32>()?, parser.read_le::<i32>()?)
        }
        OperandKind::Debug => Operand::Debug {
            debug_type: parser.read_le::<u8>()?,
            name: parser.read_u30()?,
            register: parser.read_le::<u8>()?,
            extra: parser.read_u30()?,
        },
        OperandKind::String => Operand::String(parser.read_u30()?),
        OperandKind::Multiname => Operand::Multiname(parser.read_u30()?),
        OperandKind::MultinameInt => Operand::MultinameInt {
            multiname: parser.read_u30()?,
            arg_count: parser.read_u30()?,
        },
        OperandKind::Namespace => Operand::Namespace(parser.read_u30()?),
        OperandKind::Jump | OperandKind::ConditionalJump => {
            Operand::Jump(decode_branch_target(parser)?)
        }
        OperandKind::LookupSwitch => decode_lookup_switch(parser)?,
        OperandKind::NewClass => Operand::NewClass(parser.read_u30()?),
        OperandKind::NewCatch => Operand::NewCatch(parser.read_u30()?),
        OperandKind::NewFunction => Operand::NewFunction(parser.read_u30()?),
        OperandKind::Method => Operand::Method {
            method: parser.read_u30()?,
            arg_count: parser.read_u30()?,
        },
    };

    Ok(Operation {
        offset,
        size: parser.pos() - offset,
        opcode,
        operand,
    })
}

/// Integer operands are U30 except for three opcodes with their own layout.
#[allow(clippy::cast_possible_wrap)]
fn decode_int(opcode: Opcode, parser: &mut Parser) -> Result<i32> {
    Ok(match opcode {
        Opcode::GetScopeObject => i32::from(parser.read_le::<u8>()?),
        Opcode::PushByte => i32::from(parser.read_le::<i8>()?),
        // sign-extend from bit 29
        Opcode::PushShort => ((parser.read_u30()? << 2) as i32) >> 2,
        _ => parser.read_u30()? as i32,
    })
}

/// Reads an S24 offset and resolves it against the position right after it.
fn decode_branch_target(parser: &mut Parser) -> Result<i64> {
    let relative = parser.read_s24()?;
    Ok(parser.pos() as i64 + i64::from(relative))
}

fn decode_lookup_switch(parser: &mut Parser) -> Result<Operand> {
    let default = decode_branch_target(parser)?;
    let case_count = parser.read_u30_usize()?.saturating_add(1);

    let mut cases = Vec::with_capacity(case_count.min(parser.remaining() / 3));
    for _ in 0..case_count {
        cases.push(decode_branch_target(parser)?);
    }

    Ok(Operand::LookupSwitch { default, cases })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn single(code: &[u8]) -> Operation {
        let mut parser = Parser::new(code);
        let operation = decode_operation(&mut parser).unwrap();
        assert_eq!(operation.size, code.len());
        assert!(!parser.has_more_data());
        operation
    }

    #[test]
    fn push_byte_is_signed() {
        assert_eq!(single(&[0x24, 0xFF]).operand, Operand::Int(-1));
        assert_eq!(single(&[0x24, 0x7F]).operand, Operand::Int(127));
        assert_eq!(single(&[0x24, 0x80]).operand, Operand::Int(-128));
    }

    #[test]
    fn push_short_narrows_to_30_bits() {
        assert_eq!(
            single(&[0x25, 0xFF, 0xFF, 0xFF, 0xFF, 0x03]).operand,
            Operand::Int(-1)
        );
        assert_eq!(single(&[0x25, 0xFF, 0x7F]).operand, Operand::Int(16_383));
        // 0x20000000 has bit 29 set
        assert_eq!(
            single(&[0x25, 0x80, 0x80, 0x80, 0x80, 0x02]).operand,
            Operand::Int(-0x2000_0000)
        );
    }

    #[test]
    fn get_scope_object_reads_a_byte() {
        let operation = single(&[0x65, 0x80]);
        assert_eq!(operation.operand, Operand::Int(128));
    }

    #[test]
    fn push_int_keeps_raw_u30() {
        assert_eq!(
            single(&[0x2D, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F]).operand,
            Operand::Int(-1)
        );
        assert_eq!(single(&[0x62, 0x05]).operand, Operand::Int(5));
    }

    #[test]
    fn conditional_jump_backwards_to_itself() {
        let code = [0x02, 0x02, 0x11, 0xFC, 0xFF, 0xFF];
        let mut parser = Parser::new(&code);
        let operations = decode_stream(&mut parser).unwrap();

        let branch = &operations[2];
        assert_eq!(branch.opcode, Opcode::IfTrue);
        assert_eq!(branch.offset, 2);
        assert_eq!(branch.operand, Operand::Jump(2));
        assert_eq!(branch.size, 4);
    }

    #[test]
    fn jump_forward() {
        let operation = single(&[0x10, 0x10, 0x00, 0x00]);
        assert_eq!(operation.operand, Operand::Jump(20));
        assert!(operation.opcode.is_branch());
    }

    #[test]
    fn has_next2_reads_raw_registers() {
        let operation = single(&[0x32, 0x01, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(operation.operand, Operand::IntInt(1, -1));
        assert_eq!(operation.size, 9);
    }

    #[test]
    fn lookup_switch() {
        // default +3, one extra case (count 1 means two cases), cases +0 and -10
        let code = [0x1B, 0x03, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0xF6, 0xFF, 0xFF];
        let operation = single(&code);

        assert_eq!(
            operation.operand,
            Operand::LookupSwitch {
                default: 7,
                cases: vec![8, 1],
            }
        );
        assert_eq!(operation.branch_targets(), vec![7, 8, 1]);
    }

    #[test]
    fn label_records_position() {
        let code = [0x02, 0x09];
        let operations = decode_code(&code).unwrap();
        assert_eq!(operations[1].operand, Operand::Label(2));
        assert_eq!(operations[1].size, 1);
    }

    #[test]
    fn debug_layout() {
        let operation = single(&[0xEF, 0x01, 0x05, 0x02, 0x00]);
        assert_eq!(
            operation.operand,
            Operand::Debug {
                debug_type: 1,
                name: 5,
                register: 2,
                extra: 0
            }
        );
    }

    #[test]
    fn pool_and_method_operands() {
        assert_eq!(
            single(&[0x46, 0x03, 0x02]).operand,
            Operand::MultinameInt {
                multiname: 3,
                arg_count: 2
            }
        );
        assert_eq!(
            single(&[0x44, 0x07, 0x00]).operand,
            Operand::Method {
                method: 7,
                arg_count: 0
            }
        );
        assert_eq!(single(&[0x2C, 0x04]).operand, Operand::String(4));
        assert_eq!(single(&[0x06, 0x04]).operand, Operand::String(4));
        assert_eq!(single(&[0x2F, 0x01]).operand, Operand::Double(1));
        assert_eq!(single(&[0x31, 0x02]).operand, Operand::Namespace(2));
        assert_eq!(single(&[0x58, 0x00]).operand, Operand::NewClass(0));
        assert_eq!(single(&[0x5A, 0x01]).operand, Operand::NewCatch(1));
        assert_eq!(single(&[0x40, 0x09]).operand, Operand::NewFunction(9));
    }

    #[test]
    fn unknown_opcode() {
        let code = [0x02, 0x02, 0xFF];
        assert!(matches!(
            decode_code(&code),
            Err(Error::UnknownOpcode {
                opcode: 0xFF,
                offset: 2
            })
        ));
    }

    #[test]
    fn truncated_operand() {
        assert!(matches!(
            decode_code(&[0x10, 0x01]),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            decode_code(&[0x46, 0x01]),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn empty_code() {
        assert!(decode_code(&[]).unwrap().is_empty());
    }
}
