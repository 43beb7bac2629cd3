//! Decoded AVM2 instructions.
//!
//! An [`Operation`] is one instruction of a method body: where it starts, how many bytes it
//! spans, its [`Opcode`] and its decoded [`Operand`]. Pool-referencing operands keep the raw
//! table index; resolve them through [`crate::metadata::constantpool::ConstantPool`].

use std::fmt;

use crate::disassembler::Opcode;

/// Decoded operand of an instruction.
///
/// Branch targets are absolute offsets within the method body code. They are signed because a
/// malformed relative offset may point before the start of the body; decoding does not reject
/// such targets.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Operand {
    /// No operand
    None,
    /// Position following the `label` opcode byte
    Label(usize),
    /// Immediate integer (local register, slot, argument count, literal)
    Int(i32),
    /// Index into the unsigned integer table
    UInt(u32),
    /// Index into the double table
    Double(u32),
    /// Object and index registers of `hasnext2`
    IntInt(i32, i32),
    /// Fields of a `debug` instruction
    Debug {
        /// Debug record type
        debug_type: u8,
        /// String table index of the register name
        name: u32,
        /// Register number
        register: u8,
        /// Extra data, unused by current compilers
        extra: u32,
    },
    /// Index into the string table
    String(u32),
    /// Index into the multiname table
    Multiname(u32),
    /// Index into the multiname table plus argument count
    MultinameInt {
        /// Multiname table index
        multiname: u32,
        /// Number of arguments taken from the stack
        arg_count: u32,
    },
    /// Index into the namespace table
    Namespace(u32),
    /// Absolute branch target
    Jump(i64),
    /// Branch targets of a `lookupswitch`
    LookupSwitch {
        /// Target when the index is out of range
        default: i64,
        /// Targets for case `0..cases.len()`
        cases: Vec<i64>,
    },
    /// Index into the class infos
    NewClass(u32),
    /// Index into the body's exception table
    NewCatch(u32),
    /// Index into the method signatures
    NewFunction(u32),
    /// Index into the method signatures plus argument count
    Method {
        /// Method signature index (or dispatch id for `callmethod`)
        method: u32,
        /// Number of arguments taken from the stack
        arg_count: u32,
    },
}

/// One decoded instruction.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Operation {
    /// Offset of the opcode byte within the method body code
    pub offset: usize,
    /// Encoded size in bytes, opcode included
    pub size: usize,
    /// The opcode
    pub opcode: Opcode,
    /// The decoded operand
    pub operand: Operand,
}

impl Operation {
    /// Assembler mnemonic of the opcode.
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        self.opcode.mnemonic()
    }

    /// Absolute branch targets of this instruction, empty for non-branching opcodes.
    #[must_use]
    pub fn branch_targets(&self) -> Vec<i64> {
        match &self.operand {
            Operand::Jump(target) => vec![*target],
            Operand::LookupSwitch { default, cases } => {
                let mut targets = Vec::with_capacity(cases.len() + 1);
                targets.push(*default);
                targets.extend_from_slice(cases);
                targets
            }
            _ => Vec::new(),
        }
    }
}

/// Writes a branch target in the same hex form as instruction offsets.
fn write_target(f: &mut fmt::Formatter<'_>, target: i64) -> fmt::Result {
    if target < 0 {
        write!(f, "L-{:04X}", target.unsigned_abs())
    } else {
        write!(f, "L{target:04X}")
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Label(position) => write!(f, "L{position:04X}"),
            Operand::Int(value) => write!(f, "{value}"),
            Operand::IntInt(object, index) => write!(f, "{object}, {index}"),
            Operand::UInt(index) => write!(f, "uint[{index}]"),
            Operand::Double(index) => write!(f, "double[{index}]"),
            Operand::String(index) => write!(f, "string[{index}]"),
            Operand::Multiname(index) => write!(f, "multiname[{index}]"),
            Operand::Namespace(index) => write!(f, "namespace[{index}]"),
            Operand::MultinameInt {
                multiname,
                arg_count,
            } => write!(f, "multiname[{multiname}], {arg_count}"),
            Operand::Debug {
                debug_type,
                name,
                register,
                extra,
            } => write!(f, "{debug_type}, string[{name}], {register}, {extra}"),
            Operand::Jump(target) => write_target(f, *target),
            Operand::LookupSwitch { default, cases } => {
                write_target(f, *default)?;
                write!(f, ", [")?;
                for (index, case) in cases.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write_target(f, *case)?;
                }
                write!(f, "]")
            }
            Operand::NewClass(index) => write!(f, "class[{index}]"),
            Operand::NewCatch(index) => write!(f, "exception[{index}]"),
            Operand::NewFunction(index) => write!(f, "method[{index}]"),
            Operand::Method { method, arg_count } => write!(f, "method[{method}], {arg_count}"),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}: {}", self.offset, self.mnemonic())?;
        if self.operand != Operand::None {
            write!(f, " {}", self.operand)?;
        }

        Ok(())
    }
}
