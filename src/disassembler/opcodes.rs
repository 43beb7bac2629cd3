//! The AVM2 opcode table.
//!
//! Every defined opcode byte maps to an [`Opcode`], its assembler mnemonic and the
//! [`OperandKind`] that selects how its operand bytes are decoded. The table is a plain
//! 256-entry array indexed by the opcode byte; bytes without an entry are not valid
//! instructions.

use strum::{Display, EnumCount, EnumIter};

/// How the bytes following an opcode are decoded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum OperandKind {
    /// No operand
    None,
    /// No operand; records the position following the opcode byte
    Label,
    /// One integer, whose width and signedness depend on the opcode
    Int,
    /// Index into the unsigned integer table
    UInt,
    /// Index into the double table
    Double,
    /// Two raw little-endian signed 32-bit registers
    IntInt,
    /// The `debug` layout: U8, string index, U8, U30
    Debug,
    /// Index into the string table
    String,
    /// Index into the multiname table
    Multiname,
    /// Index into the multiname table followed by an argument count
    MultinameInt,
    /// Index into the namespace table
    Namespace,
    /// Unconditional signed 24-bit relative branch
    Jump,
    /// Conditional signed 24-bit relative branch
    ConditionalJump,
    /// Default branch plus a counted list of case branches
    LookupSwitch,
    /// Index into the class infos
    NewClass,
    /// Index into the enclosing body's exception table
    NewCatch,
    /// Index into the method signatures
    NewFunction,
    /// Index into the method signatures followed by an argument count
    Method,
}

/// Static description of a single opcode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OpcodeInfo {
    /// The opcode
    pub opcode: Opcode,
    /// Assembler mnemonic
    pub mnemonic: &'static str,
    /// Operand layout
    pub kind: OperandKind,
}

macro_rules! opcodes {
    ($($name:ident = $byte:literal, $mnemonic:literal, $kind:ident;)*) => {
        /// A defined AVM2 opcode; the discriminant is the opcode byte.
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount)]
        #[repr(u8)]
        pub enum Opcode {
            $(
                #[doc = concat!("`", $mnemonic, "`")]
                $name = $byte,
            )*
        }

        impl Opcode {
            /// Static description of this opcode.
            #[must_use]
            pub const fn info(self) -> OpcodeInfo {
                match self {
                    $(
                        Opcode::$name => OpcodeInfo {
                            opcode: Opcode::$name,
                            mnemonic: $mnemonic,
                            kind: OperandKind::$kind,
                        },
                    )*
                }
            }
        }

        const DEFINITIONS: &[Opcode] = &[$(Opcode::$name,)*];
    };
}

opcodes! {
    Breakpoint = 0x01, "bkpt", None;
    Nop = 0x02, "nop", None;
    Throw = 0x03, "throw", None;
    GetSuper = 0x04, "getsuper", Multiname;
    SetSuper = 0x05, "setsuper", Multiname;
    DefaultXmlNamespace = 0x06, "dxns", String;
    DefaultXmlNamespaceLate = 0x07, "dxnslate", None;
    Kill = 0x08, "kill", Int;
    Label = 0x09, "label", Label;
    IfNotLessThan = 0x0C, "ifnlt", ConditionalJump;
    IfNotLessEqual = 0x0D, "ifnle", ConditionalJump;
    IfNotGreaterThan = 0x0E, "ifngt", ConditionalJump;
    IfNotGreaterEqual = 0x0F, "ifnge", ConditionalJump;
    Jump = 0x10, "jump", Jump;
    IfTrue = 0x11, "iftrue", ConditionalJump;
    IfFalse = 0x12, "iffalse", ConditionalJump;
    IfEqual = 0x13, "ifeq", ConditionalJump;
    IfNotEqual = 0x14, "ifne", ConditionalJump;
    IfLessThan = 0x15, "iflt", ConditionalJump;
    IfLessEqual = 0x16, "ifle", ConditionalJump;
    IfGreaterThan = 0x17, "ifgt", ConditionalJump;
    IfGreaterEqual = 0x18, "ifge", ConditionalJump;
    IfStrictEqual = 0x19, "ifstricteq", ConditionalJump;
    IfStrictNotEqual = 0x1A, "ifstrictne", ConditionalJump;
    LookupSwitch = 0x1B, "lookupswitch", LookupSwitch;
    PushWith = 0x1C, "pushwith", None;
    PopScope = 0x1D, "popscope", None;
    NextName = 0x1E, "nextname", None;
    HasNext = 0x1F, "hasnext", None;
    PushNull = 0x20, "pushnull", None;
    PushUndefined = 0x21, "pushundefined", None;
    NextValue = 0x23, "nextvalue", None;
    PushByte = 0x24, "pushbyte", Int;
    PushShort = 0x25, "pushshort", Int;
    PushTrue = 0x26, "pushtrue", None;
    PushFalse = 0x27, "pushfalse", None;
    PushNaN = 0x28, "pushnan", None;
    Pop = 0x29, "pop", None;
    Dup = 0x2A, "dup", None;
    Swap = 0x2B, "swap", None;
    PushString = 0x2C, "pushstring", String;
    PushInt = 0x2D, "pushint", Int;
    PushUInt = 0x2E, "pushuint", UInt;
    PushDouble = 0x2F, "pushdouble", Double;
    PushScope = 0x30, "pushscope", None;
    PushNamespace = 0x31, "pushnamespace", Namespace;
    HasNext2 = 0x32, "hasnext2", IntInt;
    GetByte = 0x35, "li8", None;
    GetShort = 0x36, "li16", None;
    GetInt = 0x37, "li32", None;
    GetFloat = 0x38, "lf32", None;
    GetDouble = 0x39, "lf64", None;
    SetByte = 0x3A, "si8", None;
    SetShort = 0x3B, "si16", None;
    SetInt = 0x3C, "si32", None;
    SetFloat = 0x3D, "sf32", None;
    SetDouble = 0x3E, "sf64", None;
    NewFunction = 0x40, "newfunction", NewFunction;
    Call = 0x41, "call", Int;
    Construct = 0x42, "construct", Int;
    CallMethod = 0x43, "callmethod", Method;
    CallStatic = 0x44, "callstatic", Method;
    CallSuper = 0x45, "callsuper", MultinameInt;
    CallProperty = 0x46, "callproperty", MultinameInt;
    ReturnVoid = 0x47, "returnvoid", None;
    ReturnValue = 0x48, "returnvalue", None;
    ConstructSuper = 0x49, "constructsuper", Int;
    ConstructProp = 0x4A, "constructprop", MultinameInt;
    CallPropLex = 0x4C, "callproplex", MultinameInt;
    CallSuperVoid = 0x4E, "callsupervoid", MultinameInt;
    CallPropVoid = 0x4F, "callpropvoid", MultinameInt;
    Sign1 = 0x50, "sxi1", None;
    Sign8 = 0x51, "sxi8", None;
    Sign16 = 0x52, "sxi16", None;
    ApplyType = 0x53, "applytype", Int;
    NewObject = 0x55, "newobject", Int;
    NewArray = 0x56, "newarray", Int;
    NewActivation = 0x57, "newactivation", None;
    NewClass = 0x58, "newclass", NewClass;
    GetDescendants = 0x59, "getdescendants", Multiname;
    NewCatch = 0x5A, "newcatch", NewCatch;
    FindPropStrict = 0x5D, "findpropstrict", Multiname;
    FindProperty = 0x5E, "findproperty", Multiname;
    GetLex = 0x60, "getlex", Multiname;
    SetProperty = 0x61, "setproperty", Multiname;
    GetLocal = 0x62, "getlocal", Int;
    SetLocal = 0x63, "setlocal", Int;
    GetGlobalScope = 0x64, "getglobalscope", None;
    GetScopeObject = 0x65, "getscopeobject", Int;
    GetProperty = 0x66, "getproperty", Multiname;
    GetPropertyLate = 0x67, "getpropertylate", None;
    InitProperty = 0x68, "initproperty", Multiname;
    SetPropertyLate = 0x69, "setpropertylate", None;
    DeleteProperty = 0x6A, "deleteproperty", Multiname;
    DeletePropertyLate = 0x6B, "deletepropertylate", None;
    GetSlot = 0x6C, "getslot", Int;
    SetSlot = 0x6D, "setslot", Int;
    GetGlobalSlot = 0x6E, "getglobalslot", Int;
    SetGlobalSlot = 0x6F, "setglobalslot", Int;
    ConvertString = 0x70, "convert_s", None;
    EscXmlElem = 0x71, "esc_xelem", None;
    EscXmlAttr = 0x72, "esc_xattr", None;
    ConvertInt = 0x73, "convert_i", None;
    ConvertUInt = 0x74, "convert_u", None;
    ConvertDouble = 0x75, "convert_d", None;
    ConvertBoolean = 0x76, "convert_b", None;
    ConvertObject = 0x77, "convert_o", None;
    CheckFilter = 0x78, "checkfilter", None;
    Coerce = 0x80, "coerce", Multiname;
    CoerceBoolean = 0x81, "coerce_b", None;
    CoerceAny = 0x82, "coerce_a", None;
    CoerceInt = 0x83, "coerce_i", None;
    CoerceDouble = 0x84, "coerce_d", None;
    CoerceString = 0x85, "coerce_s", None;
    AsType = 0x86, "astype", Multiname;
    AsTypeLate = 0x87, "astypelate", None;
    CoerceUInt = 0x88, "coerce_u", None;
    CoerceObject = 0x89, "coerce_o", None;
    Negate = 0x90, "negate", None;
    Increment = 0x91, "increment", None;
    IncLocal = 0x92, "inclocal", Int;
    Decrement = 0x93, "decrement", None;
    DecLocal = 0x94, "declocal", Int;
    TypeOf = 0x95, "typeof", None;
    Not = 0x96, "not", None;
    BitNot = 0x97, "bitnot", None;
    Concat = 0x9A, "concat", None;
    AddDouble = 0x9B, "add_d", None;
    Add = 0xA0, "add", None;
    Subtract = 0xA1, "subtract", None;
    Multiply = 0xA2, "multiply", None;
    Divide = 0xA3, "divide", None;
    Modulo = 0xA4, "modulo", None;
    ShiftLeft = 0xA5, "lshift", None;
    ShiftRight = 0xA6, "rshift", None;
    ShiftRightUnsigned = 0xA7, "urshift", None;
    BitAnd = 0xA8, "bitand", None;
    BitOr = 0xA9, "bitor", None;
    BitXor = 0xAA, "bitxor", None;
    Equals = 0xAB, "equals", None;
    StrictEquals = 0xAC, "strictequals", None;
    LessThan = 0xAD, "lessthan", None;
    LessEquals = 0xAE, "lessequals", None;
    GreaterThan = 0xAF, "greaterthan", None;
    GreaterEquals = 0xB0, "greaterequals", None;
    InstanceOf = 0xB1, "instanceof", None;
    IsType = 0xB2, "istype", Multiname;
    IsTypeLate = 0xB3, "istypelate", None;
    In = 0xB4, "in", None;
    IncrementInt = 0xC0, "increment_i", None;
    DecrementInt = 0xC1, "decrement_i", None;
    IncLocalInt = 0xC2, "inclocal_i", Int;
    DecLocalInt = 0xC3, "declocal_i", Int;
    NegateInt = 0xC4, "negate_i", None;
    AddInt = 0xC5, "add_i", None;
    SubtractInt = 0xC6, "subtract_i", None;
    MultiplyInt = 0xC7, "multiply_i", None;
    GetLocal0 = 0xD0, "getlocal0", None;
    GetLocal1 = 0xD1, "getlocal1", None;
    GetLocal2 = 0xD2, "getlocal2", None;
    GetLocal3 = 0xD3, "getlocal3", None;
    SetLocal0 = 0xD4, "setlocal0", None;
    SetLocal1 = 0xD5, "setlocal1", None;
    SetLocal2 = 0xD6, "setlocal2", None;
    SetLocal3 = 0xD7, "setlocal3", None;
    Debug = 0xEF, "debug", Debug;
    DebugLine = 0xF0, "debugline", Int;
    DebugFile = 0xF1, "debugfile", String;
    BreakpointLine = 0xF2, "bkptline", None;
}

const fn build_table() -> [Option<OpcodeInfo>; 256] {
    let mut table = [None; 256];

    let mut index = 0;
    while index < DEFINITIONS.len() {
        let opcode = DEFINITIONS[index];
        table[opcode as usize] = Some(opcode.info());
        index += 1;
    }

    table
}

/// Opcode descriptions indexed by opcode byte; `None` marks an undefined byte.
pub static OPCODES: [Option<OpcodeInfo>; 256] = build_table();

impl Opcode {
    /// Looks up the opcode for a byte, `None` if the byte is not a defined opcode.
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Opcode> {
        OPCODES[byte as usize].map(|info| info.opcode)
    }

    /// The opcode byte.
    #[must_use]
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Assembler mnemonic, e.g. `pushbyte`.
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        self.info().mnemonic
    }

    /// Operand layout of this opcode.
    #[must_use]
    pub fn operand_kind(self) -> OperandKind {
        self.info().kind
    }

    /// Returns `true` for opcodes that may transfer control to a branch target.
    #[must_use]
    pub fn is_branch(self) -> bool {
        matches!(
            self.operand_kind(),
            OperandKind::Jump | OperandKind::ConditionalJump | OperandKind::LookupSwitch
        )
    }
}
