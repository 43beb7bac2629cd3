//! Multinames: the name references used by every other part of a module.
//!
//! A multiname is one of eleven encodings sharing the multiname table. Qualified names carry
//! both namespace and name, runtime-qualified names defer the namespace (and for the `L`
//! forms also the name) to values on the operand stack, and the ambiguous forms resolve
//! against a namespace set. `TypeName` applies type parameters to a generic base type
//! (`Vector.<int>`).
//!
//! Every variant stores indices into the pool tables and never copies pool values. Names are
//! resolved through [`crate::metadata::constantpool::ConstantPool`].

use crate::{file::parser::Parser, Result};

/// Multiname tag bytes as they appear in the multiname table.
pub mod tag {
    /// Qualified name
    pub const QNAME: u8 = 0x07;
    /// Qualified attribute name
    pub const QNAME_A: u8 = 0x0D;
    /// Runtime-qualified name
    pub const RTQNAME: u8 = 0x0F;
    /// Runtime-qualified attribute name
    pub const RTQNAME_A: u8 = 0x10;
    /// Runtime-qualified late-bound name
    pub const RTQNAME_L: u8 = 0x11;
    /// Runtime-qualified late-bound attribute name
    pub const RTQNAME_LA: u8 = 0x12;
    /// Name resolved against a namespace set
    pub const MULTINAME: u8 = 0x09;
    /// Attribute name resolved against a namespace set
    pub const MULTINAME_A: u8 = 0x0E;
    /// Late-bound name resolved against a namespace set
    pub const MULTINAME_L: u8 = 0x1B;
    /// Late-bound attribute name resolved against a namespace set
    pub const MULTINAME_LA: u8 = 0x1C;
    /// Generic type application
    pub const TYPENAME: u8 = 0x1D;
}

/// A decoded multiname table entry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Multiname {
    /// Fully qualified name
    QName {
        /// Namespace table index
        namespace: u32,
        /// String table index
        name: u32,
    },
    /// Fully qualified attribute name (`@ns::name`)
    QNameAttribute {
        /// Namespace table index
        namespace: u32,
        /// String table index
        name: u32,
    },
    /// Name whose namespace is taken from the stack at runtime
    RTQName {
        /// String table index
        name: u32,
    },
    /// Attribute name whose namespace is taken from the stack at runtime
    RTQNameAttribute {
        /// String table index
        name: u32,
    },
    /// Name and namespace both taken from the stack at runtime
    RTQNameLate,
    /// Attribute name and namespace both taken from the stack at runtime
    RTQNameLateAttribute,
    /// Name resolved against a set of candidate namespaces
    Multiname {
        /// String table index
        name: u32,
        /// Namespace-set table index
        namespace_set: u32,
    },
    /// Attribute name resolved against a set of candidate namespaces
    MultinameAttribute {
        /// String table index
        name: u32,
        /// Namespace-set table index
        namespace_set: u32,
    },
    /// Name taken from the stack, resolved against a set of candidate namespaces
    MultinameLate {
        /// Namespace-set table index
        namespace_set: u32,
    },
    /// Attribute name taken from the stack, resolved against a set of candidate namespaces
    MultinameLateAttribute {
        /// Namespace-set table index
        namespace_set: u32,
    },
    /// Generic type application such as `Vector.<String>`
    TypeName {
        /// Multiname table index of the generic base type
        base: u32,
        /// Multiname table indices of the type parameters
        parameters: Vec<u32>,
    },
}

impl Multiname {
    /// The implicit entry at index 0 of the multiname table, the "any name" (`*`).
    pub const ANY: Multiname = Multiname::QName {
        namespace: 0,
        name: 0,
    };

    /// Reads one multiname entry: a tag byte followed by the tag's fields.
    ///
    /// Indices are returned as read; range checks happen once the whole table is known,
    /// because `TypeName` may refer to entries that follow it.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for an unknown tag and
    /// [`crate::Error::OutOfBounds`] for truncated input.
    pub(crate) fn read(parser: &mut Parser) -> Result<Multiname> {
        let kind = parser.read_le::<u8>()?;

        Ok(match kind {
            tag::QNAME => Multiname::QName {
                namespace: parser.read_u30()?,
                name: parser.read_u30()?,
            },
            tag::QNAME_A => Multiname::QNameAttribute {
                namespace: parser.read_u30()?,
                name: parser.read_u30()?,
            },
            tag::RTQNAME => Multiname::RTQName {
                name: parser.read_u30()?,
            },
            tag::RTQNAME_A => Multiname::RTQNameAttribute {
                name: parser.read_u30()?,
            },
            tag::RTQNAME_L => Multiname::RTQNameLate,
            tag::RTQNAME_LA => Multiname::RTQNameLateAttribute,
            tag::MULTINAME => Multiname::Multiname {
                name: parser.read_u30()?,
                namespace_set: parser.read_u30()?,
            },
            tag::MULTINAME_A => Multiname::MultinameAttribute {
                name: parser.read_u30()?,
                namespace_set: parser.read_u30()?,
            },
            tag::MULTINAME_L => Multiname::MultinameLate {
                namespace_set: parser.read_u30()?,
            },
            tag::MULTINAME_LA => Multiname::MultinameLateAttribute {
                namespace_set: parser.read_u30()?,
            },
            tag::TYPENAME => {
                let base = parser.read_u30()?;
                let count = parser.read_u30_usize()?;
                let mut parameters = Vec::with_capacity(count.min(parser.remaining()));
                for _ in 0..count {
                    parameters.push(parser.read_u30()?);
                }
                Multiname::TypeName { base, parameters }
            }
            _ => return Err(malformed_error!("Unknown multiname kind - 0x{:02X}", kind)),
        })
    }

    /// The tag byte this variant is encoded with.
    #[must_use]
    pub fn tag(&self) -> u8 {
        match self {
            Multiname::QName { .. } => tag::QNAME,
            Multiname::QNameAttribute { .. } => tag::QNAME_A,
            Multiname::RTQName { .. } => tag::RTQNAME,
            Multiname::RTQNameAttribute { .. } => tag::RTQNAME_A,
            Multiname::RTQNameLate => tag::RTQNAME_L,
            Multiname::RTQNameLateAttribute => tag::RTQNAME_LA,
            Multiname::Multiname { .. } => tag::MULTINAME,
            Multiname::MultinameAttribute { .. } => tag::MULTINAME_A,
            Multiname::MultinameLate { .. } => tag::MULTINAME_L,
            Multiname::MultinameLateAttribute { .. } => tag::MULTINAME_LA,
            Multiname::TypeName { .. } => tag::TYPENAME,
        }
    }

    /// String-table index of the name, for the variants that carry one.
    ///
    /// `TypeName` has no name of its own; its simple name is the base type's, see
    /// [`crate::metadata::constantpool::ConstantPool::simple_name`].
    #[must_use]
    pub fn name_index(&self) -> Option<u32> {
        match self {
            Multiname::QName { name, .. }
            | Multiname::QNameAttribute { name, .. }
            | Multiname::RTQName { name }
            | Multiname::RTQNameAttribute { name }
            | Multiname::Multiname { name, .. }
            | Multiname::MultinameAttribute { name, .. } => Some(*name),
            Multiname::RTQNameLate
            | Multiname::RTQNameLateAttribute
            | Multiname::MultinameLate { .. }
            | Multiname::MultinameLateAttribute { .. }
            | Multiname::TypeName { .. } => None,
        }
    }

    /// Namespace-table index, for the two qualified variants.
    #[must_use]
    pub fn namespace_index(&self) -> Option<u32> {
        match self {
            Multiname::QName { namespace, .. } | Multiname::QNameAttribute { namespace, .. } => {
                Some(*namespace)
            }
            _ => None,
        }
    }

    /// Namespace-set-table index, for the ambiguous variants.
    #[must_use]
    pub fn namespace_set_index(&self) -> Option<u32> {
        match self {
            Multiname::Multiname { namespace_set, .. }
            | Multiname::MultinameAttribute { namespace_set, .. }
            | Multiname::MultinameLate { namespace_set }
            | Multiname::MultinameLateAttribute { namespace_set } => Some(*namespace_set),
            _ => None,
        }
    }

    /// Returns `true` for the attribute (`@name`) variants.
    #[must_use]
    pub fn is_attribute(&self) -> bool {
        matches!(
            self,
            Multiname::QNameAttribute { .. }
                | Multiname::RTQNameAttribute { .. }
                | Multiname::RTQNameLateAttribute
                | Multiname::MultinameAttribute { .. }
                | Multiname::MultinameLateAttribute { .. }
        )
    }

    /// Returns `true` if resolving this name needs values from the operand stack.
    #[must_use]
    pub fn is_runtime(&self) -> bool {
        matches!(
            self,
            Multiname::RTQName { .. }
                | Multiname::RTQNameAttribute { .. }
                | Multiname::RTQNameLate
                | Multiname::RTQNameLateAttribute
                | Multiname::MultinameLate { .. }
                | Multiname::MultinameLateAttribute { .. }
        )
    }
}
