//! Typed constants, as used by optional parameter defaults and slot initial values.
//!
//! A typed constant is stored as a `(index, kind)` pair. The kind selects the table the index
//! points into, or makes the index meaningless for the four literal kinds (`true`, `false`,
//! `null`, `undefined`). Resolution into a [`Value`] happens against the
//! [`crate::metadata::constantpool::ConstantPool`] and borrows from it.

use strum::Display;

use crate::{
    metadata::constantpool::{Namespace, NamespaceKind},
    Error::UnknownConstantKind,
    Result,
};

/// The kind byte of a typed constant.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum ConstantKind {
    /// `undefined` (`0x00`)
    Undefined,
    /// String table entry (`0x01`)
    Utf8,
    /// Signed integer table entry (`0x03`)
    Int,
    /// Unsigned integer table entry (`0x04`)
    UInt,
    /// Double table entry (`0x06`)
    Double,
    /// `false` (`0x0A`)
    False,
    /// `true` (`0x0B`)
    True,
    /// `null` (`0x0C`)
    Null,
    /// Namespace table entry, tagged with the namespace kind
    Namespace(NamespaceKind),
}

impl ConstantKind {
    /// Decodes a constant kind from its tag byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownConstantKind`] for a tag outside the defined set.
    pub fn from_tag(tag: u8) -> Result<ConstantKind> {
        Ok(match tag {
            0x00 => ConstantKind::Undefined,
            0x01 => ConstantKind::Utf8,
            0x03 => ConstantKind::Int,
            0x04 => ConstantKind::UInt,
            0x06 => ConstantKind::Double,
            0x0A => ConstantKind::False,
            0x0B => ConstantKind::True,
            0x0C => ConstantKind::Null,
            _ => match NamespaceKind::from_tag(tag) {
                Some(kind) => ConstantKind::Namespace(kind),
                None => return Err(UnknownConstantKind(tag)),
            },
        })
    }

    /// The tag byte this kind is encoded as.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            ConstantKind::Undefined => 0x00,
            ConstantKind::Utf8 => 0x01,
            ConstantKind::Int => 0x03,
            ConstantKind::UInt => 0x04,
            ConstantKind::Double => 0x06,
            ConstantKind::False => 0x0A,
            ConstantKind::True => 0x0B,
            ConstantKind::Null => 0x0C,
            ConstantKind::Namespace(kind) => kind.tag(),
        }
    }

    /// Returns `true` if the paired index is meaningful for this kind.
    #[must_use]
    pub fn uses_index(self) -> bool {
        !matches!(
            self,
            ConstantKind::Undefined | ConstantKind::False | ConstantKind::True | ConstantKind::Null
        )
    }
}

/// An unresolved typed constant: a kind plus an index into the table the kind selects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Constant {
    /// Which table `index` points into
    pub kind: ConstantKind,
    /// Table index, ignored for the literal kinds
    pub index: u32,
}

impl Constant {
    /// Builds a typed constant from the on-wire `(index, tag)` pair.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownConstantKind`] for an undefined tag.
    pub fn new(index: u32, tag: u8) -> Result<Constant> {
        Ok(Constant {
            kind: ConstantKind::from_tag(tag)?,
            index,
        })
    }
}

/// A typed constant resolved against the constant pool.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Value<'a> {
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// Boolean literal
    Bool(bool),
    /// Signed integer
    Int(i32),
    /// Unsigned integer
    UInt(u32),
    /// Double precision number
    Double(f64),
    /// String, borrowed from the pool
    String(&'a str),
    /// Namespace, borrowed from the pool
    Namespace(&'a Namespace),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn literal_kinds_ignore_index() {
        for tag in [0x00, 0x0A, 0x0B, 0x0C] {
            assert!(!ConstantKind::from_tag(tag).unwrap().uses_index());
        }
        assert!(ConstantKind::from_tag(0x01).unwrap().uses_index());
    }

    #[test]
    fn namespace_tags_map_to_namespace_kind() {
        assert_eq!(
            ConstantKind::from_tag(0x16).unwrap(),
            ConstantKind::Namespace(NamespaceKind::Package)
        );
        assert_eq!(
            ConstantKind::from_tag(0x05).unwrap(),
            ConstantKind::Namespace(NamespaceKind::Private)
        );
        assert_eq!(ConstantKind::Namespace(NamespaceKind::Explicit).tag(), 0x19);
    }

    #[test]
    fn unknown_tag() {
        for tag in [0x02, 0x07, 0x09, 0xFF] {
            assert!(matches!(
                Constant::new(1, tag),
                Err(Error::UnknownConstantKind(t)) if t == tag
            ));
        }
    }
}
