//! Namespaces and namespace sets of the constant pool.

use strum::{Display, EnumCount, EnumIter};

use crate::Result;

/// The kind of a namespace, stored as the tag byte preceding its name.
///
/// The same tag values are reused by typed constants that reference the namespace table,
/// see [`crate::metadata::constantpool::ConstantKind`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumCount)]
pub enum NamespaceKind {
    /// Plain namespace (`0x08`), also used for user-defined namespaces
    Namespace,
    /// Public members of a package (`0x16`)
    Package,
    /// `internal` members of a package (`0x17`)
    PackageInternal,
    /// `protected` members of a class (`0x18`)
    Protected,
    /// Explicitly named namespace (`0x19`)
    Explicit,
    /// `protected` static members of a class (`0x1A`)
    StaticProtected,
    /// `private` members of a class (`0x05`)
    Private,
}

impl NamespaceKind {
    /// Decodes a namespace kind from its tag byte, `None` for any other value.
    #[must_use]
    pub fn from_tag(tag: u8) -> Option<NamespaceKind> {
        match tag {
            0x08 => Some(NamespaceKind::Namespace),
            0x16 => Some(NamespaceKind::Package),
            0x17 => Some(NamespaceKind::PackageInternal),
            0x18 => Some(NamespaceKind::Protected),
            0x19 => Some(NamespaceKind::Explicit),
            0x1A => Some(NamespaceKind::StaticProtected),
            0x05 => Some(NamespaceKind::Private),
            _ => None,
        }
    }

    /// The tag byte this kind is encoded as.
    #[must_use]
    pub fn tag(self) -> u8 {
        match self {
            NamespaceKind::Namespace => 0x08,
            NamespaceKind::Package => 0x16,
            NamespaceKind::PackageInternal => 0x17,
            NamespaceKind::Protected => 0x18,
            NamespaceKind::Explicit => 0x19,
            NamespaceKind::StaticProtected => 0x1A,
            NamespaceKind::Private => 0x05,
        }
    }

    pub(crate) fn read_tag(tag: u8) -> Result<NamespaceKind> {
        NamespaceKind::from_tag(tag)
            .ok_or_else(|| malformed_error!("Unknown namespace kind - 0x{:02X}", tag))
    }
}

/// A namespace entry: a kind and an index into the string table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Namespace {
    /// What kind of scope this namespace qualifies
    pub kind: NamespaceKind,
    /// Index of the namespace URI / package name in the string table
    pub name: u32,
}

impl Namespace {
    /// The implicit entry at index 0 of the namespace table: public, unnamed.
    pub const ANY: Namespace = Namespace {
        kind: NamespaceKind::Namespace,
        name: 0,
    };
}

/// An ordered set of namespace-table indices, used by the ambiguous multiname variants.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct NamespaceSet {
    /// Indices into the namespace table, in encoded order
    pub namespaces: Vec<u32>,
}
