//! Instance and class records, and the type view pairing them.
//!
//! A module declares its classes in two parallel tables of equal length. The instance table
//! describes the object side of each class (name, base class, interfaces, instance
//! initializer, instance traits), the class table the static side (static initializer, static
//! traits). [`TypeInfo`] zips the two at the same position.

use bitflags::bitflags;

use crate::{
    file::parser::Parser,
    metadata::traits::{read_traits, Trait},
    Result,
};

bitflags! {
    /// Flags byte of an instance record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InstanceFlags: u8 {
        /// No dynamic properties can be added
        const SEALED = 0x01;
        /// Cannot be subclassed
        const FINAL = 0x02;
        /// Declares an interface
        const INTERFACE = 0x04;
        /// A protected namespace index follows the flags
        const PROTECTED_NS = 0x08;
    }
}

/// Object side of a class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceInfo {
    /// Multiname index of the class name (a QName)
    pub name: u32,
    /// Multiname index of the base class, `0` for none
    pub super_name: u32,
    /// Instance flags
    pub flags: InstanceFlags,
    /// Namespace index of the class's protected namespace
    pub protected_ns: Option<u32>,
    /// Multiname indices of the implemented interfaces
    pub interfaces: Vec<u32>,
    /// Method index of the instance initializer (constructor)
    pub initializer: u32,
    /// Instance traits
    pub traits: Vec<Trait>,
}

impl InstanceInfo {
    /// Reads one instance record.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and the trait decoding errors.
    pub fn read(parser: &mut Parser) -> Result<InstanceInfo> {
        let name = parser.read_u30()?;
        let super_name = parser.read_u30()?;
        let flags = InstanceFlags::from_bits_retain(parser.read_le::<u8>()?);

        let protected_ns = if flags.contains(InstanceFlags::PROTECTED_NS) {
            Some(parser.read_u30()?)
        } else {
            None
        };

        let interface_count = parser.read_u30_usize()?;
        let mut interfaces = Vec::with_capacity(interface_count.min(parser.remaining()));
        for _ in 0..interface_count {
            interfaces.push(parser.read_u30()?);
        }

        Ok(InstanceInfo {
            name,
            super_name,
            flags,
            protected_ns,
            interfaces,
            initializer: parser.read_u30()?,
            traits: read_traits(parser)?,
        })
    }

    /// Returns `true` if this record declares an interface.
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(InstanceFlags::INTERFACE)
    }
}

/// Static side of a class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Method index of the static initializer
    pub initializer: u32,
    /// Static traits
    pub traits: Vec<Trait>,
}

impl ClassInfo {
    /// Reads one class record.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and the trait decoding errors.
    pub fn read(parser: &mut Parser) -> Result<ClassInfo> {
        Ok(ClassInfo {
            initializer: parser.read_u30()?,
            traits: read_traits(parser)?,
        })
    }
}

/// A class declaration: the instance and class records at the same table position.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo<'a> {
    /// Position in the instance and class tables
    pub index: usize,
    /// Object side
    pub instance: &'a InstanceInfo,
    /// Static side
    pub class: &'a ClassInfo,
}
