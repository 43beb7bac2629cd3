//! Trait records: the member tables of instances, classes, scripts and activation scopes.
//!
//! Every record starts with a name multiname index and a kind byte. The low nibble of the kind
//! byte selects the record shape, the high nibble carries [`TraitAttributes`]. When
//! [`TraitAttributes::METADATA`] is set, a U30-counted list of metadata indices closes the
//! record.
//!
//! # Examples
//!
//! ```rust
//! use abcscope::{Parser, metadata::traits::{read_traits, TraitData}};
//!
//! // one trait: name 1, kind 0x06 (const), slot 0, type 0, no value
//! let data = [0x01, 0x01, 0x06, 0x00, 0x00, 0x00];
//! let traits = read_traits(&mut Parser::new(&data))?;
//! assert!(matches!(traits[0].data, TraitData::Const(_)));
//! # Ok::<(), abcscope::Error>(())
//! ```

use bitflags::bitflags;
use strum::Display;

use crate::{
    file::parser::Parser, metadata::constantpool::Constant, Error::UnknownTraitKind, Result,
};

bitflags! {
    /// Attribute bits from the high nibble of a trait's kind byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TraitAttributes: u8 {
        /// Member cannot be overridden
        const FINAL = 0x1;
        /// Member overrides a base class member
        const OVERRIDE = 0x2;
        /// A metadata index list follows the record
        const METADATA = 0x4;
    }
}

/// The record shape selected by the low nibble of a trait's kind byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Display)]
pub enum TraitKind {
    /// Variable slot (`0`)
    Slot,
    /// Method (`1`)
    Method,
    /// Getter accessor (`2`)
    Getter,
    /// Setter accessor (`3`)
    Setter,
    /// Class binding (`4`)
    Class,
    /// Function closure (`5`)
    Function,
    /// Constant slot (`6`)
    Const,
}

impl TraitKind {
    /// Decodes the low nibble of a trait kind byte.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownTraitKind`] for values above `6`.
    pub fn from_nibble(nibble: u8) -> Result<TraitKind> {
        Ok(match nibble {
            0 => TraitKind::Slot,
            1 => TraitKind::Method,
            2 => TraitKind::Getter,
            3 => TraitKind::Setter,
            4 => TraitKind::Class,
            5 => TraitKind::Function,
            6 => TraitKind::Const,
            _ => return Err(UnknownTraitKind(nibble)),
        })
    }
}

/// Payload of a slot or const trait.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SlotTrait {
    /// Slot position, `0` lets the runtime assign one
    pub slot_id: u32,
    /// Multiname index of the declared type, `0` for untyped
    pub type_name: u32,
    /// Initial value; absent when the encoded value index is `0`
    pub value: Option<Constant>,
}

/// Payload of a method, getter or setter trait.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct MethodTrait {
    /// Dispatch id, `0` lets the runtime assign one
    pub disp_id: u32,
    /// Index into the module's method signatures
    pub method: u32,
}

/// Record-specific part of a trait.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TraitData {
    /// `var` member
    Slot(SlotTrait),
    /// `const` member
    Const(SlotTrait),
    /// Method member
    Method(MethodTrait),
    /// `get` accessor
    Getter(MethodTrait),
    /// `set` accessor
    Setter(MethodTrait),
    /// Class bound to a slot
    Class {
        /// Slot position
        slot_id: u32,
        /// Index into the module's class infos
        class: u32,
    },
    /// Function closure bound to a slot
    Function {
        /// Slot position
        slot_id: u32,
        /// Index into the module's method signatures
        function: u32,
    },
}

/// One decoded trait record.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Trait {
    /// Multiname index of the member name
    pub name: u32,
    /// Attribute bits from the kind byte
    pub attributes: TraitAttributes,
    /// The record shape and its fields
    pub data: TraitData,
    /// Indices into the module's metadata entries
    pub metadata: Vec<u32>,
}

impl Trait {
    /// Decodes one trait record.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownTraitKind`] for a kind nibble above `6`,
    /// [`crate::Error::UnknownConstantKind`] for a bad slot value tag and
    /// [`crate::Error::OutOfBounds`] for truncated input.
    pub fn read(parser: &mut Parser) -> Result<Trait> {
        let name = parser.read_u30()?;
        let kind_byte = parser.read_le::<u8>()?;
        let attributes = TraitAttributes::from_bits_retain(kind_byte >> 4);

        let data = match TraitKind::from_nibble(kind_byte & 0x0F)? {
            TraitKind::Slot => TraitData::Slot(read_slot(parser)?),
            TraitKind::Const => TraitData::Const(read_slot(parser)?),
            TraitKind::Method => TraitData::Method(read_method(parser)?),
            TraitKind::Getter => TraitData::Getter(read_method(parser)?),
            TraitKind::Setter => TraitData::Setter(read_method(parser)?),
            TraitKind::Class => TraitData::Class {
                slot_id: parser.read_u30()?,
                class: parser.read_u30()?,
            },
            TraitKind::Function => TraitData::Function {
                slot_id: parser.read_u30()?,
                function: parser.read_u30()?,
            },
        };

        let mut metadata = Vec::new();
        if attributes.contains(TraitAttributes::METADATA) {
            let count = parser.read_u30_usize()?;
            metadata.reserve(count.min(parser.remaining()));
            for _ in 0..count {
                metadata.push(parser.read_u30()?);
            }
        }

        Ok(Trait {
            name,
            attributes,
            data,
            metadata,
        })
    }

    /// The record shape of this trait.
    #[must_use]
    pub fn kind(&self) -> TraitKind {
        match self.data {
            TraitData::Slot(_) => TraitKind::Slot,
            TraitData::Const(_) => TraitKind::Const,
            TraitData::Method(_) => TraitKind::Method,
            TraitData::Getter(_) => TraitKind::Getter,
            TraitData::Setter(_) => TraitKind::Setter,
            TraitData::Class { .. } => TraitKind::Class,
            TraitData::Function { .. } => TraitKind::Function,
        }
    }

    /// Method signature index for method, accessor and function traits.
    #[must_use]
    pub fn method(&self) -> Option<u32> {
        match self.data {
            TraitData::Method(method) | TraitData::Getter(method) | TraitData::Setter(method) => {
                Some(method.method)
            }
            TraitData::Function { function, .. } => Some(function),
            _ => None,
        }
    }
}

fn read_slot(parser: &mut Parser) -> Result<SlotTrait> {
    let slot_id = parser.read_u30()?;
    let type_name = parser.read_u30()?;
    let value_index = parser.read_u30()?;

    let value = if value_index == 0 {
        None
    } else {
        Some(Constant::new(value_index, parser.read_le::<u8>()?)?)
    };

    Ok(SlotTrait {
        slot_id,
        type_name,
        value,
    })
}

fn read_method(parser: &mut Parser) -> Result<MethodTrait> {
    Ok(MethodTrait {
        disp_id: parser.read_u30()?,
        method: parser.read_u30()?,
    })
}

/// Reads a U30-counted trait table.
///
/// # Errors
/// Propagates the first error of [`Trait::read`].
pub fn read_traits(parser: &mut Parser) -> Result<Vec<Trait>> {
    let count = parser.read_u30_usize()?;

    let mut traits = Vec::with_capacity(count.min(parser.remaining()));
    for _ in 0..count {
        traits.push(Trait::read(parser)?);
    }

    Ok(traits)
}
