//! The constant pool of an ABC module.
//!
//! Seven parallel tables hold every literal and name the rest of the module refers to: signed
//! integers, unsigned integers, doubles, strings, namespaces, namespace sets and multinames.
//! They are read in exactly that order, since each later table indexes into earlier ones
//! (namespaces name strings, namespace sets list namespaces, multinames use all three).
//!
//! Each table is prefixed by a U30 count `n` and holds `n - 1` encoded entries. Index 0 is
//! never encoded; it is a reserved default (`0`, `0`, `NaN`, `""`, the public unnamed
//! namespace, the empty namespace set, the any-name multiname) and is present in every table
//! so lookups can use the on-wire index directly.
//!
//! # Key Components
//!
//! - [`ConstantPool`] - The decoded tables plus name resolution helpers
//! - [`Namespace`] / [`NamespaceKind`] / [`NamespaceSet`] - Namespace table entries
//! - [`Multiname`] - Multiname table entries
//! - [`Constant`] / [`ConstantKind`] / [`Value`] - Typed constants and their resolution
//!
//! # Examples
//!
//! ```rust
//! use abcscope::{AbcFile, metadata::constantpool::NamespaceKind};
//!
//! // version, then: 0 ints, 0 uints, 0 doubles, strings [""; "A"],
//! // namespaces [*; package ""], 0 ns-sets, multinames [*; QName(ns 1, "A")]
//! let mut blob = vec![0x10, 0x00, 0x2E, 0x00, 0x00, 0x00, 0x00];
//! blob.extend_from_slice(&[0x02, 0x01, b'A']);
//! blob.extend_from_slice(&[0x02, 0x16, 0x00]);
//! blob.extend_from_slice(&[0x00]);
//! blob.extend_from_slice(&[0x02, 0x07, 0x01, 0x01]);
//! blob.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]);
//!
//! let abc = AbcFile::from_mem(blob)?;
//! let pool = abc.constant_pool();
//! assert_eq!(pool.simple_name(1)?, "A");
//! assert_eq!(pool.namespace_of(1)?.map(|ns| ns.kind), Some(NamespaceKind::Package));
//! # Ok::<(), abcscope::Error>(())
//! ```

mod multiname;
mod namespace;
mod value;

pub use multiname::{tag as multiname_tag, Multiname};
pub use namespace::{Namespace, NamespaceKind, NamespaceSet};
pub use value::{Constant, ConstantKind, Value};

use crate::{file::parser::Parser, Result};

/// Upper bound on `TypeName` nesting followed while resolving names; deeper chains are
/// treated as cyclic.
const MAX_TYPENAME_DEPTH: usize = 64;

/// The decoded constant pool.
///
/// Every table keeps its reserved index-0 entry, so `table[index]` is the entry an on-wire
/// index refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantPool {
    ints: Vec<i32>,
    uints: Vec<u32>,
    doubles: Vec<f64>,
    strings: Vec<String>,
    namespaces: Vec<Namespace>,
    namespace_sets: Vec<NamespaceSet>,
    multinames: Vec<Multiname>,
}

/// Reads one count-prefixed table, seeding index 0 with `default`.
fn read_table<T>(
    parser: &mut Parser,
    default: T,
    mut read_entry: impl FnMut(&mut Parser) -> Result<T>,
) -> Result<Vec<T>> {
    let count = parser.read_u30_usize()?;

    let mut table = Vec::with_capacity(count.clamp(1, parser.remaining() + 1));
    table.push(default);
    for _ in 1..count {
        table.push(read_entry(parser)?);
    }

    Ok(table)
}

fn check_index(index: u32, len: usize, table: &str) -> Result<()> {
    if index as usize >= len {
        return Err(malformed_error!(
            "Index {} out of range for {} table with {} entries",
            index,
            table,
            len
        ));
    }

    Ok(())
}

impl ConstantPool {
    /// Decodes the seven pool tables from the current parser position.
    ///
    /// Indices between pool tables are verified here; a namespace naming a missing string or
    /// a multiname pointing past its tables fails the decode.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input and
    /// [`crate::Error::Malformed`] for unknown tags or dangling indices.
    pub(crate) fn read(parser: &mut Parser) -> Result<ConstantPool> {
        #[allow(clippy::cast_possible_wrap)]
        let ints = read_table(parser, 0, |p| Ok(p.read_u30()? as i32))?;
        let uints = read_table(parser, 0, |p| p.read_u30())?;
        let doubles = read_table(parser, f64::NAN, |p| p.read_le::<f64>())?;
        let strings = read_table(parser, String::new(), |p| p.read_string_utf8())?;

        let namespaces = read_table(parser, Namespace::ANY, |p| {
            let kind = NamespaceKind::read_tag(p.read_le::<u8>()?)?;
            let name = p.read_u30()?;
            check_index(name, strings.len(), "string")?;

            Ok(Namespace { kind, name })
        })?;

        let namespace_sets = read_table(parser, NamespaceSet::default(), |p| {
            let count = p.read_u30_usize()?;
            let mut set = Vec::with_capacity(count.min(p.remaining()));
            for _ in 0..count {
                let namespace = p.read_u30()?;
                check_index(namespace, namespaces.len(), "namespace")?;
                set.push(namespace);
            }

            Ok(NamespaceSet { namespaces: set })
        })?;

        let multinames = read_table(parser, Multiname::ANY, Multiname::read)?;

        let pool = ConstantPool {
            ints,
            uints,
            doubles,
            strings,
            namespaces,
            namespace_sets,
            multinames,
        };
        for multiname in &pool.multinames {
            pool.check_multiname(multiname)?;
        }

        Ok(pool)
    }

    fn check_multiname(&self, multiname: &Multiname) -> Result<()> {
        if let Some(name) = multiname.name_index() {
            check_index(name, self.strings.len(), "string")?;
        }
        if let Some(namespace) = multiname.namespace_index() {
            check_index(namespace, self.namespaces.len(), "namespace")?;
        }
        if let Some(set) = multiname.namespace_set_index() {
            check_index(set, self.namespace_sets.len(), "namespace set")?;
        }
        if let Multiname::TypeName { base, parameters } = multiname {
            check_index(*base, self.multinames.len(), "multiname")?;
            for parameter in parameters {
                check_index(*parameter, self.multinames.len(), "multiname")?;
            }
        }

        Ok(())
    }

    /// Signed integer table, including the reserved entry.
    #[must_use]
    pub fn ints(&self) -> &[i32] {
        &self.ints
    }

    /// Unsigned integer table, including the reserved entry.
    #[must_use]
    pub fn uints(&self) -> &[u32] {
        &self.uints
    }

    /// Double table, including the reserved `NaN` entry.
    #[must_use]
    pub fn doubles(&self) -> &[f64] {
        &self.doubles
    }

    /// String table, including the reserved empty string.
    #[must_use]
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Namespace table, including [`Namespace::ANY`].
    #[must_use]
    pub fn namespaces(&self) -> &[Namespace] {
        &self.namespaces
    }

    /// Namespace-set table, including the reserved empty set.
    #[must_use]
    pub fn namespace_sets(&self) -> &[NamespaceSet] {
        &self.namespace_sets
    }

    /// Multiname table, including [`Multiname::ANY`].
    #[must_use]
    pub fn multinames(&self) -> &[Multiname] {
        &self.multinames
    }

    /// Looks up a signed integer.
    #[must_use]
    pub fn int(&self, index: u32) -> Option<i32> {
        self.ints.get(index as usize).copied()
    }

    /// Looks up an unsigned integer.
    #[must_use]
    pub fn uint(&self, index: u32) -> Option<u32> {
        self.uints.get(index as usize).copied()
    }

    /// Looks up a double.
    #[must_use]
    pub fn double(&self, index: u32) -> Option<f64> {
        self.doubles.get(index as usize).copied()
    }

    /// Looks up a string.
    #[must_use]
    pub fn string(&self, index: u32) -> Option<&str> {
        self.strings.get(index as usize).map(String::as_str)
    }

    /// Looks up a namespace.
    #[must_use]
    pub fn namespace(&self, index: u32) -> Option<&Namespace> {
        self.namespaces.get(index as usize)
    }

    /// Looks up a namespace set.
    #[must_use]
    pub fn namespace_set(&self, index: u32) -> Option<&NamespaceSet> {
        self.namespace_sets.get(index as usize)
    }

    /// Looks up a multiname.
    #[must_use]
    pub fn multiname(&self, index: u32) -> Option<&Multiname> {
        self.multinames.get(index as usize)
    }

    fn multiname_checked(&self, index: u32) -> Result<&Multiname> {
        self.multiname(index).ok_or_else(|| {
            malformed_error!(
                "Multiname index {} out of range ({} entries)",
                index,
                self.multinames.len()
            )
        })
    }

    fn string_checked(&self, index: u32) -> Result<&str> {
        self.string(index).ok_or_else(|| {
            malformed_error!(
                "String index {} out of range ({} entries)",
                index,
                self.strings.len()
            )
        })
    }

    /// The simple (unqualified) name of the multiname at `index`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if `index` is out of range.
    pub fn simple_name(&self, index: u32) -> Result<&str> {
        self.name_of(self.multiname_checked(index)?)
    }

    /// The simple name of a multiname: its name string, the empty string for the variants
    /// whose name is only known at runtime, and the base type's name for `TypeName`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for dangling indices or cyclic `TypeName` chains.
    pub fn name_of<'a>(&'a self, multiname: &'a Multiname) -> Result<&'a str> {
        let mut current = multiname;

        for _ in 0..MAX_TYPENAME_DEPTH {
            if let Multiname::TypeName { base, .. } = current {
                current = self.multiname_checked(*base)?;
                continue;
            }

            return match current.name_index() {
                Some(name) => self.string_checked(name),
                None => Ok(""),
            };
        }

        Err(malformed_error!("TypeName chain nested too deeply"))
    }

    /// The namespace of a qualified multiname, `None` for every other variant.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if either index is out of range.
    pub fn namespace_of(&self, index: u32) -> Result<Option<&Namespace>> {
        match self.multiname_checked(index)?.namespace_index() {
            Some(namespace) => match self.namespace(namespace) {
                Some(namespace) => Ok(Some(namespace)),
                None => Err(malformed_error!(
                    "Namespace index {} out of range ({} entries)",
                    namespace,
                    self.namespaces.len()
                )),
            },
            None => Ok(None),
        }
    }

    /// Renders the multiname at `index` the way class names are written in source.
    ///
    /// Qualified names become `package.Name`, or just `Name` when the package is empty.
    /// Generic applications render as `Base.<Param1,Param2>`, and index 0 renders as `*`.
    /// Names resolved against a namespace set have no single package and render unqualified.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for dangling indices or cyclic `TypeName` chains.
    pub fn qualified_name(&self, index: u32) -> Result<String> {
        self.qualified_name_at_depth(index, 0)
    }

    fn qualified_name_at_depth(&self, index: u32, depth: usize) -> Result<String> {
        if depth >= MAX_TYPENAME_DEPTH {
            return Err(malformed_error!("TypeName chain nested too deeply"));
        }
        if index == 0 {
            return Ok("*".to_string());
        }

        let multiname = self.multiname_checked(index)?;
        if let Multiname::TypeName { base, parameters } = multiname {
            let mut rendered = self.qualified_name_at_depth(*base, depth + 1)?;
            rendered.push_str(".<");
            for (position, parameter) in parameters.iter().enumerate() {
                if position > 0 {
                    rendered.push(',');
                }
                rendered.push_str(&self.qualified_name_at_depth(*parameter, depth + 1)?);
            }
            rendered.push('>');

            return Ok(rendered);
        }

        let name = self.name_of(multiname)?;
        let package = match self.namespace_of(index)? {
            Some(namespace) => self.string_checked(namespace.name)?,
            None => "",
        };

        if package.is_empty() {
            Ok(name.to_string())
        } else {
            Ok(format!("{package}.{name}"))
        }
    }

    /// Resolves a typed constant against the pool.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if the constant's index is outside its table.
    pub fn resolve(&self, constant: &Constant) -> Result<Value<'_>> {
        let index = constant.index;
        let missing = |table: &str, len: usize| {
            malformed_error!(
                "Constant index {} out of range for {} table with {} entries",
                index,
                table,
                len
            )
        };

        Ok(match constant.kind {
            ConstantKind::Undefined => Value::Undefined,
            ConstantKind::Null => Value::Null,
            ConstantKind::True => Value::Bool(true),
            ConstantKind::False => Value::Bool(false),
            ConstantKind::Int => Value::Int(
                self.int(index)
                    .ok_or_else(|| missing("int", self.ints.len()))?,
            ),
            ConstantKind::UInt => Value::UInt(
                self.uint(index)
                    .ok_or_else(|| missing("uint", self.uints.len()))?,
            ),
            ConstantKind::Double => Value::Double(
                self.double(index)
                    .ok_or_else(|| missing("double", self.doubles.len()))?,
            ),
            ConstantKind::Utf8 => Value::String(
                self.string(index)
                    .ok_or_else(|| missing("string", self.strings.len()))?,
            ),
            ConstantKind::Namespace(_) => Value::Namespace(
                self.namespace(index)
                    .ok_or_else(|| missing("namespace", self.namespaces.len()))?,
            ),
        })
    }
}
