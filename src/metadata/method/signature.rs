//! Method signatures (`method_info` records).

use std::sync::OnceLock;

use bitflags::bitflags;

use crate::{file::parser::Parser, metadata::constantpool::Constant, Result};

bitflags! {
    /// Flags byte of a method signature.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MethodFlags: u8 {
        /// Uses the `arguments` object
        const NEED_ARGUMENTS = 0x01;
        /// Creates an activation object for its locals
        const NEED_ACTIVATION = 0x02;
        /// Collects surplus arguments into a rest array
        const NEED_REST = 0x04;
        /// An optional-parameter table follows the flags
        const HAS_OPTIONAL = 0x08;
        /// Surplus arguments are ignored
        const IGNORE_REST = 0x10;
        /// Implemented natively, has no body
        const NATIVE = 0x20;
        /// Sets the default XML namespace
        const SET_DXNS = 0x40;
        /// A parameter-name table closes the record
        const HAS_PARAM_NAMES = 0x80;
    }
}

/// A decoded method signature.
///
/// Signatures are decoded before any method body. A body binds to its signature exactly once,
/// see [`MethodDesc::body`].
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDesc {
    /// String index of the method name, often `0` for anonymous methods
    pub name: u32,
    /// Multiname index of the return type, `0` for `*`
    pub return_type: u32,
    /// Multiname indices of the parameter types
    pub param_types: Vec<u32>,
    /// Signature flags
    pub flags: MethodFlags,
    /// Default values of the trailing optional parameters
    pub optional: Vec<Constant>,
    /// String indices of the parameter names, empty without [`MethodFlags::HAS_PARAM_NAMES`]
    pub param_names: Vec<u32>,
    body: OnceLock<usize>,
}

impl MethodDesc {
    /// Reads one method signature record.
    ///
    /// # Errors
    /// Returns [`crate::Error::UnknownConstantKind`] for a bad default value tag and
    /// [`crate::Error::OutOfBounds`] for truncated input.
    pub fn read(parser: &mut Parser) -> Result<MethodDesc> {
        let param_count = parser.read_u30_usize()?;
        let return_type = parser.read_u30()?;

        let mut param_types = Vec::with_capacity(param_count.min(parser.remaining()));
        for _ in 0..param_count {
            param_types.push(parser.read_u30()?);
        }

        let name = parser.read_u30()?;
        let flags = MethodFlags::from_bits_retain(parser.read_le::<u8>()?);

        let mut optional = Vec::new();
        if flags.contains(MethodFlags::HAS_OPTIONAL) {
            let option_count = parser.read_le::<u8>()?;
            optional.reserve(usize::from(option_count));
            for _ in 0..option_count {
                let index = parser.read_u30()?;
                let kind = parser.read_le::<u8>()?;
                optional.push(Constant::new(index, kind)?);
            }
        }

        let mut param_names = Vec::new();
        if flags.contains(MethodFlags::HAS_PARAM_NAMES) {
            param_names.reserve(param_types.len());
            for _ in 0..param_count {
                param_names.push(parser.read_u30()?);
            }
        }

        Ok(MethodDesc {
            name,
            return_type,
            param_types,
            flags,
            optional,
            param_names,
            body: OnceLock::new(),
        })
    }

    /// Index of the bound method body, `None` for native and interface methods.
    #[must_use]
    pub fn body(&self) -> Option<usize> {
        self.body.get().copied()
    }

    /// Binds a method body to this signature.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a body is already bound.
    pub(crate) fn bind_body(&self, body: usize) -> Result<()> {
        match self.body.set(body) {
            Ok(()) => Ok(()),
            Err(_) => Err(malformed_error!(
                "Method body {} binds a method that already has body {}",
                body,
                self.body().unwrap_or_default()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{metadata::constantpool::ConstantKind, Error};

    #[test]
    fn plain_signature() {
        // two params of types 3 and 4, returns 2, name 1, no flags
        let data = [0x02, 0x02, 0x03, 0x04, 0x01, 0x00];
        let mut parser = Parser::new(&data);
        let method = MethodDesc::read(&mut parser).unwrap();

        assert_eq!(method.param_types, vec![3, 4]);
        assert_eq!(method.return_type, 2);
        assert_eq!(method.name, 1);
        assert!(method.flags.is_empty());
        assert!(method.optional.is_empty());
        assert_eq!(method.body(), None);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn optional_and_param_names() {
        // one param, HAS_OPTIONAL | HAS_PARAM_NAMES, default = true, param named 5
        let data = [0x01, 0x00, 0x00, 0x00, 0x88, 0x01, 0x00, 0x0B, 0x05];
        let mut parser = Parser::new(&data);
        let method = MethodDesc::read(&mut parser).unwrap();

        assert!(method.flags.contains(MethodFlags::HAS_OPTIONAL));
        assert_eq!(method.optional.len(), 1);
        assert_eq!(method.optional[0].kind, ConstantKind::True);
        assert_eq!(method.param_names, vec![5]);
        assert!(!parser.has_more_data());
    }

    #[test]
    fn bad_default_tag() {
        let data = [0x01, 0x00, 0x00, 0x00, 0x08, 0x01, 0x01, 0x02];
        assert!(matches!(
            MethodDesc::read(&mut Parser::new(&data)),
            Err(Error::UnknownConstantKind(0x02))
        ));
    }

    #[test]
    fn body_binds_once() {
        let data = [0x00, 0x00, 0x00, 0x00];
        let method = MethodDesc::read(&mut Parser::new(&data)).unwrap();

        method.bind_body(3).unwrap();
        assert_eq!(method.body(), Some(3));
        assert!(matches!(
            method.bind_body(4),
            Err(Error::Malformed { .. })
        ));
        assert_eq!(method.body(), Some(3));
    }
}
