//! Metadata entries (`[Name(key="value")]` annotations).
//!
//! Entries are stored as a name plus an item count, then all item keys, then all item values.
//! A key of `0` marks a positional item without a key.

use crate::{file::parser::Parser, Result};

/// One key/value item of a metadata entry, as string indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MetadataItem {
    /// String index of the key, `0` for a keyless item
    pub key: u32,
    /// String index of the value
    pub value: u32,
}

/// A metadata entry, referenced by traits that carry [`crate::metadata::traits::TraitAttributes::METADATA`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataInfo {
    /// String index of the annotation name
    pub name: u32,
    /// Items in declaration order
    pub items: Vec<MetadataItem>,
}

impl MetadataInfo {
    /// Reads one metadata entry.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input.
    pub fn read(parser: &mut Parser) -> Result<MetadataInfo> {
        let name = parser.read_u30()?;
        let count = parser.read_u30_usize()?;

        let mut keys = Vec::with_capacity(count.min(parser.remaining()));
        for _ in 0..count {
            keys.push(parser.read_u30()?);
        }

        let mut items = Vec::with_capacity(keys.len());
        for key in keys {
            items.push(MetadataItem {
                key,
                value: parser.read_u30()?,
            });
        }

        Ok(MetadataInfo { name, items })
    }

    /// Value string index for `key`, if present.
    #[must_use]
    pub fn value_of(&self, key: u32) -> Option<u32> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_then_values() {
        // name 1, two items: keys 2, 0 then values 3, 4
        let data = [0x01, 0x02, 0x02, 0x00, 0x03, 0x04];
        let mut parser = Parser::new(&data);
        let entry = MetadataInfo::read(&mut parser).unwrap();

        assert!(!parser.has_more_data());
        assert_eq!(entry.name, 1);
        assert_eq!(
            entry.items,
            vec![
                MetadataItem { key: 2, value: 3 },
                MetadataItem { key: 0, value: 4 }
            ]
        );
        assert_eq!(entry.value_of(2), Some(3));
        assert_eq!(entry.value_of(9), None);
    }
}
