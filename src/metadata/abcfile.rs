//! The decoded ABC module and its loaders.
//!
//! [`AbcFile`] is the entry point of the crate. Loading runs one linear pass over the blob:
//! version header, constant pool, method signatures, metadata, instance records, class
//! records, scripts and method bodies. Any error aborts the whole load; no partially decoded
//! module is ever returned.
//!
//! # Examples
//!
//! ```rust,no_run
//! use abcscope::{AbcFile, LoadConfig};
//!
//! let abc = AbcFile::from_file_with_config("tests/samples/module.abc".as_ref(), LoadConfig::eager())?;
//! println!("ABC {}", abc.version());
//!
//! for ty in abc.types() {
//!     println!("class {}", abc.constant_pool().qualified_name(ty.instance.name)?);
//! }
//! # Ok::<(), abcscope::Error>(())
//! ```

use std::{fmt, path::Path};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::{
    file::{parser::Parser, File},
    metadata::{
        annotation::MetadataInfo,
        config::LoadConfig,
        constantpool::ConstantPool,
        method::{MethodBody, MethodDesc},
        script::ScriptInfo,
        types::{ClassInfo, InstanceInfo, TypeInfo},
        validation::validate_references,
    },
    Result,
};

/// Version header of an ABC module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AbcVersion {
    /// Major version, `46` for every module produced by current compilers
    pub major: u16,
    /// Minor version, `16` for every module produced by current compilers
    pub minor: u16,
}

impl fmt::Display for AbcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// A fully decoded ABC module.
///
/// All tables are immutable once loaded. Method body instruction lists are the only lazily
/// computed state, and they are safe to request from several threads at once.
#[derive(Debug)]
pub struct AbcFile {
    version: AbcVersion,
    constant_pool: ConstantPool,
    methods: Vec<MethodDesc>,
    metadata: Vec<MetadataInfo>,
    instances: Vec<InstanceInfo>,
    classes: Vec<ClassInfo>,
    scripts: Vec<ScriptInfo>,
    method_bodies: Vec<MethodBody>,
}

/// Reads a U30 count followed by that many records.
fn read_records<T>(
    parser: &mut Parser,
    count: usize,
    mut read_record: impl FnMut(&mut Parser) -> Result<T>,
) -> Result<Vec<T>> {
    let mut records = Vec::with_capacity(count.min(parser.remaining()));
    for _ in 0..count {
        records.push(read_record(parser)?);
    }

    Ok(records)
}

impl AbcFile {
    /// Loads a module from an extracted blob on disk, with the default [`LoadConfig`].
    ///
    /// # Arguments
    /// * `file` - Path to the ABC blob
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read, and any decoding error
    /// of [`AbcFile::from_bytes`].
    pub fn from_file(file: &Path) -> Result<AbcFile> {
        Self::from_file_with_config(file, LoadConfig::default())
    }

    /// Loads a module from an extracted blob on disk.
    ///
    /// # Errors
    /// See [`AbcFile::from_file`].
    pub fn from_file_with_config(file: &Path, config: LoadConfig) -> Result<AbcFile> {
        let input = File::from_file(file)?;
        Self::from_bytes_with_config(input.data(), config)
    }

    /// Loads a module from an owned buffer, with the default [`LoadConfig`].
    ///
    /// # Errors
    /// Returns [`crate::Error::Empty`] for an empty buffer, and any decoding error of
    /// [`AbcFile::from_bytes`].
    pub fn from_mem(data: Vec<u8>) -> Result<AbcFile> {
        Self::from_mem_with_config(data, LoadConfig::default())
    }

    /// Loads a module from an owned buffer.
    ///
    /// # Errors
    /// See [`AbcFile::from_mem`].
    pub fn from_mem_with_config(data: Vec<u8>, config: LoadConfig) -> Result<AbcFile> {
        let input = File::from_mem(data)?;
        Self::from_bytes_with_config(input.data(), config)
    }

    /// Decodes a module from a borrowed blob, with the default [`LoadConfig`].
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for truncated input,
    /// [`crate::Error::Malformed`] for unknown tags, dangling indices or a method with two
    /// bodies, [`crate::Error::UnknownConstantKind`] and [`crate::Error::UnknownTraitKind`]
    /// for bad typed constants and traits.
    pub fn from_bytes(data: &[u8]) -> Result<AbcFile> {
        Self::from_bytes_with_config(data, LoadConfig::default())
    }

    /// Decodes a module from a borrowed blob.
    ///
    /// # Errors
    /// See [`AbcFile::from_bytes`]. With [`LoadConfig::disassemble`] set, also
    /// [`crate::Error::UnknownOpcode`] for a body that fails to disassemble.
    pub fn from_bytes_with_config(data: &[u8], config: LoadConfig) -> Result<AbcFile> {
        let mut parser = Parser::new(data);

        let minor = parser.read_le::<u16>()?;
        let major = parser.read_le::<u16>()?;
        let version = AbcVersion { major, minor };

        let constant_pool = ConstantPool::read(&mut parser)?;
        trace!(position = parser.pos(), "constant pool decoded");

        let count = parser.read_u30_usize()?;
        let methods = read_records(&mut parser, count, MethodDesc::read)?;
        trace!(position = parser.pos(), count, "method signatures decoded");

        let count = parser.read_u30_usize()?;
        let metadata = read_records(&mut parser, count, MetadataInfo::read)?;
        trace!(position = parser.pos(), count, "metadata decoded");

        let type_count = parser.read_u30_usize()?;
        let instances = read_records(&mut parser, type_count, InstanceInfo::read)?;
        let classes = read_records(&mut parser, type_count, ClassInfo::read)?;
        trace!(position = parser.pos(), count = type_count, "types decoded");

        let count = parser.read_u30_usize()?;
        let scripts = read_records(&mut parser, count, ScriptInfo::read)?;
        trace!(position = parser.pos(), count, "scripts decoded");

        let count = parser.read_u30_usize()?;
        let method_bodies = read_records(&mut parser, count, MethodBody::read)?;
        for (index, body) in method_bodies.iter().enumerate() {
            match methods.get(body.method as usize) {
                Some(method) => method.bind_body(index)?,
                None => {
                    return Err(malformed_error!(
                        "Method body {} implements method {} out of {}",
                        index,
                        body.method,
                        methods.len()
                    ))
                }
            }
        }
        trace!(position = parser.pos(), count, "method bodies decoded");

        if parser.has_more_data() {
            trace!(trailing = parser.remaining(), "ignoring bytes after method bodies");
        }

        let abc = AbcFile {
            version,
            constant_pool,
            methods,
            metadata,
            instances,
            classes,
            scripts,
            method_bodies,
        };

        if config.validate_references {
            validate_references(&abc)?;
        }
        if config.disassemble {
            abc.disassemble(config.parallel)?;
        }

        debug!(
            version = %abc.version,
            methods = abc.methods.len(),
            types = abc.instances.len(),
            scripts = abc.scripts.len(),
            bodies = abc.method_bodies.len(),
            "decoded ABC module"
        );

        Ok(abc)
    }

    /// Version header of the module.
    #[must_use]
    pub fn version(&self) -> AbcVersion {
        self.version
    }

    /// The constant pool.
    #[must_use]
    pub fn constant_pool(&self) -> &ConstantPool {
        &self.constant_pool
    }

    /// Method signatures, in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodDesc] {
        &self.methods
    }

    /// Metadata entries, in declaration order.
    #[must_use]
    pub fn metadata(&self) -> &[MetadataInfo] {
        &self.metadata
    }

    /// Instance records, one per declared class.
    #[must_use]
    pub fn instances(&self) -> &[InstanceInfo] {
        &self.instances
    }

    /// Class records, parallel to [`AbcFile::instances`].
    #[must_use]
    pub fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }

    /// Class declarations, pairing each instance record with its class record.
    pub fn types(&self) -> impl ExactSizeIterator<Item = TypeInfo<'_>> {
        self.instances
            .iter()
            .zip(&self.classes)
            .enumerate()
            .map(|(index, (instance, class))| TypeInfo {
                index,
                instance,
                class,
            })
    }

    /// Finds a class declaration by its qualified name, e.g. `flash.display.Sprite`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] if a class name cannot be resolved.
    pub fn type_by_name(&self, name: &str) -> Result<Option<TypeInfo<'_>>> {
        for ty in self.types() {
            if self.constant_pool.qualified_name(ty.instance.name)? == name {
                return Ok(Some(ty));
            }
        }

        Ok(None)
    }

    /// Scripts, in declaration order. The last one is the module's entry point.
    #[must_use]
    pub fn scripts(&self) -> &[ScriptInfo] {
        &self.scripts
    }

    /// The entry point script.
    #[must_use]
    pub fn entry_point(&self) -> Option<&ScriptInfo> {
        self.scripts.last()
    }

    /// Method bodies, in declaration order.
    #[must_use]
    pub fn method_bodies(&self) -> &[MethodBody] {
        &self.method_bodies
    }

    /// The body implementing the method signature at `method`, if it has one.
    #[must_use]
    pub fn method_body(&self, method: usize) -> Option<&MethodBody> {
        let body = self.methods.get(method)?.body()?;
        self.method_bodies.get(body)
    }

    /// Disassembles every method body that has not been disassembled yet.
    ///
    /// # Errors
    /// Returns the first disassembly error encountered.
    pub fn disassemble_all(&self) -> Result<()> {
        self.disassemble(false)
    }

    /// Like [`AbcFile::disassemble_all`], spreading bodies over the rayon thread pool.
    ///
    /// # Errors
    /// Returns a disassembly error if any body fails.
    pub fn disassemble_all_parallel(&self) -> Result<()> {
        self.disassemble(true)
    }

    fn disassemble(&self, parallel: bool) -> Result<()> {
        if parallel {
            self.method_bodies
                .par_iter()
                .try_for_each(|body| body.operations().map(|_| ()))
        } else {
            self.method_bodies
                .iter()
                .try_for_each(|body| body.operations().map(|_| ()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test::AbcBuilder, Error};

    #[test]
    fn empty_module() {
        let abc = AbcFile::from_mem(AbcBuilder::new().build()).unwrap();

        assert_eq!(abc.version(), AbcVersion { major: 46, minor: 16 });
        assert_eq!(abc.version().to_string(), "46.16");
        assert!(abc.methods().is_empty());
        assert!(abc.metadata().is_empty());
        assert!(abc.instances().is_empty());
        assert!(abc.classes().is_empty());
        assert!(abc.scripts().is_empty());
        assert!(abc.method_bodies().is_empty());
        assert_eq!(abc.types().len(), 0);
        assert!(abc.entry_point().is_none());
    }

    #[test]
    fn binds_bodies_to_methods() {
        let mut builder = AbcBuilder::new();
        builder.method(0, &[]);
        builder.method(0, &[]);
        builder.script(1, &[]);
        builder.body(1, &[0xD0, 0x30, 0x47]);
        let abc = AbcFile::from_mem(builder.build()).unwrap();

        assert_eq!(abc.methods()[0].body(), None);
        assert_eq!(abc.methods()[1].body(), Some(0));
        assert!(abc.method_body(0).is_none());
        assert_eq!(abc.method_body(1).unwrap().code, vec![0xD0, 0x30, 0x47]);
        assert_eq!(abc.entry_point().unwrap().initializer, 1);
    }

    #[test]
    fn duplicate_body() {
        let mut builder = AbcBuilder::new();
        builder.method(0, &[]);
        builder.body(0, &[0x47]);
        builder.body(0, &[0x47]);

        assert!(matches!(
            AbcFile::from_mem(builder.build()),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn body_for_missing_method() {
        let mut builder = AbcBuilder::new();
        builder.body(0, &[0x47]);

        assert!(matches!(
            AbcFile::from_mem(builder.build()),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn dangling_script_initializer() {
        let mut builder = AbcBuilder::new();
        builder.script(3, &[]);
        let data = builder.build();

        assert!(matches!(
            AbcFile::from_bytes(&data),
            Err(Error::Malformed { .. })
        ));
        assert!(AbcFile::from_bytes_with_config(&data, LoadConfig::minimal()).is_ok());
    }

    #[test]
    fn eager_disassembly() {
        let mut builder = AbcBuilder::new();
        builder.method(0, &[]);
        builder.method(0, &[]);
        builder.body(0, &[0xD0, 0x30, 0x47]);
        builder.body(1, &[0x24, 0x01, 0x48]);
        let abc = AbcFile::from_mem_with_config(builder.build(), LoadConfig::eager()).unwrap();

        assert!(abc.method_bodies().iter().all(MethodBody::is_disassembled));
    }

    #[test]
    fn eager_disassembly_rejects_bad_code() {
        let mut builder = AbcBuilder::new();
        builder.method(0, &[]);
        builder.body(0, &[0xD0, 0xFF]);
        let data = builder.build();

        let lazy = AbcFile::from_bytes(&data).unwrap();
        assert!(matches!(
            lazy.disassemble_all(),
            Err(Error::UnknownOpcode { opcode: 0xFF, offset: 1 })
        ));
        assert!(matches!(
            AbcFile::from_bytes_with_config(&data, LoadConfig::eager()),
            Err(Error::UnknownOpcode { .. })
        ));
    }

    #[test]
    fn truncated_module() {
        let mut builder = AbcBuilder::new();
        builder.method(0, &[]);
        builder.body(0, &[0xD0, 0x30, 0x47]);
        let data = builder.build();

        for cut in 0..data.len() {
            assert!(AbcFile::from_bytes(&data[..cut]).is_err(), "cut at {cut}");
        }
    }
}
