//! The ABC module object model.
//!
//! A module is a sequence of tables read in one pass: the constant pool, method signatures,
//! metadata entries, instance and class records, scripts and method bodies. Records refer to
//! each other and to the constant pool purely by index.
//!
//! # Key Components
//!
//! - [`abcfile::AbcFile`] - A decoded module and its loaders
//! - [`constantpool`] - Literals, namespaces and multinames, with name resolution
//! - [`method`] - Method signatures, method bodies and exception handlers
//! - [`traits`] - Properties, methods and nested classes attached to a record
//! - [`types`] - Instance and class records of declared classes
//!
//! # Examples
//!
//! ```rust,no_run
//! use abcscope::AbcFile;
//!
//! let abc = AbcFile::from_file("tests/samples/module.abc".as_ref())?;
//! let pool = abc.constant_pool();
//!
//! for ty in abc.types() {
//!     println!("{} extends {}",
//!         pool.qualified_name(ty.instance.name)?,
//!         pool.qualified_name(ty.instance.super_name)?);
//! }
//! # Ok::<(), abcscope::Error>(())
//! ```

/// Implementation of a loaded and decoded ABC module
pub mod abcfile;
/// Metadata entries (annotations) referenced by traits
pub mod annotation;
/// Load options
pub mod config;
/// The constant pool and name resolution
pub mod constantpool;
/// Method signatures, bodies and exception handlers
pub mod method;
/// Script records
pub mod script;
/// Trait records
pub mod traits;
/// Instance and class records
pub mod types;
/// Cross-reference checks run after decoding
pub mod validation;
