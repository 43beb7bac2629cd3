//! Shared fixtures for unit tests.

mod builder;

pub use builder::{class_trait, method_trait, slot_trait, write_s24, write_u30, AbcBuilder, Handler};
