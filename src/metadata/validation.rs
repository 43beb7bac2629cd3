//! Cross-reference validation of a decoded module.
//!
//! Decoding already guarantees that every record is complete and that the constant pool is
//! internally consistent. This pass checks the indices stored everywhere else: trait names,
//! method and class references, exception types and metadata references. It runs after the
//! whole module is decoded because traits may reference classes that appear later in the file.

use crate::{
    metadata::{
        abcfile::AbcFile,
        constantpool::ConstantPool,
        traits::{Trait, TraitData},
    },
    Result,
};

/// Upper bounds of every table an index may point into.
struct Limits<'a> {
    pool: &'a ConstantPool,
    methods: usize,
    metadata: usize,
    classes: usize,
}

impl Limits<'_> {
    fn check(&self, index: u32, len: usize, what: &str, context: &str) -> Result<()> {
        if index as usize >= len {
            return Err(malformed_error!(
                "{} references {} {} out of {}",
                context,
                what,
                index,
                len
            ));
        }

        Ok(())
    }

    fn string(&self, index: u32, context: &str) -> Result<()> {
        self.check(index, self.pool.strings().len(), "string", context)
    }

    fn namespace(&self, index: u32, context: &str) -> Result<()> {
        self.check(index, self.pool.namespaces().len(), "namespace", context)
    }

    fn multiname(&self, index: u32, context: &str) -> Result<()> {
        self.check(index, self.pool.multinames().len(), "multiname", context)
    }

    fn method(&self, index: u32, context: &str) -> Result<()> {
        self.check(index, self.methods, "method", context)
    }

    fn traits(&self, traits: &[Trait], context: &str) -> Result<()> {
        for entry in traits {
            self.multiname(entry.name, context)?;
            for metadata in &entry.metadata {
                self.check(*metadata, self.metadata, "metadata", context)?;
            }

            match &entry.data {
                TraitData::Slot(slot) | TraitData::Const(slot) => {
                    self.multiname(slot.type_name, context)?;
                    if let Some(value) = &slot.value {
                        self.pool.resolve(value)?;
                    }
                }
                TraitData::Method(method)
                | TraitData::Getter(method)
                | TraitData::Setter(method) => self.method(method.method, context)?,
                TraitData::Class { class, .. } => {
                    self.check(*class, self.classes, "class", context)?;
                }
                TraitData::Function { function, .. } => self.method(*function, context)?,
            }
        }

        Ok(())
    }
}

/// Verifies every index stored outside the constant pool.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] naming the first dangling reference.
pub fn validate_references(abc: &AbcFile) -> Result<()> {
    let pool = abc.constant_pool();
    let limits = Limits {
        pool,
        methods: abc.methods().len(),
        metadata: abc.metadata().len(),
        classes: abc.classes().len(),
    };

    for (index, method) in abc.methods().iter().enumerate() {
        let context = format!("method {index}");
        limits.string(method.name, &context)?;
        limits.multiname(method.return_type, &context)?;
        for param in &method.param_types {
            limits.multiname(*param, &context)?;
        }
        for name in &method.param_names {
            limits.string(*name, &context)?;
        }
        for default in &method.optional {
            pool.resolve(default)?;
        }
    }

    for (index, entry) in abc.metadata().iter().enumerate() {
        let context = format!("metadata {index}");
        limits.string(entry.name, &context)?;
        for item in &entry.items {
            limits.string(item.key, &context)?;
            limits.string(item.value, &context)?;
        }
    }

    for (index, instance) in abc.instances().iter().enumerate() {
        let context = format!("instance {index}");
        limits.multiname(instance.name, &context)?;
        limits.multiname(instance.super_name, &context)?;
        if let Some(namespace) = instance.protected_ns {
            limits.namespace(namespace, &context)?;
        }
        for interface in &instance.interfaces {
            limits.multiname(*interface, &context)?;
        }
        limits.method(instance.initializer, &context)?;
        limits.traits(&instance.traits, &context)?;
    }

    for (index, class) in abc.classes().iter().enumerate() {
        let context = format!("class {index}");
        limits.method(class.initializer, &context)?;
        limits.traits(&class.traits, &context)?;
    }

    for (index, script) in abc.scripts().iter().enumerate() {
        let context = format!("script {index}");
        limits.method(script.initializer, &context)?;
        limits.traits(&script.traits, &context)?;
    }

    for body in abc.method_bodies() {
        let context = format!("body of method {}", body.method);
        for handler in &body.exceptions {
            limits.multiname(handler.exception_type, &context)?;
            limits.multiname(handler.var_name, &context)?;
        }
        limits.traits(&body.traits, &context)?;
    }

    Ok(())
}
