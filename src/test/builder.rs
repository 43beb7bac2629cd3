//! Builder for synthetic ABC modules.
//!
//! Produces blobs in the exact on-disk layout so tests can exercise the loader without
//! shipping compiled SWF payloads. Every index returned by the builder is the pool or table
//! index the decoder will see.

#![allow(dead_code)]

/// Appends a value in the variable-length U30 encoding.
pub fn write_u30(out: &mut Vec<u8>, mut value: u32) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Appends a signed 24-bit little-endian value.
pub fn write_s24(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_le_bytes()[..3]);
}

/// Encodes a method trait (kind 1 method, 2 getter, 3 setter).
pub fn method_trait(name: u32, kind: u8, disp_id: u32, method: u32) -> Vec<u8> {
    let mut out = Vec::new();
    write_u30(&mut out, name);
    out.push(kind);
    write_u30(&mut out, disp_id);
    write_u30(&mut out, method);
    out
}

/// Encodes a slot trait, or a const trait with `is_const`. `value` is `(index, kind)`.
pub fn slot_trait(
    name: u32,
    is_const: bool,
    slot_id: u32,
    type_name: u32,
    value: Option<(u32, u8)>,
) -> Vec<u8> {
    let mut out = Vec::new();
    write_u30(&mut out, name);
    out.push(if is_const { 6 } else { 0 });
    write_u30(&mut out, slot_id);
    write_u30(&mut out, type_name);
    match value {
        Some((index, kind)) => {
            write_u30(&mut out, index);
            out.push(kind);
        }
        None => write_u30(&mut out, 0),
    }
    out
}

/// Encodes a class trait.
pub fn class_trait(name: u32, slot_id: u32, class: u32) -> Vec<u8> {
    let mut out = Vec::new();
    write_u30(&mut out, name);
    out.push(4);
    write_u30(&mut out, slot_id);
    write_u30(&mut out, class);
    out
}

fn write_traits(out: &mut Vec<u8>, traits: &[Vec<u8>]) {
    write_u30(out, traits.len() as u32);
    for entry in traits {
        out.extend_from_slice(entry);
    }
}

/// One exception handler of a body built by [`AbcBuilder::body_with_handlers`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Handler {
    pub from: u32,
    pub to: u32,
    pub target: u32,
    pub exception_type: u32,
    pub var_name: u32,
}

/// Accumulates the sections of an ABC module.
#[derive(Debug, Clone)]
pub struct AbcBuilder {
    minor: u16,
    major: u16,
    ints: Vec<u32>,
    uints: Vec<u32>,
    doubles: Vec<f64>,
    strings: Vec<String>,
    namespaces: Vec<(u8, u32)>,
    namespace_sets: Vec<Vec<u32>>,
    multinames: Vec<Vec<u8>>,
    methods: Vec<Vec<u8>>,
    metadata: Vec<Vec<u8>>,
    instances: Vec<Vec<u8>>,
    classes: Vec<Vec<u8>>,
    scripts: Vec<Vec<u8>>,
    bodies: Vec<Vec<u8>>,
    trailer: Vec<u8>,
}

impl Default for AbcBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AbcBuilder {
    /// An empty version 46.16 module.
    pub fn new() -> Self {
        AbcBuilder {
            minor: 16,
            major: 46,
            ints: Vec::new(),
            uints: Vec::new(),
            doubles: Vec::new(),
            strings: Vec::new(),
            namespaces: Vec::new(),
            namespace_sets: Vec::new(),
            multinames: Vec::new(),
            methods: Vec::new(),
            metadata: Vec::new(),
            instances: Vec::new(),
            classes: Vec::new(),
            scripts: Vec::new(),
            bodies: Vec::new(),
            trailer: Vec::new(),
        }
    }

    pub fn version(&mut self, major: u16, minor: u16) -> &mut Self {
        self.major = major;
        self.minor = minor;
        self
    }

    pub fn int(&mut self, value: i32) -> u32 {
        self.ints.push(value as u32);
        self.ints.len() as u32
    }

    pub fn uint(&mut self, value: u32) -> u32 {
        self.uints.push(value);
        self.uints.len() as u32
    }

    pub fn double(&mut self, value: f64) -> u32 {
        self.doubles.push(value);
        self.doubles.len() as u32
    }

    /// Adds a string, reusing an existing entry with the same content.
    pub fn string(&mut self, value: &str) -> u32 {
        if let Some(index) = self.strings.iter().position(|s| s == value) {
            return index as u32 + 1;
        }
        self.strings.push(value.to_string());
        self.strings.len() as u32
    }

    pub fn namespace(&mut self, kind: u8, name: &str) -> u32 {
        let name = self.string(name);
        self.namespaces.push((kind, name));
        self.namespaces.len() as u32
    }

    pub fn package(&mut self, name: &str) -> u32 {
        self.namespace(0x16, name)
    }

    pub fn namespace_set(&mut self, namespaces: &[u32]) -> u32 {
        self.namespace_sets.push(namespaces.to_vec());
        self.namespace_sets.len() as u32
    }

    /// Adds a raw multiname record: tag byte followed by its fields.
    pub fn multiname_raw(&mut self, tag: u8, fields: &[u32]) -> u32 {
        let mut out = vec![tag];
        for field in fields {
            write_u30(&mut out, *field);
        }
        self.multinames.push(out);
        self.multinames.len() as u32
    }

    /// Adds a QName `package.name`.
    pub fn qname(&mut self, package: &str, name: &str) -> u32 {
        let namespace = self.package(package);
        let name = self.string(name);
        self.multiname_raw(0x07, &[namespace, name])
    }

    /// Adds a TypeName `base.<parameters>`.
    pub fn type_name(&mut self, base: u32, parameters: &[u32]) -> u32 {
        let mut fields = vec![base, parameters.len() as u32];
        fields.extend_from_slice(parameters);
        self.multiname_raw(0x1D, &fields)
    }

    /// Adds a method signature with `params` parameter types and no flags.
    pub fn method(&mut self, name: u32, params: &[u32]) -> u32 {
        let mut out = Vec::new();
        write_u30(&mut out, params.len() as u32);
        write_u30(&mut out, 0);
        for param in params {
            write_u30(&mut out, *param);
        }
        write_u30(&mut out, name);
        out.push(0);
        self.method_raw(out)
    }

    /// Adds a pre-encoded method signature. Returns its method index.
    pub fn method_raw(&mut self, record: Vec<u8>) -> u32 {
        self.methods.push(record);
        self.methods.len() as u32 - 1
    }

    pub fn metadata(&mut self, name: u32, items: &[(u32, u32)]) -> u32 {
        let mut out = Vec::new();
        write_u30(&mut out, name);
        write_u30(&mut out, items.len() as u32);
        for (key, _) in items {
            write_u30(&mut out, *key);
        }
        for (_, value) in items {
            write_u30(&mut out, *value);
        }
        self.metadata.push(out);
        self.metadata.len() as u32 - 1
    }

    /// Adds a sealed class with its instance and class records. Returns the class index.
    pub fn class(
        &mut self,
        name: u32,
        super_name: u32,
        instance_initializer: u32,
        class_initializer: u32,
        instance_traits: &[Vec<u8>],
        class_traits: &[Vec<u8>],
    ) -> u32 {
        let mut instance = Vec::new();
        write_u30(&mut instance, name);
        write_u30(&mut instance, super_name);
        instance.push(0x01);
        write_u30(&mut instance, 0);
        write_u30(&mut instance, instance_initializer);
        write_traits(&mut instance, instance_traits);
        self.instances.push(instance);

        let mut class = Vec::new();
        write_u30(&mut class, class_initializer);
        write_traits(&mut class, class_traits);
        self.classes.push(class);

        self.classes.len() as u32 - 1
    }

    pub fn script(&mut self, initializer: u32, traits: &[Vec<u8>]) -> u32 {
        let mut out = Vec::new();
        write_u30(&mut out, initializer);
        write_traits(&mut out, traits);
        self.scripts.push(out);
        self.scripts.len() as u32 - 1
    }

    /// Adds a body without exception handlers or traits.
    pub fn body(&mut self, method: u32, code: &[u8]) -> u32 {
        self.body_with_handlers(method, code, &[])
    }

    pub fn body_with_handlers(&mut self, method: u32, code: &[u8], handlers: &[Handler]) -> u32 {
        let mut out = Vec::new();
        write_u30(&mut out, method);
        write_u30(&mut out, 2);
        write_u30(&mut out, 1);
        write_u30(&mut out, 0);
        write_u30(&mut out, 1);
        write_u30(&mut out, code.len() as u32);
        out.extend_from_slice(code);
        write_u30(&mut out, handlers.len() as u32);
        for handler in handlers {
            write_u30(&mut out, handler.from);
            write_u30(&mut out, handler.to);
            write_u30(&mut out, handler.target);
            write_u30(&mut out, handler.exception_type);
            write_u30(&mut out, handler.var_name);
        }
        write_u30(&mut out, 0);
        self.bodies.push(out);
        self.bodies.len() as u32 - 1
    }

    /// Bytes appended after the method bodies.
    pub fn trailer(&mut self, bytes: &[u8]) -> &mut Self {
        self.trailer.extend_from_slice(bytes);
        self
    }

    /// Serializes the module.
    pub fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.minor.to_le_bytes());
        out.extend_from_slice(&self.major.to_le_bytes());

        write_u30(&mut out, self.ints.len() as u32 + 1);
        for value in &self.ints {
            write_u30(&mut out, *value);
        }
        write_u30(&mut out, self.uints.len() as u32 + 1);
        for value in &self.uints {
            write_u30(&mut out, *value);
        }
        write_u30(&mut out, self.doubles.len() as u32 + 1);
        for value in &self.doubles {
            out.extend_from_slice(&value.to_le_bytes());
        }
        write_u30(&mut out, self.strings.len() as u32 + 1);
        for value in &self.strings {
            write_u30(&mut out, value.len() as u32);
            out.extend_from_slice(value.as_bytes());
        }
        write_u30(&mut out, self.namespaces.len() as u32 + 1);
        for (kind, name) in &self.namespaces {
            out.push(*kind);
            write_u30(&mut out, *name);
        }
        write_u30(&mut out, self.namespace_sets.len() as u32 + 1);
        for set in &self.namespace_sets {
            write_u30(&mut out, set.len() as u32);
            for namespace in set {
                write_u30(&mut out, *namespace);
            }
        }
        write_u30(&mut out, self.multinames.len() as u32 + 1);
        for record in &self.multinames {
            out.extend_from_slice(record);
        }

        for section in [&self.methods, &self.metadata] {
            write_u30(&mut out, section.len() as u32);
            for record in section {
                out.extend_from_slice(record);
            }
        }

        write_u30(&mut out, self.instances.len() as u32);
        for record in self.instances.iter().chain(&self.classes) {
            out.extend_from_slice(record);
        }

        for section in [&self.scripts, &self.bodies] {
            write_u30(&mut out, section.len() as u32);
            for record in section {
                out.extend_from_slice(record);
            }
        }

        out.extend_from_slice(&self.trailer);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_module_bytes() {
        assert_eq!(
            AbcBuilder::new().build(),
            vec![0x10, 0x00, 0x2E, 0x00, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn u30_encoding() {
        let mut out = Vec::new();
        write_u30(&mut out, 0x7F);
        write_u30(&mut out, 0x80);
        assert_eq!(out, vec![0x7F, 0x80, 0x01]);
    }
}
