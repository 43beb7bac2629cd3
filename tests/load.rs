//! Integration tests for loading complete modules.
//!
//! Modules are synthesized with the shared builder and loaded through the public API only.

mod common;

use abcscope::{
    metadata::{
        constantpool::{Multiname, NamespaceKind, Value},
        traits::{TraitData, TraitKind},
    },
    prelude::*,
};
use common::{sample_module, AbcBuilder};

#[test]
fn empty_module() -> Result<()> {
    let abc = AbcFile::from_mem(AbcBuilder::new().build())?;

    assert_eq!(abc.version().major, 46);
    assert_eq!(abc.version().minor, 16);
    assert!(abc.methods().is_empty());
    assert!(abc.metadata().is_empty());
    assert_eq!(abc.types().len(), 0);
    assert!(abc.scripts().is_empty());
    assert!(abc.method_bodies().is_empty());

    let pool = abc.constant_pool();
    assert_eq!(pool.ints(), &[0]);
    assert_eq!(pool.strings(), &[String::new()]);
    assert_eq!(pool.multinames(), &[Multiname::ANY]);
    Ok(())
}

#[test]
fn single_qname() -> Result<()> {
    let mut builder = AbcBuilder::new();
    let name = builder.qname("", "A");
    let abc = AbcFile::from_bytes(&builder.build())?;
    let pool = abc.constant_pool();

    assert_eq!(pool.simple_name(name)?, "A");
    assert_eq!(pool.qualified_name(name)?, "A");
    let namespace = pool.namespace_of(name)?.unwrap();
    assert_eq!(namespace.kind, NamespaceKind::Package);
    assert_eq!(pool.string(namespace.name), Some(""));
    Ok(())
}

#[test]
fn sample_types() -> Result<()> {
    let sample = sample_module();
    let abc = AbcFile::from_mem(sample.data)?;
    let pool = abc.constant_pool();

    assert_eq!(abc.types().len(), 1);
    let widget = abc.type_by_name("demo.Widget")?.unwrap();
    assert_eq!(widget.index, 0);
    assert_eq!(widget.instance.name, sample.widget);
    assert_eq!(pool.qualified_name(widget.instance.super_name)?, "Object");
    assert!(widget.instance.flags.contains(InstanceFlags::SEALED));
    assert!(!widget.instance.is_interface());
    assert!(abc.type_by_name("demo.Gadget")?.is_none());

    let run = &widget.instance.traits[0];
    assert_eq!(run.kind(), TraitKind::Method);
    assert_eq!(pool.simple_name(run.name)?, "run");
    assert_eq!(run.method(), Some(sample.run));

    let limit = &widget.class.traits[0];
    let TraitData::Const(slot) = &limit.data else {
        panic!("expected a const trait, got {:?}", limit.data);
    };
    assert_eq!(slot.type_name, sample.int_type);
    assert_eq!(pool.resolve(&slot.value.unwrap())?, Value::Int(7));
    Ok(())
}

#[test]
fn sample_entry_point() -> Result<()> {
    let sample = sample_module();
    let abc = AbcFile::from_mem(sample.data)?;

    let script = abc.entry_point().unwrap();
    assert_eq!(script.initializer, sample.script_init);
    assert!(matches!(script.traits[0].data, TraitData::Class { class: 0, .. }));

    // the script initializer has no body in the sample
    assert!(abc.method_body(sample.script_init as usize).is_none());
    assert!(abc.methods()[sample.script_init as usize].body().is_none());
    Ok(())
}

#[test]
fn sample_bodies() -> Result<()> {
    let sample = sample_module();
    let abc = AbcFile::from_mem(sample.data)?;

    assert_eq!(abc.method_bodies().len(), 3);
    let body = abc.method_body(sample.run as usize).unwrap();
    assert_eq!(body.method, sample.run);
    assert_eq!(abc.methods()[sample.run as usize].body(), Some(2));
    assert_eq!(
        abc.constant_pool().string(abc.methods()[sample.run as usize].name),
        Some("run")
    );

    assert_eq!(body.exceptions.len(), 1);
    assert_eq!(body.handlers_at(4).count(), 1);
    assert_eq!(body.handlers_at(8).count(), 0);
    assert!(!body.is_disassembled());
    Ok(())
}

#[test]
fn every_binding_is_consistent() -> Result<()> {
    let abc = AbcFile::from_mem(sample_module().data)?;

    for (index, method) in abc.methods().iter().enumerate() {
        if let Some(body) = method.body() {
            assert_eq!(abc.method_bodies()[body].method as usize, index);
        }
    }
    for (index, body) in abc.method_bodies().iter().enumerate() {
        assert_eq!(abc.methods()[body.method as usize].body(), Some(index));
    }
    Ok(())
}

#[test]
fn metadata_entries() -> Result<()> {
    let mut builder = AbcBuilder::new();
    let name = builder.string("Embed");
    let key = builder.string("source");
    let value = builder.string("icon.png");
    let positional = builder.string("x");
    builder.metadata(name, &[(key, value), (0, positional)]);
    let abc = AbcFile::from_mem(builder.build())?;

    let entry = &abc.metadata()[0];
    let pool = abc.constant_pool();
    assert_eq!(pool.string(entry.name), Some("Embed"));
    assert_eq!(entry.value_of(key).and_then(|v| pool.string(v)), Some("icon.png"));
    assert_eq!(entry.items[1].key, 0);
    assert_eq!(pool.string(entry.items[1].value), Some("x"));
    Ok(())
}

#[test]
fn generic_type_names() -> Result<()> {
    let mut builder = AbcBuilder::new();
    let vector = builder.qname("__AS3__.vec", "Vector");
    let int_type = builder.qname("", "int");
    let vector_int = builder.type_name(vector, &[int_type]);
    let abc = AbcFile::from_mem(builder.build())?;
    let pool = abc.constant_pool();

    assert_eq!(pool.simple_name(vector_int)?, "Vector");
    assert_eq!(pool.qualified_name(vector_int)?, "__AS3__.vec.Vector.<int>");
    Ok(())
}

#[test]
fn trailing_bytes_are_ignored() -> Result<()> {
    let mut builder = AbcBuilder::new();
    builder.trailer(&[0xDE, 0xAD]);
    let abc = AbcFile::from_mem(builder.build())?;

    assert!(abc.method_bodies().is_empty());
    Ok(())
}

#[test]
fn from_file_round_trip() -> Result<()> {
    let path = std::env::temp_dir().join(format!("abcscope-load-{}.abc", std::process::id()));
    std::fs::write(&path, sample_module().data)?;

    let loaded = AbcFile::from_file(&path);
    std::fs::remove_file(&path)?;

    let abc = loaded?;
    assert!(abc.type_by_name("demo.Widget")?.is_some());
    Ok(())
}
