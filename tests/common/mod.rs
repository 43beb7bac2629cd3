//! Fixtures shared by the integration tests.

#![allow(dead_code)]

#[path = "../../src/test/builder.rs"]
mod builder;

pub use builder::{class_trait, method_trait, slot_trait, write_s24, write_u30, AbcBuilder, Handler};

/// A small module with one class, one script and three bodies.
///
/// ```text
/// package demo {
///     public class Widget extends Object {
///         public const LIMIT:int = 7;
///         public function run():void { ... }
///     }
/// }
/// ```
pub struct Sample {
    pub data: Vec<u8>,
    pub widget: u32,
    pub object: u32,
    pub int_type: u32,
    pub run: u32,
    pub script_init: u32,
}

pub fn sample_module() -> Sample {
    let mut abc = AbcBuilder::new();

    let object = abc.qname("", "Object");
    let int_type = abc.qname("", "int");
    let widget = abc.qname("demo", "Widget");
    let limit = abc.qname("", "LIMIT");
    let run_name = abc.qname("", "run");
    let widget_slot = abc.qname("demo", "Widget");
    let seven = abc.int(7);
    let debug_name = abc.string("run");

    let instance_init = abc.method(0, &[]);
    let class_init = abc.method(0, &[]);
    let run = abc.method(debug_name, &[]);
    let script_init = abc.method(0, &[]);

    let class = abc.class(
        widget,
        object,
        instance_init,
        class_init,
        &[method_trait(run_name, 1, 0, run)],
        &[slot_trait(limit, true, 1, int_type, Some((seven, 0x03)))],
    );
    abc.script(script_init, &[class_trait(widget_slot, 1, class)]);

    // getlocal0, pushscope, returnvoid
    abc.body(instance_init, &[0xD0, 0x30, 0x47]);
    abc.body(class_init, &[0xD0, 0x30, 0x47]);

    // 0: getlocal0  1: pushscope  2: pushbyte 3  4: iffalse +2 -> 10
    // 8: pushtrue  9: pop  10: label  11: returnvoid
    let mut code = vec![0xD0, 0x30, 0x24, 0x03, 0x12];
    write_s24(&mut code, 2);
    code.extend_from_slice(&[0x26, 0x29, 0x09, 0x47]);
    abc.body_with_handlers(
        run,
        &code,
        &[Handler {
            from: 2,
            to: 8,
            target: 10,
            exception_type: 0,
            var_name: 0,
        }],
    );

    Sample {
        data: abc.build(),
        widget,
        object,
        int_type,
        run,
        script_init,
    }
}
