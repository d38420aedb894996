//! The sample application.
//!
//! Its metadata activates the `Bar` theme and the `Foo` module, whatever
//! the configuration says.

use serde_json::{json, Map, Value};

use crate::component::descriptor::application_namespace;
use crate::component::{Component, ComponentUnit, Descriptor, Output};
use crate::error::BoxError;

pub const NAME: &str = "HelloWorld";

pub fn unit() -> ComponentUnit {
    ComponentUnit::new(application_namespace(NAME), construct)
        .with_info(info)
        .with_hook("paths", |_| {
            Ok(json!({
                "index": {
                    "callback": "sayHelloWorld",
                },
            }))
        })
}

fn info() -> Map<String, Value> {
    let mut info = Map::new();
    info.insert("theme".to_string(), json!(super::bar::NAME));
    info.insert("modules".to_string(), json!([super::foo::NAME]));
    info
}

fn construct(descriptor: Descriptor) -> Component {
    Component::new(descriptor).with_callback("sayHelloWorld", say_hello_world)
}

fn say_hello_world(_: &[String], out: &mut Output) -> Result<(), BoxError> {
    out.print("Hello World!");
    Ok(())
}
