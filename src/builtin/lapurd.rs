//! The core component.
//!
//! Provides the fallback front page and declares the views every site can
//! render.

use serde_json::json;

use crate::component::{Component, ComponentUnit, Descriptor, Output, CORE_NAMESPACE};
use crate::error::{BoxError, PageNotFound};

pub fn unit() -> ComponentUnit {
    ComponentUnit::new(CORE_NAMESPACE, construct)
        .with_hook("paths", |_| {
            Ok(json!({
                "index": {
                    "callback": "sayHelloWorld",
                    "page-title": "Hello World",
                },
            }))
        })
        .with_hook("views", |_| Ok(json!(["page", "page-not-found"])))
}

fn construct(descriptor: Descriptor) -> Component {
    Component::new(descriptor)
        .with_callback("sayHelloWorld", say_hello_world)
        .with_callback("handlePageNotFound", handle_page_not_found)
}

fn say_hello_world(_: &[String], out: &mut Output) -> Result<(), BoxError> {
    out.print("<h1>Hello World!</h1>");
    Ok(())
}

fn handle_page_not_found(_: &[String], out: &mut Output) -> Result<(), BoxError> {
    out.print(PageNotFound.error_page());
    Ok(())
}
