//! A sample module echoing path segments.

use std::fmt::Write;

use serde_json::json;

use crate::component::descriptor::module_namespace;
use crate::component::{Component, ComponentUnit, Descriptor, Output};
use crate::error::BoxError;

pub const NAME: &str = "Foo";

pub fn unit() -> ComponentUnit {
    ComponentUnit::new(module_namespace(NAME), construct).with_hook("paths", |_| {
        Ok(json!({
            "foo": {
                "callback": "say",
                "arguments": ["Foo"],
            },
            "foo/%": {
                "callback": "say",
                "arguments": [1],
            },
            "foo/about": {
                "callback": "about",
            },
        }))
    })
}

fn construct(descriptor: Descriptor) -> Component {
    Component::new(descriptor)
        .with_callback("say", say)
        .with_callback("about", about)
}

fn say(args: &[String], out: &mut Output) -> Result<(), BoxError> {
    let word = args.first().map(String::as_str).unwrap_or_default();
    write!(out, "You are saying: '{}'!", word)?;
    Ok(())
}

fn about(args: &[String], out: &mut Output) -> Result<(), BoxError> {
    let word = args.first().map(String::as_str).unwrap_or("foo");
    write!(out, "This is Foo module, saying '{}'!", word)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_say_and_about() {
        let mut out = Output::new();
        say(&["bar".to_string()], &mut out).unwrap();
        assert_eq!(out.as_str(), "You are saying: 'bar'!");

        let mut out = Output::new();
        about(&[], &mut out).unwrap();
        assert_eq!(out.as_str(), "This is Foo module, saying 'foo'!");
    }
}
