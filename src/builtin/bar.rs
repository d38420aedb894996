//! A sample theme. It has no hooks; its `views/page.tpl.html` does the work.

use crate::component::descriptor::theme_namespace;
use crate::component::{Component, ComponentUnit};

pub const NAME: &str = "Bar";

pub fn unit() -> ComponentUnit {
    ComponentUnit::new(theme_namespace(NAME), Component::new)
}
