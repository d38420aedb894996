//! Components compiled into the crate.
//!
//! - `Lapurd`: the core
//! - `Foo`: a module
//! - `HelloWorld`: an application
//! - `Bar`: a theme
//!
//! Their templates live in `views/` and `themes/Bar/views/` at the crate
//! root, which is therefore a valid `lapurd_root`.

pub mod bar;
pub mod foo;
pub mod hello_world;
pub mod lapurd;

use crate::component::Catalog;

/// A catalog holding every built-in component.
pub fn catalog() -> Catalog {
    Catalog::new()
        .with(lapurd::unit())
        .with(foo::unit())
        .with(hello_world::unit())
        .with(bar::unit())
}
