//! Component descriptors and directory conventions.
//!
//! A descriptor names a component and says where its files live. Two
//! descriptors denote the same component iff their namespaces are equal.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kinds of component a site is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    /// The framework's own component.
    #[serde(rename = "lapurd", alias = "core")]
    Core,
    Module,
    Application,
    Theme,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Core => "lapurd",
            ComponentKind::Module => "module",
            ComponentKind::Application => "application",
            ComponentKind::Theme => "theme",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name of the core component.
pub const CORE_NAME: &str = "Lapurd";

/// Namespace of the core component.
pub const CORE_NAMESPACE: &str = "lapurd::core";

pub fn module_namespace(name: &str) -> String {
    format!("lapurd::module::{}", name)
}

pub fn application_namespace(name: &str) -> String {
    format!("lapurd::application::{}", name)
}

pub fn theme_namespace(name: &str) -> String {
    format!("lapurd::theme::{}", name)
}

/// Filesystem roots the directory conventions are derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    /// Web root of the installation.
    pub system_root: PathBuf,
    /// Directory holding the framework's own files.
    pub lapurd_root: PathBuf,
    /// Directory of the running application.
    pub app_root: PathBuf,
}

impl Roots {
    /// Compute the roots for `application`.
    ///
    /// The application lives in `applications/<name>` under the system root
    /// when that directory exists. Otherwise it is `application/` when the
    /// framework is the web root, or the system root itself.
    pub fn new(system_root: impl Into<PathBuf>, lapurd_root: impl Into<PathBuf>, application: &str) -> Self {
        let system_root = system_root.into();
        let lapurd_root = lapurd_root.into();

        let named = system_root.join("applications").join(application);
        let app_root = if named.is_dir() {
            named
        } else if system_root == lapurd_root {
            system_root.join("application")
        } else {
            system_root.clone()
        };

        Self {
            system_root,
            lapurd_root,
            app_root,
        }
    }

    /// First existing `<root>/<dir>/<name>`, preferring the application.
    fn locate(&self, dir: &str, name: &str) -> PathBuf {
        let in_app = self.app_root.join(dir).join(name);
        if in_app.is_dir() {
            in_app
        } else {
            self.lapurd_root.join(dir).join(name)
        }
    }
}

/// A component build description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Descriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Identifier of the implementing type.
    pub class: String,
    /// Name of the unit holding the component's hooks.
    pub include: String,
    /// Directory of the component.
    pub filepath: PathBuf,
    /// Identity of the component.
    pub namespace: String,
    /// Metadata merged in from the component's `info` function.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub info: Map<String, Value>,
}

impl Descriptor {
    fn new(name: &str, kind: ComponentKind, namespace: String, include: &str, filepath: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            kind,
            class: namespace.clone(),
            include: include.to_string(),
            filepath,
            namespace,
            info: Map::new(),
        }
    }

    pub fn core(roots: &Roots) -> Self {
        Self::new(
            CORE_NAME,
            ComponentKind::Core,
            CORE_NAMESPACE.to_string(),
            "lapurd.inc",
            roots.lapurd_root.clone(),
        )
    }

    pub fn module(name: &str, roots: &Roots) -> Self {
        Self::new(
            name,
            ComponentKind::Module,
            module_namespace(name),
            "module.inc",
            roots.locate("modules", name),
        )
    }

    pub fn application(name: &str, roots: &Roots) -> Self {
        Self::new(
            name,
            ComponentKind::Application,
            application_namespace(name),
            "application.inc",
            roots.app_root.clone(),
        )
    }

    pub fn theme(name: &str, roots: &Roots) -> Self {
        Self::new(
            name,
            ComponentKind::Theme,
            theme_namespace(name),
            "theme.inc",
            roots.locate("themes", name),
        )
    }

    /// Whether both descriptors denote the same component.
    pub fn same_as(&self, other: &Descriptor) -> bool {
        self.namespace == other.namespace
    }

    /// Location of the component's hook unit.
    pub fn source(&self) -> PathBuf {
        self.filepath.join(&self.include)
    }

    /// Directory the component's templates are looked up in.
    pub fn views_dir(&self) -> PathBuf {
        self.filepath.join("views")
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}
