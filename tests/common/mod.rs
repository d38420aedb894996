//! Shared fixtures for integration tests.

use std::fmt::Write;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::{json, Map};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use lapurd::builtin;
use lapurd::component::descriptor::application_namespace;
use lapurd::component::{Catalog, Component, ComponentUnit};
use lapurd::{HttpServer, LapurdConfig, Shutdown, Site};

/// The crate root, which holds the built-in templates.
pub fn root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// A valid configuration for `application` rooted at the crate.
pub fn config(application: &str) -> LapurdConfig {
    let mut config = LapurdConfig::default();
    config.server.bind_address = "127.0.0.1:0".into();
    config.site.application = application.into();
    config.site.system_root = root();
    config.site.lapurd_root = root();
    config
}

/// Built-in components plus a `Demo` application with redirects and a
/// broken route.
pub fn demo_catalog() -> Catalog {
    let demo = ComponentUnit::new(application_namespace("Demo"), |d| {
        Component::new(d).with_callback("home", |_, out| {
            write!(out, "Welcome home")?;
            Ok(())
        })
    })
    .with_info(|| {
        let mut info = Map::new();
        info.insert("theme".into(), json!("Bar"));
        info.insert("modules".into(), json!(["Foo"]));
        info
    })
    .with_hook("paths", |_| {
        Ok(json!({
            "index": {"callback": "home", "page-title": "Home"},
            "old": {"redirect": "foo/moved"},
            "a": {"redirect": "b"},
            "b": {"redirect": "a"},
            "broken": {"callback": "missing"},
        }))
    });

    builtin::catalog().with(demo)
}

#[allow(dead_code)]
pub fn site(application: &str) -> Site {
    Site::build(&config(application).site, Arc::new(demo_catalog())).unwrap()
}

#[allow(dead_code)]
pub fn server(application: &str) -> HttpServer {
    let config = config(application);
    let site = Site::build(&config.site, Arc::new(demo_catalog())).unwrap();
    HttpServer::new(Arc::new(site), config)
}

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct Running {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<LapurdConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

#[allow(dead_code)]
pub async fn spawn(server: HttpServer) -> Running {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let (config_updates, updates) = mpsc::unbounded_channel();
    let handle = tokio::spawn(server.run(listener, updates, shutdown.subscribe()));

    Running {
        addr,
        shutdown,
        config_updates,
        handle,
    }
}
