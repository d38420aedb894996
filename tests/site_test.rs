//! End-to-end request cycles against the built-in and demo components.

use lapurd::LapurdError;

mod common;

#[test]
fn test_hello_world_front_page() {
    let page = common::site("HelloWorld").handle(None).unwrap();
    assert_eq!(page.status, 200);
    assert_eq!(page.path, "index");
    assert!(page.body.contains("<p>This is from theme 'Bar'.</p>"));
    assert!(page.body.contains("Hello World!"));
}

#[test]
fn test_application_route_beats_core() {
    let site = common::site("Demo");
    let page = site.handle(Some("index")).unwrap();
    assert!(page.body.contains("Welcome home"));
    assert!(page.body.contains("<title>Home</title>"));
    assert!(!page.body.contains("Hello World"));
}

#[test]
fn test_wildcard_route_receives_segment() {
    let page = common::site("Demo").handle(Some("foo/bar")).unwrap();
    assert!(page.body.contains("You are saying: 'bar'!"));
}

#[test]
fn test_redirect_is_followed_to_target() {
    let site = common::site("Demo");
    let route = site.paths().resolve("old").unwrap();
    assert_eq!(route.entry.pattern, "foo/%");
    assert_eq!(route.arguments(), vec!["moved"]);

    let page = site.handle(Some("old")).unwrap();
    assert!(page.body.contains("You are saying: 'moved'!"));
}

#[test]
fn test_unknown_path_renders_not_found() {
    let page = common::site("Demo").handle(Some("baz")).unwrap();
    assert_eq!(page.status, 404);
    assert_eq!(
        page.body,
        "<h1>404 Page Not Found</h1>The page you requested can not be found."
    );
}

#[test]
fn test_redirect_cycle_is_an_error() {
    let err = common::site("Demo").handle(Some("a")).unwrap_err();
    assert!(matches!(err, LapurdError::RedirectCycle { .. }));
    assert_eq!(err.status(), 500);
}

#[test]
fn test_missing_callback_is_invalid() {
    let err = common::site("Demo").handle(Some("broken")).unwrap_err();
    assert!(matches!(
        err,
        LapurdError::InvalidCallback { ref callback, ref component }
            if callback == "missing" && component == "lapurd::application::Demo"
    ));
}

#[test]
fn test_both_providers_keep_their_index_entry() {
    let site = common::site("Demo");
    let providers: Vec<&str> = site
        .paths()
        .entries("index")
        .map(|e| e.provider.namespace.as_str())
        .collect();
    assert_eq!(providers, vec!["lapurd::core", "lapurd::application::Demo"]);
}
