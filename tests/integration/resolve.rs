//! Endpoint resolution against a loopback page server

use button_monitor::app::{self, Outcome};
use button_monitor::config::Config;
use button_monitor::resolver::{ResolveError, Resolver};

use super::helpers::{serve_page_once, Recorder};

#[test]
fn test_resolves_endpoint_from_page() {
    let body = r#"<html><script>
        r.config = {"thebutton_websocket": "wss://wss.redditmedia.com/thebutton?h=abc123&e=1428"};
    </script></html>"#;
    let (url, server) = serve_page_once("200 OK", body.to_string());

    let resolver = Resolver::new(url, "wss.redditmedia.com").unwrap();
    let endpoint = resolver.resolve().unwrap();
    server.join().unwrap();

    assert_eq!(
        endpoint.as_str(),
        "wss://wss.redditmedia.com/thebutton?h=abc123&e=1428"
    );
}

#[test]
fn test_page_without_endpoint_is_not_found() {
    let (url, server) = serve_page_once("200 OK", "<html>nothing here</html>".to_string());

    let err = Resolver::new(url, "wss.redditmedia.com")
        .unwrap()
        .resolve()
        .unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ResolveError::NotFound { .. }));
}

#[test]
fn test_error_status_is_fetch_failure() {
    let body = r#""wss://wss.redditmedia.com/thebutton?h=ignored""#.to_string();
    let (url, server) = serve_page_once("503 Service Unavailable", body);

    let err = Resolver::new(url, "wss.redditmedia.com")
        .unwrap()
        .resolve()
        .unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, ResolveError::Fetch(_)));
    assert!(err.to_string().contains("503"));
}

#[test]
fn test_unresolved_run_never_connects() {
    let (url, server) = serve_page_once("200 OK", "<html></html>".to_string());
    let config = Config {
        source_url: url,
        ..Config::default()
    };
    let mut recorder = Recorder::default();

    let outcome = app::run(&config, None, &mut recorder).unwrap();
    server.join().unwrap();

    assert_eq!(outcome, Outcome::Unresolved);
    assert!(recorder.events.is_empty());
}
