// crates/textlocale-sources/tests/sources.rs
// ============================================================================
// Module: TextLocale Source Tests
// Description: Tests for HTTP, file, and inline dictionary sources.
// Purpose: Exercise layouts, limits, and error mapping against real transports.
// Dependencies: textlocale-sources, textlocale-core, tempfile, tiny_http, url
// ============================================================================
//! ## Overview
//! Validates dictionary sources and their integration with the store.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::net::SocketAddr;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use tempfile::tempdir;
use textlocale_core::DictionarySource;
use textlocale_core::DictionaryStore;
use textlocale_core::Domain;
use textlocale_core::LanguageTag;
use textlocale_core::LoadError;
use textlocale_sources::FileSource;
use textlocale_sources::HttpSource;
use textlocale_sources::HttpSourceConfig;
use textlocale_sources::InlineSource;
use textlocale_sources::SourceError;
use textlocale_sources::UrlLayout;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a language tag, panicking on invalid input.
fn tag(value: &str) -> LanguageTag {
    LanguageTag::new(value).expect("valid tag")
}

/// Serves a single request, answering `body` with `status` when the path
/// matches `expected_path` and 404 otherwise.
fn serve_once(
    expected_path: &'static str,
    status: u16,
    body: &'static str,
) -> (SocketAddr, thread::JoinHandle<()>) {
    let server = Server::http("127.0.0.1:0").expect("http server");
    let addr = server.server_addr().to_ip().expect("ip addr");
    let handle = thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = if request.url() == expected_path {
                Response::from_string(body).with_status_code(status).with_header(
                    Header::from_bytes("Content-Type", "application/json").unwrap(),
                )
            } else {
                Response::from_string("missing").with_status_code(404)
            };
            let _ = request.respond(response);
        }
    });
    (addr, handle)
}

/// Builds an HTTP source rooted at `/app/` on the test server.
fn http_source(addr: SocketAddr, layout: UrlLayout) -> HttpSource {
    let base = Url::parse(&format!("http://{addr}/app/")).unwrap();
    HttpSource::new(base, layout).expect("http source")
}

// ============================================================================
// SECTION: HTTP Source
// ============================================================================

/// Tests the domain layout requests `<base>/<domain>/<tag>.json`.
#[tokio::test]
async fn http_source_fetches_domain_layout() {
    let (addr, handle) = serve_once("/app/ui/ja-jp.json", 200, r#"{"greeting":"Konnichiwa"}"#);
    let source = http_source(addr, UrlLayout::Domain);

    let dictionary = source.fetch(&Domain::new("ui"), &tag("ja-JP")).await.expect("fetch");
    handle.join().expect("server thread");

    assert_eq!(dictionary.get("greeting"), Some("Konnichiwa"));
}

/// Tests the locales layout ignores the domain.
#[tokio::test]
async fn http_source_fetches_locales_layout() {
    let (addr, handle) =
        serve_once("/app/locales/fr/localizable-strings.json", 200, r#"{"greeting":"Bonjour"}"#);
    let source = http_source(addr, UrlLayout::Locales);

    let dictionary = source.fetch(&Domain::new("ignored"), &tag("fr")).await.expect("fetch");
    handle.join().expect("server thread");

    assert_eq!(dictionary.get("greeting"), Some("Bonjour"));
}

/// Tests non-success statuses map to status errors.
#[tokio::test]
async fn http_source_maps_status() {
    let (addr, handle) = serve_once("/app/ui/en.json", 503, "unavailable");
    let source = http_source(addr, UrlLayout::Domain);

    let result = source.fetch(&Domain::new("ui"), &tag("en")).await;
    handle.join().expect("server thread");

    assert_eq!(result, Err(LoadError::Status(503)));
}

/// Tests non-object documents map to parse errors.
#[tokio::test]
async fn http_source_rejects_nested_document() {
    let (addr, handle) = serve_once("/app/ui/en.json", 200, r#"{"greeting":{"text":"Hi"}}"#);
    let source = http_source(addr, UrlLayout::Domain);

    let result = source.fetch(&Domain::new("ui"), &tag("en")).await;
    handle.join().expect("server thread");

    assert!(matches!(result, Err(LoadError::Parse(_))));
}

/// Tests bodies over the limit are rejected.
#[tokio::test]
async fn http_source_enforces_body_limit() {
    let (addr, handle) =
        serve_once("/app/ui/en.json", 200, r#"{"greeting":"a rather long greeting value"}"#);
    let base = Url::parse(&format!("http://{addr}/app")).unwrap();
    let config = HttpSourceConfig {
        max_bytes: 16,
        ..HttpSourceConfig::default()
    };
    let source = HttpSource::with_config(base, UrlLayout::Domain, config).expect("http source");

    let result = source.fetch(&Domain::new("ui"), &tag("en")).await;
    handle.join().expect("server thread");

    assert_eq!(
        result,
        Err(LoadError::TooLarge {
            limit: 16
        })
    );
}

/// Tests an unreachable host maps to a transport error.
#[tokio::test]
async fn http_source_maps_transport_failure() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("local addr")
    };
    let config = HttpSourceConfig {
        timeout: Duration::from_millis(500),
        ..HttpSourceConfig::default()
    };
    let base = Url::parse(&format!("http://{addr}/")).unwrap();
    let source = HttpSource::with_config(base, UrlLayout::Domain, config).expect("http source");

    let result = source.fetch(&Domain::new("ui"), &tag("en")).await;

    assert!(matches!(result, Err(LoadError::Transport(_))));
}

/// Tests bases that cannot host dictionary paths are rejected at construction.
#[test]
fn http_source_rejects_invalid_base() {
    for base in ["mailto:team@example.test", "file:///srv/locales"] {
        let result = HttpSource::new(Url::parse(base).unwrap(), UrlLayout::Domain);
        assert!(matches!(result, Err(SourceError::InvalidBase(_))), "{base}");
    }
}

/// Tests URLs are built under the base regardless of a trailing slash.
#[test]
fn http_source_builds_dictionary_urls() {
    let source =
        HttpSource::new(Url::parse("https://cdn.test/assets/locales").unwrap(), UrlLayout::Domain)
            .unwrap();
    let url = source.dictionary_url(&Domain::new("acme/widgets"), &tag("pt-BR")).unwrap();
    assert_eq!(url.as_str(), "https://cdn.test/assets/locales/acme/widgets/pt-br.json");
}

// ============================================================================
// SECTION: File Source
// ============================================================================

/// Tests file sources read the domain layout under the root.
#[tokio::test]
async fn file_source_reads_domain_layout() {
    let dir = tempdir().expect("temp dir");
    std::fs::create_dir_all(dir.path().join("ui")).unwrap();
    std::fs::write(dir.path().join("ui/de.json"), r#"{"greeting":"Hallo"}"#).unwrap();
    let source = FileSource::new(dir.path(), UrlLayout::Domain);

    let dictionary = source.fetch(&Domain::new("ui"), &tag("de")).await.expect("file fetch");

    assert_eq!(dictionary.get("greeting"), Some("Hallo"));
}

/// Tests missing files map to not-found errors.
#[tokio::test]
async fn file_source_maps_missing_file() {
    let dir = tempdir().expect("temp dir");
    let source = FileSource::new(dir.path(), UrlLayout::Locales);

    let result = source.fetch(&Domain::new("ui"), &tag("de")).await;

    assert!(matches!(result, Err(LoadError::NotFound(_))));
}

/// Tests oversized files are rejected before decoding.
#[tokio::test]
async fn file_source_enforces_size_limit() {
    let dir = tempdir().expect("temp dir");
    std::fs::create_dir_all(dir.path().join("locales/en")).unwrap();
    std::fs::write(
        dir.path().join("locales/en/localizable-strings.json"),
        r#"{"greeting":"Hello there"}"#,
    )
    .unwrap();
    let source = FileSource::new(dir.path(), UrlLayout::Locales).with_max_bytes(8);

    let result = source.fetch(&Domain::new("ui"), &tag("en")).await;

    assert_eq!(
        result,
        Err(LoadError::TooLarge {
            limit: 8
        })
    );
}

// ============================================================================
// SECTION: Inline Source
// ============================================================================

/// Tests inline sources serve embedded documents and miss unknown pairs.
#[tokio::test]
async fn inline_source_serves_embedded_documents() {
    let source = InlineSource::new()
        .with_json(Domain::new("ui"), tag("en"), r#"{"greeting":"Hello"}"#)
        .expect("embedded json");

    let hit = source.fetch(&Domain::new("ui"), &tag("en")).await.expect("inline fetch");
    let miss = source.fetch(&Domain::new("ui"), &tag("fr")).await;

    assert_eq!(hit.get("greeting"), Some("Hello"));
    assert!(matches!(miss, Err(LoadError::NotFound(_))));
    assert_eq!(source.len(), 1);
}

// ============================================================================
// SECTION: Store Integration
// ============================================================================

/// Tests a remote system layer merged with a local user layer.
#[tokio::test]
async fn remote_system_and_local_user_layers_merge() {
    let (addr, handle) =
        serve_once("/app/ui/en.json", 200, r#"{"greeting":"Hello","farewell":"Bye"}"#);
    let dir = tempdir().expect("temp dir");
    std::fs::create_dir_all(dir.path().join("ui")).unwrap();
    std::fs::write(dir.path().join("ui/en.json"), r#"{"farewell":"See you"}"#).unwrap();

    let store = DictionaryStore::new(http_source(addr, UrlLayout::Domain))
        .with_user_layer(FileSource::new(dir.path(), UrlLayout::Domain));
    let merged = store.load(&Domain::new("ui"), &tag("en")).await;
    handle.join().expect("server thread");

    assert_eq!(merged.get("greeting"), Some("Hello"));
    assert_eq!(merged.get("farewell"), Some("See you"));
}
