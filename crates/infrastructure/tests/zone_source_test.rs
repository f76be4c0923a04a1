mod helpers;

use dnsd_application::ports::ZoneSource;
use dnsd_domain::DomainError;
use dnsd_infrastructure::zones::ZoneSourceLoader;
use helpers::{a_record, cname_record};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const ZONE: &str = "\
$ORIGIN example.
host 300 IN A 10.0.0.1
www 300 IN CNAME host
";

fn loader() -> ZoneSourceLoader {
    ZoneSourceLoader::new(Duration::from_secs(5)).unwrap()
}

/// Serves a single canned HTTP/1.1 response and returns its URL.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = vec![0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    format!("http://{}/zones/example.zone", addr)
}

#[tokio::test]
async fn test_loads_zone_from_file_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ZONE.as_bytes()).unwrap();

    let records = loader()
        .load(file.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(
        records,
        vec![
            a_record("host.example.", "10.0.0.1"),
            cname_record("www.example.", "host.example."),
        ]
    );
}

#[tokio::test]
async fn test_loads_zone_from_file_url() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ZONE.as_bytes()).unwrap();
    let source = format!("file://{}", file.path().display());

    let records = loader().load(&source).await.unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_missing_file_is_a_fetch_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.zone");
    let source = missing.to_str().unwrap().to_string();

    let err = loader().load(&source).await.unwrap_err();

    match err {
        DomainError::ZoneFetch { source_id, .. } => assert_eq!(source_id, source),
        other => panic!("expected ZoneFetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_parse_error_names_the_source() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"ok.example. 300 IN A 10.0.0.1\nbad.example. 300 IN A nope\n")
        .unwrap();
    let source = file.path().to_str().unwrap().to_string();

    let err = loader().load(&source).await.unwrap_err();
    assert!(err.is_load_error());

    match err {
        DomainError::ZoneParse {
            source_id, line, ..
        } => {
            assert_eq!(source_id, source);
            assert_eq!(line, 2);
        }
        other => panic!("expected ZoneParse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_loads_zone_over_http() {
    let url = serve_once("200 OK", ZONE).await;

    let records = loader().load(&url).await.unwrap();

    assert_eq!(records[0], a_record("host.example.", "10.0.0.1"));
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_http_error_status_is_a_fetch_error() {
    let url = serve_once("404 Not Found", "missing").await;

    let err = loader().load(&url).await.unwrap_err();

    match err {
        DomainError::ZoneFetch { reason, .. } => {
            assert!(reason.contains("404"), "unexpected reason: {}", reason)
        }
        other => panic!("expected ZoneFetch, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_http_source_is_a_fetch_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = loader()
        .load(&format!("http://{}/zone", addr))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::ZoneFetch { .. }));
}
