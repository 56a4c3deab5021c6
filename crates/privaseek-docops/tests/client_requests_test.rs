//! Integration tests for the wire shape of document operation requests.
//!
//! These verify, against a mock server, that each operation issues exactly
//! one multipart request with the documented field names, file names, and
//! media types, and that blob and error responses are handled per contract.

use privaseek_docops::{
    CategoryFilter, Document, Error, PsClient, PsConfig, PsCredentials, Replacement,
    ReplacementSpec,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Count non-overlapping occurrences of a byte pattern.
fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() || haystack.len() < needle.len() {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if &haystack[i..i + needle.len()] == needle {
            count += 1;
            i += needle.len();
        } else {
            i += 1;
        }
    }
    count
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    count_occurrences(haystack, needle) > 0
}

async fn client_for(server: &MockServer) -> PsClient {
    let config = PsConfig::new(server.uri()).expect("mock server URI is a valid base URL");
    PsClient::new(config, PsCredentials::bearer_token("test-session-key"))
        .expect("client should build")
}

#[tokio::test]
async fn parse_sends_single_stream_part_with_document_bytes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/parse/docx"))
        .and(header("Authorization", "Bearer test-session-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "paragraphs": [],
            "pages": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let payload = vec![0x61u8; 10 * 1024];
    let document = Document::new("report.docx", payload.clone());

    let client = client_for(&mock_server).await;
    let result = client.parse_document(&document).await.expect("parse should succeed");
    assert_eq!(result["pages"], 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "parse issues exactly one request");

    let request = &requests[0];
    let content_type = request.headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    // Exactly one file field named `stream`, carrying all 10KB
    assert_eq!(count_occurrences(&request.body, b"name=\"stream\""), 1);
    assert!(contains(&request.body, b"filename=\"report.docx\""));
    assert!(contains(&request.body, DOCX_MIME.as_bytes()));
    assert!(contains(&request.body, &payload));
}

#[tokio::test]
async fn detect_wraps_text_as_markdown_file_with_categories_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "text": "123-45-6789", "category": "pii" }
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let result = client
        .detect_sensitive_data("SSN: 123-45-6789", &CategoryFilter::new("pii"))
        .await
        .expect("detect should succeed");
    assert_eq!(result[0]["category"], "pii");

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body = &requests[0].body;
    assert_eq!(count_occurrences(body, b"name=\"stream\""), 1);
    assert!(contains(body, b"filename=\"document.md\""));
    assert!(contains(body, b"text/markdown"));
    assert!(contains(body, b"SSN: 123-45-6789"));

    // Sibling form field with the opaque filter value
    assert!(contains(body, b"name=\"categories\""));
    assert!(contains(body, b"pii"));
}

#[tokio::test]
async fn redact_sends_stream_and_data_fields_and_returns_blob() {
    let mock_server = MockServer::start().await;

    let redacted_bytes = b"PK\x03\x04 redacted contents".to_vec();
    Mock::given(method("POST"))
        .and(path("/redact/docx"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(redacted_bytes.clone(), DOCX_MIME))
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = Document::new("contract.docx", b"PK\x03\x04 original".to_vec());
    let spec = ReplacementSpec::list([Replacement::new("John", "REDACTED")]);

    let client = client_for(&mock_server).await;
    let redacted = client
        .redact_document(&document, &spec)
        .await
        .expect("redact should succeed");

    assert_eq!(redacted.content().as_ref(), redacted_bytes.as_slice());
    assert_eq!(redacted.content_type(), Some(DOCX_MIME));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body = &requests[0].body;
    assert_eq!(count_occurrences(body, b"name=\"stream\""), 1);
    assert!(contains(body, b"filename=\"contract.docx\""));
    assert!(contains(body, b"name=\"data\""));
    assert!(contains(body, br#"[{"find":"John","replace":"REDACTED"}]"#));
}

#[tokio::test]
async fn redact_normalizes_legacy_pair_spec_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/redact/docx"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"bytes".to_vec(), DOCX_MIME))
        .expect(1)
        .mount(&mock_server)
        .await;

    let document = Document::new("contract.docx", vec![1u8, 2, 3]);
    let spec: ReplacementSpec =
        serde_json::from_str(r#"{"pattern":"secret","replacement":"***"}"#).unwrap();

    let client = client_for(&mock_server).await;
    client
        .redact_document(&document, &spec)
        .await
        .expect("redact should succeed");

    let requests = mock_server.received_requests().await.unwrap();
    let body = &requests[0].body;

    // The legacy pair shape goes out as the structured list
    assert!(contains(body, br#"[{"find":"secret","replace":"***"}]"#));
    assert!(!contains(body, b"\"pattern\""));
}

#[tokio::test]
async fn redact_treats_json_response_body_as_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/redact/docx"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": "document is password protected"
        })))
        .mount(&mock_server)
        .await;

    let document = Document::new("locked.docx", vec![1u8]);
    let spec = ReplacementSpec::list([Replacement::new("a", "b")]);

    let client = client_for(&mock_server).await;
    let err = client
        .redact_document(&document, &spec)
        .await
        .expect_err("JSON body must not be treated as a document");

    assert!(matches!(err, Error::InvalidResponse { .. }));
    assert!(err.response_body().unwrap().contains("password protected"));
}

#[tokio::test]
async fn http_error_status_surfaces_with_status_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/parse/docx"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unsupported file type"))
        .mount(&mock_server)
        .await;

    let document = Document::new("image.bmp", vec![0u8; 8]);

    let client = client_for(&mock_server).await;
    let err = client
        .parse_document(&document)
        .await
        .expect_err("4xx must surface as an error");

    assert_eq!(err.status_code(), Some(422));
    assert_eq!(err.response_body(), Some("unsupported file type"));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn session_key_is_read_per_request() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let credentials = PsCredentials::session_fn(move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        Some(format!("rotating-key-{n}"))
    });

    let config = PsConfig::new(mock_server.uri()).unwrap();
    let client = PsClient::new(config, credentials).unwrap();

    let filter = CategoryFilter::new("pii");
    client.detect_sensitive_data("one", &filter).await.unwrap();
    client.detect_sensitive_data("two", &filter).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let keys: Vec<_> = requests
        .iter()
        .map(|r| r.headers.get("authorization").unwrap().to_str().unwrap().to_owned())
        .collect();

    assert_eq!(keys, vec!["Bearer rotating-key-0", "Bearer rotating-key-1"]);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn no_credentials_sends_no_authorization_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let config = PsConfig::new(mock_server.uri()).unwrap();
    let client = PsClient::new(config, PsCredentials::none()).unwrap();

    client
        .detect_sensitive_data("text", &CategoryFilter::new("pii"))
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn health_check_probes_health_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    client.health_check().await.expect("health check should pass");
}

#[tokio::test]
async fn health_check_failure_surfaces_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server).await;
    let err = client.health_check().await.expect_err("503 must surface");
    assert_eq!(err.status_code(), Some(503));
    assert!(err.is_server_error());
}
