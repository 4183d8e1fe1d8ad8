#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use bbs::config::{parse_config, ConfigV1};
use bbs::routes::create_router;
use bbs::startup::build_state;
use bbs::verifiers::plain_verifier::{PlainTokenEntry, PlainVerifierConfig};
use bbs::verifiers::VerifierConfig;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
bind_address: 127.0.0.1:8081
logging:
  level: "debug"
  format: "console"
session:
  cookie_name: "bbs_session"
  secret: "test-secret-test-secret-test-secret-test-secret-test-secret-test-secret"
  secure: false
auth:
  timeout_in_ms: 3000
board:
  max_comment_chars: 280
verifier:
  type: "plain"
  name: "test-idp"
  tokens:
    - token: "tok-alice"
      uid: "uid-alice"
    - token: "tok-bob"
      uid: "uid-bob"
"#;

pub fn load_test_config() -> ConfigV1 {
    parse_config(TEST_CONFIG).expect("Failed to parse test config YAML")
}

/// Test config that additionally accepts `tok-{i}` as `uid-{i}` for `i < extra`.
pub fn config_with_numbered_tokens(extra: usize) -> ConfigV1 {
    let mut config = load_test_config();
    if let VerifierConfig::Plain(PlainVerifierConfig { tokens, .. }) = &mut config.verifier {
        tokens.extend((0..extra).map(|i| PlainTokenEntry {
            token: format!("tok-{i}"),
            uid: format!("uid-{i}"),
        }));
    }
    config
}

pub fn build_app(config: ConfigV1) -> Router {
    let state = build_state(Arc::new(config)).expect("Failed to build state");
    create_router(state).expect("Failed to build router")
}

pub fn json_request(
    method: Method,
    path: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

/// The `name=value` pair of the session cookie set by a response, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("bbs_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body is not JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    String::from_utf8(bytes.to_vec()).expect("body is not UTF-8")
}
