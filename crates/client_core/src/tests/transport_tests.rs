use super::*;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

async fn spawn_raw_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route(
            "/plain-error",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream exploded") }),
        )
        .route(
            "/json-error",
            get(|| async { (StatusCode::CONFLICT, r#"{"error":"taken"}"#) }),
        )
        .route(
            "/blank-error",
            get(|| async { (StatusCode::UNAUTHORIZED, r#"{"error":"  "}"#) }),
        )
        .route("/garbage", get(|| async { "definitely not json" }))
        .route(
            "/echo-identity",
            get(|headers: axum::http::HeaderMap| async move {
                headers
                    .get(IDENTITY_HEADER)
                    .map(|value| value.to_str().unwrap_or("?").to_string())
                    .unwrap_or_else(|| "<absent>".to_string())
            }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn client(url: &str, session: SessionStore) -> ServiceClient {
    ServiceClient::new(Client::new(), "test", format!("{url}/"), session)
}

#[tokio::test]
async fn server_error_text_is_surfaced() {
    let url = spawn_raw_server().await;
    let service = client(&url, SessionStore::ephemeral());

    let err = service
        .send_empty(
            service.request(Method::GET, "/json-error", IdentityMode::Omit),
            "fallback",
        )
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Conflict(ref message) if message == "taken"));
}

#[tokio::test]
async fn unparseable_error_body_uses_fallback() {
    let url = spawn_raw_server().await;
    let service = client(&url, SessionStore::ephemeral());

    let err = service
        .send_empty(
            service.request(Method::GET, "/plain-error", IdentityMode::Omit),
            "Failed to fetch homes",
        )
        .await
        .expect_err("must fail");

    match err {
        ClientError::Service { status, message } => {
            assert_eq!(status, Some(502));
            assert_eq!(message, "Failed to fetch homes");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = service
        .send_empty(
            service.request(Method::GET, "/blank-error", IdentityMode::Omit),
            "Failed to login",
        )
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Unauthorized(ref message) if message == "Failed to login"));
}

#[tokio::test]
async fn malformed_success_body_is_a_service_error() {
    let url = spawn_raw_server().await;
    let service = client(&url, SessionStore::ephemeral());

    let err = service
        .send_json::<Vec<u64>>(
            service.request(Method::GET, "/garbage", IdentityMode::Omit),
            "fallback",
        )
        .await
        .expect_err("must fail");

    assert!(matches!(err, ClientError::Service { status: None, .. }));
}

#[tokio::test]
async fn identity_header_is_empty_without_session_and_absent_when_omitted() {
    let url = spawn_raw_server().await;
    let service = client(&url, SessionStore::ephemeral());

    let attached: String = service
        .send(
            service.request(Method::GET, "/echo-identity", IdentityMode::Attach),
            "fallback",
        )
        .await
        .expect("send")
        .text()
        .await
        .expect("body");
    assert_eq!(attached, "");

    let omitted: String = service
        .send(
            service.request(Method::GET, "/echo-identity", IdentityMode::Omit),
            "fallback",
        )
        .await
        .expect("send")
        .text()
        .await
        .expect("body");
    assert_eq!(omitted, "<absent>");
}

#[test]
fn base_url_trailing_slash_is_dropped() {
    let service = client("http://127.0.0.1:1", SessionStore::ephemeral());
    let request = service
        .request(Method::GET, "/homes", IdentityMode::Omit)
        .build()
        .expect("build");
    assert_eq!(request.url().as_str(), "http://127.0.0.1:1/homes");
}

#[test]
fn error_message_ignores_blank_and_foreign_bodies() {
    assert_eq!(error_message(r#"{"error":"nope"}"#).as_deref(), Some("nope"));
    assert_eq!(error_message(r#"{"error":""}"#), None);
    assert_eq!(error_message(r#"{"message":"hi"}"#), None);
    assert_eq!(error_message(""), None);
}
