pub mod mock;
pub mod telemetry;

use payloads::{DictionaryEntry, responses::AuthInfo};
use reqwest::StatusCode;
use serde_json::json;
use tracing_log::LogTracer;
use tracing_subscriber::util::SubscriberInitExt;
use wiremock::matchers::{any, body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const ACCESS_TOKEN: &str = "test-access-token";
pub const REFRESH_TOKEN: &str = "test-refresh-token";
pub const REFRESHED_ACCESS_TOKEN: &str = "test-access-token-2";

/// Mock routes answer before this catch-all, which rejects anything that
/// is unmatched or lacks a valid bearer token.
const FALLBACK_PRIORITY: u8 = 10;

pub struct TestApp {
    pub server: MockServer,
    pub client: payloads::APIClient,
}

impl TestApp {
    /// Bearer header value that the mock backend accepts.
    pub fn bearer() -> String {
        format!("Bearer {ACCESS_TOKEN}")
    }

    /// Make every request for `path` fail with the given status and body,
    /// taking precedence over the seeded routes.
    pub async fn fail_path(&self, route: &str, status: u16, body: &str) {
        Mock::given(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Authorization headers of every request the backend received.
    pub async fn received_authorization(&self) -> Vec<Option<String>> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| {
                request
                    .headers
                    .get("authorization")
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string)
            })
            .collect()
    }
}

pub fn auth_info(access_token: &str) -> AuthInfo {
    AuthInfo {
        user: payloads::responses::AuthUser {
            email: ADMIN_EMAIL.into(),
            role: payloads::Role::Admin.to_string(),
        },
        access_token: access_token.into(),
        refresh_token: REFRESH_TOKEN.into(),
        expires_in: 3600,
    }
}

/// Start a mock backend seeded with [`mock::seed_entries`].
pub async fn spawn_app() -> TestApp {
    spawn_app_with_entries(mock::seed_entries()).await
}

pub async fn spawn_app_with_entries(entries: Vec<DictionaryEntry>) -> TestApp {
    let subscriber = telemetry::get_subscriber("error".into());
    let _ = LogTracer::init();
    let _ = subscriber.try_init();

    let server = MockServer::start().await;
    mount_auth(&server).await;
    mount_dictionary(&server, entries).await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(401).set_body_string("Unauthorized"),
        )
        .with_priority(FALLBACK_PRIORITY)
        .mount(&server)
        .await;

    let client = payloads::APIClient::new(server.uri());
    TestApp { server, client }
}

async fn mount_auth(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({
            "email": ADMIN_EMAIL,
            "password": ADMIN_PASSWORD,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock::envelope(auth_info(ACCESS_TOKEN))),
        )
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": REFRESH_TOKEN })))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            mock::envelope(auth_info(REFRESHED_ACCESS_TOKEN)),
        ))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("authorization", TestApp::bearer().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true })),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", TestApp::bearer().as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(mock::envelope(auth_info(ACCESS_TOKEN))),
        )
        .mount(server)
        .await;
}

async fn mount_dictionary(server: &MockServer, entries: Vec<DictionaryEntry>) {
    let bearer = TestApp::bearer();
    let next_id = entries.len() as u32 + 1;

    Mock::given(method("GET"))
        .and(path("/dictionary"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(mock::ListEntries {
            entries: entries.clone(),
        })
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/dictionary"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(mock::CreateEntry { next_id })
        .mount(server)
        .await;

    Mock::given(method("PUT"))
        .and(path_regex(r"^/dictionary/[^/]+$"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(mock::UpdateEntry {
            entries: entries.clone(),
        })
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/dictionary/[^/]+$"))
        .and(header("authorization", bearer.as_str()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "data": null })),
        )
        .mount(server)
        .await;

    for entry in entries {
        Mock::given(method("GET"))
            .and(path(format!("/dictionary/{}", entry.id)))
            .and(header("authorization", bearer.as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock::envelope(&entry)),
            )
            .mount(server)
            .await;
    }
}

/// Assert that the result of an API action results in a specific status
/// code.
pub fn assert_status_code<T>(
    result: Result<T, payloads::ClientError>,
    expected: StatusCode,
) {
    match result {
        Err(payloads::ClientError::APIError(code, _)) => {
            assert_eq!(code, expected)
        }
        _ => panic!("Expected APIError"),
    };
}
