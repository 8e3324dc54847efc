mod auth;
mod dictionary;

use test_helpers::{ACCESS_TOKEN, spawn_app};

#[tokio::test]
async fn bearer_token_sent_on_authenticated_calls() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.profile(ACCESS_TOKEN).await?;
    app.client
        .get_entries(&Default::default(), ACCESS_TOKEN)
        .await?;

    let headers = app.received_authorization().await;
    assert_eq!(headers.len(), 2);
    for header in headers {
        assert_eq!(header.as_deref(), Some("Bearer test-access-token"));
    }

    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on port 9 in the test environment
    let client = payloads::APIClient::new("http://127.0.0.1:9");

    let result = client.profile(ACCESS_TOKEN).await;

    match result {
        Err(e) => {
            assert!(e.is_network());
            assert_eq!(e.status_code(), 0);
        }
        Ok(_) => panic!("Expected a network error"),
    }
}
