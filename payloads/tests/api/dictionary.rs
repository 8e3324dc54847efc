use payloads::{EntryId, requests};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use test_helpers::{ACCESS_TOKEN, assert_status_code, spawn_app};

#[tokio::test]
async fn list_entries_paginates() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let filters = requests::EntryFilters::default()
        .with_page(2)
        .with_per_page(2);
    let page = app.client.get_entries(&filters, ACCESS_TOKEN).await?;

    let words: Vec<_> =
        page.items.iter().map(|e| e.pnar_word.as_str()).collect();
    assert_eq!(words, ["dost", "um"]);
    let pagination = page.pagination.expect("list responses paginate");
    assert_eq!(pagination.total, 5);
    assert_eq!(pagination.pages, 3);
    assert!(pagination.has_previous());
    assert!(pagination.has_next());

    Ok(())
}

#[tokio::test]
async fn list_entries_searches() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let filters = requests::EntryFilters::default().with_search("SAL");
    let page = app.client.get_entries(&filters, ACCESS_TOKEN).await?;

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].english_word, "hello");

    Ok(())
}

#[tokio::test]
async fn get_update_and_delete_entry() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let id = EntryId::from("2");

    let entry = app.client.get_entry(&id, ACCESS_TOKEN).await?;
    assert_eq!(entry.pnar_word, "kitab");
    assert_eq!(entry.part_of_speech.as_deref(), Some("noun"));

    let update = requests::UpdateDictionaryEntry {
        english_word: Some("books".into()),
        ..Default::default()
    };
    let updated = app.client.update_entry(&id, &update, ACCESS_TOKEN).await?;
    assert_eq!(updated.id, id);
    assert_eq!(updated.pnar_word, "kitab");
    assert_eq!(updated.english_word, "books");

    app.client.delete_entry(&id, ACCESS_TOKEN).await?;

    Ok(())
}

#[tokio::test]
async fn create_entry_assigns_id() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let body = requests::CreateDictionaryEntry {
        pnar_word: "ka sngi".into(),
        english_word: "sun".into(),
        part_of_speech: Some("noun".into()),
        ..Default::default()
    };
    let created = app.client.create_entry(&body, ACCESS_TOKEN).await?;

    assert_eq!(created.id, EntryId::from("6"));
    assert_eq!(created.english_word, "sun");
    assert!(!created.verified);

    Ok(())
}

#[tokio::test]
async fn missing_token_is_rejected() {
    let app = spawn_app().await;

    let result = app
        .client
        .get_entries(&Default::default(), "stale-token")
        .await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn server_error_keeps_raw_body() {
    let app = spawn_app().await;
    app.fail_path("/dictionary", 500, "database unavailable").await;

    let result = app
        .client
        .get_entries(&Default::default(), ACCESS_TOKEN)
        .await;

    match result {
        Err(e @ payloads::ClientError::APIError(..)) => {
            assert_eq!(e.status_code(), 500);
            assert_eq!(e.to_string(), "database unavailable");
        }
        _ => panic!("Expected APIError"),
    }
}

#[tokio::test]
async fn unsuccessful_envelope_is_rejected() {
    let app = spawn_app().await;
    Mock::given(method("DELETE"))
        .and(path("/dictionary/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "data": null,
            "message": "Entry is referenced by another entry",
        })))
        .with_priority(1)
        .mount(&app.server)
        .await;

    let result = app
        .client
        .delete_entry(&EntryId::from("3"), ACCESS_TOKEN)
        .await;

    match result {
        Err(payloads::ClientError::Rejected(code, message)) => {
            assert_eq!(code, StatusCode::OK);
            assert_eq!(message, "Entry is referenced by another entry");
        }
        _ => panic!("Expected Rejected"),
    }
}

#[tokio::test]
async fn malformed_success_body_keeps_status() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/dictionary/2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
        )
        .with_priority(1)
        .mount(&app.server)
        .await;

    let result = app
        .client
        .get_entry(&EntryId::from("2"), ACCESS_TOKEN)
        .await;

    match result {
        Err(e @ payloads::ClientError::Decode(..)) => {
            assert!(!e.is_network());
            assert_eq!(e.status_code(), 200);
        }
        _ => panic!("Expected Decode"),
    }
}
