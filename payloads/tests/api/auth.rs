use payloads::requests;
use reqwest::StatusCode;

use test_helpers::{
    ACCESS_TOKEN, ADMIN_EMAIL, ADMIN_PASSWORD, REFRESH_TOKEN,
    REFRESHED_ACCESS_TOKEN, assert_status_code, spawn_app,
};

#[tokio::test]
async fn login_returns_tokens() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let credentials = requests::LoginCredentials {
        email: ADMIN_EMAIL.into(),
        password: ADMIN_PASSWORD.into(),
    };
    let auth = app.client.login(&credentials).await?;

    assert_eq!(auth.access_token, ACCESS_TOKEN);
    assert_eq!(auth.refresh_token, REFRESH_TOKEN);
    assert_eq!(auth.expires_in, 3600);
    assert!(auth.user.is_admin());

    Ok(())
}

#[tokio::test]
async fn login_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let credentials = requests::LoginCredentials {
        email: ADMIN_EMAIL.into(),
        password: "wrong".into(),
    };
    let result = app.client.login(&credentials).await;

    match result {
        Err(payloads::ClientError::APIError(code, text)) => {
            assert_eq!(code, StatusCode::UNAUTHORIZED);
            assert_eq!(text, "Unauthorized");
        }
        _ => {
            panic!("Expected APIError");
        }
    }

    Ok(())
}

#[tokio::test]
async fn refresh_rotates_access_token() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let auth = app.client.refresh_token(REFRESH_TOKEN).await?;
    assert_eq!(auth.access_token, REFRESHED_ACCESS_TOKEN);

    let result = app.client.refresh_token("expired").await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn profile_and_logout_need_a_valid_token() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let profile = app.client.profile(ACCESS_TOKEN).await?;
    assert_eq!(profile.user.email, ADMIN_EMAIL);
    app.client.logout(ACCESS_TOKEN).await?;

    let result = app.client.profile("not-a-token").await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);
    let result = app.client.logout("not-a-token").await;
    assert_status_code(result, StatusCode::UNAUTHORIZED);

    Ok(())
}
