//! Browser storage: auth tokens in session storage, preferences in local
//! storage.
//!
//! Storage is best effort. Private browsing and full quotas make it fail;
//! failures are logged and treated as absent values.

use payloads::requests::DEFAULT_PER_PAGE;
use payloads::responses::AuthInfo;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const EXPIRES_IN_KEY: &str = "expiresIn";
pub const PREFERENCES_KEY: &str = "userPreferences";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Local,
    Session,
}

fn storage(kind: StorageKind) -> Option<web_sys::Storage> {
    let window = web_sys::window()?;
    let storage = match kind {
        StorageKind::Local => window.local_storage(),
        StorageKind::Session => window.session_storage(),
    };
    match storage {
        Ok(storage) => storage,
        Err(error) => {
            tracing::warn!(?kind, ?error, "storage unavailable");
            None
        }
    }
}

pub fn read(kind: StorageKind, key: &str) -> Option<String> {
    match storage(kind)?.get_item(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, ?error, "failed to read storage");
            None
        }
    }
}

pub fn write(kind: StorageKind, key: &str, value: &str) {
    let Some(storage) = storage(kind) else {
        return;
    };
    if let Err(error) = storage.set_item(key, value) {
        tracing::warn!(key, ?error, "failed to write storage");
    }
}

pub fn remove(kind: StorageKind, key: &str) {
    let Some(storage) = storage(kind) else {
        return;
    };
    if let Err(error) = storage.remove_item(key) {
        tracing::warn!(key, ?error, "failed to remove storage item");
    }
}

/// Read a JSON value. Malformed values are ignored.
pub fn read_json<T: DeserializeOwned>(kind: StorageKind, key: &str) -> Option<T> {
    let raw = read(kind, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "ignoring malformed stored value");
            None
        }
    }
}

pub fn write_json<T: Serialize>(kind: StorageKind, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => write(kind, key, &raw),
        Err(error) => tracing::warn!(key, %error, "failed to encode value"),
    }
}

/// Tokens of the signed-in user, kept for the lifetime of the tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl SessionTokens {
    pub fn from_auth(info: &AuthInfo) -> Self {
        Self {
            access_token: info.access_token.clone(),
            refresh_token: info.refresh_token.clone(),
            expires_in: info.expires_in,
        }
    }

    /// Stored tokens, if an access token is present.
    pub fn load() -> Option<Self> {
        let access_token = read(StorageKind::Session, ACCESS_TOKEN_KEY)?;
        Some(Self {
            access_token,
            refresh_token: read(StorageKind::Session, REFRESH_TOKEN_KEY)
                .unwrap_or_default(),
            expires_in: read(StorageKind::Session, EXPIRES_IN_KEY)
                .and_then(|raw| raw.parse().ok())
                .unwrap_or_default(),
        })
    }

    pub fn save(&self) {
        write(StorageKind::Session, ACCESS_TOKEN_KEY, &self.access_token);
        write(StorageKind::Session, REFRESH_TOKEN_KEY, &self.refresh_token);
        write(
            StorageKind::Session,
            EXPIRES_IN_KEY,
            &self.expires_in.to_string(),
        );
    }

    pub fn clear() {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, EXPIRES_IN_KEY] {
            remove(StorageKind::Session, key);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    pub language: String,
    pub page_size: usize,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            language: "en".into(),
            page_size: DEFAULT_PER_PAGE as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_preferences_fill_in_defaults() {
        let prefs: UserPreferences =
            serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();

        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.language, "en");
        assert_eq!(prefs.page_size, 10);
    }

    #[test]
    fn preferences_use_stored_key_names() {
        let value = serde_json::to_value(UserPreferences::default()).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "theme": "light",
                "language": "en",
                "pageSize": 10,
            })
        );
    }
}
