use crate::{
    DictionaryEntry, EntryId,
    requests::{self, EntryFilters},
    responses::{self, ApiResponse, Paged},
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

pub const DICTIONARY_PATH: &str = "dictionary";
pub const LOGIN_PATH: &str = "auth/login";
pub const LOGOUT_PATH: &str = "auth/logout";
pub const REFRESH_PATH: &str = "auth/refresh";
pub const PROFILE_PATH: &str = "auth/profile";

/// Request timeout for native targets. Browsers apply their own.
#[cfg(not(target_arch = "wasm32"))]
pub const REQUEST_TIMEOUT: std::time::Duration =
    std::time::Duration::from_secs(30);

/// An API client for the dictionary service.
///
/// The client never holds on to an auth token: every authenticated call
/// takes the bearer token as an argument, so a logout is visible to the
/// next call without any cache to invalidate.
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        let builder = reqwest::Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(REQUEST_TIMEOUT);

        Self {
            address: address.into(),
            // Only fails if the TLS backend cannot be initialized
            inner_client: builder.build().unwrap_or_default(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let request = self.inner_client.request(method, self.format_url(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: &impl Serialize,
    ) -> ReqwestResult {
        self.request(method, path, token).json(body).send().await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> ReqwestResult {
        self.request(method, path, Some(token)).send().await
    }
}

/// Dictionary entry endpoints
impl APIClient {
    /// List one page of entries matching the filters.
    pub async fn get_entries(
        &self,
        filters: &EntryFilters,
        token: &str,
    ) -> Result<Paged<DictionaryEntry>, ClientError> {
        let response = self
            .request(Method::GET, DICTIONARY_PATH, Some(token))
            .query(filters)
            .send()
            .await?;
        let envelope: ApiResponse<Vec<DictionaryEntry>> =
            ok_envelope(response).await?;
        Ok(Paged {
            items: envelope.data,
            pagination: envelope.pagination,
        })
    }

    pub async fn get_entry(
        &self,
        id: &EntryId,
        token: &str,
    ) -> Result<DictionaryEntry, ClientError> {
        let path = format!("{DICTIONARY_PATH}/{id}");
        let response = self.send(Method::GET, &path, token).await?;
        ok_body(response).await
    }

    pub async fn create_entry(
        &self,
        entry: &requests::CreateDictionaryEntry,
        token: &str,
    ) -> Result<DictionaryEntry, ClientError> {
        let response = self
            .send_json(Method::POST, DICTIONARY_PATH, Some(token), entry)
            .await?;
        ok_body(response).await
    }

    pub async fn update_entry(
        &self,
        id: &EntryId,
        entry: &requests::UpdateDictionaryEntry,
        token: &str,
    ) -> Result<DictionaryEntry, ClientError> {
        let path = format!("{DICTIONARY_PATH}/{id}");
        let response = self
            .send_json(Method::PUT, &path, Some(token), entry)
            .await?;
        ok_body(response).await
    }

    pub async fn delete_entry(
        &self,
        id: &EntryId,
        token: &str,
    ) -> Result<(), ClientError> {
        let path = format!("{DICTIONARY_PATH}/{id}");
        let response = self.send(Method::DELETE, &path, token).await?;
        ok_empty(response).await
    }
}

/// Authentication endpoints
impl APIClient {
    pub async fn login(
        &self,
        credentials: &requests::LoginCredentials,
    ) -> Result<responses::AuthInfo, ClientError> {
        let response = self
            .send_json(Method::POST, LOGIN_PATH, None, credentials)
            .await?;
        ok_body(response).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let response = self.send(Method::POST, LOGOUT_PATH, token).await?;
        ok_empty(response).await
    }

    /// Exchange a refresh token for a new set of tokens.
    pub async fn refresh_token(
        &self,
        refresh_token: &str,
    ) -> Result<responses::AuthInfo, ClientError> {
        let body = requests::RefreshToken {
            refresh_token: refresh_token.to_string(),
        };
        let response = self
            .send_json(Method::POST, REFRESH_PATH, None, &body)
            .await?;
        ok_body(response).await
    }

    /// Get the profile of the user owning the token.
    pub async fn profile(
        &self,
        token: &str,
    ) -> Result<responses::AuthInfo, ClientError> {
        let response = self.send(Method::GET, PROFILE_PATH, token).await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-2xx response, containing the raw response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    /// A 2xx response whose envelope reported `success: false`.
    #[error("{1}")]
    Rejected(StatusCode, String),
    /// A 2xx response whose body is not the expected envelope.
    #[error("Unexpected response from the server")]
    Decode(StatusCode, #[source] serde_json::Error),
    /// No usable response: the request never completed or the body could
    /// not be read.
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// HTTP status of the failure, or 0 when no response was received.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::APIError(status, _)
            | Self::Rejected(status, _)
            | Self::Decode(status, _) => status.as_u16(),
            Self::Network(e) => e.status().map_or(0, |s| s.as_u16()),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

const REJECTED_FALLBACK: &str = "The request was not successful";

/// Deserialize a successful response envelope, or return an appropriate
/// error.
pub async fn ok_envelope<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<ApiResponse<T>, ClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::APIError(status, response.text().await?));
    }
    let body = response.bytes().await?;
    let envelope = serde_json::from_slice::<ApiResponse<T>>(&body)
        .map_err(|e| ClientError::Decode(status, e))?;
    if !envelope.success {
        let message = envelope
            .message
            .unwrap_or_else(|| REJECTED_FALLBACK.to_string());
        return Err(ClientError::Rejected(status, message));
    }
    Ok(envelope)
}

/// Deserialize the `data` of a successful response into the desired type.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    Ok(ok_envelope::<T>(response).await?.data)
}

/// Check that a response without meaningful data is OK.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    ok_envelope::<Option<serde_json::Value>>(response).await?;
    Ok(())
}
