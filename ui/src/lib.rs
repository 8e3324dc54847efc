//! Yew front end for the dictionary admin client.
//!
//! Screens are assembled from the hooks in [`hooks`] and the table pieces in
//! [`components`]. Route definitions and page layout live with the
//! application that mounts them.

pub mod components;
pub mod hooks;
pub mod logs;
pub mod session;
pub mod state;

pub use state::{AuthState, State};

use payloads::APIClient;

/// API client for the configured backend: `API_URL` at build time, or the
/// origin the page was served from.
pub fn get_api_client() -> APIClient {
    let address = option_env!("API_URL")
        .map(str::to_string)
        .or_else(page_origin)
        .unwrap_or_default();
    APIClient::new(address)
}

fn page_origin() -> Option<String> {
    web_sys::window()?.location().origin().ok()
}
