use payloads::requests::LoginCredentials;
use payloads::responses::AuthInfo;
use yew::prelude::*;
use yewdux::prelude::*;

use super::{UseApiHandle, use_api};
use crate::session::SessionTokens;
use crate::{State, get_api_client};

/// Restore the session from storage on startup.
///
/// A stored access token is checked against the profile endpoint. If it
/// has expired the refresh token is tried once; anything else ends logged
/// out with the stored tokens cleared.
#[hook]
pub fn use_authentication() {
    let (_state, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        yew::platform::spawn_local(async move {
            let Some(tokens) = SessionTokens::load() else {
                dispatch.reduce_mut(State::logout);
                return;
            };

            let api_client = get_api_client();
            let restored = match api_client.profile(&tokens.access_token).await
            {
                Ok(info) => Some(AuthInfo {
                    access_token: tokens.access_token.clone(),
                    refresh_token: tokens.refresh_token.clone(),
                    expires_in: tokens.expires_in,
                    ..info
                }),
                Err(error) if error.status_code() == 401 => {
                    tracing::debug!("access token rejected, refreshing");
                    match api_client.refresh_token(&tokens.refresh_token).await
                    {
                        Ok(info) => Some(info),
                        Err(error) => {
                            tracing::warn!(%error, "session refresh failed");
                            None
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(%error, "could not restore session");
                    None
                }
            };

            match restored {
                Some(info) => {
                    SessionTokens::from_auth(&info).save();
                    dispatch.reduce_mut(|state| state.login(info));
                }
                None => {
                    SessionTokens::clear();
                    dispatch.reduce_mut(State::logout);
                }
            }
        });
    });
}

/// Log in with the submitted credentials, storing the session tokens on
/// success.
#[hook]
pub fn use_login() -> UseApiHandle<LoginCredentials, AuthInfo> {
    let (_state, dispatch) = use_store::<State>();

    use_api(move |credentials: LoginCredentials| {
        let dispatch = dispatch.clone();
        async move {
            let info = get_api_client().login(&credentials).await?;
            SessionTokens::from_auth(&info).save();
            dispatch.reduce_mut(|state| state.login(info.clone()));
            Ok::<_, payloads::ClientError>(info)
        }
    })
}
