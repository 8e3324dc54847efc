use yew::prelude::*;
use yewdux::prelude::*;

use crate::State;
use crate::session::SessionTokens;

/// Log out: tell the backend, then clear the stored tokens and the auth
/// state whether or not the backend answered.
#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let (state, dispatch) = use_store::<State>();

    Callback::from(move |_| {
        let dispatch = dispatch.clone();
        let token = state.access_token().map(str::to_string);

        yew::platform::spawn_local(async move {
            if let Some(token) = token {
                let api_client = crate::get_api_client();
                if let Err(error) = api_client.logout(&token).await {
                    tracing::warn!(%error, "logout request failed");
                }
            }

            SessionTokens::clear();
            dispatch.reduce_mut(State::logout);
        });
    })
}
