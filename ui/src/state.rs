use payloads::responses::{AuthInfo, AuthUser};
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(AuthInfo),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    pub error_message: Option<String>,
    pub auth_state: AuthState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    /// Token to pass to authenticated API calls.
    pub fn access_token(&self) -> Option<&str> {
        match &self.auth_state {
            AuthState::LoggedIn(info) => Some(&info.access_token),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&AuthUser> {
        match &self.auth_state {
            AuthState::LoggedIn(info) => Some(&info.user),
            _ => None,
        }
    }

    pub fn login(&mut self, info: AuthInfo) {
        self.auth_state = AuthState::LoggedIn(info);
        self.error_message = None;
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> AuthInfo {
        AuthInfo {
            user: AuthUser {
                email: "admin@example.com".into(),
                role: "admin".into(),
            },
            access_token: "access".into(),
            refresh_token: "refresh".into(),
            expires_in: 3600,
        }
    }

    #[test]
    fn token_only_while_logged_in() {
        let mut state = State::default();
        assert_eq!(state.access_token(), None);

        state.login(info());
        assert_eq!(state.access_token(), Some("access"));
        assert!(state.user().is_some_and(AuthUser::is_admin));

        state.logout();
        assert!(!state.is_authenticated());
        assert_eq!(state.access_token(), None);
    }
}
