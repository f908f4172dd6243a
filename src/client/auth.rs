//! Authentication state of a [`Client`](super::Client).

use crate::types::AccessToken;

/// Whether the client currently holds an access token.
///
/// The token header is attached to requests only in the `Authenticated`
/// state. Transitions happen through `ClientBuilder::with_api_token`,
/// `Client::sign_in`, `Client::set_access_token` and `Client::sign_out`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticated(AccessToken),
}

impl AuthState {
    /// State for a raw token. An empty token means unauthenticated.
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = AccessToken::new(token);
        if token.is_empty() {
            AuthState::Unauthenticated
        } else {
            AuthState::Authenticated(token)
        }
    }

    pub fn token(&self) -> Option<&AccessToken> {
        match self {
            AuthState::Authenticated(token) => Some(token),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}
