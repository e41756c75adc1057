// Placeholder login context
//
// Not a security boundary: plaintext comparison against an allow-list,
// no hashing, no sessions, no rate limiting.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Capability that decides whether a username/password pair may log in
pub trait CredentialVerifier {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// One allow-listed username/password pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Exact-match verifier over a fixed list of pairs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    entries: Vec<Credential>,
}

impl AllowList {
    pub fn new(entries: Vec<Credential>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Credential] {
        &self.entries
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(vec![Credential::new("laura", "12345"), Credential::new("admin", "1234")])
    }
}

impl CredentialVerifier for AllowList {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.entries
            .iter()
            .any(|c| c.username == username && c.password == password)
    }
}

/// Navigation targets signalled by the auth context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Users,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Users => "/users",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Side effect the caller should perform after a login/logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEffect {
    Navigate(Route),
    ShowError(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

/// Holds the logged-in user, if any
#[derive(Debug, Clone, Default)]
pub struct AuthContext<V: CredentialVerifier = AllowList> {
    verifier: V,
    user: Option<User>,
}

impl<V: CredentialVerifier> AuthContext<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier, user: None }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Log in when the verifier accepts the pair; state is untouched otherwise
    pub fn login(&mut self, username: &str, password: &str) -> AuthEffect {
        if self.verifier.verify(username, password) {
            info!(username, "login succeeded");
            self.user = Some(User {
                username: username.to_string(),
            });
            AuthEffect::Navigate(Route::Users)
        } else {
            warn!(username, "login rejected");
            AuthEffect::ShowError("Incorrect username or password".to_string())
        }
    }

    pub fn logout(&mut self) -> AuthEffect {
        if let Some(user) = self.user.take() {
            info!(username = %user.username, "logged out");
        }
        AuthEffect::Navigate(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DenyAll;

    impl CredentialVerifier for DenyAll {
        fn verify(&self, _username: &str, _password: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_default_allow_list() {
        let list = AllowList::default();
        assert!(list.verify("laura", "12345"));
        assert!(list.verify("admin", "1234"));
        assert!(!list.verify("admin", "12345"));
        assert!(!list.verify("Laura", "12345"));
    }

    #[test]
    fn test_login_success_sets_user_and_navigates() {
        let mut auth = AuthContext::new(AllowList::default());
        assert_eq!(auth.login("laura", "12345"), AuthEffect::Navigate(Route::Users));
        assert_eq!(auth.user().map(|u| u.username.as_str()), Some("laura"));
    }

    #[test]
    fn test_login_failure_keeps_state() {
        let mut auth = AuthContext::new(AllowList::default());
        auth.login("admin", "1234");

        let effect = auth.login("admin", "wrong");
        assert!(matches!(effect, AuthEffect::ShowError(_)));
        assert_eq!(auth.user().map(|u| u.username.as_str()), Some("admin"));
    }

    #[test]
    fn test_logout_clears_user() {
        let mut auth = AuthContext::new(AllowList::default());
        auth.login("admin", "1234");
        assert_eq!(auth.logout(), AuthEffect::Navigate(Route::Login));
        assert!(auth.user().is_none());

        // Logging out twice is harmless
        assert_eq!(auth.logout(), AuthEffect::Navigate(Route::Login));
    }

    #[test]
    fn test_custom_verifier() {
        let mut auth = AuthContext::new(DenyAll);
        assert!(matches!(auth.login("laura", "12345"), AuthEffect::ShowError(_)));
        assert!(auth.user().is_none());
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Users.to_string(), "/users");
        assert_eq!(Route::Login.to_string(), "/login");
    }
}
