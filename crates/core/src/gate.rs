//! Authentication gate.
//!
//! Authentication itself belongs to an external provider; this module only decides which
//! view to show from the provider's state.

/// The signed-in user as reported by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct UserInfo {
    pub email: Option<String>,
}

/// State exposed by an authentication provider.
pub trait AuthProvider {
    fn current_user(&self) -> Option<UserInfo>;
    fn loading(&self) -> bool;
    fn sign_out(&mut self);
}

/// Which surface to present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Loading,
    Login,
    Simplifier(UserInfo),
}

/// Loading wins over everything; otherwise a missing user means the login view.
pub fn gate(auth: &impl AuthProvider) -> View {
    if auth.loading() {
        return View::Loading;
    }
    match auth.current_user() {
        Some(user) => View::Simplifier(user),
        None => View::Login,
    }
}

/// Provider with fixed, already-resolved state.
///
/// Used where authentication has been settled before the gate runs, such as a request whose
/// API key has already been checked.
#[derive(Debug, Clone, Default)]
pub struct StaticAuth {
    user: Option<UserInfo>,
    loading: bool,
}

impl StaticAuth {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthProvider for StaticAuth {
    fn current_user(&self) -> Option<UserInfo> {
        self.user.clone()
    }

    fn loading(&self) -> bool {
        self.loading
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(email = ?user.email, "signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            email: Some("patient@example.com".into()),
        }
    }

    #[test]
    fn test_gate_shows_loading_first() {
        let auth = StaticAuth {
            user: Some(user()),
            loading: true,
        };
        assert_eq!(gate(&auth), View::Loading);
        assert_eq!(gate(&StaticAuth::pending()), View::Loading);
    }

    #[test]
    fn test_gate_login_without_user() {
        assert_eq!(gate(&StaticAuth::signed_out()), View::Login);
    }

    #[test]
    fn test_gate_simplifier_with_user() {
        assert_eq!(gate(&StaticAuth::signed_in(user())), View::Simplifier(user()));
    }

    #[test]
    fn test_sign_out_returns_to_login() {
        let mut auth = StaticAuth::signed_in(user());
        auth.sign_out();
        assert_eq!(gate(&auth), View::Login);
    }
}
