//! Session state and the capability gate
//!
//! Owns `{is_authenticated, user}` and performs every permission check for
//! the stores, so the contract lives in one place instead of scattered
//! view-level conditionals.

use std::sync::Arc;

use validator::Validate;

use crate::error::{ClientError, Result};
use crate::gateway::Gateway;
use crate::types::{LoginRequest, RegisterRequest, Role, User};

pub struct SessionStore {
    gateway: Arc<dyn Gateway>,
    user: Option<User>,
    is_loading: bool,
    error: Option<String>,
}

impl SessionStore {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway, user: None, is_loading: false, error: None }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Credential shape is validated before the gateway is touched.
    pub async fn login(&mut self, req: LoginRequest) -> Result<()> {
        req.validate().map_err(|e| ClientError::Validation(e.to_string()))?;
        self.is_loading = true;
        self.error = None;
        match self.gateway.login(&req).await {
            Ok(user) => {
                self.is_loading = false;
                tracing::info!(username = %user.username, "session opened");
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn register(&mut self, req: RegisterRequest) -> Result<()> {
        req.validate().map_err(|e| ClientError::Validation(e.to_string()))?;
        self.is_loading = true;
        self.error = None;
        match self.gateway.register(&req).await {
            Ok(user) => {
                self.is_loading = false;
                tracing::info!(username = %user.username, "account registered");
                self.user = Some(user);
                Ok(())
            }
            Err(e) => {
                self.is_loading = false;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Ends the session locally no matter what the gateway says; a failed
    /// remote logout usually means the cookie already expired.
    pub async fn logout(&mut self) {
        if let Err(e) = self.gateway.logout().await {
            tracing::warn!(%e, "remote logout failed, clearing session anyway");
        }
        self.user = None;
        self.error = None;
    }

    /// Gate for operations any signed-in shopper may perform.
    pub fn require_authenticated(&self) -> Result<&User> {
        self.user
            .as_ref()
            .ok_or_else(|| ClientError::Permission("authentication required".into()))
    }

    /// Gate for admin-only operations.
    pub fn require_admin(&self) -> Result<&User> {
        let user = self.require_authenticated()?;
        if user.role == Role::Admin {
            Ok(user)
        } else {
            Err(ClientError::Permission("admin role required".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::StubGateway;

    fn store_with_user(role: Role) -> (Arc<StubGateway>, SessionStore) {
        let gateway = Arc::new(StubGateway::default());
        *gateway.user.lock().unwrap() = Some(User {
            id: "u1".into(),
            username: "jo".into(),
            email: "jo@example.com".into(),
            role,
            address: None,
        });
        let store = SessionStore::new(gateway.clone());
        (gateway, store)
    }

    fn credentials() -> LoginRequest {
        LoginRequest { email: "jo@example.com".into(), password: "secret".into() }
    }

    #[tokio::test]
    async fn test_bad_email_rejected_before_gateway() {
        let (gateway, mut store) = store_with_user(Role::User);
        let err = store
            .login(LoginRequest { email: "not-an-email".into(), password: "x".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(gateway.call_count("login"), 0);
    }

    #[tokio::test]
    async fn test_login_replaces_session() {
        let (_gateway, mut store) = store_with_user(Role::User);
        store.login(credentials()).await.unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.user().unwrap().username, "jo");
    }

    #[tokio::test]
    async fn test_failed_login_sets_error_and_keeps_unauthenticated() {
        let gateway = Arc::new(StubGateway::default());
        let mut store = SessionStore::new(gateway);
        let err = store.login(credentials()).await.unwrap_err();
        assert!(matches!(err, ClientError::Permission(_)));
        assert!(!store.is_authenticated());
        assert!(store.error().is_some());
    }

    #[tokio::test]
    async fn test_register_validates_password_length() {
        let (gateway, mut store) = store_with_user(Role::User);
        let err = store
            .register(RegisterRequest {
                username: "jo2".into(),
                email: "jo2@example.com".into(),
                password: "short".into(),
                address: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(gateway.call_count("register"), 0);
    }

    #[tokio::test]
    async fn test_gate_checks() {
        let (_gateway, mut store) = store_with_user(Role::User);
        assert!(store.require_authenticated().is_err());
        store.login(credentials()).await.unwrap();
        assert!(store.require_authenticated().is_ok());
        assert!(matches!(store.require_admin(), Err(ClientError::Permission(_))));

        let (_gateway, mut admin) = store_with_user(Role::Admin);
        admin.login(credentials()).await.unwrap();
        assert!(admin.require_admin().is_ok());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_on_remote_failure() {
        let (gateway, mut store) = store_with_user(Role::User);
        store.login(credentials()).await.unwrap();
        gateway.fail_next_with(ClientError::Remote("connection reset".into()));
        store.logout().await;
        assert!(!store.is_authenticated());
    }
}
