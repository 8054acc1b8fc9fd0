//! Login state of the single interactive user.

use tracing::{info, warn};

use crate::error::{PortalError, Result};
use crate::models::{Role, User};
use crate::traits::AuthProvider;

pub struct Session<A> {
    auth: A,
    user: Option<User>,
}

impl<A: AuthProvider> Session<A> {
    pub fn new(auth: A) -> Self {
        Self { auth, user: None }
    }

    /// Signs in with an email/password pair.
    ///
    /// A failed attempt leaves any existing login untouched.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&User> {
        let found = self
            .auth
            .authenticate(email, password)
            .await
            .map_err(|e| PortalError::Unauthorized(format!("credential check failed: {e}")))?;

        match found {
            Some(user) => {
                info!(user_id = %user.id, role = ?user.role, "login succeeded");
                Ok(self.user.insert(user))
            }
            None => {
                warn!(email, "login rejected");
                Err(PortalError::Unauthorized("invalid email or password".into()))
            }
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "logged out");
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SEED_ADMIN_ID;
    use crate::traits::MockAuthProvider;

    fn admin() -> User {
        User {
            id: SEED_ADMIN_ID,
            name: "M.Nauman".into(),
            email: "nauman@admin.com".into(),
            role: Role::Admin,
            reg_no: None,
            company_name: None,
            technology: None,
        }
    }

    fn provider_accepting(email: &'static str, password: &'static str) -> MockAuthProvider {
        let mut auth = MockAuthProvider::new();
        auth.expect_authenticate().returning(move |e, p| {
            Ok((e == email && p == password).then(admin))
        });
        auth
    }

    #[tokio::test]
    async fn test_login_and_logout() {
        let mut session = Session::new(provider_accepting("nauman@admin.com", "password"));
        assert!(!session.is_authenticated());

        let user = session.login("nauman@admin.com", "password").await.unwrap();
        assert_eq!(user.id, SEED_ADMIN_ID);
        assert_eq!(session.role(), Some(Role::Admin));

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_user() {
        let mut session = Session::new(provider_accepting("nauman@admin.com", "password"));
        session.login("nauman@admin.com", "password").await.unwrap();

        let err = session.login("nauman@admin.com", "wrong").await.unwrap_err();
        assert!(matches!(err, PortalError::Unauthorized(_)));
        assert_eq!(session.user().map(|u| u.id), Some(SEED_ADMIN_ID));
    }

    #[tokio::test]
    async fn test_provider_failure_is_unauthorized() {
        let mut auth = MockAuthProvider::new();
        auth.expect_authenticate()
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("credential store unavailable")));

        let mut session = Session::new(auth);
        let err = session.login("a@b.c", "x").await.unwrap_err();
        assert!(matches!(err, PortalError::Unauthorized(msg) if msg.contains("unavailable")));
        assert!(!session.is_authenticated());
    }
}
