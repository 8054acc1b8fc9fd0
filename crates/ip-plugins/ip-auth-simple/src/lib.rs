//! # ip-auth-simple
//!
//! Argon2-based implementation of `AuthProvider` over a static credential list.
//! Passwords are hashed once at construction; only PHC strings are kept in memory.

use anyhow::anyhow;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use ip_core::seed::{SEED_ADMIN_ID, SEED_MANAGER_ID, SEED_STUDENT_ID};
use ip_core::{AuthProvider, Role, User};
use tracing::debug;

/// One entry of the credential list.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: User,
    /// Argon2 PHC string
    pub password_hash: String,
}

pub struct StaticAuthProvider {
    credentials: Vec<Credential>,
}

impl StaticAuthProvider {
    /// Accepts credentials whose `password_hash` is already an Argon2 PHC string.
    /// Plaintext passwords, such as configured users, go through `from_plaintext`.
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }

    /// Hashes every plaintext password with a fresh salt.
    pub fn from_plaintext<I, P>(entries: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (User, P)>,
        P: AsRef<str>,
    {
        let credentials = entries
            .into_iter()
            .map(|(user, password)| {
                Ok(Credential {
                    password_hash: hash_password(password.as_ref())?,
                    user,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(Self::new(credentials))
    }

    /// The three demo accounts, all with the password `password`.
    pub fn with_mock_users() -> anyhow::Result<Self> {
        Self::from_plaintext(mock_users())
    }

    pub fn len(&self) -> usize {
        self.credentials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }
}

/// Hashes a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("failed to hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verifies if a provided password matches a stored Argon2 hash.
fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(_) => return false,
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Demo accounts. Ids match the seeded student and company manager.
pub fn mock_users() -> Vec<(User, &'static str)> {
    vec![
        (
            User {
                id: SEED_STUDENT_ID,
                name: "Qadis Parvez".into(),
                email: "qadis@student.com".into(),
                role: Role::Student,
                reg_no: Some("2021-Arid-4566".into()),
                company_name: None,
                technology: Some("Flutter".into()),
            },
            "password",
        ),
        (
            User {
                id: SEED_ADMIN_ID,
                name: "M.Nauman".into(),
                email: "nauman@admin.com".into(),
                role: Role::Admin,
                reg_no: None,
                company_name: None,
                technology: None,
            },
            "password",
        ),
        (
            User {
                id: SEED_MANAGER_ID,
                name: "Manager Name".into(),
                email: "manager@company.com".into(),
                role: Role::Manager,
                reg_no: None,
                company_name: Some("TechCorp Solutions".into()),
                technology: Some("Frontend Development".into()),
            },
            "password",
        ),
    ]
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    /// Exact email match, then Argon2 verification.
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        let Some(entry) = self.credentials.iter().find(|c| c.user.email == email) else {
            debug!(email, "unknown email");
            return Ok(None);
        };

        if verify_password(password, &entry.password_hash) {
            Ok(Some(entry.user.clone()))
        } else {
            debug!(user_id = %entry.user.id, "password mismatch");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted() {
        let a = hash_password("password").unwrap();
        let b = hash_password("password").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
        assert!(verify_password("password", &a));
        assert!(!verify_password("Password", &a));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("password", "not-a-phc-string"));
    }

    #[tokio::test]
    async fn test_mock_users_log_in() {
        let auth = StaticAuthProvider::with_mock_users().unwrap();
        assert_eq!(auth.len(), 3);

        let manager = auth
            .authenticate("manager@company.com", "password")
            .await
            .unwrap()
            .expect("manager should authenticate");
        assert_eq!(manager.id, SEED_MANAGER_ID);
        assert_eq!(manager.role, Role::Manager);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let auth = StaticAuthProvider::with_mock_users().unwrap();
        assert!(auth.authenticate("qadis@student.com", "nope").await.unwrap().is_none());
        assert!(auth.authenticate("nobody@student.com", "password").await.unwrap().is_none());
        assert!(auth.authenticate("QADIS@student.com", "password").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prehashed_credentials() {
        let (user, _) = mock_users().remove(1);
        let auth = StaticAuthProvider::new(vec![Credential {
            password_hash: hash_password("s3cret").unwrap(),
            user,
        }]);
        let found = auth.authenticate("nauman@admin.com", "s3cret").await.unwrap();
        assert_eq!(found.map(|u| u.role), Some(Role::Admin));
    }
}
