//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::models::User;

/// Identity contract for portal login.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Checks a credential pair.
    ///
    /// Returns `Ok(None)` for an unknown email or a wrong password; `Err` is
    /// reserved for failures of the provider itself.
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>>;
}
