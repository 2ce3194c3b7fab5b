//! Token owner lookup.
//!
//! The client never talks to the Helix API itself. Whoever constructs a
//! [`TmiClient`](super::TmiClient) supplies an [`IdentityResolver`] that
//! turns the bearer token into the account it belongs to.

use async_trait::async_trait;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The account a token belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Identity {
    pub user_id: i64,
    pub login: String,
}

impl Identity {
    pub fn new(user_id: i64, login: impl Into<String>) -> Self {
        Self {
            user_id,
            login: login.into(),
        }
    }
}

/// Resolves a bearer token to its [`Identity`]. Called once per client.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, bearer: &str) -> anyhow::Result<Identity>;
}

/// A resolver that always answers with the same identity.
///
/// Useful for anonymous `justinfan` logins, which have no account to look up.
#[derive(Clone, Debug)]
pub struct FixedIdentity(pub Identity);

#[async_trait]
impl IdentityResolver for FixedIdentity {
    async fn resolve(&self, _bearer: &str) -> anyhow::Result<Identity> {
        Ok(self.0.clone())
    }
}
