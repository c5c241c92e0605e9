//! In-memory token denylist used by logout.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use scribe_core::ports::TokenDenylist;

/// Revoked tokens keyed by the raw token string, each kept until its own expiry.
///
/// Note: revocations are lost on process restart.
pub struct InMemoryTokenDenylist {
    revoked: RwLock<HashMap<String, i64>>,
}

impl InMemoryTokenDenylist {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }

    /// Number of revocations still being tracked.
    pub async fn len(&self) -> usize {
        self.revoked.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryTokenDenylist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenDenylist for InMemoryTokenDenylist {
    async fn revoke(&self, token: &str, expires_at: i64) {
        let now = Utc::now().timestamp();
        let mut revoked = self.revoked.write().await;
        // Expired tokens fail verification on their own.
        revoked.retain(|_, exp| *exp > now);
        if expires_at > now {
            revoked.insert(token.to_string(), expires_at);
        }
    }

    async fn is_revoked(&self, token: &str) -> bool {
        let revoked = self.revoked.read().await;
        revoked
            .get(token)
            .is_some_and(|exp| *exp > Utc::now().timestamp())
    }
}
