// src/reputation.rs
//! Reputation collaborator. A real user-history service is external; the
//! built-in lookup returns the configured placeholder bonus for everyone.

use anyhow::Result;
use async_trait::async_trait;

/// Highest bonus a user can earn.
pub const MAX_REPUTATION_BONUS: u32 = 5;

#[async_trait]
pub trait ReputationLookup: Send + Sync {
    async fn bonus_for(&self, user_id: &str) -> Result<u32>;
}

/// Same bonus for every user.
#[derive(Debug, Clone, Copy)]
pub struct FixedReputation {
    bonus: u32,
}

impl FixedReputation {
    pub fn new(bonus: u32) -> Self {
        Self {
            bonus: bonus.min(MAX_REPUTATION_BONUS),
        }
    }
}

#[async_trait]
impl ReputationLookup for FixedReputation {
    async fn bonus_for(&self, _user_id: &str) -> Result<u32> {
        Ok(self.bonus)
    }
}
