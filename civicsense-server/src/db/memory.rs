//! In-memory user store for tests and throwaway development runs

use std::collections::HashMap;

use async_trait::async_trait;
use civicsense_core::{CivicScores, ScoreDeltas, UserRecord};
use tokio::sync::RwLock;

use super::store::{StoreError, UserStore};

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.user_id) {
            return Err(StoreError::Duplicate(user.user_id.clone()));
        }
        users.insert(user.user_id.clone(), user.clone());
        Ok(())
    }

    async fn find(&self, user_id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.users.read().await.get(user_id).cloned())
    }

    async fn update_level(&self, user: &UserRecord) -> Result<bool, StoreError> {
        let mut users = self.users.write().await;
        let Some(stored) = users.get_mut(&user.user_id) else {
            return Ok(false);
        };
        stored.age = user.age;
        stored.current_level = user.current_level;
        stored.last_level_update_date = user.last_level_update_date;
        Ok(true)
    }

    async fn increment_scores(
        &self,
        user_id: &str,
        deltas: &ScoreDeltas,
    ) -> Result<Option<CivicScores>, StoreError> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(user_id).map(|user| {
            user.civic_scores.apply(deltas);
            user.civic_scores
        }))
    }
}
