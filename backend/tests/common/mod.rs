#![allow(dead_code)]

use async_trait::async_trait;
use lunchbot::db::{BlobStore, MemoryBlobStore};
use lunchbot::models::{Candidate, DirectoryUser, UserStatus};
use lunchbot::services::UserDirectory;
use lunchbot::{PairingEngine, StoreError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const GROUP: &str = "town-square";
pub const DOCUMENT_KEY: &str = "LunchbotData";
pub const SEED: u64 = 1337;

#[derive(Default)]
struct DirectoryState {
    users: Vec<DirectoryUser>,
    statuses: HashMap<String, UserStatus>,
    groups: HashMap<String, Vec<String>>,
}

/// In-memory chat workspace. Users without a recorded status fail the status lookup.
#[derive(Default)]
pub struct FakeDirectory {
    state: Mutex<DirectoryState>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an online human to `GROUP`.
    pub fn with_user(self, id: &str) -> Self {
        self.add_user(id, false, Some(UserStatus::Online));
        self
    }

    pub fn with_users(self, ids: &[&str]) -> Self {
        for id in ids {
            self.add_user(id, false, Some(UserStatus::Online));
        }
        self
    }

    pub fn add_user(&self, id: &str, is_bot: bool, status: Option<UserStatus>) {
        let mut state = self.state.lock().unwrap();
        state.users.push(DirectoryUser {
            id: id.to_string(),
            username: format!("{}.name", id),
            is_bot,
        });
        if let Some(status) = status {
            state.statuses.insert(id.to_string(), status);
        }
        state
            .groups
            .entry(GROUP.to_string())
            .or_default()
            .push(id.to_string());
    }

    pub fn set_status(&self, id: &str, status: UserStatus) {
        self.state
            .lock()
            .unwrap()
            .statuses
            .insert(id.to_string(), status);
    }
}

#[async_trait]
impl UserDirectory for FakeDirectory {
    async fn load_candidate_pool(&self, group_id: &str) -> anyhow::Result<Vec<Candidate>> {
        let state = self.state.lock().unwrap();
        let members = state
            .groups
            .get(group_id)
            .ok_or_else(|| anyhow::anyhow!("unknown group {}", group_id))?;
        Ok(members
            .iter()
            .filter_map(|id| state.users.iter().find(|u| &u.id == id))
            .cloned()
            .map(Candidate::from)
            .collect())
    }

    async fn get_status(&self, user_id: &str) -> anyhow::Result<UserStatus> {
        self.state
            .lock()
            .unwrap()
            .statuses
            .get(user_id)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("status unavailable for {}", user_id))
    }

    async fn user_by_id(&self, user_id: &str) -> anyhow::Result<Option<DirectoryUser>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> anyhow::Result<Option<DirectoryUser>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }
}

/// Blob store whose writes always fail.
pub struct ReadOnlyStore(pub MemoryBlobStore);

#[async_trait]
impl BlobStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.0.get(key).await
    }

    async fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

pub fn engine_with(store: Arc<dyn BlobStore>, directory: Arc<FakeDirectory>) -> PairingEngine {
    PairingEngine::new(store, directory, DOCUMENT_KEY, StdRng::seed_from_u64(SEED))
}

pub fn engine(directory: FakeDirectory) -> (PairingEngine, Arc<MemoryBlobStore>) {
    let store = Arc::new(MemoryBlobStore::new());
    (engine_with(store.clone(), Arc::new(directory)), store)
}
