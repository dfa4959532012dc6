use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::USER_REFERENCE_PATTERN;
use crate::models::{Candidate, DirectoryUser, UserStatus};

static USER_REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(USER_REFERENCE_PATTERN).expect("user reference pattern is valid"));

/// The chat workspace the engine pairs users from.
///
/// Every call may block on an external system; the engine enforces no timeout.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Members of a group (channel) who could in principle be paired.
    async fn load_candidate_pool(&self, group_id: &str) -> anyhow::Result<Vec<Candidate>>;

    async fn get_status(&self, user_id: &str) -> anyhow::Result<UserStatus>;

    async fn user_by_id(&self, user_id: &str) -> anyhow::Result<Option<DirectoryUser>>;

    async fn user_by_username(&self, username: &str) -> anyhow::Result<Option<DirectoryUser>>;
}

pub fn is_valid_user_reference(reference: &str) -> bool {
    USER_REFERENCE.is_match(reference)
}

/// Resolves a username or id, with or without a leading `@`.
///
/// Ids are opaque and always reach the directory; only username attempts must
/// match the reference pattern. Lookup errors count as "not found".
pub async fn find_user(directory: &dyn UserDirectory, reference: &str) -> Option<DirectoryUser> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    let mut attempts = vec![reference];
    if let Some(stripped) = reference.strip_prefix('@').filter(|s| !s.is_empty()) {
        attempts.push(stripped);
    }

    for attempt in attempts {
        if is_valid_user_reference(attempt) {
            match directory.user_by_username(attempt).await {
                Ok(Some(user)) => return Some(user),
                Ok(None) => {}
                Err(e) => tracing::debug!("Username lookup for '{}' failed: {}", attempt, e),
            }
        }
        match directory.user_by_id(attempt).await {
            Ok(Some(user)) => return Some(user),
            Ok(None) => {}
            Err(e) => tracing::debug!("Id lookup for '{}' failed: {}", attempt, e),
        }
    }

    None
}
