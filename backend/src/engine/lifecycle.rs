use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::db::{self, BlobStore};
use crate::engine::{eligibility, selector, topics, weighting};
use crate::error::{PairingError, PairingResult};
use crate::models::{DirectoryUser, LunchbotDocument};
use crate::services::{find_user, UserDirectory};
use crate::utils::Config;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartedPairing {
    pub partner_id: String,
    pub topic_suggestion: Option<String>,
}

/// Matches users and keeps the persisted pairing document consistent.
///
/// Every mutating operation runs one load, mutate, save cycle while holding
/// `session`, so concurrent requests cannot overwrite each other's changes.
/// The lock also owns the random source, which keeps seeded draws in call order.
pub struct PairingEngine {
    store: Arc<dyn BlobStore>,
    directory: Arc<dyn UserDirectory>,
    document_key: String,
    session: Mutex<StdRng>,
}

impl PairingEngine {
    pub fn new(
        store: Arc<dyn BlobStore>,
        directory: Arc<dyn UserDirectory>,
        document_key: impl Into<String>,
        rng: StdRng,
    ) -> Self {
        Self {
            store,
            directory,
            document_key: document_key.into(),
            session: Mutex::new(rng),
        }
    }

    pub fn from_config(
        store: Arc<dyn BlobStore>,
        directory: Arc<dyn UserDirectory>,
        config: &Config,
    ) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => {
                tracing::info!("Seeding pairing draws with fixed seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_os_rng(),
        };
        Self::new(store, directory, config.document_key.clone(), rng)
    }

    async fn load(&self) -> LunchbotDocument {
        db::load_document(self.store.as_ref(), &self.document_key).await
    }

    async fn persist(&self, document: &LunchbotDocument) -> PairingResult<()> {
        db::save_document(self.store.as_ref(), &self.document_key, document)
            .await
            .map_err(|e| {
                tracing::error!("Failed to save document '{}': {}", self.document_key, e);
                PairingError::PersistenceFailure(e)
            })
    }

    /// Requesters are addressed by id only; usernames are accepted for targets.
    async fn resolve_requester(&self, user_id: &str) -> PairingResult<DirectoryUser> {
        match self.directory.user_by_id(user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(PairingError::UnknownUser(user_id.to_string())),
            Err(e) => {
                tracing::warn!("Failed to look up requester {}: {}", user_id, e);
                Err(PairingError::UnknownUser(user_id.to_string()))
            }
        }
    }

    async fn resolve(&self, reference: &str) -> PairingResult<DirectoryUser> {
        find_user(self.directory.as_ref(), reference)
            .await
            .ok_or_else(|| PairingError::UnknownUser(reference.to_string()))
    }

    /// Pairs `requester` with someone from `group_id` and records the active pairing.
    pub async fn start_pairing(&self, requester: &str, group_id: &str) -> PairingResult<StartedPairing> {
        let requester = self.resolve_requester(requester).await?.id;

        let mut rng = self.session.lock().await;
        let mut document = self.load().await;

        if let Some(partner) = document.partner_of(&requester) {
            return Err(PairingError::AlreadyPaired {
                partner: partner.to_string(),
            });
        }

        let pool = match self.directory.load_candidate_pool(group_id).await {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("Failed to load candidates for group {}: {}", group_id, e);
                Vec::new()
            }
        };
        let pool_size = pool.len();

        let eligible =
            eligibility::filter_candidates(&requester, pool, &document, self.directory.as_ref()).await;
        let weighted = weighting::weigh_candidates(&requester, eligible, &document);
        let partner_id = selector::pick(&weighted, &mut *rng)?.candidate.id.clone();

        document.begin_pairing(&requester, &partner_id);
        let pair = [requester.as_str(), partner_id.as_str()];
        let topic_suggestion = topics::suggest_topic(&document, &pair, &mut *rng);
        self.persist(&document).await?;

        tracing::info!(
            "Paired {} with {} ({} of {} candidates eligible)",
            requester,
            partner_id,
            weighted.len(),
            pool_size
        );

        Ok(StartedPairing {
            partner_id,
            topic_suggestion,
        })
    }

    /// Ends the active pairing of `requester` and records it in both histories.
    pub async fn finish_pairing(&self, requester: &str) -> PairingResult<String> {
        let _session = self.session.lock().await;
        let mut document = self.load().await;

        let partner = document.end_pairing(requester).ok_or(PairingError::NotPaired)?;
        self.persist(&document).await?;

        tracing::info!("Finished pairing of {} with {}", requester, partner);
        Ok(partner)
    }

    /// Active partner and history of `user_id`, read from a single load.
    pub async fn pairing_status(&self, user_id: &str) -> (Option<String>, Vec<String>) {
        let document = self.load().await;
        (
            document.partner_of(user_id).map(str::to_string),
            document.history(user_id).to_vec(),
        )
    }

    pub async fn active_partner(&self, user_id: &str) -> Option<String> {
        self.load().await.partner_of(user_id).map(str::to_string)
    }

    /// Past partners of `user_id`, oldest first.
    pub async fn history(&self, user_id: &str) -> Vec<String> {
        self.load().await.history(user_id).to_vec()
    }

    pub async fn add_to_blacklist(&self, requester: &str, target: &str) -> PairingResult<DirectoryUser> {
        let user = self.resolve(target).await?;

        let _session = self.session.lock().await;
        let mut document = self.load().await;
        if document.add_to_blacklist(requester, &user.id) {
            self.persist(&document).await?;
            tracing::info!("{} blacklisted {}", requester, user.id);
        }

        Ok(user)
    }

    /// Returns false when `target` was not on the blacklist.
    ///
    /// A reference that no longer resolves is still removed if it is listed verbatim.
    pub async fn remove_from_blacklist(&self, requester: &str, target: &str) -> PairingResult<bool> {
        let resolved = find_user(self.directory.as_ref(), target).await;

        let _session = self.session.lock().await;
        let mut document = self.load().await;

        let target_id = match resolved {
            Some(user) => user.id,
            None if document.blacklist(requester).contains(target) => target.to_string(),
            None => return Err(PairingError::UnknownUser(target.to_string())),
        };

        if !document.remove_from_blacklist(requester, &target_id) {
            return Ok(false);
        }
        self.persist(&document).await?;
        tracing::info!("{} removed {} from their blacklist", requester, target_id);
        Ok(true)
    }

    pub async fn list_blacklist(&self, requester: &str) -> BTreeSet<String> {
        self.load().await.blacklist(requester)
    }

    /// Returns false when the topic is blank or already present.
    pub async fn add_topic(&self, requester: &str, topic: &str) -> PairingResult<bool> {
        let Some(topic) = topics::normalize_topic(topic) else {
            return Ok(false);
        };

        let _session = self.session.lock().await;
        let mut document = self.load().await;
        if !document.add_topic(requester, &topic) {
            return Ok(false);
        }
        self.persist(&document).await?;
        Ok(true)
    }

    /// Returns false when the topic was not in the requester's set.
    ///
    /// The input is matched verbatim first, so topics stored before normalization
    /// existed can still be removed.
    pub async fn remove_topic(&self, requester: &str, topic: &str) -> PairingResult<bool> {
        let forms = topics::removal_forms(topic);
        if forms.is_empty() {
            return Ok(false);
        }

        let _session = self.session.lock().await;
        let mut document = self.load().await;
        let Some(removed) = forms
            .into_iter()
            .find(|form| document.remove_topic(requester, form))
        else {
            return Ok(false);
        };
        self.persist(&document).await?;
        tracing::debug!("{} removed topic '{}'", requester, removed);
        Ok(true)
    }

    pub async fn list_topics(&self, requester: &str) -> BTreeSet<String> {
        self.load().await.topics(requester)
    }

    pub async fn suggest_topic(&self, user_ids: &[&str]) -> Option<String> {
        let mut rng = self.session.lock().await;
        let document = self.load().await;
        topics::suggest_topic(&document, user_ids, &mut *rng)
    }

    /// Deletes the whole document: histories, blacklists, topics and active pairings.
    pub async fn reset(&self) -> PairingResult<()> {
        let _session = self.session.lock().await;
        db::delete_document(self.store.as_ref(), &self.document_key)
            .await
            .map_err(PairingError::PersistenceFailure)?;
        tracing::warn!("Pairing document '{}' was reset", self.document_key);
        Ok(())
    }
}
