use std::collections::HashSet;

use crate::models::{Candidate, LunchbotDocument};
use crate::services::UserDirectory;

/// Why a candidate was removed from the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    Requester,
    Bot,
    AlreadyPaired,
    Blacklisted,
    Unreachable,
}

/// Exclusion rules that only need the persisted document.
pub fn document_exclusion(
    requester: &str,
    candidate: &Candidate,
    document: &LunchbotDocument,
) -> Option<Exclusion> {
    if candidate.id == requester {
        return Some(Exclusion::Requester);
    }
    if candidate.is_bot {
        return Some(Exclusion::Bot);
    }
    if document.is_paired(&candidate.id) {
        return Some(Exclusion::AlreadyPaired);
    }
    if document.is_blocked(requester, &candidate.id) {
        return Some(Exclusion::Blacklisted);
    }
    None
}

/// Removes every candidate the requester cannot be paired with. Order of the
/// remaining candidates is preserved and duplicates are dropped.
///
/// Status is looked up once per surviving candidate. A failed lookup counts as
/// offline: a flaky status source shrinks the pool rather than pairing someone
/// who may not be there.
pub async fn filter_candidates(
    requester: &str,
    pool: Vec<Candidate>,
    document: &LunchbotDocument,
    directory: &dyn UserDirectory,
) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    let mut eligible = Vec::with_capacity(pool.len());

    for candidate in pool {
        if !seen.insert(candidate.id.clone()) {
            continue;
        }

        let exclusion = match document_exclusion(requester, &candidate, document) {
            Some(exclusion) => Some(exclusion),
            None => match directory.get_status(&candidate.id).await {
                Ok(status) if status.is_reachable() => None,
                Ok(_) => Some(Exclusion::Unreachable),
                Err(e) => {
                    tracing::warn!(
                        "Status lookup for {} failed, treating as offline: {}",
                        candidate.id,
                        e
                    );
                    Some(Exclusion::Unreachable)
                }
            },
        };

        match exclusion {
            Some(reason) => tracing::debug!("Excluding {} for {}: {:?}", candidate.id, requester, reason),
            None => eligible.push(candidate),
        }
    }

    eligible
}
