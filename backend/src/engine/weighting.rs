use crate::constants::NEVER_PAIRED_WEIGHT;
use crate::models::{Candidate, LunchbotDocument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedCandidate {
    pub candidate: Candidate,
    pub weight: u64,
}

/// Weight of `candidate_id` given the requester's history (oldest first).
///
/// The most recent occurrence at index `i` of a history of length `L` yields `L - i`,
/// so the latest partner gets 1 and older partners get more. Candidates never seen
/// get `NEVER_PAIRED_WEIGHT`.
pub fn recency_weight(history: &[String], candidate_id: &str) -> u64 {
    history
        .iter()
        .rposition(|id| id == candidate_id)
        .map(|index| (history.len() - index) as u64)
        .unwrap_or(NEVER_PAIRED_WEIGHT)
}

pub fn weigh_candidates(
    requester: &str,
    eligible: Vec<Candidate>,
    document: &LunchbotDocument,
) -> Vec<WeightedCandidate> {
    let history = document.history(requester);
    eligible
        .into_iter()
        .map(|candidate| {
            let weight = recency_weight(history, &candidate.id);
            WeightedCandidate { candidate, weight }
        })
        .collect()
}
