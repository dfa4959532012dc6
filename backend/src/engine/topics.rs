use rand::Rng;
use rand::seq::IndexedRandom;

use crate::constants::TOPIC_SUGGESTION_PREFIX;
use crate::models::LunchbotDocument;

/// Normalizes a user-supplied topic. Returns `None` for blank input.
pub fn normalize_topic(raw: &str) -> Option<String> {
    let topic = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    (!topic.is_empty()).then_some(topic)
}

/// Spellings tried in order when removing a topic: verbatim, without leading
/// spaces, then normalized. Blank input yields nothing.
pub fn removal_forms(raw: &str) -> Vec<String> {
    let mut forms: Vec<String> = Vec::new();
    let Some(normalized) = normalize_topic(raw) else {
        return forms;
    };
    for form in [raw.to_string(), raw.trim_start_matches(' ').to_string(), normalized] {
        if !forms.contains(&form) {
            forms.push(form);
        }
    }
    forms
}

/// Picks one random topic per user and joins them into a conversation starter.
/// Users without topics are skipped; `None` when nobody has any.
pub fn suggest_topic<R: Rng + ?Sized>(
    document: &LunchbotDocument,
    user_ids: &[&str],
    rng: &mut R,
) -> Option<String> {
    let picks: Vec<String> = user_ids
        .iter()
        .filter_map(|user_id| {
            let topics: Vec<&String> = document.user_topics.get(*user_id)?.iter().collect();
            topics.choose(&mut *rng).map(|topic| topic.to_string())
        })
        .collect();

    if picks.is_empty() {
        return None;
    }

    Some(format!("{} {}", TOPIC_SUGGESTION_PREFIX, picks.join(" or ")))
}
