use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::constants::MAX_HISTORY;

/// The single persisted document holding all cross-session pairing state.
///
/// Absent or `null` fields decode as empty maps. Set-valued entries accept both a
/// JSON array and the legacy `{"value": {}}` object form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LunchbotDocument {
    /// Past partners per user, oldest first
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_pairings: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "sets_or_legacy_maps")]
    pub user_topics: BTreeMap<String, BTreeSet<String>>,
    #[serde(default, deserialize_with = "sets_or_legacy_maps")]
    pub blacklists: BTreeMap<String, BTreeSet<String>>,
    /// Symmetric: if `A -> B` is present then so is `B -> A`
    #[serde(default, deserialize_with = "null_as_default")]
    pub active_pairings: BTreeMap<String, String>,
}

impl LunchbotDocument {
    pub fn partner_of(&self, user_id: &str) -> Option<&str> {
        self.active_pairings.get(user_id).map(String::as_str)
    }

    pub fn is_paired(&self, user_id: &str) -> bool {
        self.active_pairings.contains_key(user_id)
    }

    pub fn history(&self, user_id: &str) -> &[String] {
        self.last_pairings
            .get(user_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True when either user has excluded the other.
    pub fn is_blocked(&self, a: &str, b: &str) -> bool {
        let lists = |owner: &str, target: &str| {
            self.blacklists
                .get(owner)
                .is_some_and(|set| set.contains(target))
        };
        lists(a, b) || lists(b, a)
    }

    pub fn begin_pairing(&mut self, a: &str, b: &str) {
        self.active_pairings.insert(a.to_string(), b.to_string());
        self.active_pairings.insert(b.to_string(), a.to_string());
    }

    /// Clears the active pairing of `user_id` for both parties and records it in both
    /// histories. Returns the partner, or `None` if `user_id` was not paired.
    pub fn end_pairing(&mut self, user_id: &str) -> Option<String> {
        let partner = self.active_pairings.remove(user_id)?;
        self.active_pairings.remove(&partner);
        self.record_pairing(user_id, &partner);
        Some(partner)
    }

    /// Appends each user to the other's history, evicting the oldest entries past `MAX_HISTORY`.
    pub fn record_pairing(&mut self, a: &str, b: &str) {
        self.push_history(a, b);
        self.push_history(b, a);
    }

    fn push_history(&mut self, owner: &str, partner: &str) {
        let history = self.last_pairings.entry(owner.to_string()).or_default();
        history.push(partner.to_string());
        if history.len() > MAX_HISTORY {
            let excess = history.len() - MAX_HISTORY;
            history.drain(..excess);
        }
    }

    pub fn blacklist(&self, user_id: &str) -> BTreeSet<String> {
        self.blacklists.get(user_id).cloned().unwrap_or_default()
    }

    pub fn add_to_blacklist(&mut self, owner: &str, target: &str) -> bool {
        self.blacklists
            .entry(owner.to_string())
            .or_default()
            .insert(target.to_string())
    }

    pub fn remove_from_blacklist(&mut self, owner: &str, target: &str) -> bool {
        remove_from_set(&mut self.blacklists, owner, target)
    }

    pub fn topics(&self, user_id: &str) -> BTreeSet<String> {
        self.user_topics.get(user_id).cloned().unwrap_or_default()
    }

    pub fn add_topic(&mut self, owner: &str, topic: &str) -> bool {
        self.user_topics
            .entry(owner.to_string())
            .or_default()
            .insert(topic.to_string())
    }

    pub fn remove_topic(&mut self, owner: &str, topic: &str) -> bool {
        remove_from_set(&mut self.user_topics, owner, topic)
    }
}

fn remove_from_set(sets: &mut BTreeMap<String, BTreeSet<String>>, owner: &str, value: &str) -> bool {
    let Some(set) = sets.get_mut(owner) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        sets.remove(owner);
    }
    removed
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SetRepr {
    List(Vec<String>),
    Legacy(BTreeMap<String, serde_json::Value>),
}

impl From<SetRepr> for BTreeSet<String> {
    fn from(repr: SetRepr) -> Self {
        match repr {
            SetRepr::List(values) => values.into_iter().collect(),
            SetRepr::Legacy(map) => map.into_keys().collect(),
        }
    }
}

fn sets_or_legacy_maps<'de, D>(deserializer: D) -> Result<BTreeMap<String, BTreeSet<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<SetRepr>>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(owner, set)| (owner, set.map(BTreeSet::<String>::from).unwrap_or_default()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_and_null_fields_decode_empty() {
        let doc: LunchbotDocument = serde_json::from_value(json!({})).unwrap();
        assert_eq!(doc, LunchbotDocument::default());

        let doc: LunchbotDocument = serde_json::from_value(json!({
            "LastPairings": null,
            "UserTopics": null,
            "Blacklists": null,
            "ActivePairings": null
        }))
        .unwrap();
        assert_eq!(doc, LunchbotDocument::default());
    }

    #[test]
    fn test_legacy_set_encoding() {
        let doc: LunchbotDocument = serde_json::from_value(json!({
            "Blacklists": { "1337": { "1": {} } },
            "UserTopics": { "1337": ["rust", "coffee"] }
        }))
        .unwrap();
        assert!(doc.is_blocked("1337", "1"));
        assert_eq!(doc.topics("1337").len(), 2);
    }

    #[test]
    fn test_serialized_field_names() {
        let mut doc = LunchbotDocument::default();
        doc.begin_pairing("a", "b");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["ActivePairings"]["a"], "b");
        assert!(value.get("LastPairings").is_some());
    }

    #[test]
    fn test_end_pairing_is_symmetric() {
        let mut doc = LunchbotDocument::default();
        doc.begin_pairing("a", "b");
        assert_eq!(doc.partner_of("b"), Some("a"));

        assert_eq!(doc.end_pairing("b"), Some("a".to_string()));
        assert!(doc.active_pairings.is_empty());
        assert_eq!(doc.history("a"), ["b".to_string()]);
        assert_eq!(doc.history("b"), ["a".to_string()]);
        assert_eq!(doc.end_pairing("a"), None);
    }

    #[test]
    fn test_history_evicts_oldest() {
        let mut doc = LunchbotDocument::default();
        for i in 0..MAX_HISTORY + 5 {
            doc.record_pairing("me", &format!("p{}", i));
        }
        let history = doc.history("me");
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history[0], "p5");
        assert_eq!(history[MAX_HISTORY - 1], format!("p{}", MAX_HISTORY + 4));
    }

    #[test]
    fn test_blacklist_checked_both_ways() {
        let mut doc = LunchbotDocument::default();
        doc.add_to_blacklist("a", "b");
        assert!(doc.is_blocked("a", "b"));
        assert!(doc.is_blocked("b", "a"));
        assert!(!doc.is_blocked("a", "c"));

        assert!(doc.remove_from_blacklist("a", "b"));
        assert!(!doc.remove_from_blacklist("a", "b"));
        assert!(!doc.blacklists.contains_key("a"));
    }
}
