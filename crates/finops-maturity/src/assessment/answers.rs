use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse answer set: capability key -> question index -> raw grade label.
///
/// Labels are stored verbatim. An unrecognized label scores as unanswered
/// but still round-trips through export unchanged. Entries addressing a
/// capability or index the current model lacks are inert, not purged; they
/// become meaningful again if a matching capability reappears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    by_capability: BTreeMap<String, BTreeMap<usize, String>>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a grade for one question. Overwrites, never appends: at most
    /// one label exists per (capability, index) pair.
    pub fn set(&mut self, capability_key: &str, question_index: usize, grade_label: &str) {
        self.by_capability
            .entry(capability_key.to_string())
            .or_default()
            .insert(question_index, grade_label.to_string());
    }

    /// Drops every answer recorded for one capability.
    pub fn clear_capability(&mut self, capability_key: &str) {
        self.by_capability.remove(capability_key);
    }

    /// Wholesale replacement, used by import.
    pub fn replace_all(&mut self, replacement: AnswerStore) {
        self.by_capability = replacement.by_capability;
    }

    pub fn answer(&self, capability_key: &str, question_index: usize) -> Option<&str> {
        self.by_capability
            .get(capability_key)
            .and_then(|answers| answers.get(&question_index))
            .map(String::as_str)
    }

    pub fn capability_answers(&self, capability_key: &str) -> Option<&BTreeMap<usize, String>> {
        self.by_capability.get(capability_key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<usize, String>)> {
        self.by_capability.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.by_capability.values().all(BTreeMap::is_empty)
    }

    pub fn answered_count(&self) -> usize {
        self.by_capability.values().map(BTreeMap::len).sum()
    }
}
