use super::answers::AnswerStore;
use super::model::Model;
use super::report::{score_assessment, AssessmentReport};
use std::collections::BTreeSet;

/// Explicit session state: the loaded model, the capability selection, and
/// the answers recorded so far. Owns everything; there is no ambient state.
/// Reports are pure projections over the current snapshot.
#[derive(Debug, Clone)]
pub struct Assessment {
    model: Model,
    selection: BTreeSet<String>,
    answers: AnswerStore,
}

impl Assessment {
    /// Starts a session: selection defaults to every capability in the
    /// model, answers start empty.
    pub fn new(model: Model) -> Self {
        let selection = model.capability_keys().into_iter().collect();
        Self {
            model,
            selection,
            answers: AnswerStore::new(),
        }
    }

    /// Replaces the questionnaire. The selection resets to the new model's
    /// capabilities and answers are cleared; use `replace_answers` to carry
    /// over an imported set afterwards.
    pub fn load_model(&mut self, model: Model) {
        self.selection = model.capability_keys().into_iter().collect();
        self.answers = AnswerStore::new();
        self.model = model;
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn selection(&self) -> &BTreeSet<String> {
        &self.selection
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn set_answer(&mut self, capability_key: &str, question_index: usize, grade_label: &str) {
        if self.model.capability(capability_key).is_none() {
            tracing::warn!(
                capability = capability_key,
                "answer recorded for a capability the current model does not define"
            );
        }
        self.answers.set(capability_key, question_index, grade_label);
    }

    /// "Reset current capability": drops all answers for one capability.
    pub fn reset_capability(&mut self, capability_key: &str) {
        self.answers.clear_capability(capability_key);
    }

    pub fn replace_answers(&mut self, answers: AnswerStore) {
        self.answers.replace_all(answers);
    }

    /// Replaces the selection, keeping only keys the model defines. An empty
    /// result is legal and scores as "all capabilities".
    pub fn set_selection<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        let known: BTreeSet<String> = self.model.capability_keys().into_iter().collect();
        self.selection = keys.into_iter().filter(|key| known.contains(key)).collect();
    }

    pub fn toggle_capability(&mut self, capability_key: &str) {
        if !self.selection.remove(capability_key) {
            if self.model.capability(capability_key).is_some() {
                self.selection.insert(capability_key.to_string());
            }
        }
    }

    /// Full recomputation from current state. Cheap at questionnaire scale;
    /// nothing is cached or patched incrementally.
    pub fn report(&self) -> AssessmentReport {
        score_assessment(&self.model, &self.selection, &self.answers)
    }
}
