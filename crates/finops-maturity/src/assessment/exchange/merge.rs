use super::import::TextKeyedCapability;
use crate::assessment::{AnswerStore, Model};
use std::collections::BTreeMap;

/// Rebuilds an index-keyed answer store from text-keyed items by locating
/// each question's current position in the freshly loaded model.
///
/// Matching is by literal question text; the first occurrence wins when a
/// capability repeats a prompt. An item whose text no longer appears in the
/// model is dropped without error. That silent loss is inherent to
/// text-based matching against externally edited models, so each drop is at
/// least logged.
pub(crate) fn merge_by_text(
    capabilities: &BTreeMap<String, TextKeyedCapability>,
    model: &Model,
) -> AnswerStore {
    let mut answers = AnswerStore::new();

    for (capability_key, imported) in capabilities {
        let Some(capability) = model.capability(capability_key) else {
            tracing::warn!(
                capability = capability_key.as_str(),
                name = imported.name.as_str(),
                dropped = imported.items.len(),
                "imported capability does not exist in the current model"
            );
            continue;
        };

        for item in &imported.items {
            match capability.question_index_by_text(&item.question) {
                Some(index) => {
                    answers.set(capability_key, index, &item.chosen_level);
                }
                None => {
                    tracing::warn!(
                        capability = capability_key.as_str(),
                        question = item.question.as_str(),
                        lens = item.lens.as_deref().unwrap_or(""),
                        answer = item.answer_text.as_str(),
                        "question text not found in current model; answer dropped"
                    );
                }
            }
        }
    }

    answers
}
