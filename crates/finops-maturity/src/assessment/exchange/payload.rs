use crate::assessment::{AnswerStore, Model};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const APP_NAME: &str = "FinOps Maturity Assessment";

/// Free-form assessment metadata entered by the assessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportMeta {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub assessor: String,
}

/// The canonical export shape. Question indices serialize as JSON object
/// string keys; `exported_at` is RFC 3339. Given identical state and
/// timestamp the payload is byte-for-byte reproducible in structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub app_name: String,
    pub exported_at: DateTime<Utc>,
    pub model_version: String,
    pub meta: ExportMeta,
    pub model_keys: Vec<String>,
    pub selected_caps: Vec<String>,
    pub answers_by_cap: AnswerStore,
}

/// Serializes the current selection, answers, and metadata. The timestamp is
/// a parameter so the payload stays a deterministic function of state.
pub fn build_export(
    model: &Model,
    selection: &BTreeSet<String>,
    answers: &AnswerStore,
    meta: ExportMeta,
    exported_at: DateTime<Utc>,
) -> ExportPayload {
    let model_keys = model.capability_keys();
    let selected_caps = model_keys
        .iter()
        .filter(|key| selection.contains(*key))
        .cloned()
        .collect();

    ExportPayload {
        app_name: APP_NAME.to_string(),
        exported_at,
        model_version: model.version.clone(),
        meta,
        model_keys,
        selected_caps,
        answers_by_cap: answers.clone(),
    }
}
