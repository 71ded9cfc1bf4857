use super::merge::merge_by_text;
use super::payload::ExportMeta;
use super::AnswerImportError;
use crate::assessment::{AnswerStore, Model};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Result of reading an answers payload against the currently loaded model.
#[derive(Debug, Clone)]
pub struct ImportedAnswers {
    pub answers: AnswerStore,
    /// Selection carried in a full export payload, filtered to keys the
    /// current model still defines. Absent for the question-text shape.
    pub selected_caps: Option<Vec<String>>,
    pub model_version: Option<String>,
    pub meta: Option<ExportMeta>,
}

/// Legacy export shape: answers keyed by literal question text instead of
/// index, so they survive model edits.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextKeyedCapability {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) items: Vec<TextKeyedItem>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TextKeyedItem {
    #[serde(default)]
    pub(crate) question: String,
    #[serde(default)]
    pub(crate) lens: Option<String>,
    #[serde(default)]
    pub(crate) chosen_level: String,
    #[serde(default)]
    pub(crate) answer_text: String,
}

/// Reads either historical answers shape: the canonical index-keyed export
/// payload, or the question-text item lists written by earlier format
/// revisions. Fails without partial effects; the caller applies the result.
pub fn import_answers(raw: &str, model: &Model) -> Result<ImportedAnswers, AnswerImportError> {
    let value: Value = serde_json::from_str(raw)?;
    import_answers_value(&value, model)
}

pub fn import_answers_value(
    value: &Value,
    model: &Model,
) -> Result<ImportedAnswers, AnswerImportError> {
    let object = value.as_object().ok_or(AnswerImportError::NotAnObject)?;

    if let Some(index_keyed) = object.get("answersByCap") {
        let answers: AnswerStore = serde_json::from_value(index_keyed.clone())?;
        let selected_caps = object.get("selectedCaps").map(|selected| {
            selected
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .filter(|key| model.capability(key).is_some())
                .map(str::to_string)
                .collect()
        });
        let model_version = object
            .get("modelVersion")
            .and_then(Value::as_str)
            .map(str::to_string);
        let meta = object
            .get("meta")
            .cloned()
            .and_then(|meta| serde_json::from_value(meta).ok());

        return Ok(ImportedAnswers {
            answers,
            selected_caps,
            model_version,
            meta,
        });
    }

    let looks_text_keyed = object.is_empty()
        || object
            .values()
            .any(|entry| entry.get("items").map(Value::is_array).unwrap_or(false));
    if !looks_text_keyed {
        return Err(AnswerImportError::UnrecognizedShape);
    }

    let capabilities: BTreeMap<String, TextKeyedCapability> =
        serde_json::from_value(value.clone())?;
    let answers = merge_by_text(&capabilities, model);

    Ok(ImportedAnswers {
        answers,
        selected_caps: None,
        model_version: None,
        meta: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> Model {
        Model::from_value(json!({
            "version": "2025.1",
            "capabilities": [{
                "key": "allocation",
                "name": "Allocation",
                "questions": [
                    { "text": "Tagging coverage?", "scores": { "Run": 15 } },
                    { "text": "Showback cadence?", "scores": { "Fly": 20 } }
                ]
            }]
        }))
        .expect("import fixture model")
    }

    #[test]
    fn rejects_payloads_that_are_not_objects() {
        let model = model();
        assert!(matches!(
            import_answers("[1, 2]", &model),
            Err(AnswerImportError::NotAnObject)
        ));
        assert!(matches!(
            import_answers("not json", &model),
            Err(AnswerImportError::Parse(_))
        ));
    }

    #[test]
    fn rejects_objects_matching_neither_shape() {
        let value = json!({ "allocation": { "0": "Run" } });
        assert!(matches!(
            import_answers_value(&value, &model()),
            Err(AnswerImportError::UnrecognizedShape)
        ));
    }

    #[test]
    fn reads_the_index_keyed_payload_shape() {
        let value = json!({
            "appName": "FinOps Maturity Assessment",
            "modelVersion": "2025.1",
            "meta": { "date": "2026-08-30", "customer": "Acme", "assessor": "Jo" },
            "modelKeys": ["allocation"],
            "selectedCaps": ["allocation", "retired-capability"],
            "answersByCap": { "allocation": { "0": "Run", "1": "Fly" } }
        });

        let imported = import_answers_value(&value, &model()).expect("index-keyed import");
        assert_eq!(imported.answers.answer("allocation", 0), Some("Run"));
        assert_eq!(imported.answers.answer("allocation", 1), Some("Fly"));
        assert_eq!(
            imported.selected_caps.as_deref(),
            Some(&["allocation".to_string()][..])
        );
        assert_eq!(imported.model_version.as_deref(), Some("2025.1"));
        assert_eq!(imported.meta.expect("meta present").customer, "Acme");
    }

    #[test]
    fn reads_the_question_text_shape() {
        let value = json!({
            "allocation": {
                "name": "Allocation",
                "items": [
                    { "question": "Showback cadence?", "lens": "Process",
                      "chosenLevel": "Fly", "answerText": "Monthly showback" }
                ]
            }
        });

        let imported = import_answers_value(&value, &model()).expect("by-text import");
        assert_eq!(imported.answers.answer("allocation", 1), Some("Fly"));
        assert_eq!(imported.selected_caps, None);
    }
}
