use super::domain::{Grade, Lens, ModelError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub const WEIGHT_CEILING: f64 = 20.0;

/// A loaded questionnaire. Immutable once accepted; replaced wholesale on
/// import.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Model {
    #[serde(default)]
    pub version: String,
    #[serde(default, deserialize_with = "lenient_capabilities")]
    pub capabilities: Vec<Capability>,
}

impl Model {
    /// Schema validation boundary: the value must be a JSON object carrying a
    /// `capabilities` array. Anything deeper is tolerated and degrades to
    /// unanswerable defaults so a partially malformed questionnaire still
    /// renders a report.
    pub fn from_value(value: Value) -> Result<Self, ModelError> {
        let object = value
            .as_object()
            .ok_or_else(|| ModelError::InvalidModel("payload is not a JSON object".into()))?;

        match object.get("capabilities") {
            Some(Value::Array(_)) => {}
            Some(_) => {
                return Err(ModelError::InvalidModel(
                    "`capabilities` is not an array".into(),
                ))
            }
            None => {
                return Err(ModelError::InvalidModel(
                    "missing `capabilities` array".into(),
                ))
            }
        }

        serde_json::from_value(value)
            .map_err(|err| ModelError::InvalidModel(err.to_string()))
    }

    pub fn from_json(raw: &str) -> Result<Self, ModelError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|err| ModelError::InvalidModel(err.to_string()))?;
        Self::from_value(value)
    }

    pub fn capability(&self, key: &str) -> Option<&Capability> {
        self.capabilities.iter().find(|cap| cap.key == key)
    }

    pub fn capability_keys(&self) -> Vec<String> {
        self.capabilities.iter().map(|cap| cap.key.clone()).collect()
    }
}

/// A scored subject area composed of questions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Capability {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub report_group: String,
    #[serde(default, deserialize_with = "lenient_questions")]
    pub questions: Vec<Question>,
}

impl Capability {
    /// Position of the first question whose prompt matches `text` exactly.
    /// Duplicate prompts resolve to the first occurrence.
    pub fn question_index_by_text(&self, text: &str) -> Option<usize> {
        self.questions
            .iter()
            .position(|question| question.text == text)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "lenient_lens")]
    pub lens: Option<Lens>,
    #[serde(default, deserialize_with = "lenient_options")]
    pub options: BTreeMap<Grade, String>,
    #[serde(default, deserialize_with = "lenient_weights")]
    pub scores: BTreeMap<Grade, f64>,
}

impl Question {
    /// Weight contributed by a raw answer label, if the label resolves to a
    /// grade this question's weight table covers.
    pub fn weight_for(&self, label: &str) -> Option<f64> {
        Grade::parse(label).and_then(|grade| self.scores.get(&grade).copied())
    }
}

fn lenient_capabilities<'de, D>(deserializer: D) -> Result<Vec<Capability>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_sequence(value))
}

fn lenient_questions<'de, D>(deserializer: D) -> Result<Vec<Question>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_sequence(value))
}

/// Deserializes each array element on its own, substituting a default for
/// entries that fail. A malformed questionnaire entry degrades instead of
/// rejecting the whole model.
fn lenient_sequence<T>(value: Value) -> Vec<T>
where
    T: serde::de::DeserializeOwned + Default,
{
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    }
}

fn lenient_lens<'de, D>(deserializer: D) -> Result<Option<Lens>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Lens::parse))
}

fn lenient_options<'de, D>(deserializer: D) -> Result<BTreeMap<Grade, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut options = BTreeMap::new();
    if let Value::Object(entries) = value {
        for (key, entry) in entries {
            if let (Some(grade), Some(text)) = (Grade::parse(&key), entry.as_str()) {
                options.insert(grade, text.to_string());
            }
        }
    }
    Ok(options)
}

fn lenient_weights<'de, D>(deserializer: D) -> Result<BTreeMap<Grade, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let mut weights = BTreeMap::new();
    if let Value::Object(entries) = value {
        for (key, entry) in entries {
            if let (Some(grade), Some(weight)) = (Grade::parse(&key), entry.as_f64()) {
                weights.insert(grade, weight.clamp(0.0, WEIGHT_CEILING));
            }
        }
    }
    Ok(weights)
}
