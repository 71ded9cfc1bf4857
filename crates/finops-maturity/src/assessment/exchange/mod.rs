mod import;
mod merge;
mod payload;

pub use import::{import_answers, import_answers_value, ImportedAnswers};
pub use payload::{build_export, ExportMeta, ExportPayload, APP_NAME};

#[derive(Debug)]
pub enum AnswerImportError {
    Parse(serde_json::Error),
    NotAnObject,
    UnrecognizedShape,
}

impl std::fmt::Display for AnswerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnswerImportError::Parse(err) => {
                write!(f, "answers payload is not valid JSON: {}", err)
            }
            AnswerImportError::NotAnObject => {
                write!(f, "answers payload must be a JSON object")
            }
            AnswerImportError::UnrecognizedShape => {
                write!(
                    f,
                    "answers payload matches neither the export payload nor the question-text shape"
                )
            }
        }
    }
}

impl std::error::Error for AnswerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnswerImportError::Parse(err) => Some(err),
            AnswerImportError::NotAnObject | AnswerImportError::UnrecognizedShape => None,
        }
    }
}

impl From<serde_json::Error> for AnswerImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
