use serde::{Deserialize, Serialize};
use std::fmt;

/// Evaluation angle a question may be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lens {
    Knowledge,
    Process,
    Metrics,
    Adoption,
    Automation,
}

impl Lens {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Knowledge,
            Self::Process,
            Self::Metrics,
            Self::Adoption,
            Self::Automation,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Knowledge => "Knowledge",
            Self::Process => "Process",
            Self::Metrics => "Metrics",
            Self::Adoption => "Adoption",
            Self::Automation => "Automation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Knowledge" => Some(Self::Knowledge),
            "Process" => Some(Self::Process),
            "Metrics" => Some(Self::Metrics),
            "Adoption" => Some(Self::Adoption),
            "Automation" => Some(Self::Automation),
            _ => None,
        }
    }
}

/// Maturity level chosen as the answer to a question, low to high.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    #[serde(rename = "Pre-crawl")]
    PreCrawl,
    Crawl,
    Walk,
    Run,
    Fly,
}

impl Grade {
    pub const fn ordered() -> [Self; 5] {
        [Self::PreCrawl, Self::Crawl, Self::Walk, Self::Run, Self::Fly]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PreCrawl => "Pre-crawl",
            Self::Crawl => "Crawl",
            Self::Walk => "Walk",
            Self::Run => "Run",
            Self::Fly => "Fly",
        }
    }

    /// Resolves a raw answer label. Unrecognized labels stay unresolved and
    /// score as unanswered.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Pre-crawl" => Some(Self::PreCrawl),
            "Crawl" => Some(Self::Crawl),
            "Walk" => Some(Self::Walk),
            "Run" => Some(Self::Run),
            "Fly" => Some(Self::Fly),
            _ => None,
        }
    }
}

/// Overall maturity band derived from the 0-100 assessment score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "Pre-crawl")]
    PreCrawl,
    Crawl,
    Walk,
    Run,
    Fly,
}

impl Tier {
    pub const fn ordered() -> [Self; 5] {
        [Self::PreCrawl, Self::Crawl, Self::Walk, Self::Run, Self::Fly]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PreCrawl => "Pre-crawl",
            Self::Crawl => "Crawl",
            Self::Walk => "Walk",
            Self::Run => "Run",
            Self::Fly => "Fly",
        }
    }

    /// Classifies an overall score into a tier. Total over all f64 input:
    /// out-of-range and NaN values fall into the nearest band instead of
    /// panicking.
    pub fn classify(overall_score_100: f64) -> Self {
        if overall_score_100 >= 80.0 {
            Self::Fly
        } else if overall_score_100 >= 55.0 {
            Self::Run
        } else if overall_score_100 >= 30.0 {
            Self::Walk
        } else if overall_score_100 >= 10.0 {
            Self::Crawl
        } else {
            Self::PreCrawl
        }
    }
}

#[derive(Debug)]
pub enum ModelError {
    InvalidModel(String),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidModel(detail) => {
                write!(f, "invalid maturity model: {}", detail)
            }
        }
    }
}

impl std::error::Error for ModelError {}
