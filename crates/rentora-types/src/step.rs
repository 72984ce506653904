use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// A wizard step, identified independently of its position.
///
/// The same step can sit at different ordinals for different roles; the
/// planned sequence for a session is resolved from the step table at
/// initialization and stays fixed for the session's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    Basics,
    Location,
    Financials,
    Media,
    ProjectTimeline,
    InvestmentTerms,
    Preview,
}

impl StepId {
    /// All steps, in no particular order (sequences are per-role).
    pub const ALL: [StepId; 7] = [
        StepId::Basics,
        StepId::Location,
        StepId::Financials,
        StepId::Media,
        StepId::ProjectTimeline,
        StepId::InvestmentTerms,
        StepId::Preview,
    ];

    /// Human-readable label for prompts and headers.
    pub fn label(&self) -> &'static str {
        match self {
            StepId::Basics => "Basics",
            StepId::Location => "Location",
            StepId::Financials => "Financials",
            StepId::Media => "Media",
            StepId::ProjectTimeline => "Project timeline",
            StepId::InvestmentTerms => "Investment terms",
            StepId::Preview => "Preview",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepId::Basics => write!(f, "basics"),
            StepId::Location => write!(f, "location"),
            StepId::Financials => write!(f, "financials"),
            StepId::Media => write!(f, "media"),
            StepId::ProjectTimeline => write!(f, "project-timeline"),
            StepId::InvestmentTerms => write!(f, "investment-terms"),
            StepId::Preview => write!(f, "preview"),
        }
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basics" => Ok(StepId::Basics),
            "location" => Ok(StepId::Location),
            "financials" => Ok(StepId::Financials),
            "media" => Ok(StepId::Media),
            "project-timeline" => Ok(StepId::ProjectTimeline),
            "investment-terms" => Ok(StepId::InvestmentTerms),
            "preview" => Ok(StepId::Preview),
            other => Err(format!("invalid step id: '{other}'")),
        }
    }
}
