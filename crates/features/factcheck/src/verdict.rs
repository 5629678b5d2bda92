use serde::{Deserialize, Serialize};
use tscope_derive::api_model;

const FAKE_TOKENS: [&str; 8] =
    ["fake", "false", "not true", "misleading", "fabricated", "no evidence", "unverified", "incorrect"];
const REAL_TOKENS: [&str; 8] =
    ["real", "true", "verified", "confirmed", "accurate", "substantiated", "supported", "yes"];

/// Evidence placeholder when nothing matched.
pub const NO_DIRECT_EVIDENCE: &str = "No direct evidence found.";

/// Short label shown next to a fact-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub enum VerdictLabel {
    #[serde(rename = "Unverified ❓")]
    Unverified,
    #[serde(rename = "Potential Fake ❌")]
    PotentialFake,
    #[serde(rename = "Verified Real ✅")]
    VerifiedReal,
}

impl VerdictLabel {
    /// Substring heuristic over the model's answer; fake wording wins over real wording.
    #[must_use]
    pub fn classify(verdict_text: &str) -> Self {
        let text = verdict_text.to_lowercase();
        if FAKE_TOKENS.iter().any(|token| text.contains(token)) {
            Self::PotentialFake
        } else if REAL_TOKENS.iter().any(|token| text.contains(token)) {
            Self::VerifiedReal
        } else {
            Self::Unverified
        }
    }
}

/// Outcome of a headline check.
#[api_model]
#[derive(Clone, PartialEq)]
pub struct FactCheckReport {
    pub verdict: VerdictLabel,
    /// Matching trusted headlines and provider articles, never empty
    pub evidence: Vec<String>,
    /// The model's answer or a diagnostic line
    pub explanation: String,
}
