//! Instruction plan derivation.
//!
//! Splits the raw instruction string, parses every token against the
//! source duration and assigns ordinals. Only tokens that parse consume an
//! ordinal, so `"13:00, bogus, 5:00-6:00"` plans ordinals 1 and 2.

use serde::{Deserialize, Serialize};

use super::error::InstructionError;
use super::parser::parse_instruction;
use crate::models::PlannedRequest;

/// Split a comma-separated instruction string into trimmed tokens.
///
/// Empty tokens (from `",,"`, a trailing comma, or whitespace-only input)
/// are dropped.
pub fn split_instructions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// One token of the plan, in original token order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum PlanEntry {
    /// Token parsed and holds an ordinal.
    Planned(PlannedRequest),
    /// Token was skipped.
    Rejected {
        token: String,
        reason: InstructionError,
    },
}

impl PlanEntry {
    pub fn token(&self) -> &str {
        match self {
            PlanEntry::Planned(planned) => &planned.token,
            PlanEntry::Rejected { token, .. } => token,
        }
    }
}

/// Ordered extraction plan for one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionPlan {
    /// Duration the tokens were validated against.
    pub duration: f64,
    /// Every token, in original order.
    pub entries: Vec<PlanEntry>,
}

impl InstructionPlan {
    /// Build a plan from a raw comma-separated instruction string.
    pub fn build(raw: &str, duration: f64) -> Self {
        Self::from_tokens(split_instructions(raw), duration)
    }

    /// Build a plan from already split tokens.
    pub fn from_tokens<I, S>(tokens: I, duration: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        let mut next_ordinal: u32 = 1;

        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }

            match parse_instruction(token, duration) {
                Ok(request) => {
                    tracing::debug!("Planned #{} '{}': {}", next_ordinal, token, request);
                    entries.push(PlanEntry::Planned(PlannedRequest {
                        ordinal: next_ordinal,
                        token: token.to_string(),
                        request,
                    }));
                    next_ordinal += 1;
                }
                Err(reason) => {
                    tracing::warn!("Skipping instruction '{}': {}", token, reason);
                    entries.push(PlanEntry::Rejected {
                        token: token.to_string(),
                        reason,
                    });
                }
            }
        }

        Self { duration, entries }
    }

    /// Valid requests in dispatch order.
    pub fn requests(&self) -> impl Iterator<Item = &PlannedRequest> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Planned(planned) => Some(planned),
            PlanEntry::Rejected { .. } => None,
        })
    }

    /// Rejected tokens with their reasons.
    pub fn rejected(&self) -> impl Iterator<Item = (&str, &InstructionError)> {
        self.entries.iter().filter_map(|e| match e {
            PlanEntry::Rejected { token, reason } => Some((token.as_str(), reason)),
            PlanEntry::Planned(_) => None,
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests().count()
    }

    /// Check if there is nothing to extract.
    pub fn is_empty(&self) -> bool {
        self.request_count() == 0
    }
}
