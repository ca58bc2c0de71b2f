use serde::{Deserialize, Serialize};

use super::key_record::KeyRecord;

/// Where a category stands in the save/use/reset cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageState {
    /// No record stored.
    Empty,
    /// Record stored with uses left.
    Active,
    /// Record stored but every use consumed. Accepts input like `Empty`.
    Exhausted,
}

impl UsageState {
    pub fn of(record: Option<&KeyRecord>) -> Self {
        match record {
            None => UsageState::Empty,
            Some(r) if r.uses_remaining > 0 => UsageState::Active,
            Some(_) => UsageState::Exhausted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsageState::Empty => "empty",
            UsageState::Active => "active",
            UsageState::Exhausted => "exhausted",
        }
    }
}

impl std::fmt::Display for UsageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
