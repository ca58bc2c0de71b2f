use serde::{Deserialize, Serialize};

/// Category a key record belongs to.
///
/// The store treats the identifier as an opaque string; the three known
/// categories are the ones the UI renders a card for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct KeyCategory(String);

impl KeyCategory {
    pub const DAILY: &'static str = "daily";
    pub const WEEKLY: &'static str = "weekly";
    pub const MONTHLY: &'static str = "monthly";

    /// Known categories in display order.
    pub const KNOWN: [&'static str; 3] = [Self::DAILY, Self::WEEKLY, Self::MONTHLY];

    /// Returns `None` when the identifier is blank.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn known() -> Vec<Self> {
        Self::KNOWN.iter().map(|c| Self(c.to_string())).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(&self.0.as_str())
    }
}

impl std::fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
