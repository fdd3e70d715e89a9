use std::fmt;

use serde::{Deserialize, Serialize};

/// A sports facility as the UI layer sees it, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub id: i64,
    pub name: String,
    pub kind: String,
    /// Non-negative; malformed backend values normalize to 0.
    pub capacity: u32,
    pub address: String,
    pub status_id: Option<i64>,
    pub status: String,
}

impl fmt::Display for Installation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)?;
        if !self.kind.is_empty() {
            write!(f, " ({})", self.kind)?;
        }
        write!(f, " - aforo {}", self.capacity)?;
        if !self.status.is_empty() {
            write!(f, " - {}", self.status)?;
        }
        Ok(())
    }
}
