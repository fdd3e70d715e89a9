use std::fmt;

use serde::{Deserialize, Serialize};

/// A tournament with its five resolvable references. Each `*_id` is the
/// backend's numeric key when one could be resolved; the paired label field
/// always holds something displayable, falling back to a "Sin ..." sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub rules: String,
    pub category_id: Option<i64>,
    pub category: String,
    pub discipline_id: Option<i64>,
    pub discipline: String,
    pub status_id: Option<i64>,
    pub status: String,
    pub facility_id: Option<i64>,
    pub facility: String,
    pub supervisor_id: Option<i64>,
    pub supervisor: String,
    pub start_date: String,
    pub end_date: String,
}

impl fmt::Display for Tournament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.name)?;
        if !self.discipline.is_empty() {
            write!(f, " ({})", self.discipline)?;
        }
        if !self.category.is_empty() {
            write!(f, " - {}", self.category)?;
        }
        if !self.status.is_empty() {
            write!(f, " [{}]", self.status)?;
        }
        if !self.start_date.is_empty() {
            write!(f, " {} -> {}", self.start_date, self.end_date)?;
        }
        Ok(())
    }
}
