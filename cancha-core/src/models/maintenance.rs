use std::fmt;

use serde::{Deserialize, Serialize};

/// Maintenance statuses are a fixed table, not backend data.
pub const MAINTENANCE_STATUSES: [(i64, &str); 4] = [
    (1, "Programado"),
    (2, "En Proceso"),
    (3, "En Mantenimiento"),
    (4, "Completado"),
];

/// Label for a maintenance status id, if the id is one of the known four.
pub fn maintenance_status_label(id: i64) -> Option<&'static str> {
    MAINTENANCE_STATUSES
        .iter()
        .find(|(status_id, _)| *status_id == id)
        .map(|(_, label)| *label)
}

/// A maintenance window on a facility.
///
/// Timestamps are ISO 8601 strings; an empty string means "no date", never
/// the epoch. The `end > start` invariant is enforced at input time by the
/// sync layer, not re-validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    pub id: i64,
    pub facility_id: Option<i64>,
    pub facility_name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub user_id: Option<i64>,
    pub user_name: String,
    pub status_id: Option<i64>,
    pub status: String,
}

impl fmt::Display for Maintenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.facility_name)?;
        if !self.status.is_empty() {
            write!(f, " [{}]", self.status)?;
        }
        if !self.start_date.is_empty() {
            write!(f, " {} -> {}", self.start_date, self.end_date)?;
        }
        if !self.description.is_empty() {
            write!(f, ": {}", self.description)?;
        }
        Ok(())
    }
}
