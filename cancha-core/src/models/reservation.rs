use std::fmt;

use serde::{Deserialize, Serialize};

/// A facility reservation. Status ids come from a backend-provided status
/// list, unlike maintenance statuses which are a fixed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i64,
    pub facility_id: Option<i64>,
    pub user_id: Option<i64>,
    pub start_time: String,
    pub end_time: String,
    pub status_id: Option<i64>,
    pub status: String,
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)?;
        if let Some(facility_id) = self.facility_id {
            write!(f, " instalacion {}", facility_id)?;
        }
        if !self.start_time.is_empty() {
            write!(f, " {} -> {}", self.start_time, self.end_time)?;
        }
        if !self.status.is_empty() {
            write!(f, " [{}]", self.status)?;
        }
        Ok(())
    }
}
