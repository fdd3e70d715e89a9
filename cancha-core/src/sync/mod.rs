//! List synchronizers: per-entity repositories that keep an in-memory
//! cache consistent with the backend without full reloads.
//!
//! Every repository follows the same contract:
//! - `list` fetches, normalizes, and warms the cache; fetch failures are
//!   logged and degrade to an empty list so a view never crashes.
//! - `create`/`update`/`delete` validate locally, call the backend, then
//!   patch the single affected cache entry. The cache is only touched
//!   after the backend confirmed the mutation.
//! - With no API base URL configured, lists are empty and mutations are
//!   applied locally (placeholder ids for creates), so the whole layer
//!   stays usable without a backend.

pub mod auth;
pub mod cache;
pub mod installation_sync;
pub mod maintenance_sync;
pub mod reservation_sync;
pub mod tournament_sync;
pub mod user_sync;

pub use auth::{AuthApi, RegisterInput};
pub use cache::ListCache;
pub use installation_sync::{InstallationInput, SyncInstallationRepository};
pub use maintenance_sync::{MaintenanceInput, SyncMaintenanceRepository};
pub use reservation_sync::{ReservationInput, SyncReservationRepository};
pub use tournament_sync::{SyncTournamentRepository, TournamentInput};
pub use user_sync::{SyncUserRepository, UserInput};

use crate::error::ApiError;
use crate::normalize::value;

/// Coerces a record id argument to a numeric id. Numeric strings (including
/// integral floats) are accepted; anything else is a validation failure
/// raised before any network call.
pub(crate) fn parse_record_id(id: &str) -> Result<i64, ApiError> {
    let trimmed = id.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        })
        .ok_or_else(|| ApiError::Validation(format!("Invalid record id '{}'", id)))
}

/// Validates a start/end timestamp pair before a mutation is sent.
/// Both must parse, and the end must be strictly after the start.
pub(crate) fn validate_range(
    start: &str,
    end: &str,
    start_name: &str,
    end_name: &str,
) -> Result<(), ApiError> {
    let start_ts = value::parse_timestamp(start).ok_or_else(|| {
        ApiError::Validation(format!("{} is not a valid timestamp", start_name))
    })?;
    let end_ts = value::parse_timestamp(end)
        .ok_or_else(|| ApiError::Validation(format!("{} is not a valid timestamp", end_name)))?;
    if end_ts <= start_ts {
        return Err(ApiError::Validation(format!(
            "{} must be after {}",
            end_name, start_name
        )));
    }
    Ok(())
}

/// Placeholder id for records created while no backend is configured.
/// Assigned once at creation; the id is stable afterwards.
pub(crate) fn placeholder_id() -> i64 {
    rand::random_range(1_000_000..=9_999_999)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id("5").unwrap(), 5);
        assert_eq!(parse_record_id(" 12 ").unwrap(), 12);
        assert_eq!(parse_record_id("7.0").unwrap(), 7);
        assert!(matches!(
            parse_record_id("abc"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(parse_record_id(""), Err(ApiError::Validation(_))));
        assert!(matches!(
            parse_record_id("7.5"),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_record_id("NaN"),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range(
            "2025-07-01T10:00:00Z",
            "2025-07-01T11:00:00Z",
            "startDate",
            "endDate"
        )
        .is_ok());

        // equal timestamps are rejected: strictly after
        let equal = validate_range(
            "2025-07-01T10:00:00Z",
            "2025-07-01T10:00:00Z",
            "startDate",
            "endDate",
        );
        assert_eq!(
            equal,
            Err(ApiError::Validation(
                "endDate must be after startDate".to_string()
            ))
        );

        let backwards = validate_range(
            "2025-07-01T11:00:00Z",
            "2025-07-01T10:00:00Z",
            "startDate",
            "endDate",
        );
        assert!(backwards.is_err());

        let bad_start = validate_range("ayer", "2025-07-01T10:00:00Z", "startDate", "endDate");
        assert_eq!(
            bad_start,
            Err(ApiError::Validation(
                "startDate is not a valid timestamp".to_string()
            ))
        );
    }

    #[test]
    fn test_placeholder_id_in_range() {
        for _ in 0..16 {
            let id = placeholder_id();
            assert!((1_000_000..=9_999_999).contains(&id));
        }
    }
}
