//! Reservation normalization.

use serde_json::Value;

use super::value;
use crate::models::Reservation;
use crate::refs::{resolve_reference, ReferenceMap};

pub const ID_KEYS: &[&str] = &["id", "idReservation", "reservationId"];
const FACILITY_ID_KEYS: &[&str] = &["facilityId", "installationId", "idInstallation"];
const USER_ID_KEYS: &[&str] = &["userId", "idUser", "idUsuario"];
const START_KEYS: &[&str] = &["startTime", "startDate", "horaInicio", "fechaInicio"];
const END_KEYS: &[&str] = &["endTime", "endDate", "horaFin", "fechaFin"];
const STATUS_ID_KEYS: &[&str] = &["statusId", "estatusId", "idStatus"];
const STATUS_KEYS: &[&str] = &["status", "estado"];

/// Normalizes a raw reservation. `statuses` is the backend-provided
/// reservation status list.
pub fn normalize_reservation(raw: &Value, statuses: &ReferenceMap) -> Reservation {
    let (status_id, status) =
        resolve_reference(raw, STATUS_ID_KEYS, STATUS_KEYS, statuses, "Sin estado");
    Reservation {
        id: value::get_opt_i64(raw, ID_KEYS).unwrap_or(0),
        facility_id: value::get_id(raw, FACILITY_ID_KEYS),
        user_id: value::get_id(raw, USER_ID_KEYS),
        start_time: value::get_date(raw, START_KEYS),
        end_time: value::get_date(raw, END_KEYS),
        status_id,
        status,
    }
}
