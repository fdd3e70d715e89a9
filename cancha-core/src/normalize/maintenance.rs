//! Maintenance-window normalization.
//!
//! Facility names resolve against the installations list; status labels
//! come from the fixed maintenance status table, never from the backend.

use serde_json::Value;

use super::value;
use crate::models::{maintenance_status_label, Maintenance};
use crate::refs::{resolve_reference, ReferenceMap};

pub const ID_KEYS: &[&str] = &["id", "idMaintenance", "maintenanceId"];
const FACILITY_ID_KEYS: &[&str] = &["facilityId", "installationId", "idInstallation"];
const FACILITY_NAME_KEYS: &[&str] = &["facilityName", "nombreInstalacion", "installation"];
const DESCRIPTION_KEYS: &[&str] = &["description", "descripcion"];
const START_KEYS: &[&str] = &["startDate", "fechaInicio", "start", "inicio"];
const END_KEYS: &[&str] = &["endDate", "fechaFin", "end", "fin"];
const USER_ID_KEYS: &[&str] = &["userId", "idUser", "idUsuario"];
const USER_NAME_KEYS: &[&str] = &["userName", "nombreUsuario", "user"];
const STATUS_ID_KEYS: &[&str] = &["statusId", "estatusID", "estatusId", "estadoId"];
const STATUS_KEYS: &[&str] = &["status", "estado"];

pub fn normalize_maintenance(raw: &Value, facilities: &ReferenceMap) -> Maintenance {
    let (facility_id, facility_name) = resolve_reference(
        raw,
        FACILITY_ID_KEYS,
        FACILITY_NAME_KEYS,
        facilities,
        "Sin instalación",
    );

    // Status ids live in a fixed {1,2,3,4} enum; anything else is unset.
    let status_id = value::get_id(raw, STATUS_ID_KEYS)
        .filter(|id| maintenance_status_label(*id).is_some());
    let status = status_id
        .and_then(maintenance_status_label)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let label = value::get_str(raw, STATUS_KEYS);
            if label.is_empty() {
                "Sin estado".to_string()
            } else {
                label
            }
        });

    Maintenance {
        id: value::get_opt_i64(raw, ID_KEYS).unwrap_or(0),
        facility_id,
        facility_name,
        description: value::get_str(raw, DESCRIPTION_KEYS),
        start_date: value::get_date(raw, START_KEYS),
        end_date: value::get_date(raw, END_KEYS),
        user_id: value::get_id(raw, USER_ID_KEYS),
        user_name: value::get_str(raw, USER_NAME_KEYS),
        status_id,
        status,
    }
}
