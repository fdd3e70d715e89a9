//! Installation (facility) normalization.

use serde_json::Value;

use super::value;
use crate::models::Installation;
use crate::refs::{resolve_reference, ReferenceMap};

pub const ID_KEYS: &[&str] = &["id", "idInstallation", "facilityId"];
const NAME_KEYS: &[&str] = &["name", "nombre"];
const KIND_KEYS: &[&str] = &["kind", "type", "tipo", "installationType"];
const CAPACITY_KEYS: &[&str] = &["capacity", "capacidad", "aforo"];
const ADDRESS_KEYS: &[&str] = &["address", "direccion", "ubicacion"];
const STATUS_ID_KEYS: &[&str] = &["statusId", "estatusId", "idStatus", "idEstatus"];
const STATUS_KEYS: &[&str] = &["status", "estado"];

/// Normalizes a raw facility record. `statuses` may be empty, in which case
/// status labels come from the record itself or the sentinel.
pub fn normalize_installation(raw: &Value, statuses: &ReferenceMap) -> Installation {
    let (status_id, status) =
        resolve_reference(raw, STATUS_ID_KEYS, STATUS_KEYS, statuses, "Sin estado");
    Installation {
        id: value::get_opt_i64(raw, ID_KEYS).unwrap_or(0),
        name: value::get_str(raw, NAME_KEYS),
        kind: value::get_str(raw, KIND_KEYS),
        capacity: value::get_u32(raw, CAPACITY_KEYS, 0),
        address: value::get_str(raw, ADDRESS_KEYS),
        status_id,
        status,
    }
}
