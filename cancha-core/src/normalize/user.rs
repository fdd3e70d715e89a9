//! User normalization.

use serde_json::Value;

use super::value;
use crate::models::{person_type_label, Gender, User};
use crate::refs::{resolve_reference, ReferenceMap};

pub const ID_KEYS: &[&str] = &["id", "idUser", "userId"];
const NAME_KEYS: &[&str] = &["name", "nombre", "fullName"];
const EMAIL_KEYS: &[&str] = &["email", "correo"];
const ROLE_ID_KEYS: &[&str] = &["roleId", "idRol", "idRole"];
const ROLE_KEYS: &[&str] = &["role", "rol"];
const STATUS_ID_KEYS: &[&str] = &["statusId", "estatusId", "idStatus"];
const STATUS_KEYS: &[&str] = &["status", "estado"];
const PERSON_TYPE_ID_KEYS: &[&str] = &["personTypeId", "idTipoPersona", "idPersonType"];
const PERSON_TYPE_KEYS: &[&str] = &["personType", "tipoPersona"];
const AVATAR_KEYS: &[&str] = &["avatar", "avatarUrl", "profileImage", "foto"];
const IDENTIFICATION_KEYS: &[&str] = &["identification", "identificacion", "dni", "cedula"];
const BIRTH_KEYS: &[&str] = &["birthDate", "fechaNacimiento", "birthdate"];
const GENDER_KEYS: &[&str] = &["gender", "genero", "sexo"];

/// Normalizes a raw user record. `roles`/`statuses` may be empty maps;
/// labels then come from the record itself.
pub fn normalize_user(raw: &Value, roles: &ReferenceMap, statuses: &ReferenceMap) -> User {
    let id = value::get_opt_i64(raw, ID_KEYS).unwrap_or(0);
    let name = value::get_str(raw, NAME_KEYS);
    let email = value::get_str(raw, EMAIL_KEYS);

    let (role_id, role) = resolve_reference(raw, ROLE_ID_KEYS, ROLE_KEYS, roles, "");
    let (status_id, status) = resolve_reference(raw, STATUS_ID_KEYS, STATUS_KEYS, statuses, "");
    let (person_type_id, person_type) = resolve_person_type(raw);

    let avatar = {
        let supplied = value::get_str(raw, AVATAR_KEYS);
        if supplied.is_empty() {
            placeholder_avatar(&name, &email, id)
        } else {
            supplied
        }
    };

    User {
        id,
        name,
        email,
        role_id,
        role,
        status_id,
        status,
        person_type_id,
        person_type,
        avatar,
        identification: value::get_str(raw, IDENTIFICATION_KEYS),
        birth_date: value::get_date(raw, BIRTH_KEYS),
        gender: parse_gender(&value::get_str(raw, GENDER_KEYS)),
    }
}

/// Person types follow the fixed table: 1 = Atleta, 2 = Entrenador,
/// anything else is unset (labels are not echoed for unknown types).
fn resolve_person_type(raw: &Value) -> (Option<i64>, String) {
    if let Some(id) = value::get_id(raw, PERSON_TYPE_ID_KEYS) {
        if let Some(label) = person_type_label(id) {
            return (Some(id), label.to_string());
        }
        return (None, String::new());
    }
    let label = value::get_str(raw, PERSON_TYPE_KEYS);
    match label.trim().to_lowercase().as_str() {
        "atleta" => (Some(1), "Atleta".to_string()),
        "entrenador" => (Some(2), "Entrenador".to_string()),
        _ => (None, String::new()),
    }
}

fn parse_gender(text: &str) -> Option<Gender> {
    match text.trim().to_lowercase().as_str() {
        "m" | "masculino" => Some(Gender::Male),
        "f" | "femenino" => Some(Gender::Female),
        _ => None,
    }
}

/// Deterministic placeholder URI derived from the name, email, or id -
/// the same record always produces the same avatar.
fn placeholder_avatar(name: &str, email: &str, id: i64) -> String {
    let seed = if !name.trim().is_empty() {
        name.trim().to_string()
    } else if !email.trim().is_empty() {
        email.trim().to_string()
    } else {
        format!("Usuario {}", id)
    };
    format!(
        "https://ui-avatars.com/api/?name={}",
        urlencoding::encode(&seed)
    )
}
