//! Tournament normalization.
//!
//! Five references resolve against the view-model lists: category,
//! discipline, status, facility, supervisor. Each follows the same
//! two-step rule (numeric id wins, then case-insensitive label match).

use serde_json::Value;

use super::value;
use crate::models::Tournament;
use crate::refs::{resolve_reference, TournamentRefs};

pub const ID_KEYS: &[&str] = &["id", "idTournament", "tournamentId"];
const NAME_KEYS: &[&str] = &["name", "nombre"];
const DESCRIPTION_KEYS: &[&str] = &["description", "descripcion"];
const RULES_KEYS: &[&str] = &["rules", "reglas"];
const CATEGORY_ID_KEYS: &[&str] = &["categoryId", "idCategory", "idCategoria"];
const CATEGORY_KEYS: &[&str] = &["category", "categoria"];
const DISCIPLINE_ID_KEYS: &[&str] = &["disciplineId", "idDiscipline", "idDisciplina"];
const DISCIPLINE_KEYS: &[&str] = &["discipline", "disciplina"];
const STATUS_ID_KEYS: &[&str] = &["statusId", "estatusId", "idStatus"];
const STATUS_KEYS: &[&str] = &["status", "estado"];
const FACILITY_ID_KEYS: &[&str] = &["facilityId", "installationId", "idInstalacion"];
const FACILITY_KEYS: &[&str] = &["facility", "instalacion", "facilityName"];
const SUPERVISOR_ID_KEYS: &[&str] = &["supervisorId", "idSupervisor", "idEncargado"];
const SUPERVISOR_KEYS: &[&str] = &["supervisor", "encargado", "supervisorName"];
const START_KEYS: &[&str] = &["startDate", "fechaInicio", "start"];
const END_KEYS: &[&str] = &["endDate", "fechaFin", "end"];

pub fn normalize_tournament(raw: &Value, refs: &TournamentRefs) -> Tournament {
    let (category_id, category) = resolve_reference(
        raw,
        CATEGORY_ID_KEYS,
        CATEGORY_KEYS,
        &refs.categories,
        "Sin categoría",
    );
    let (discipline_id, discipline) = resolve_reference(
        raw,
        DISCIPLINE_ID_KEYS,
        DISCIPLINE_KEYS,
        &refs.disciplines,
        "Sin disciplina",
    );
    let (status_id, status) =
        resolve_reference(raw, STATUS_ID_KEYS, STATUS_KEYS, &refs.statuses, "Sin estado");
    let (facility_id, facility) = resolve_reference(
        raw,
        FACILITY_ID_KEYS,
        FACILITY_KEYS,
        &refs.facilities,
        "Sin instalación",
    );
    let (supervisor_id, supervisor) = resolve_reference(
        raw,
        SUPERVISOR_ID_KEYS,
        SUPERVISOR_KEYS,
        &refs.supervisors,
        "Sin encargado",
    );

    Tournament {
        id: value::get_opt_i64(raw, ID_KEYS).unwrap_or(0),
        name: value::get_str(raw, NAME_KEYS),
        description: value::get_str(raw, DESCRIPTION_KEYS),
        rules: value::get_str(raw, RULES_KEYS),
        category_id,
        category,
        discipline_id,
        discipline,
        status_id,
        status,
        facility_id,
        facility,
        supervisor_id,
        supervisor,
        start_date: value::get_date(raw, START_KEYS),
        end_date: value::get_date(raw, END_KEYS),
    }
}
