//! Reference resolution: id <-> label lookups over auxiliary backend lists.
//!
//! Maps are rebuilt whole on every fetch; they are never patched
//! incrementally, so a stale partial update cannot poison later lookups.

use serde_json::Value;

use crate::normalize::value;

const REF_ID_KEYS: &[&str] = &["id", "value"];
const REF_LABEL_KEYS: &[&str] = &["name", "nombre", "label", "description"];
const SUPERVISOR_LABEL_KEYS: &[&str] = &["name", "nombre", "fullName", "userName"];

/// Ordered id -> label pairs built from one reference list.
///
/// Insertion order is kept so that label lookups are deterministic when the
/// backend ships duplicate labels: the first entry wins. That tie rule is
/// implementation-defined; unique labels are an upstream data-quality
/// constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMap {
    entries: Vec<(i64, String)>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from raw list items, reading ids and labels through the
    /// candidate-key tables. Items without a usable id are skipped.
    pub fn from_values(list: &[Value], id_keys: &[&str], label_keys: &[&str]) -> Self {
        let entries = list
            .iter()
            .filter_map(|item| {
                let id = value::get_id(item, id_keys)?;
                Some((id, value::get_str(item, label_keys)))
            })
            .collect();
        Self { entries }
    }

    /// Builds a map from already-normalized (id, label) pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i64, String)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    pub fn label(&self, id: i64) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, label)| label.as_str())
    }

    /// Case-insensitive, whitespace-trimmed exact match; first match wins.
    pub fn id_by_label(&self, label: &str) -> Option<i64> {
        let needle = label.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(_, entry_label)| entry_label.trim().to_lowercase() == needle)
            .map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Two-step reference resolution for one record field pair.
///
/// A numeric id on the record wins outright; its label comes from the map,
/// falling back to the record's own label, then to the sentinel. Without an
/// id, the record's label is matched case-insensitively against the map -
/// and echoed back verbatim even when no entry matches, so a
/// backend-provided label is never silently dropped. A fully absent
/// reference collapses to (`None`, sentinel).
pub fn resolve_reference(
    raw: &Value,
    id_keys: &[&str],
    label_keys: &[&str],
    map: &ReferenceMap,
    sentinel: &str,
) -> (Option<i64>, String) {
    let raw_label = value::get_str(raw, label_keys);

    if let Some(id) = value::get_id(raw, id_keys) {
        let label = map
            .label(id)
            .map(str::to_string)
            .unwrap_or_else(|| {
                if raw_label.is_empty() {
                    sentinel.to_string()
                } else {
                    raw_label.clone()
                }
            });
        return (Some(id), label);
    }

    if !raw_label.is_empty() {
        let id = map.id_by_label(&raw_label);
        return (id, raw_label);
    }

    (None, sentinel.to_string())
}

/// The five reference lists the tournament view-model endpoint returns in
/// one payload, for populating form dropdowns and resolving references.
#[derive(Debug, Clone, Default)]
pub struct TournamentRefs {
    pub categories: ReferenceMap,
    pub disciplines: ReferenceMap,
    pub statuses: ReferenceMap,
    pub facilities: ReferenceMap,
    pub supervisors: ReferenceMap,
}

impl TournamentRefs {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decodes a `GetViewModelTournament` payload (already
    /// envelope-unwrapped) into the five maps.
    pub fn from_view_model(raw: &Value) -> Self {
        Self {
            categories: list_map(raw, &["categories", "categorias"], REF_LABEL_KEYS),
            disciplines: list_map(raw, &["disciplines", "disciplinas"], REF_LABEL_KEYS),
            statuses: list_map(raw, &["statuses", "estados", "status"], REF_LABEL_KEYS),
            facilities: list_map(
                raw,
                &["facilities", "installations", "instalaciones"],
                REF_LABEL_KEYS,
            ),
            supervisors: list_map(
                raw,
                &["supervisors", "supervisores", "encargados"],
                SUPERVISOR_LABEL_KEYS,
            ),
        }
    }
}

fn list_map(raw: &Value, list_keys: &[&str], label_keys: &[&str]) -> ReferenceMap {
    let items = value::field(raw, list_keys)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    ReferenceMap::from_values(&items, REF_ID_KEYS, label_keys)
}
