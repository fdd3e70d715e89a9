//! Tournament list synchronization.
//!
//! Tournaments resolve five references against the view-model endpoint
//! (`GetViewModelTournament?id=0`), which ships all the dropdown lists in
//! one payload. The view model is fetched concurrently with the list and
//! rebuilt whole on every fetch; the most recent one is kept around to
//! re-normalize single records after mutations.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{parse_record_id, placeholder_id, validate_range};
use crate::api::{payload, ApiClient};
use crate::error::ApiError;
use crate::models::Tournament;
use crate::normalize::normalize_tournament;
use crate::refs::TournamentRefs;
use crate::sync::cache::ListCache;

const LIST_PATH: &str = "/api/Tournaments/GetAllTournaments";
const VIEW_MODEL_PATH: &str = "/api/Tournaments/GetViewModelTournament?id=0";
const CREATE_PATH: &str = "/api/Tournaments/CreateTournament";
const UPDATE_PATH: &str = "/api/Tournaments/UpdateTournament";
const DELETE_PATH: &str = "/api/Tournaments/DeleteTournamentById";

/// Mutation payload for a tournament.
#[derive(Debug, Clone, Default)]
pub struct TournamentInput {
    pub name: String,
    pub description: String,
    pub rules: String,
    pub category_id: Option<i64>,
    pub discipline_id: Option<i64>,
    pub status_id: Option<i64>,
    pub facility_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub start_date: String,
    pub end_date: String,
}

impl TournamentInput {
    fn payload(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "description": self.description,
            "rules": self.rules,
            "startDate": self.start_date,
            "endDate": self.end_date,
        });
        let optional = [
            ("categoryId", self.category_id),
            ("disciplineId", self.discipline_id),
            ("statusId", self.status_id),
            ("facilityId", self.facility_id),
            ("supervisorId", self.supervisor_id),
        ];
        for (key, id) in optional {
            if let Some(id) = id {
                body[key] = json!(id);
            }
        }
        body
    }
}

#[derive(Debug)]
pub struct SyncTournamentRepository {
    client: Arc<ApiClient>,
    cache: ListCache<Tournament>,
    refs: Arc<Mutex<Option<Arc<TournamentRefs>>>>,
}

impl SyncTournamentRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: ListCache::new(),
            refs: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn list(&self) -> Vec<Tournament> {
        let client = Arc::clone(&self.client);
        let refs_slot = Arc::clone(&self.refs);
        let result = self
            .cache
            .get_or_fetch(async move {
                if !client.is_configured() {
                    return Ok(Vec::new());
                }
                let (body, view_model) = futures::join!(
                    client.get_json(LIST_PATH),
                    client.get_json(VIEW_MODEL_PATH)
                );
                let body = body?;
                let refs = Arc::new(match view_model {
                    Ok(vm) => TournamentRefs::from_view_model(&vm),
                    Err(e) => {
                        debug!("tournament view model fetch failed: {}", e);
                        TournamentRefs::empty()
                    }
                });
                *refs_slot.lock().expect("refs lock poisoned") = Some(Arc::clone(&refs));
                Ok(payload::collection(body)
                    .iter()
                    .map(|raw| normalize_tournament(raw, &refs))
                    .collect())
            })
            .await;
        match result {
            Ok(tournaments) => tournaments,
            Err(e) => {
                warn!("tournament list fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn refresh(&self) -> Vec<Tournament> {
        self.cache.invalidate();
        self.list().await
    }

    /// The reference lists for populating form dropdowns.
    pub async fn view_model(&self) -> Arc<TournamentRefs> {
        self.refs_for_mutation().await
    }

    pub async fn create(&self, input: &TournamentInput) -> Result<Tournament, ApiError> {
        validate_range(&input.start_date, &input.end_date, "startDate", "endDate")?;

        let body = input.payload();
        let raw = if self.client.is_configured() {
            let response = self.client.post_json(CREATE_PATH, &body).await?;
            payload::merge_fallback(response, &body)
        } else {
            let mut local = body.clone();
            local["id"] = json!(placeholder_id());
            local
        };
        let refs = self.refs_for_mutation().await;
        let tournament = normalize_tournament(&raw, &refs);
        self.cache.insert(tournament.clone());
        Ok(tournament)
    }

    pub async fn update(&self, id: &str, input: &TournamentInput) -> Result<Tournament, ApiError> {
        let record_id = parse_record_id(id)?;
        validate_range(&input.start_date, &input.end_date, "startDate", "endDate")?;

        let mut body = input.payload();
        body["id"] = json!(record_id);

        let raw = if self.client.is_configured() {
            let response = self.client.post_json(UPDATE_PATH, &body).await?;
            payload::merge_fallback(response, &body)
        } else {
            body.clone()
        };
        let refs = self.refs_for_mutation().await;
        let tournament = normalize_tournament(&raw, &refs);
        self.cache
            .replace_where(|entry| entry.id == tournament.id, tournament.clone());
        Ok(tournament)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let record_id = parse_record_id(id)?;
        if self.client.is_configured() {
            self.client
                .delete_json(&format!("{}?id={}", DELETE_PATH, record_id))
                .await?;
        }
        self.cache.remove_where(|entry| entry.id == record_id);
        Ok(())
    }

    /// The refs from the most recent fetch, or a fresh view-model fetch
    /// when no list fetch has happened yet.
    async fn refs_for_mutation(&self) -> Arc<TournamentRefs> {
        let cached = self.refs.lock().expect("refs lock poisoned").clone();
        if let Some(refs) = cached {
            return refs;
        }
        if self.client.is_configured() {
            match self.client.get_json(VIEW_MODEL_PATH).await {
                Ok(vm) => {
                    let refs = Arc::new(TournamentRefs::from_view_model(&vm));
                    *self.refs.lock().expect("refs lock poisoned") = Some(Arc::clone(&refs));
                    return refs;
                }
                Err(e) => debug!("tournament view model fetch failed: {}", e),
            }
        }
        Arc::new(TournamentRefs::empty())
    }
}
