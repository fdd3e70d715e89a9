//! Maintenance-window list synchronization.
//!
//! Maintenance records reference facilities; the facility map comes from
//! the installations repository and is fetched concurrently with the
//! primary list when both are cold.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use super::{parse_record_id, placeholder_id, validate_range};
use crate::api::{payload, ApiClient};
use crate::error::ApiError;
use crate::models::Maintenance;
use crate::normalize::normalize_maintenance;
use crate::sync::cache::ListCache;
use crate::sync::installation_sync::{facility_reference, SyncInstallationRepository};

const LIST_PATH: &str = "/api/Maintenance/GetAllMaintenancesAsync";
const CREATE_PATH: &str = "/api/Maintenance/CreateMaintenance";
const UPDATE_PATH: &str = "/api/Maintenance/UpdateMaintenance";
const DELETE_PATH: &str = "/api/Maintenance/DeleteMaintenanceById";

/// Mutation payload for a maintenance window.
#[derive(Debug, Clone, Default)]
pub struct MaintenanceInput {
    pub facility_id: Option<i64>,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub user_id: Option<i64>,
    pub status_id: Option<i64>,
}

impl MaintenanceInput {
    fn payload(&self) -> Value {
        let mut body = json!({
            "description": self.description,
            "startDate": self.start_date,
            "endDate": self.end_date,
        });
        if let Some(facility_id) = self.facility_id {
            body["facilityId"] = json!(facility_id);
        }
        if let Some(user_id) = self.user_id {
            body["userId"] = json!(user_id);
        }
        if let Some(status_id) = self.status_id {
            body["statusId"] = json!(status_id);
        }
        body
    }
}

#[derive(Debug)]
pub struct SyncMaintenanceRepository {
    client: Arc<ApiClient>,
    cache: ListCache<Maintenance>,
    installations: Arc<SyncInstallationRepository>,
}

impl SyncMaintenanceRepository {
    pub fn new(client: Arc<ApiClient>, installations: Arc<SyncInstallationRepository>) -> Self {
        Self {
            client,
            cache: ListCache::new(),
            installations,
        }
    }

    pub async fn list(&self) -> Vec<Maintenance> {
        let client = Arc::clone(&self.client);
        let installations = Arc::clone(&self.installations);
        let result = self
            .cache
            .get_or_fetch(async move {
                if !client.is_configured() {
                    return Ok(Vec::new());
                }
                let (body, facilities) =
                    futures::join!(client.get_json(LIST_PATH), installations.list());
                let body = body?;
                let facility_map = facility_reference(&facilities);
                Ok(payload::collection(body)
                    .iter()
                    .map(|raw| normalize_maintenance(raw, &facility_map))
                    .collect())
            })
            .await;
        match result {
            Ok(maintenances) => maintenances,
            Err(e) => {
                warn!("maintenance list fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Drops the cache and refetches. Call after a mutation made elsewhere
    /// may have touched maintenance windows.
    pub async fn refresh(&self) -> Vec<Maintenance> {
        self.cache.invalidate();
        self.list().await
    }

    pub async fn create(&self, input: &MaintenanceInput) -> Result<Maintenance, ApiError> {
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
        let facility_map = facility_reference(&self.installations.list().await);
        let maintenance = normalize_maintenance(&raw, &facility_map);
        self.cache.insert(maintenance.clone());
        Ok(maintenance)
    }

    pub async fn update(&self, id: &str, input: &MaintenanceInput) -> Result<Maintenance, ApiError> {
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
        let facility_map = facility_reference(&self.installations.list().await);
        let maintenance = normalize_maintenance(&raw, &facility_map);
        self.cache
            .replace_where(|entry| entry.id == maintenance.id, maintenance.clone());
        Ok(maintenance)
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
}
