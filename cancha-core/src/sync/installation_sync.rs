//! Facility (installation) list synchronization.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use super::{parse_record_id, placeholder_id};
use crate::api::{payload, ApiClient};
use crate::error::ApiError;
use crate::models::Installation;
use crate::normalize::normalize_installation;
use crate::refs::ReferenceMap;
use crate::sync::cache::ListCache;

const LIST_PATH: &str = "/api/Facility/GetAllFacilitiesAsyncFront";
const CREATE_PATH: &str = "/api/Facility/CreateFacility";
const UPDATE_PATH: &str = "/api/Facility/UpdateFacility";
const DELETE_PATH: &str = "/api/Facility/DeleteFacilityById";

/// Mutation payload for a facility.
#[derive(Debug, Clone, Default)]
pub struct InstallationInput {
    pub name: String,
    pub kind: String,
    pub capacity: u32,
    pub address: String,
    pub status_id: Option<i64>,
}

impl InstallationInput {
    fn payload(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "kind": self.kind,
            "capacity": self.capacity,
            "address": self.address,
        });
        if let Some(status_id) = self.status_id {
            body["statusId"] = json!(status_id);
        }
        body
    }
}

/// Builds the id -> name map the other synchronizers use to resolve
/// facility references.
pub fn facility_reference(installations: &[Installation]) -> ReferenceMap {
    ReferenceMap::from_pairs(
        installations
            .iter()
            .map(|installation| (installation.id, installation.name.clone())),
    )
}

/// Facility repository with a session-scoped list cache.
#[derive(Debug)]
pub struct SyncInstallationRepository {
    client: Arc<ApiClient>,
    cache: ListCache<Installation>,
}

impl SyncInstallationRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: ListCache::new(),
        }
    }

    /// Lists all facilities. Fetch errors degrade to an empty list; with no
    /// backend configured the cache warms up empty.
    pub async fn list(&self) -> Vec<Installation> {
        let client = Arc::clone(&self.client);
        let result = self
            .cache
            .get_or_fetch(async move {
                if !client.is_configured() {
                    return Ok(Vec::new());
                }
                let body = client.get_json(LIST_PATH).await?;
                let statuses = ReferenceMap::new();
                Ok(payload::collection(body)
                    .iter()
                    .map(|raw| normalize_installation(raw, &statuses))
                    .collect())
            })
            .await;
        match result {
            Ok(installations) => installations,
            Err(e) => {
                warn!("facility list fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Drops the cache and refetches.
    pub async fn refresh(&self) -> Vec<Installation> {
        self.cache.invalidate();
        self.list().await
    }

    pub async fn create(&self, input: &InstallationInput) -> Result<Installation, ApiError> {
        let body = input.payload();
        let raw = if self.client.is_configured() {
            let response = self.client.post_json(CREATE_PATH, &body).await?;
            payload::merge_fallback(response, &body)
        } else {
            let mut local = body.clone();
            local["id"] = json!(placeholder_id());
            local
        };
        let installation = normalize_installation(&raw, &ReferenceMap::new());
        self.cache.insert(installation.clone());
        Ok(installation)
    }

    pub async fn update(&self, id: &str, input: &InstallationInput) -> Result<Installation, ApiError> {
        let record_id = parse_record_id(id)?;
        let mut body = input.payload();
        body["id"] = json!(record_id);

        let raw = if self.client.is_configured() {
            let response = self.client.post_json(UPDATE_PATH, &body).await?;
            payload::merge_fallback(response, &body)
        } else {
            body.clone()
        };
        let installation = normalize_installation(&raw, &ReferenceMap::new());
        self.cache
            .replace_where(|entry| entry.id == installation.id, installation.clone());
        Ok(installation)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    fn repo_for(base_url: Option<String>) -> SyncInstallationRepository {
        let session = Arc::new(SessionStore::new());
        SyncInstallationRepository::new(Arc::new(ApiClient::new(base_url, session)))
    }

    #[tokio::test]
    async fn test_list_normalizes_enveloped_records() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Facility/GetAllFacilitiesAsyncFront")
            .with_body(
                r#"{"data": [
                    {"id": 1, "nombre": "Cancha A", "capacidad": "20"},
                    {"id": 2, "name": "Piscina", "capacity": 35}
                ], "success": true}"#,
            )
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        let installations = repo.list().await;
        assert_eq!(installations.len(), 2);
        assert_eq!(installations[0].name, "Cancha A");
        assert_eq!(installations[0].capacity, 20);
        assert_eq!(installations[1].capacity, 35);
    }

    #[tokio::test]
    async fn test_list_error_degrades_to_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Facility/GetAllFacilitiesAsyncFront")
            .with_status(500)
            .with_body("{}")
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_appends_to_warm_cache_once() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Facility/GetAllFacilitiesAsyncFront")
            .with_body(r#"[{"id": 1, "name": "Cancha A"}]"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/Facility/CreateFacility")
            .with_body(r#"{"data": {"id": 9}, "success": true}"#)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        repo.list().await;

        let input = InstallationInput {
            name: "Cancha B".to_string(),
            capacity: 18,
            ..Default::default()
        };
        let created = repo.create(&input).await.unwrap();
        // response wins for id, payload fills the echoed-incomplete fields
        assert_eq!(created.id, 9);
        assert_eq!(created.name, "Cancha B");
        assert_eq!(created.capacity, 18);

        let cached = repo.list().await;
        assert_eq!(
            cached.iter().filter(|entry| entry.id == 9).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_update_replaces_single_entry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Facility/GetAllFacilitiesAsyncFront")
            .with_body(r#"[{"id": 1, "name": "Cancha A"}, {"id": 2, "name": "Piscina"}]"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/Facility/UpdateFacility")
            .with_body(r#"{"id": 2, "name": "Piscina Olímpica"}"#)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        repo.list().await;

        let input = InstallationInput {
            name: "Piscina Olímpica".to_string(),
            ..Default::default()
        };
        let updated = repo.update("2", &input).await.unwrap();
        assert_eq!(updated.name, "Piscina Olímpica");

        let cached = repo.list().await;
        assert_eq!(cached.len(), 2);
        assert_eq!(
            cached.iter().filter(|entry| entry.id == 2).count(),
            1
        );
        assert_eq!(cached[1].name, "Piscina Olímpica");
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Facility/GetAllFacilitiesAsyncFront")
            .with_body(r#"[{"id": 1}, {"id": 2}]"#)
            .create_async()
            .await;
        server
            .mock("DELETE", "/api/Facility/DeleteFacilityById?id=1")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        repo.list().await;
        repo.delete("1").await.unwrap();

        let cached = repo.list().await;
        assert!(cached.iter().all(|entry| entry.id != 1));
    }

    #[tokio::test]
    async fn test_delete_rejected_leaves_cache_untouched() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Facility/GetAllFacilitiesAsyncFront")
            .with_body(r#"[{"id": 1}]"#)
            .create_async()
            .await;
        server
            .mock("DELETE", "/api/Facility/DeleteFacilityById?id=1")
            .with_body(r#"{"success": false, "message": "Tiene reservas activas"}"#)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        repo.list().await;

        let err = repo.delete("1").await.unwrap_err();
        assert_eq!(err, ApiError::Rejected("Tiene reservas activas".to_string()));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_bad_id_fails_before_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        let err = repo.delete("abc").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unconfigured_mode() {
        let repo = repo_for(None);
        assert!(repo.list().await.is_empty());

        let input = InstallationInput {
            name: "Cancha local".to_string(),
            ..Default::default()
        };
        let created = repo.create(&input).await.unwrap();
        assert!(created.id >= 1_000_000);
        assert_eq!(created.name, "Cancha local");

        // the locally created record is visible and deletable
        let cached = repo.list().await;
        assert_eq!(cached.len(), 1);
        repo.delete(&created.id.to_string()).await.unwrap();
        assert!(repo.list().await.is_empty());
    }
}
