//! User list synchronization.
//!
//! Users are listed from the admin index, fetched individually for the
//! edit form, and updated through the admin profile endpoint. New admin
//! accounts are created through [`crate::sync::AuthApi::register`].

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::warn;

use super::parse_record_id;
use crate::api::{payload, ApiClient};
use crate::error::ApiError;
use crate::models::{Gender, User};
use crate::normalize::normalize_user;
use crate::refs::ReferenceMap;
use crate::sync::cache::ListCache;

const LIST_PATH: &str = "/api/User/GetAllUsersIndex";
const GET_PATH: &str = "/api/User/GetUserEdit";
const UPDATE_PATH: &str = "/api/User/UpdateProfileAdmin";
const DELETE_PATH: &str = "/api/User/DeleteUserById";

/// Mutation payload for the admin profile update.
#[derive(Debug, Clone, Default)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role_id: Option<i64>,
    pub status_id: Option<i64>,
    pub person_type_id: Option<i64>,
    pub identification: String,
    pub birth_date: String,
    pub gender: Option<Gender>,
}

impl UserInput {
    fn payload(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "email": self.email,
            "identification": self.identification,
            "birthDate": self.birth_date,
        });
        let optional = [
            ("roleId", self.role_id),
            ("statusId", self.status_id),
            ("personTypeId", self.person_type_id),
        ];
        for (key, id) in optional {
            if let Some(id) = id {
                body[key] = json!(id);
            }
        }
        if let Some(gender) = self.gender {
            body["gender"] = json!(gender.to_string());
        }
        body
    }
}

#[derive(Debug)]
pub struct SyncUserRepository {
    client: Arc<ApiClient>,
    cache: ListCache<User>,
}

impl SyncUserRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cache: ListCache::new(),
        }
    }

    pub async fn list(&self) -> Vec<User> {
        let client = Arc::clone(&self.client);
        let result = self
            .cache
            .get_or_fetch(async move {
                if !client.is_configured() {
                    return Ok(Vec::new());
                }
                let body = client.get_json(LIST_PATH).await?;
                let roles = ReferenceMap::new();
                let statuses = ReferenceMap::new();
                Ok(payload::collection(body)
                    .iter()
                    .map(|raw| normalize_user(raw, &roles, &statuses))
                    .collect())
            })
            .await;
        match result {
            Ok(users) => users,
            Err(e) => {
                warn!("user list fetch failed: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn refresh(&self) -> Vec<User> {
        self.cache.invalidate();
        self.list().await
    }

    /// Fetches the edit-form view of one user. The cache entry is replaced
    /// when the list is warm, since the edit endpoint is fresher.
    pub async fn get(&self, id: &str) -> Result<User, ApiError> {
        let record_id = parse_record_id(id)?;
        if !self.client.is_configured() {
            let cached = self
                .cache
                .snapshot()
                .and_then(|users| users.into_iter().find(|user| user.id == record_id));
            return Ok(cached.unwrap_or_else(|| {
                normalize_user(
                    &json!({ "id": record_id }),
                    &ReferenceMap::new(),
                    &ReferenceMap::new(),
                )
            }));
        }
        let body = self
            .client
            .get_json(&format!("{}/{}", GET_PATH, record_id))
            .await?;
        let user = normalize_user(&body, &ReferenceMap::new(), &ReferenceMap::new());
        self.cache
            .replace_where(|entry| entry.id == user.id, user.clone());
        Ok(user)
    }

    pub async fn update(&self, id: &str, input: &UserInput) -> Result<User, ApiError> {
        let record_id = parse_record_id(id)?;
        let mut body = input.payload();
        body["id"] = json!(record_id);

        let raw = if self.client.is_configured() {
            let response = self.client.post_json(UPDATE_PATH, &body).await?;
            payload::merge_fallback(response, &body)
        } else {
            body.clone()
        };
        let user = normalize_user(&raw, &ReferenceMap::new(), &ReferenceMap::new());
        self.cache
            .replace_where(|entry| entry.id == user.id, user.clone());
        Ok(user)
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

    fn repo_for(base_url: Option<String>) -> SyncUserRepository {
        let session = Arc::new(SessionStore::new());
        SyncUserRepository::new(Arc::new(ApiClient::new(base_url, session)))
    }

    #[tokio::test]
    async fn test_list_normalizes_users() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/User/GetAllUsersIndex")
            .with_body(
                r#"{"data": [
                    {"id": 4, "nombre": "Ana Ruiz", "correo": "ana@example.com",
                     "idTipoPersona": 1, "rol": "Admin"}
                ]}"#,
            )
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        let users = repo.list().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ana Ruiz");
        assert_eq!(users[0].person_type, "Atleta");
        assert!(users[0].avatar.contains("ui-avatars.com"));
    }

    #[tokio::test]
    async fn test_get_replaces_cache_entry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/User/GetAllUsersIndex")
            .with_body(r#"[{"id": 4, "name": "Ana"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/User/GetUserEdit/4")
            .with_body(r#"{"data": {"id": 4, "name": "Ana Ruiz", "identification": "401-220033"}}"#)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        repo.list().await;

        let user = repo.get("4").await.unwrap();
        assert_eq!(user.identification, "401-220033");

        let cached = repo.list().await;
        assert_eq!(cached[0].name, "Ana Ruiz");
    }

    #[tokio::test]
    async fn test_update_merges_and_patches() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/User/GetAllUsersIndex")
            .with_body(r#"[{"id": 4, "name": "Ana"}, {"id": 5, "name": "Luis"}]"#)
            .create_async()
            .await;
        server
            .mock("POST", "/api/User/UpdateProfileAdmin")
            .with_body(r#"{"data": {"id": 4, "statusId": 2}}"#)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        repo.list().await;

        let input = UserInput {
            name: "Ana Ruiz".to_string(),
            email: "ana@example.com".to_string(),
            gender: Some(Gender::Female),
            ..Default::default()
        };
        let updated = repo.update("4", &input).await.unwrap();
        assert_eq!(updated.id, 4);
        assert_eq!(updated.name, "Ana Ruiz");
        assert_eq!(updated.status_id, Some(2));
        assert_eq!(updated.gender, Some(Gender::Female));

        let cached = repo.list().await;
        assert_eq!(cached.len(), 2);
        assert_eq!(cached.iter().filter(|entry| entry.id == 4).count(), 1);
        assert_eq!(cached[0].email, "ana@example.com");
    }

    #[tokio::test]
    async fn test_delete_bad_id_rejected_before_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let repo = repo_for(Some(server.url()));
        assert!(matches!(
            repo.delete("4x").await,
            Err(ApiError::Validation(_))
        ));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unconfigured_get_falls_back_to_cache_then_default() {
        let repo = repo_for(None);
        let user = repo.get("12").await.unwrap();
        assert_eq!(user.id, 12);
        assert_eq!(user.name, "");
        assert!(user.avatar.contains("Usuario%2012"));
    }
}
