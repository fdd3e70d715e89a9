//! Authentication operations against the admin auth endpoints.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::normalize::value;
use crate::session::{Session, SessionStore};

const LOGIN_PATH: &str = "/api/Auth/LoginAdmin";
const REGISTER_PATH: &str = "/api/Auth/RegisterAdmin";

const TOKEN_KEYS: &[&str] = &["token", "accessToken", "jwt", "bearerToken"];
const USER_ID_KEYS: &[&str] = &["userId", "idUser", "id"];

/// Payload for registering a new admin account.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<i64>,
}

impl RegisterInput {
    fn payload(&self) -> Value {
        let mut body = json!({
            "name": self.name,
            "email": self.email,
            "password": self.password,
        });
        if let Some(role_id) = self.role_id {
            body["roleId"] = json!(role_id);
        }
        body
    }
}

/// Login, registration, and logout. These are the only writers of the
/// session store.
#[derive(Debug)]
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }

    /// Authenticates against the backend and stores the returned session.
    /// Requires a configured base URL; there is no offline login.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = json!({ "email": email, "password": password });
        let response = self.client.post_json(LOGIN_PATH, &body).await?;

        let token = value::get_str(&response, TOKEN_KEYS);
        if token.trim().is_empty() {
            return Err(ApiError::Rejected(
                "Login response did not include a token".to_string(),
            ));
        }
        let session = Session::new(token, value::get_id(&response, USER_ID_KEYS));
        self.client.session().set(session.clone())?;
        Ok(session)
    }

    /// Registers a new admin account. The backend signals duplicate emails
    /// and similar problems through the error envelope.
    pub async fn register(&self, input: &RegisterInput) -> Result<(), ApiError> {
        self.client.post_json(REGISTER_PATH, &input.payload()).await?;
        Ok(())
    }

    /// Drops the stored session. Purely local.
    pub fn logout(&self) {
        self.client.session().clear();
    }
}
