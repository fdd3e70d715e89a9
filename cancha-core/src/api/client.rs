//! Authenticated JSON client for the admin backend.

use std::sync::Arc;

use reqwest::{header, Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::payload;
use crate::error::ApiError;
use crate::session::SessionStore;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// The body parsed as JSON (whether or not the content type declared it)
    Json(Value),
    /// A non-JSON body, returned verbatim
    Text(String),
    /// HTTP 204 or an empty body
    Empty,
}

/// HTTP client that attaches the session's bearer token to every request
/// and extracts structured error messages from failure bodies.
///
/// The base URL is optional: when it is absent every request fails with
/// [`ApiError::NotConfigured`] before any network call, and the sync layer
/// falls back to its local-only behavior.
#[derive(Debug)]
pub struct ApiClient {
    base_url: Option<String>,
    session: Arc<SessionStore>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: Option<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty());
        Self {
            base_url,
            session,
            http: reqwest::Client::new(),
        }
    }

    /// Returns true when a base URL is configured.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    fn build_url(&self, path: &str) -> Result<String, ApiError> {
        let base = self.base_url.as_ref().ok_or(ApiError::NotConfigured)?;
        if path.starts_with('/') {
            Ok(format!("{}{}", base, path))
        } else {
            Ok(format!("{}/{}", base, path))
        }
    }

    /// Issues a request and decodes the response body.
    ///
    /// - `Authorization: Bearer <token>` is attached when a session exists.
    /// - `Content-Type: application/json` is attached only when a body is
    ///   present.
    /// - On a non-2xx response the error body is parsed for
    ///   `{ message, errors[] }`; a non-empty `errors` list joined with
    ///   newlines wins over `message`, which wins over a generic
    ///   status-code message.
    /// - 204 or an empty body decodes to [`ApiBody::Empty`]; any
    ///   JSON-parseable body decodes to [`ApiBody::Json`]; everything else
    ///   is returned as [`ApiBody::Text`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiBody, ApiError> {
        let url = self.build_url(path)?;
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url);
        if let Some(session) = self.session.get() {
            request = request.header(
                header::AUTHORIZATION,
                format!("Bearer {}", session.token),
            );
        }
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Status {
                code: status.as_u16(),
                message: extract_error_message(&text, status.as_u16()),
            });
        }

        if status == StatusCode::NO_CONTENT || text.trim().is_empty() {
            return Ok(ApiBody::Empty);
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => Ok(ApiBody::Json(value)),
            Err(_) => Ok(ApiBody::Text(text)),
        }
    }

    /// GET returning the envelope-unwrapped JSON value.
    pub async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        self.json_request(Method::GET, path, None).await
    }

    /// POST returning the envelope-unwrapped JSON value.
    pub async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.json_request(Method::POST, path, Some(body)).await
    }

    /// DELETE returning the envelope-unwrapped JSON value.
    pub async fn delete_json(&self, path: &str) -> Result<Value, ApiError> {
        self.json_request(Method::DELETE, path, None).await
    }

    /// Shared path for the JSON convenience wrappers: a `{ success: false }`
    /// envelope on a 2xx response becomes [`ApiError::Rejected`], and the
    /// `data` envelope is unwrapped before the value is handed out.
    async fn json_request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        match self.request(method, path, body).await? {
            ApiBody::Json(value) => {
                if let Some(message) = payload::rejection(&value) {
                    return Err(ApiError::Rejected(message));
                }
                Ok(payload::unwrap_data(value))
            }
            ApiBody::Text(text) => Ok(Value::String(text)),
            ApiBody::Empty => Ok(Value::Null),
        }
    }
}

/// Builds the user-facing message for a non-2xx response.
fn extract_error_message(body: &str, code: u16) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(errors) = value.get("errors").and_then(Value::as_array) {
            if !errors.is_empty() {
                return errors
                    .iter()
                    .map(|entry| match entry {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
            }
        }
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return message.to_string();
            }
        }
    }
    format!("Request failed with status {}", code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard) -> ApiClient {
        ApiClient::new(Some(server.url()), Arc::new(SessionStore::new()))
    }

    #[test]
    fn test_unconfigured_is_precondition_failure() {
        let client = ApiClient::new(None, Arc::new(SessionStore::new()));
        assert!(!client.is_configured());

        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(client.get_json("/api/Facility/GetAllFacilitiesAsyncFront"));
        assert_eq!(result, Err(ApiError::NotConfigured));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new(
            Some("http://localhost:5000/".to_string()),
            Arc::new(SessionStore::new()),
        );
        assert_eq!(
            client.build_url("/api/User/GetAllUsersIndex").unwrap(),
            "http://localhost:5000/api/User/GetAllUsersIndex"
        );
        assert_eq!(
            client.build_url("api/User/GetAllUsersIndex").unwrap(),
            "http://localhost:5000/api/User/GetAllUsersIndex"
        );
    }

    #[test]
    fn test_blank_base_url_counts_as_unconfigured() {
        let client = ApiClient::new(Some("   ".to_string()), Arc::new(SessionStore::new()));
        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/User/GetAllUsersIndex")
            .match_header("authorization", "Bearer tok-abc")
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let session = Arc::new(SessionStore::new());
        session.set(Session::new("tok-abc", None)).unwrap();
        let client = ApiClient::new(Some(server.url()), session);

        let value = client.get_json("/api/User/GetAllUsersIndex").await.unwrap();
        assert_eq!(value, json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_body_errors_list_joined() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/Maintenance/CreateMaintenance")
            .with_status(400)
            .with_body(r#"{"message": "ignored", "errors": ["bad date", {"field": "end"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .post_json("/api/Maintenance/CreateMaintenance", &json!({}))
            .await
            .unwrap_err();
        match err {
            ApiError::Status { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "bad date\n{\"field\":\"end\"}");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_body_message_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Tournaments/GetAllTournaments")
            .with_status(500)
            .with_body(r#"{"message": "database offline", "errors": []}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_json("/api/Tournaments/GetAllTournaments")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: 500,
                message: "database offline".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_body_generic_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Tournaments/GetAllTournaments")
            .with_status(404)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .get_json("/api/Tournaments/GetAllTournaments")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: 404,
                message: "Request failed with status 404".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_no_content_decodes_to_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/Maintenance/DeleteMaintenanceById?id=5")
            .with_status(204)
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client
            .request(
                Method::DELETE,
                "/api/Maintenance/DeleteMaintenanceById?id=5",
                None,
            )
            .await
            .unwrap();
        assert_eq!(body, ApiBody::Empty);
    }

    #[tokio::test]
    async fn test_json_parsed_despite_content_type() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/Reservation/GetAllReservationsFront")
            .with_header("content-type", "text/plain")
            .with_body(r#"[{"id": 1}]"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client
            .request(Method::GET, "/api/Reservation/GetAllReservationsFront", None)
            .await
            .unwrap();
        assert_eq!(body, ApiBody::Json(json!([{"id": 1}])));
    }

    #[tokio::test]
    async fn test_plain_text_returned_verbatim() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/ping")
            .with_body("pong")
            .create_async()
            .await;

        let client = client_for(&server);
        let body = client.request(Method::GET, "/api/ping", None).await.unwrap();
        assert_eq!(body, ApiBody::Text("pong".to_string()));
    }

    #[tokio::test]
    async fn test_success_false_becomes_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/Maintenance/DeleteMaintenanceById?id=5")
            .with_body(r#"{"success": false, "message": "Mantenimiento en curso"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .delete_json("/api/Maintenance/DeleteMaintenanceById?id=5")
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Rejected("Mantenimiento en curso".to_string()));
    }
}
