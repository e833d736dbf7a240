//! Authentication and profile endpoints, including the session lifecycle
//! contract: login persists the token and profile as one group, logout
//! always clears local state even when the backend cannot be reached.

use binwatch_core::error::{BinwatchError, Result};
use binwatch_core::session::Session;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::request::{ApiResponse, RequestBody, RequestOptions};

/// Login credentials.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// A new-user registration request.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ville: Option<String>,
}

impl ApiClient {
    /// Registers a new user.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse> {
        let body = serde_json::to_value(request)?;
        self.request("/auth/register/", RequestOptions::post(RequestBody::Json(body)))
            .await
    }

    /// Logs in and persists the session.
    ///
    /// When the response carries a token, the token, the serialized user
    /// object, and the present profile fields are written to the session
    /// store as one group. A token without a user object is a malformed
    /// response: nothing is stored and a [`BinwatchError::Session`] error is
    /// returned. A response without a token stores nothing and is returned
    /// as-is (the backend's error payload, if any, is in it).
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse> {
        let body = serde_json::to_value(credentials)?;
        let response = self
            .request("/auth/login/", RequestOptions::post(RequestBody::Json(body)))
            .await?;

        if let Some(value) = response.as_json() {
            if let Some(token) = value.get("token").and_then(Value::as_str) {
                let user = value.get("user");
                if !user.is_some_and(Value::is_object) {
                    return Err(BinwatchError::session(
                        "login response contained a token but no user object",
                    ));
                }
                let session = Session::new(token, user.cloned().unwrap_or(Value::Null));
                self.store().set_all(&session)?;
                debug!("session persisted after login");
            }
        }

        Ok(response)
    }

    /// Logs out.
    ///
    /// The backend is notified best-effort; whether or not that call
    /// succeeds, every locally persisted session key is cleared. Session
    /// teardown is never blocked by network failure.
    ///
    /// # Errors
    ///
    /// Only a failure of the local store itself propagates.
    pub async fn logout(&self) -> Result<()> {
        if let Err(err) = self
            .request("/auth/logout/", RequestOptions::post(RequestBody::Empty))
            .await
        {
            warn!(%err, "logout notification failed, clearing local session anyway");
        }
        self.store().clear_all()
    }

    /// Fetches the current user's profile.
    pub async fn get_user_profile(&self) -> Result<ApiResponse> {
        self.request("/auth/profile/", RequestOptions::get()).await
    }

    /// Updates the current user's profile (username, email, ville, ...).
    pub async fn update_user_profile(&self, profile: Value) -> Result<ApiResponse> {
        self.request(
            "/profile/update/",
            RequestOptions::put(RequestBody::Json(profile)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binwatch_core::config::ClientConfig;
    use binwatch_core::session::{MemorySessionStore, SessionKey, SessionStore};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server_uri: &str) -> (ApiClient, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        let client = ApiClient::new(ClientConfig::new(server_uri), store.clone());
        (client, store)
    }

    #[tokio::test]
    async fn test_login_persists_token_and_present_profile_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "abc",
                "user": {"role": "admin", "email": "a@b.com"}
            })))
            .mount(&server)
            .await;

        let (client, store) = client_for(&server.uri());
        client
            .login(&Credentials::new("admin", "secret"))
            .await
            .unwrap();

        assert_eq!(
            store.get(SessionKey::AuthToken).unwrap(),
            Some("abc".to_string())
        );
        assert_eq!(
            store.get(SessionKey::Role).unwrap(),
            Some("admin".to_string())
        );
        assert_eq!(
            store.get(SessionKey::Email).unwrap(),
            Some("a@b.com".to_string())
        );
        assert_eq!(store.get(SessionKey::Ville).unwrap(), None);
        assert_eq!(store.get(SessionKey::Username).unwrap(), None);

        let user_data = store.get(SessionKey::UserData).unwrap().unwrap();
        let parsed: Value = serde_json::from_str(&user_data).unwrap();
        assert_eq!(parsed, json!({"role": "admin", "email": "a@b.com"}));
    }

    #[tokio::test]
    async fn test_login_with_token_but_no_user_is_an_error_and_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
            .mount(&server)
            .await;

        let (client, store) = client_for(&server.uri());
        let err = client
            .login(&Credentials::new("admin", "secret"))
            .await
            .unwrap_err();

        assert!(err.is_session());
        for key in SessionKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_login_without_token_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "mot de passe requis"})),
            )
            .mount(&server)
            .await;

        let (client, store) = client_for(&server.uri());
        let response = client
            .login(&Credentials::new("admin", ""))
            .await
            .unwrap();

        assert!(response.as_json().is_some());
        assert_eq!(store.get(SessionKey::AuthToken).unwrap(), None);
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_backend_unreachable() {
        // Connection refused on loopback port 9.
        let (client, store) = client_for("http://127.0.0.1:9/api");
        store
            .set_all(&Session::new(
                "tok",
                json!({
                    "role": "mairie",
                    "email": "mairie@ville.fr",
                    "ville": "Sarcelles",
                    "username": "mairie-sarcelles"
                }),
            ))
            .unwrap();

        client.logout().await.unwrap();

        for key in SessionKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_logout_notifies_backend_then_clears() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, store) = client_for(&server.uri());
        store
            .set_all(&Session::new("tok", json!({"role": "user"})))
            .unwrap();

        client.logout().await.unwrap();

        assert_eq!(store.get(SessionKey::AuthToken).unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_omits_absent_optional_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "ok"})))
            .mount(&server)
            .await;

        let (client, _store) = client_for(&server.uri());
        client
            .register(&RegisterRequest {
                username: "marie".to_string(),
                email: "marie@ville.fr".to_string(),
                password: "secret123".to_string(),
                role: None,
                ville: Some("Paris".to_string()),
            })
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(
            body,
            json!({
                "username": "marie",
                "email": "marie@ville.fr",
                "password": "secret123",
                "ville": "Paris"
            })
        );
    }
}
