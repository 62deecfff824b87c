//! Authenticated HTTP client for the admin backend.
//!
//! Every request carries the current access token as a bearer credential.
//! A 401 response triggers a transparent token refresh: the first caller
//! performs it while concurrent callers queue behind the refresh gate, and
//! each request is retried at most once with the new token. The refresh
//! credential is an http-only cookie kept in reqwest's cookie store, so the
//! refresh call never sends the expired token.

pub mod error;
mod refresh;

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::session::{SessionStore, User};
use error::ClientError;
use refresh::{Flight, RefreshGate};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    gate: RefreshGate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshPayload {
    access_token: String,
    user: Option<User>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionStore>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
            gate: RefreshGate::new(),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Payload(e.to_string()))?;
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Payload(e.to_string()))?;
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete_json(&self, path: &str) -> Result<Value, ClientError> {
        self.request(Method::DELETE, path, None).await
    }

    /// Multipart POST with the same 401-refresh-retry behavior. The form is
    /// rebuilt per attempt because multipart bodies cannot be reused.
    pub async fn post_multipart<F>(&self, path: &str, make_form: F) -> Result<Value, ClientError>
    where
        F: Fn() -> Result<reqwest::multipart::Form, ClientError>,
    {
        let mut request = self.http.post(self.url(path));
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }
        let response = request.multipart(make_form()?).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            let token = self.refresh_access_token().await?;
            let retried = self
                .http
                .post(self.url(path))
                .bearer_auth(token)
                .multipart(make_form()?)
                .send()
                .await?;
            return Self::decode(retried).await;
        }
        Self::decode(response).await
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let response = self
            .send(method.clone(), path, body.as_ref(), self.session.access_token())
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!(path, "Received 401, attempting token refresh");
            let token = self.refresh_access_token().await?;
            let retried = self.send(method, path, body.as_ref(), Some(token)).await?;
            // Retried at most once: a second 401 surfaces as an API error.
            return Self::decode(retried).await;
        }

        Self::decode(response).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<String>,
    ) -> Result<Response, ClientError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.send().await?)
    }

    async fn decode(response: Response) -> Result<Value, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api_from_body(status, &body));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }
        Ok(response.json().await?)
    }

    /// Obtain a fresh access token, coordinating concurrent callers through
    /// the refresh gate so only one refresh call hits the backend.
    async fn refresh_access_token(&self) -> Result<String, ClientError> {
        match self.gate.begin() {
            Flight::Follower(rx) => {
                debug!("Refresh already in flight, queueing");
                rx.await
                    .map_err(|_| ClientError::SessionExpired("token refresh was aborted".into()))?
            }
            Flight::Leader => match self.call_refresh_endpoint().await {
                Ok(payload) => {
                    if let Err(e) = self.session.set_access_token(&payload.access_token) {
                        let message = e.to_string();
                        self.gate.finish_err(&message);
                        return Err(ClientError::Storage(message));
                    }
                    if let Some(user) = payload.user {
                        if let Err(e) = self.session.set_user(user) {
                            warn!(error = %e, "Failed to persist refreshed user");
                        }
                    }
                    self.gate.finish_ok(&payload.access_token);
                    Ok(payload.access_token)
                }
                Err(e) => {
                    warn!(error = %e, "Token refresh failed, clearing session");
                    if let Err(persist_err) = self.session.clear_auth() {
                        warn!(error = %persist_err, "Failed to clear persisted session");
                    }
                    let message = e.to_string();
                    self.gate.finish_err(&message);
                    Err(ClientError::SessionExpired(message))
                }
            },
        }
    }

    /// Call the refresh endpoint directly, bypassing the 401 interception
    /// path. The refresh cookie in the jar authenticates this call.
    async fn call_refresh_endpoint(&self) -> Result<RefreshPayload, ClientError> {
        let response = self.http.get(self.url("/auth/refresh")).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::api_from_body(status, &body));
        }
        let value: Value = response.json().await?;
        serde_json::from_value(crate::api::envelope_data(value))
            .map_err(|e| ClientError::Payload(format!("refresh response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode as MockStatus};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client_with_token(base: &str, token: &str) -> (ApiClient, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(SessionStore::open(dir.path().join("session.json")));
        session.set_access_token(token).unwrap();
        let client = ApiClient::new(base, Duration::from_secs(5), session).unwrap();
        (client, dir)
    }

    fn bearer(headers: &HeaderMap) -> Option<&str> {
        headers.get("authorization").and_then(|v| v.to_str().ok())
    }

    /// Protected route that only accepts the refreshed token.
    fn protected_route(accepted: &'static str) -> Router {
        Router::new().route(
            "/things",
            get(move |headers: HeaderMap| async move {
                if bearer(&headers) == Some(accepted) {
                    (MockStatus::OK, Json(json!({"success": true, "data": [1, 2, 3]})))
                        .into_response()
                } else {
                    (
                        MockStatus::UNAUTHORIZED,
                        Json(json!({"success": false, "message": "jwt expired"})),
                    )
                        .into_response()
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_a_single_refresh() {
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let counter = refresh_calls.clone();
        let app = protected_route("Bearer fresh").route(
            "/auth/refresh",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    // Hold the leader long enough for followers to queue up.
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Json(json!({"data": {"accessToken": "fresh"}}))
                }
            }),
        );
        let base = spawn_server(app).await;
        let (client, _dir) = client_with_token(&base, "stale");

        let results =
            futures::future::join_all((0..5).map(|_| client.get_json("/things"))).await;

        for result in results {
            let value = result.unwrap();
            assert_eq!(value["data"], json!([1, 2, 3]));
        }
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.session().access_token().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_session_and_rejects_queue() {
        let app = protected_route("Bearer never").route(
            "/auth/refresh",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                (
                    MockStatus::UNAUTHORIZED,
                    Json(json!({"message": "refresh token expired"})),
                )
            }),
        );
        let base = spawn_server(app).await;
        let (client, _dir) = client_with_token(&base, "stale");

        let results =
            futures::future::join_all((0..3).map(|_| client.get_json("/things"))).await;

        for result in results {
            let err = result.unwrap_err();
            assert!(matches!(err, ClientError::SessionExpired(_)), "{err}");
            assert!(err.to_string().contains("refresh token expired"));
        }
        assert!(client.session().access_token().is_none());
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_request_is_retried_at_most_once() {
        // Refresh succeeds but the resource keeps answering 401: the second
        // 401 must surface as an API error instead of looping.
        let refresh_calls = Arc::new(AtomicUsize::new(0));
        let counter = refresh_calls.clone();
        let app = Router::new()
            .route(
                "/things",
                get(|| async {
                    (
                        MockStatus::UNAUTHORIZED,
                        Json(json!({"message": "jwt expired"})),
                    )
                }),
            )
            .route(
                "/auth/refresh",
                get(move || {
                    let counter = counter.clone();
                    async move {
                        counter.fetch_add(1, Ordering::SeqCst);
                        Json(json!({"data": {"accessToken": "fresh"}}))
                    }
                }),
            );
        let base = spawn_server(app).await;
        let (client, _dir) = client_with_token(&base, "stale");

        let err = client.get_json("/things").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_updates_user_when_present() {
        let app = protected_route("Bearer fresh").route(
            "/auth/refresh",
            get(|| async {
                Json(json!({
                    "data": {
                        "accessToken": "fresh",
                        "user": {"_id": "u-9", "name": "Admin", "email": "a@b.c", "role": "admin"}
                    }
                }))
            }),
        );
        let base = spawn_server(app).await;
        let (client, _dir) = client_with_token(&base, "stale");

        client.get_json("/things").await.unwrap();
        assert_eq!(client.session().user().unwrap().id, "u-9");
    }

    #[tokio::test]
    async fn test_backend_error_message_reaches_the_caller() {
        let app = Router::new().route(
            "/things",
            get(|| async {
                (
                    MockStatus::BAD_REQUEST,
                    Json(json!({"success": false, "message": "Slug already exists"})),
                )
            }),
        );
        let base = spawn_server(app).await;
        let (client, _dir) = client_with_token(&base, "tok");

        let err = client.get_json("/things").await.unwrap_err();
        assert_eq!(err.to_string(), "Slug already exists");
    }
}
