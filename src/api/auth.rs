//! Authentication flows: login, logout, refresh, current user.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::decode;
use crate::client::error::ClientError;
use crate::client::ApiClient;
use crate::session::User;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub user: Option<User>,
}

/// Log in and persist the session. The backend sets the refresh cookie on
/// this response; the cookie store picks it up automatically. Only admin
/// accounts may enter the panel.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<User, ClientError> {
    let value = client
        .post_json("/auth/login", &LoginRequest { email, password })
        .await?;
    let payload: AuthPayload = decode(value)?;
    let user = payload
        .user
        .ok_or_else(|| ClientError::Payload("login response carried no user".into()))?;

    if user.role != "admin" {
        return Err(ClientError::Api {
            status: reqwest::StatusCode::FORBIDDEN,
            message: "This account is not allowed to access the admin panel.".into(),
        });
    }

    client
        .session()
        .login(&payload.access_token, user.clone())
        .map_err(|e| ClientError::Storage(e.to_string()))?;
    Ok(user)
}

/// Log out: ask the backend to drop the refresh cookie, then clear local
/// state even when that call fails.
pub async fn logout(client: &ApiClient) -> Result<(), ClientError> {
    if let Err(e) = client.post_json("/auth/logout", &serde_json::json!({})).await {
        warn!(error = %e, "Backend logout failed, clearing local session anyway");
    }
    client
        .session()
        .clear_auth()
        .map_err(|e| ClientError::Storage(e.to_string()))
}

/// Fetch the current user and sync it into the session.
pub async fn current_user(client: &ApiClient) -> Result<User, ClientError> {
    let value = client.get_json("/auth/me").await?;
    let user: User = decode(value)?;
    client
        .session()
        .set_user(user.clone())
        .map_err(|e| ClientError::Storage(e.to_string()))?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_payload_accepts_nested_user() {
        let payload: AuthPayload = decode(serde_json::json!({
            "success": true,
            "data": {
                "accessToken": "tok",
                "user": {"_id": "u-1", "name": "Admin", "email": "a@b.c", "role": "admin"}
            }
        }))
        .unwrap();
        assert_eq!(payload.access_token, "tok");
        assert_eq!(payload.user.unwrap().id, "u-1");
    }

    #[test]
    fn test_auth_payload_accepts_flat_body() {
        let payload: AuthPayload =
            decode(serde_json::json!({"accessToken": "tok", "user": null})).unwrap();
        assert_eq!(payload.access_token, "tok");
        assert!(payload.user.is_none());
    }
}
