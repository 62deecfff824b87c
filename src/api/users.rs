//! User listing. Accounts live under the auth namespace on the backend.

use super::decode_list;
use crate::client::error::ClientError;
use crate::client::ApiClient;
use crate::session::User;

pub async fn list(client: &ApiClient) -> Result<Vec<User>, ClientError> {
    decode_list(client.get_json("/auth/users").await?)
}
