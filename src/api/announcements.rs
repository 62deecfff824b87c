//! Announcement CRUD. Announcements are plain messages shown site-wide.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{decode, decode_list};
use crate::client::error::ClientError;
use crate::client::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Announcement {
    #[serde(rename = "_id")]
    pub id: String,
    pub message: String,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
struct AnnouncementInput<'a> {
    message: &'a str,
}

pub async fn list(client: &ApiClient) -> Result<Vec<Announcement>, ClientError> {
    decode_list(client.get_json("/announcements/getAllAnnouncements").await?)
}

pub async fn get_by_id(client: &ApiClient, id: &str) -> Result<Announcement, ClientError> {
    decode(
        client
            .get_json(&format!("/announcements/getAnnouncementById/{id}"))
            .await?,
    )
}

pub async fn create(client: &ApiClient, message: &str) -> Result<Announcement, ClientError> {
    decode(
        client
            .post_json("/announcements/createAnnouncement", &AnnouncementInput { message })
            .await?,
    )
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    message: &str,
) -> Result<Announcement, ClientError> {
    decode(
        client
            .put_json(
                &format!("/announcements/updateAnnouncement/{id}"),
                &AnnouncementInput { message },
            )
            .await?,
    )
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError> {
    client
        .delete_json(&format!("/announcements/deleteAnnouncement/{id}"))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_announcement_timestamp_is_optional() {
        let with: Announcement = serde_json::from_value(json!({
            "_id": "a-1",
            "message": "Kargo bedava",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();
        assert!(with.created_at.is_some());

        let without: Announcement =
            serde_json::from_value(json!({"_id": "a-2", "message": "Yeni sezon"})).unwrap();
        assert!(without.created_at.is_none());
    }
}
