//! Banner CRUD. Banners carry separate desktop and mobile images.

use serde::{Deserialize, Serialize};

use super::{decode, decode_list};
use crate::client::error::ClientError;
use crate::client::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_url_mobile: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerInput {
    pub title: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub image_url_mobile: Option<String>,
}

impl From<&Banner> for BannerInput {
    fn from(banner: &Banner) -> Self {
        Self {
            title: banner.title.clone(),
            slug: banner.slug.clone(),
            image_url: banner.image_url.clone(),
            image_url_mobile: banner.image_url_mobile.clone(),
        }
    }
}

pub async fn list(client: &ApiClient) -> Result<Vec<Banner>, ClientError> {
    decode_list(client.get_json("/banners/getAllBanners").await?)
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Banner, ClientError> {
    list(client)
        .await?
        .into_iter()
        .find(|b| b.id == id)
        .ok_or_else(|| ClientError::Payload(format!("banner not found: {id}")))
}

pub async fn create(client: &ApiClient, input: &BannerInput) -> Result<Banner, ClientError> {
    decode(client.post_json("/banners/createBanner", input).await?)
}

pub async fn update(client: &ApiClient, id: &str, input: &BannerInput) -> Result<Banner, ClientError> {
    decode(
        client
            .put_json(&format!("/banners/updateBanner/{id}"), input)
            .await?,
    )
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError> {
    client
        .delete_json(&format!("/banners/deleteBanner/{id}"))
        .await
        .map(|_| ())
}
