//! Campaign CRUD.

use serde::{Deserialize, Serialize};

use super::{decode, decode_list};
use crate::client::error::ClientError;
use crate::client::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignInput {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
}

impl From<&Campaign> for CampaignInput {
    fn from(campaign: &Campaign) -> Self {
        Self {
            name: campaign.name.clone(),
            slug: campaign.slug.clone(),
            image_url: campaign.image_url.clone(),
        }
    }
}

pub async fn list(client: &ApiClient) -> Result<Vec<Campaign>, ClientError> {
    decode_list(client.get_json("/campaigns/getAllCampaigns").await?)
}

pub async fn get_by_slug(client: &ApiClient, slug: &str) -> Result<Campaign, ClientError> {
    decode(
        client
            .get_json(&format!("/campaigns/getCampaignBySlug/{slug}"))
            .await?,
    )
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Campaign, ClientError> {
    list(client)
        .await?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or_else(|| ClientError::Payload(format!("campaign not found: {id}")))
}

pub async fn create(client: &ApiClient, input: &CampaignInput) -> Result<Campaign, ClientError> {
    decode(client.post_json("/campaigns/createCampaign", input).await?)
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    input: &CampaignInput,
) -> Result<Campaign, ClientError> {
    decode(
        client
            .put_json(&format!("/campaigns/updateCampaign/{id}"), input)
            .await?,
    )
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError> {
    client
        .delete_json(&format!("/campaigns/deleteCampaign/{id}"))
        .await
        .map(|_| ())
}
