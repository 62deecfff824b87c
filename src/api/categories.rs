//! Category CRUD.
//!
//! Categories form a tree through `parent_id`; the nesting itself is derived
//! client-side by [`crate::tree`], never stored on the record.

use serde::{Deserialize, Serialize};

use super::{decode, decode_list};
use crate::client::error::ClientError;
use crate::client::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Categories are visible unless the backend says otherwise.
    #[serde(default = "default_visible")]
    pub is_visible: bool,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Serialized even when `None`: the backend expects an explicit null for
    /// root categories.
    pub parent_id: Option<String>,
    pub image_url: Option<String>,
    pub is_visible: bool,
}

impl Default for CategoryInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: None,
            parent_id: None,
            image_url: None,
            is_visible: true,
        }
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone(),
            parent_id: category.parent_id.clone(),
            image_url: category.image_url.clone(),
            is_visible: category.is_visible,
        }
    }
}

pub async fn list(client: &ApiClient) -> Result<Vec<Category>, ClientError> {
    decode_list(client.get_json("/categories/getAllCategories").await?)
}

pub async fn get(client: &ApiClient, id: &str) -> Result<Category, ClientError> {
    list(client).await?.into_iter().find(|c| c.id == id).ok_or_else(|| {
        ClientError::Payload(format!("category not found: {id}"))
    })
}

pub async fn create(client: &ApiClient, input: &CategoryInput) -> Result<Category, ClientError> {
    decode(client.post_json("/categories/createCategory", input).await?)
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    input: &CategoryInput,
) -> Result<Category, ClientError> {
    decode(
        client
            .put_json(&format!("/categories/updateCategory/{id}"), input)
            .await?,
    )
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError> {
    client
        .delete_json(&format!("/categories/deleteCategory/{id}"))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_deserializes_backend_record() {
        let category: Category = serde_json::from_value(json!({
            "_id": "c-1",
            "name": "Kadın",
            "slug": "kadin",
            "parentId": null
        }))
        .unwrap();
        assert_eq!(category.id, "c-1");
        assert!(category.parent_id.is_none());
        // Visibility defaults to true when the backend omits it.
        assert!(category.is_visible);
    }

    #[test]
    fn test_input_serializes_explicit_null_parent() {
        let input = CategoryInput {
            name: "Kadın".into(),
            slug: "kadin".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert!(value.as_object().unwrap().contains_key("parentId"));
        assert_eq!(value["parentId"], json!(null));
        assert_eq!(value["isVisible"], json!(true));
    }
}
