//! Product CRUD plus the filtered list endpoints.

use serde::{Deserialize, Serialize};

use super::{decode, decode_list};
use crate::client::error::ClientError;
use crate::client::ApiClient;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    /// Products are not featured unless explicitly flagged.
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub images: Vec<String>,
    pub category: String,
    pub sub_category: String,
    pub is_featured: bool,
    pub is_active: bool,
}

impl Default for ProductInput {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: None,
            price: 0.0,
            stock: 0,
            images: Vec::new(),
            category: String::new(),
            sub_category: String::new(),
            is_featured: false,
            is_active: true,
        }
    }
}

impl From<&Product> for ProductInput {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone(),
            price: product.price,
            stock: product.stock,
            images: product.images.clone(),
            category: product.category.clone(),
            sub_category: product.sub_category.clone(),
            is_featured: product.is_featured,
            is_active: product.is_active,
        }
    }
}

pub async fn list(client: &ApiClient) -> Result<Vec<Product>, ClientError> {
    decode_list(client.get_json("/products/getAllProducts").await?)
}

pub async fn list_active(client: &ApiClient) -> Result<Vec<Product>, ClientError> {
    decode_list(client.get_json("/products/getActiveProducts").await?)
}

pub async fn list_featured(client: &ApiClient) -> Result<Vec<Product>, ClientError> {
    decode_list(client.get_json("/products/getFeaturedProducts").await?)
}

pub async fn get_by_id(client: &ApiClient, id: &str) -> Result<Product, ClientError> {
    decode(client.get_json(&format!("/products/getProductById/{id}")).await?)
}

pub async fn get_by_slug(client: &ApiClient, slug: &str) -> Result<Product, ClientError> {
    decode(
        client
            .get_json(&format!("/products/getProductBySlug/{slug}"))
            .await?,
    )
}

pub async fn create(client: &ApiClient, input: &ProductInput) -> Result<Product, ClientError> {
    decode(client.post_json("/products/createProduct", input).await?)
}

pub async fn update(
    client: &ApiClient,
    id: &str,
    input: &ProductInput,
) -> Result<Product, ClientError> {
    decode(
        client
            .put_json(&format!("/products/updateProduct/{id}"), input)
            .await?,
    )
}

pub async fn delete(client: &ApiClient, id: &str) -> Result<(), ClientError> {
    client
        .delete_json(&format!("/products/deleteProduct/{id}"))
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_flag_defaults() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p-1",
            "name": "Gömlek",
            "slug": "gomlek",
            "price": 149.9
        }))
        .unwrap();
        assert!(!product.is_featured);
        assert!(product.is_active);
        assert_eq!(product.stock, 0);
        assert!(product.images.is_empty());
    }

    #[test]
    fn test_input_serializes_camel_case() {
        let input = ProductInput {
            name: "Gömlek".into(),
            slug: "gomlek".into(),
            price: 149.9,
            sub_category: "erkek".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["subCategory"], json!("erkek"));
        assert_eq!(value["isFeatured"], json!(false));
        assert_eq!(value["isActive"], json!(true));
    }
}
