//! API key management.

use super::client::{read_json, ApiClient};
use super::error::ApiError;
use super::types::{ApiKey, NameRequest};

/// GET /api-keys.
pub async fn get_api_keys(client: &ApiClient) -> Result<Vec<ApiKey>, ApiError> {
    client.get_json("/api-keys").await
}

/// POST /api-keys.
pub async fn create_api_key(client: &ApiClient, name: &str) -> Result<ApiKey, ApiError> {
    let resp = client.post("/api-keys", &NameRequest { name }).await?;
    read_json(resp).await
}

/// PUT /api-keys/{id}/revoke. Revoking an unknown key is a domain error (4xx).
pub async fn revoke_api_key(client: &ApiClient, id: u64) -> Result<(), ApiError> {
    client.put_empty(&format!("/api-keys/{}/revoke", id)).await?;
    Ok(())
}
