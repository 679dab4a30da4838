//! Feed management. A feed is a stable address that can be pointed at
//! successive uploads.

use super::client::{read_json, ApiClient};
use super::error::ApiError;
use super::types::{Feed, NameRequest};

/// GET /feeds.
pub async fn get_feeds(client: &ApiClient) -> Result<Vec<Feed>, ApiError> {
    client.get_json("/feeds").await
}

/// POST /feeds.
pub async fn create_feed(client: &ApiClient, name: &str) -> Result<Feed, ApiError> {
    let resp = client.post("/feeds", &NameRequest { name }).await?;
    read_json(resp).await
}

/// Point a feed at an uploaded file.
///
/// PUT /feeds/{feedId}/{fileId}.
pub async fn update_feed(client: &ApiClient, feed_id: u64, file_id: u64) -> Result<(), ApiError> {
    client
        .put_empty(&format!("/feeds/{}/{}", feed_id, file_id))
        .await?;
    Ok(())
}
