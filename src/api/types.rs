//! Request and response types for the Swarmy backend API.
//!
//! Request bodies use camelCase to match the API's JSON format. Response
//! types default every field, so shapes the backend extends or trims still
//! parse.

use serde::{Deserialize, Serialize};

/// Login request body sent to POST /auth/login.
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Login response from POST /auth/login. The only snake_case payload.
#[derive(Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct EmailRequest<'a> {
    pub email: &'a str,
}

#[derive(Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub password: &'a str,
    pub token: &'a str,
}

/// Body for email verification and resend-by-code.
#[derive(Debug, Serialize)]
pub struct CodeRequest<'a> {
    pub code: &'a str,
}

/// Body for creating an API key or a feed.
#[derive(Debug, Serialize)]
pub struct NameRequest<'a> {
    pub name: &'a str,
}

/// Subscription request body sent to POST /subscriptions/init. Limits in bytes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub upload_size_limit: u64,
    pub download_size_limit: u64,
}

/// API key from GET /api-keys.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiKey {
    pub id: u64,
    pub api_key: String,
    pub label: Option<String>,
    /// `ACTIVE` or `REVOKED`.
    pub status: String,
    pub created_at: Option<String>,
}

impl ApiKey {
    pub fn is_active(&self) -> bool {
        self.status == "ACTIVE"
    }
}

/// Uploaded file from GET /file-references.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileReference {
    pub id: u64,
    /// Swarm reference of the uploaded content.
    pub hash: String,
    pub name: String,
    pub content_type: Option<String>,
    pub size: u64,
    pub is_website: bool,
    pub thumbnail_base64: Option<String>,
    pub created_at: Option<String>,
}

/// One quota counter from GET /usage-metrics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UsageMetric {
    /// `UPLOADED_BYTES` or `DOWNLOADED_BYTES`.
    #[serde(rename = "type")]
    pub kind: String,
    pub used: u64,
    pub available: u64,
}

/// Billing plan from /plans/active and /plans/templates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Plan {
    pub id: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub upload_size_limit: u64,
    pub download_size_limit: u64,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub frequency: Option<String>,
    pub paid_until: Option<String>,
}

/// Response from POST /subscriptions/init.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubscriptionInit {
    pub plan_id: Option<u64>,
    /// Card payment checkout page.
    pub redirect_url: Option<String>,
}

/// Response from POST /crypto-payments/:planId.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentRedirect {
    pub redirect_url: String,
}

/// Feed from GET /feeds.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Feed {
    pub id: u64,
    pub name: String,
    pub manifest_address: Option<String>,
    pub last_bzz_address: Option<String>,
}
