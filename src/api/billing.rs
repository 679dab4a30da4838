//! Usage metrics, plans and the subscription lifecycle.

use serde_json::Value;

use super::client::{read_json, ApiClient};
use super::error::ApiError;
use super::types::{PaymentRedirect, Plan, SubscriptionInit, SubscriptionRequest, UsageMetric};

/// GET /usage-metrics.
pub async fn get_usage_metrics(client: &ApiClient) -> Result<Vec<UsageMetric>, ApiError> {
    client.get_json("/usage-metrics").await
}

/// GET /plans/active. `None` when the account has no plan.
pub async fn get_active_plan(client: &ApiClient) -> Result<Option<Plan>, ApiError> {
    client.get_json("/plans/active").await
}

/// GET /plans/templates.
pub async fn get_plan_templates(client: &ApiClient) -> Result<Vec<Plan>, ApiError> {
    client.get_json("/plans/templates").await
}

/// GET /plans/config. Pricing and option tables, passed through untouched.
pub async fn get_subscription_config(client: &ApiClient) -> Result<Value, ApiError> {
    client.get_json("/plans/config").await
}

/// Start (or upgrade) a subscription with the given limits in bytes.
///
/// POST /subscriptions/init.
pub async fn start_subscription(
    client: &ApiClient,
    upload_size_limit: u64,
    download_size_limit: u64,
) -> Result<SubscriptionInit, ApiError> {
    let body = SubscriptionRequest {
        upload_size_limit,
        download_size_limit,
    };
    let resp = client.post("/subscriptions/init", &body).await?;
    read_json(resp).await
}

/// POST /subscriptions/manage. Returns the billing portal payload.
pub async fn manage_subscription(client: &ApiClient) -> Result<Value, ApiError> {
    let resp = client.post_empty("/subscriptions/manage").await?;
    read_json(resp).await
}

/// Pay for a plan through the crypto payment rail.
///
/// POST /crypto-payments/{planId}.
pub async fn pay_with_crypto(client: &ApiClient, plan_id: u64) -> Result<PaymentRedirect, ApiError> {
    let resp = client
        .post_empty(&format!("/crypto-payments/{}", plan_id))
        .await?;
    read_json(resp).await
}
