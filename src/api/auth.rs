//! Authentication and account endpoints: login, signup, profile,
//! password recovery and email verification.
//!
//! These functions never touch the stores. The caller decides what to do
//! with a returned token (normally `SessionStore::set_access_token`).

use super::client::{read_json, ApiClient};
use super::error::ApiError;
use super::types::{CodeRequest, Credentials, EmailRequest, LoginResponse, ResetPasswordRequest};
use crate::store::Profile;

/// Exchange credentials for a bearer token.
///
/// POST /auth/login. Wrong credentials come back as `ApiError::Unauthorized`,
/// which also runs the 401 teardown on whatever session was active.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<String, ApiError> {
    let resp = client
        .post("/auth/login", &Credentials { email, password })
        .await?;
    let login: LoginResponse = read_json(resp).await?;
    Ok(login.access_token)
}

/// GET /users/me.
pub async fn get_profile(client: &ApiClient) -> Result<Profile, ApiError> {
    client.get_json("/users/me").await
}

/// POST /users/register. Does not sign in; follow with `login`.
pub async fn register(client: &ApiClient, email: &str, password: &str) -> Result<(), ApiError> {
    client
        .post("/users/register", &Credentials { email, password })
        .await?;
    Ok(())
}

/// POST /users/send-reset-password-email.
pub async fn send_reset_password_email(client: &ApiClient, email: &str) -> Result<(), ApiError> {
    client
        .post("/users/send-reset-password-email", &EmailRequest { email })
        .await?;
    Ok(())
}

/// POST /users/reset-password with the token from the reset email.
pub async fn reset_password(
    client: &ApiClient,
    password: &str,
    token: &str,
) -> Result<(), ApiError> {
    client
        .post("/users/reset-password", &ResetPasswordRequest { password, token })
        .await?;
    Ok(())
}

/// Ask for a new verification email.
///
/// With a code (from an expired verification link) the backend resolves the
/// user from it; without one it uses the signed-in user.
pub async fn resend_verification_email(
    client: &ApiClient,
    code: Option<&str>,
) -> Result<(), ApiError> {
    match code {
        Some(code) => {
            client
                .post("/users/resend-email-verification-by-code", &CodeRequest { code })
                .await?
        }
        None => {
            client
                .post_empty("/users/resend-email-verification-by-user")
                .await?
        }
    };
    Ok(())
}

/// POST /users/verify-email.
pub async fn verify_email(client: &ApiClient, code: &str) -> Result<(), ApiError> {
    client
        .post("/users/verify-email", &CodeRequest { code })
        .await?;
    Ok(())
}
