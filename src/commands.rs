//! Command handlers for the `swarmy` CLI.
//!
//! Every invocation runs the bootstrap first (profile fetch when a session
//! was restored), then the route guard, then the command itself. Errors are
//! local to the command; only a 401 has a global effect, and that already
//! happened inside the API client.

use serde_json::Value;
use thiserror::Error;

use crate::api::files::FileUpload;
use crate::api::types::{ApiKey, FileReference, Plan};
use crate::api::{auth, billing, feeds, files, keys, pages, ApiError};
use crate::bootstrap::Bootstrap;
use crate::cli::{
    Command, FeedsCommand, FilesCommand, KeysCommand, PlansCommand, SubscriptionCommand,
};
use crate::router::{self, Navigation};
use crate::state::AppState;
use crate::validation::{self, ValidationError};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Not signed in. Run `swarmy login` first.")]
    SignInRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Upload disabled: {0}")]
    UploadBlocked(&'static str),

    #[error("Can't reset password: Please request a new password reset email")]
    MissingResetToken,

    #[error("Signup failed: Please try again later")]
    SignupFailed(#[source] ApiError),

    #[error("Account created, but automatic login failed. Run `swarmy login`.")]
    AutoLoginFailed(#[source] ApiError),
}

impl CommandError {
    /// Text for the user, as opposed to the `Display` form used in logs.
    pub fn user_message(&self) -> String {
        match self {
            CommandError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Bootstrap, guard, then dispatch.
pub async fn run(state: &AppState, command: Command) -> Result<(), CommandError> {
    let boot = Bootstrap::new(state.auth.clone());
    let outcome = boot.run(state.api.as_ref()).await;
    log::debug!("Bootstrap finished: {:?}", outcome);

    let route = command.route();
    if let Navigation::Redirect(to) = router::guard(route, &state.auth.session) {
        log::debug!("{} needs a session, redirecting to {}", route.path(), to.path());
        return Err(CommandError::SignInRequired);
    }

    dispatch(state, command).await
}

async fn dispatch(state: &AppState, command: Command) -> Result<(), CommandError> {
    let api = state.api.as_ref();
    match command {
        Command::Login { email, password } => login(state, &email, &password).await,
        Command::Signup {
            email,
            password,
            confirm_password,
        } => signup(state, &email, &password, &confirm_password).await,
        Command::Logout => {
            state.auth.sign_out();
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => {
            whoami(state);
            Ok(())
        }
        Command::ForgotPassword { email } => {
            validation::validate_email(&email)?;
            auth::send_reset_password_email(api, &email).await?;
            println!("Reset link sent to {}. It is valid for 60 minutes.", email);
            Ok(())
        }
        Command::ResetPassword {
            token,
            password,
            confirm_password,
        } => {
            let token = token
                .filter(|t| !t.trim().is_empty())
                .ok_or(CommandError::MissingResetToken)?;
            validation::validate_new_password(&password, &confirm_password)?;
            auth::reset_password(api, &password, &token).await?;
            println!("Password reset successful! Now you can log in.");
            Ok(())
        }
        Command::VerifyEmail { code } => {
            auth::verify_email(api, &code).await?;
            if state.auth.signed_in() {
                state.auth.profile.set_email_verified(true);
            }
            println!("Email verified");
            Ok(())
        }
        Command::ResendVerification { code } => {
            auth::resend_verification_email(api, code.as_deref()).await?;
            println!("Verification email sent");
            Ok(())
        }
        Command::Keys(cmd) => run_keys(state, cmd).await,
        Command::Files(cmd) => run_files(state, cmd).await,
        Command::Feeds(cmd) => run_feeds(state, cmd).await,
        Command::Usage => {
            for metric in billing::get_usage_metrics(api).await? {
                println!("{}\t{} of {}", metric.kind, metric.used, metric.available);
            }
            Ok(())
        }
        Command::Plans(cmd) => run_plans(state, cmd).await,
        Command::Subscription(SubscriptionCommand::Start {
            upload_size_limit,
            download_size_limit,
        }) => {
            let init =
                billing::start_subscription(api, upload_size_limit, download_size_limit).await?;
            if let Some(url) = init.redirect_url {
                println!("Complete the card payment at {}", url);
            }
            if let Some(plan_id) = init.plan_id {
                println!("Or pay with crypto: swarmy pay-crypto {}", plan_id);
            }
            Ok(())
        }
        Command::Subscription(SubscriptionCommand::Manage) => {
            print_value(&billing::manage_subscription(api).await?);
            Ok(())
        }
        Command::PayCrypto { plan_id } => {
            let redirect = billing::pay_with_crypto(api, plan_id).await?;
            println!("Complete the payment at {}", redirect.redirect_url);
            Ok(())
        }
        Command::Page { page } => {
            print_value(&pages::get_static_text(api, page).await?);
            Ok(())
        }
    }
}

/// Log in, store the token, and load the profile for the new session.
async fn login(state: &AppState, email: &str, password: &str) -> Result<(), CommandError> {
    validation::validate_email(email)?;

    let token = match auth::login(&state.api, email, password).await {
        Ok(token) => token,
        Err(e) if e.is_auth_failure() => return Err(CommandError::InvalidCredentials),
        Err(e) => return Err(e.into()),
    };
    state.auth.session.set_access_token(token);

    match auth::get_profile(&state.api).await {
        Ok(profile) => state.auth.profile.set_profile(profile),
        Err(e) => log::warn!("Logged in, but the profile could not be loaded: {}", e),
    }

    log::info!("Login complete");
    println!("Logged in as {}", email);
    Ok(())
}

/// Register, then log in automatically.
async fn signup(
    state: &AppState,
    email: &str,
    password: &str,
    confirmation: &str,
) -> Result<(), CommandError> {
    validation::validate_signup(email, password, confirmation)?;

    auth::register(&state.api, email, password)
        .await
        .map_err(CommandError::SignupFailed)?;

    let token = auth::login(&state.api, email, password)
        .await
        .map_err(CommandError::AutoLoginFailed)?;
    state.auth.session.set_access_token(token);

    println!("Account created. Check your inbox and run `swarmy verify-email <code>`.");
    Ok(())
}

fn whoami(state: &AppState) {
    let profile = state.auth.profile.profile();
    println!("email:          {}", profile.email.as_deref().unwrap_or("-"));
    println!("email verified: {}", profile.email_verified);
    match profile.organization_id {
        Some(id) => println!("organization:   {}", id),
        None => println!("organization:   -"),
    }
    println!(
        "postage batch:  {}",
        profile.postage_batch_id.as_deref().unwrap_or("-")
    );
    match profile.upload_block_reason() {
        None => println!("uploads:        enabled"),
        Some(reason) => println!("uploads:        {}", reason),
    }
}

async fn run_keys(state: &AppState, cmd: KeysCommand) -> Result<(), CommandError> {
    let api = state.api.as_ref();
    match cmd {
        KeysCommand::List => {
            for key in keys::get_api_keys(api).await? {
                print_key(&key);
            }
        }
        KeysCommand::Create { name } => print_key(&keys::create_api_key(api, &name).await?),
        KeysCommand::Revoke { id } => {
            keys::revoke_api_key(api, id).await?;
            println!("Revoked key {}", id);
        }
    }
    Ok(())
}

async fn run_files(state: &AppState, cmd: FilesCommand) -> Result<(), CommandError> {
    let api = state.api.as_ref();
    match cmd {
        FilesCommand::List => {
            for file in files::get_file_references(api).await? {
                print_file(&file);
            }
        }
        FilesCommand::Upload { path, website } => {
            if let Some(reason) = state.auth.profile.upload_block_reason() {
                return Err(CommandError::UploadBlocked(reason));
            }
            let mut upload = FileUpload::new(path);
            if website {
                upload = upload.as_website();
            }
            print_value(&files::upload_file(api, &upload).await?);
        }
        FilesCommand::Delete { id } => {
            files::delete_file(api, id).await?;
            println!("Deleted file {}", id);
        }
    }
    Ok(())
}

async fn run_feeds(state: &AppState, cmd: FeedsCommand) -> Result<(), CommandError> {
    let api = state.api.as_ref();
    match cmd {
        FeedsCommand::List => {
            for feed in feeds::get_feeds(api).await? {
                println!(
                    "{}\t{}\t{}",
                    feed.id,
                    feed.name,
                    feed.manifest_address.as_deref().unwrap_or("-")
                );
            }
        }
        FeedsCommand::Create { name } => {
            let feed = feeds::create_feed(api, &name).await?;
            println!("Created feed {} ({})", feed.name, feed.id);
        }
        FeedsCommand::Update { feed_id, file_id } => {
            feeds::update_feed(api, feed_id, file_id).await?;
            println!("Feed {} now points at file {}", feed_id, file_id);
        }
    }
    Ok(())
}

async fn run_plans(state: &AppState, cmd: PlansCommand) -> Result<(), CommandError> {
    let api = state.api.as_ref();
    match cmd {
        PlansCommand::Active => match billing::get_active_plan(api).await? {
            Some(plan) => print_plan(&plan),
            None => println!("No active plan"),
        },
        PlansCommand::Templates => {
            for plan in billing::get_plan_templates(api).await? {
                print_plan(&plan);
            }
        }
        PlansCommand::Config => print_value(&billing::get_subscription_config(api).await?),
    }
    Ok(())
}

fn print_key(key: &ApiKey) {
    println!(
        "{}\t{}\t{}\t{}",
        key.id,
        key.status,
        key.label.as_deref().unwrap_or("-"),
        key.api_key
    );
}

fn print_file(file: &FileReference) {
    println!(
        "{}\t{}\t{}\t{}{}",
        file.id,
        file.name,
        file.size,
        file.hash,
        if file.is_website { "\twebsite" } else { "" }
    );
}

fn print_plan(plan: &Plan) {
    println!(
        "{}\tupload {}\tdownload {}\t{} {}\t{}",
        plan.kind.as_deref().unwrap_or("-"),
        plan.upload_size_limit,
        plan.download_size_limit,
        plan.amount.map(|a| format!("{:.2}", a)).unwrap_or_else(|| "-".to_string()),
        plan.currency.as_deref().unwrap_or(""),
        plan.paid_until.as_deref().unwrap_or("-"),
    );
}

fn print_value(value: &Value) {
    match value {
        Value::Null => {}
        Value::String(text) => println!("{}", text),
        other => println!(
            "{}",
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_user_message_prefers_api_wording() {
        let err = CommandError::from(ApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "stack trace".to_string(),
        });
        assert_eq!(err.user_message(), "Please try again later");

        let err = CommandError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Passwords do not match");

        assert_eq!(
            CommandError::UploadBlocked("Subscription needed to upload files.").user_message(),
            "Upload disabled: Subscription needed to upload files."
        );
    }
}
