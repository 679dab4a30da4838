//! Command-line arguments for `swarmy`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::pages::StaticPage;
use crate::router::Route;

#[derive(Parser, Debug)]
#[command(name = "swarmy", version, about = "Swarmy storage client")]
pub struct Args {
    /// Backend base URL (overrides SWARMY_API_URL / VITE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and keep the session in the system keychain
    Login {
        email: String,
        #[arg(long, env = "SWARMY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and sign in
    Signup {
        email: String,
        #[arg(long, env = "SWARMY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Send a password reset email
    ForgotPassword { email: String },
    /// Set a new password with the token from the reset email
    ResetPassword {
        #[arg(long)]
        token: Option<String>,
        #[arg(long, env = "SWARMY_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Confirm the account email with the code from the verification email
    VerifyEmail { code: String },
    /// Send the verification email again
    ResendVerification {
        /// Code from an expired verification link
        #[arg(long)]
        code: Option<String>,
    },
    /// Manage API keys
    #[command(subcommand)]
    Keys(KeysCommand),
    /// Upload, list and delete files
    #[command(subcommand)]
    Files(FilesCommand),
    /// Manage feeds
    #[command(subcommand)]
    Feeds(FeedsCommand),
    /// Show quota usage
    Usage,
    /// Show billing plans
    #[command(subcommand)]
    Plans(PlansCommand),
    /// Start or manage the subscription
    #[command(subcommand)]
    Subscription(SubscriptionCommand),
    /// Pay for a plan with crypto
    PayCrypto { plan_id: u64 },
    /// Print a static page
    Page {
        #[arg(value_parser = parse_page)]
        page: StaticPage,
    },
}

#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    List,
    Create { name: String },
    Revoke { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    List,
    Upload {
        path: PathBuf,
        /// Serve the upload as a website
        #[arg(long)]
        website: bool,
    },
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum FeedsCommand {
    List,
    Create { name: String },
    /// Point a feed at an uploaded file
    Update { feed_id: u64, file_id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum PlansCommand {
    Active,
    Templates,
    Config,
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommand {
    /// Start a subscription with limits in bytes
    Start {
        #[arg(long)]
        upload_size_limit: u64,
        #[arg(long)]
        download_size_limit: u64,
    },
    Manage,
}

fn parse_page(s: &str) -> Result<StaticPage, String> {
    s.parse()
}

impl Command {
    /// The route this command stands for, used by the guard.
    pub fn route(&self) -> Route {
        match self {
            Command::Login { .. } => Route::Login,
            Command::Signup { .. } => Route::Signup,
            Command::Logout => Route::Home,
            Command::Whoami => Route::Files,
            Command::ForgotPassword { .. } => Route::ForgotPassword,
            Command::ResetPassword { .. } => Route::ResetPassword,
            Command::VerifyEmail { .. } | Command::ResendVerification { .. } => Route::Verify,
            Command::Keys(_) => Route::ApiKeys,
            Command::Files(_) => Route::Files,
            Command::Feeds(_) => Route::Feeds,
            Command::Usage => Route::Analytics,
            Command::Plans(_) | Command::Subscription(_) | Command::PayCrypto { .. } => {
                Route::Billing
            }
            Command::Page { page } => match page {
                StaticPage::PrivacyPolicy => Route::Privacy,
                StaticPage::TermsOfService => Route::TermsOfService,
                StaticPage::Contact => Route::Contact,
                StaticPage::Faq => Route::Faq,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("swarmy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_login() {
        let args = parse(&["login", "a@b.com", "--password", "hunter22"]);
        match args.command {
            Command::Login { email, password } => {
                assert_eq!(email, "a@b.com");
                assert_eq!(password, "hunter22");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_upload_with_global_url() {
        let args = parse(&["files", "upload", "site.zip", "--website", "--api-url", "http://x"]);
        assert_eq!(args.api_url.as_deref(), Some("http://x"));
        match args.command {
            Command::Files(FilesCommand::Upload { path, website }) => {
                assert_eq!(path, PathBuf::from("site.zip"));
                assert!(website);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_page() {
        let args = parse(&["page", "terms-of-service"]);
        assert_eq!(args.command.route(), Route::TermsOfService);
        assert!(Args::try_parse_from(["swarmy", "page", "imprint"]).is_err());
    }

    #[test]
    fn test_routes() {
        assert!(parse(&["keys", "list"]).command.route().is_protected());
        assert!(parse(&["usage"]).command.route().is_protected());
        assert!(parse(&["pay-crypto", "3"]).command.route().is_protected());
        assert!(!parse(&["logout"]).command.route().is_protected());
        assert!(!parse(&["verify-email", "abc"]).command.route().is_protected());
        assert!(!parse(&["forgot-password", "a@b.com"]).command.route().is_protected());
    }
}
