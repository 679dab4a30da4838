//! Application state shared by every command.
//!
//! `AuthState` groups the session and profile stores so they can only be
//! torn down together. `AppState` adds the API client wired to them.

use std::sync::Arc;

use crate::api::client::ApiClient;
use crate::config::Config;
use crate::store::{ProfileStore, SessionStore};

/// The two authentication-related stores, cleared in lockstep.
#[derive(Clone)]
pub struct AuthState {
    pub session: Arc<SessionStore>,
    pub profile: Arc<ProfileStore>,
}

impl AuthState {
    pub fn new(session: Arc<SessionStore>, profile: Arc<ProfileStore>) -> Self {
        Self { session, profile }
    }

    pub fn signed_in(&self) -> bool {
        self.session.signed_in()
    }

    /// Clear the token and reset the profile in one synchronous call.
    ///
    /// The only teardown path: explicit logout and the 401 interceptor both
    /// go through here. Both stores are reset before any subscriber runs, so
    /// no listener can observe a signed-out session next to a stale profile.
    pub fn sign_out(&self) {
        let session = self.session.reset();
        let profile = self.profile.reset();
        self.session.publish(&session);
        self.profile.publish(&profile);
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new(Arc::new(SessionStore::new()), Arc::new(ProfileStore::new()))
    }
}

/// State for one process run.
pub struct AppState {
    /// HTTP client for the Swarmy API, with auth interceptors installed.
    pub api: Arc<ApiClient>,
    pub auth: AuthState,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let auth = AuthState::default();
        let api = Arc::new(ApiClient::with_auth(config, &auth));
        Self { api, auth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Profile;
    use std::sync::Mutex;

    #[test]
    fn test_sign_out_clears_both_stores() {
        let auth = AuthState::default();
        auth.session.set_access_token("T");
        auth.profile.set_profile(Profile {
            email: Some("a@b.com".to_string()),
            email_verified: true,
            ..Profile::default()
        });

        auth.sign_out();

        assert!(!auth.signed_in());
        assert_eq!(auth.profile.profile(), Profile::default());
    }

    #[test]
    fn test_session_listener_never_sees_stale_profile() {
        let auth = AuthState::default();
        auth.session.set_access_token("T");
        auth.profile.set_profile(Profile {
            email: Some("a@b.com".to_string()),
            ..Profile::default()
        });

        let observed = Arc::new(Mutex::new(Vec::new()));
        let o = Arc::clone(&observed);
        let profile = Arc::clone(&auth.profile);
        auth.session
            .subscribe(move |s| o.lock().unwrap().push((s.signed_in(), profile.profile())));

        auth.sign_out();
        assert_eq!(*observed.lock().unwrap(), vec![(false, Profile::default())]);
    }

    #[test]
    fn test_profile_cleared_before_sign_out_returns() {
        let auth = AuthState::default();
        auth.session.set_access_token("T");
        auth.profile.set_profile(Profile {
            email: Some("a@b.com".to_string()),
            ..Profile::default()
        });

        let observed = Arc::new(Mutex::new(Vec::new()));
        let o = Arc::clone(&observed);
        auth.profile.subscribe(move |p| o.lock().unwrap().push(p.email.clone()));

        auth.sign_out();
        assert_eq!(*observed.lock().unwrap(), vec![None]);
    }
}
