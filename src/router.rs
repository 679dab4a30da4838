//! Route table and the guard between public and protected routes.
//!
//! Protected routes live under `/app` and are entered only while the
//! session is signed in. Everything else is public. A denied route
//! redirects to the login entry point; the requested path is not kept.

use crate::store::SessionStore;

/// Every route the client knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Privacy,
    TermsOfService,
    Contact,
    Faq,
    ForgotPassword,
    ResetPassword,
    Signup,
    Verify,
    Files,
    Feeds,
    Analytics,
    ApiKeys,
    ApiGuide,
    Billing,
    NotFound,
}

impl Route {
    /// Resolve a path. Query strings and trailing slashes are ignored;
    /// `/app` on its own lands on the file list.
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = path.trim_end_matches('/');
        match path {
            "" => Route::Home,
            "/login" => Route::Login,
            "/privacy" => Route::Privacy,
            "/terms-of-service" => Route::TermsOfService,
            "/contact" => Route::Contact,
            "/faq" => Route::Faq,
            "/forgot-password" => Route::ForgotPassword,
            "/reset-password" => Route::ResetPassword,
            "/signup" => Route::Signup,
            "/verify" => Route::Verify,
            "/app" | "/app/files" => Route::Files,
            "/app/feeds" => Route::Feeds,
            "/app/analytics" => Route::Analytics,
            "/app/api-keys" => Route::ApiKeys,
            "/app/api-guide" => Route::ApiGuide,
            "/app/billing" => Route::Billing,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Privacy => "/privacy",
            Route::TermsOfService => "/terms-of-service",
            Route::Contact => "/contact",
            Route::Faq => "/faq",
            Route::ForgotPassword => "/forgot-password",
            Route::ResetPassword => "/reset-password",
            Route::Signup => "/signup",
            Route::Verify => "/verify",
            Route::Files => "/app/files",
            Route::Feeds => "/app/feeds",
            Route::Analytics => "/app/analytics",
            Route::ApiKeys => "/app/api-keys",
            Route::ApiGuide => "/app/api-guide",
            Route::Billing => "/app/billing",
            Route::NotFound => "/404",
        }
    }

    /// True for the dashboard routes under `/app`.
    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Files
                | Route::Feeds
                | Route::Analytics
                | Route::ApiKeys
                | Route::ApiGuide
                | Route::Billing
        )
    }
}

/// Outcome of evaluating the guard for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Whether protected content may be entered right now.
pub fn can_enter(session: &SessionStore) -> bool {
    session.signed_in()
}

/// Decide what to show for `route`. Pure: no side effects beyond the decision.
pub fn guard(route: Route, session: &SessionStore) -> Navigation {
    if !route.is_protected() || can_enter(session) {
        Navigation::Render(route)
    } else {
        Navigation::Redirect(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTECTED: [Route; 6] = [
        Route::Files,
        Route::Feeds,
        Route::Analytics,
        Route::ApiKeys,
        Route::ApiGuide,
        Route::Billing,
    ];

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/app"), Route::Files);
        assert_eq!(Route::parse("/app/"), Route::Files);
        assert_eq!(Route::parse("/app/billing?tab=plans"), Route::Billing);
        assert_eq!(Route::parse("/reset-password?token=abc"), Route::ResetPassword);
        assert_eq!(Route::parse("/app/nope"), Route::NotFound);
        assert_eq!(Route::parse("/wat"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trip() {
        for route in PROTECTED {
            assert_eq!(Route::parse(route.path()), route);
        }
        assert_eq!(Route::parse(Route::Login.path()), Route::Login);
    }

    #[test]
    fn test_protected_routes_redirect_when_signed_out() {
        let session = SessionStore::new();
        for route in PROTECTED {
            assert_eq!(guard(route, &session), Navigation::Redirect(Route::Login));
        }
    }

    #[test]
    fn test_protected_routes_render_when_signed_in() {
        let session = SessionStore::new();
        session.set_access_token("T");
        assert!(can_enter(&session));
        for route in PROTECTED {
            assert_eq!(guard(route, &session), Navigation::Render(route));
        }
    }

    #[test]
    fn test_public_routes_always_render() {
        let session = SessionStore::new();
        for route in [Route::Home, Route::Login, Route::Faq, Route::Verify, Route::NotFound] {
            assert!(!route.is_protected());
            assert_eq!(guard(route, &session), Navigation::Render(route));
        }
    }

    #[test]
    fn test_guard_reevaluates_after_sign_out() {
        let session = SessionStore::new();
        session.set_access_token("T");
        assert_eq!(guard(Route::Files, &session), Navigation::Render(Route::Files));
        session.clear();
        assert_eq!(guard(Route::Files, &session), Navigation::Redirect(Route::Login));
    }
}
