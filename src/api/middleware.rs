//! Request/response interceptors applied by `ApiClient` to every call.
//!
//! Interceptors run in registration order. Request interceptors run just
//! before the request is sent; response interceptors run on every response
//! status before the result (success or error) is handed to the caller.

use std::sync::Arc;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, StatusCode};

use super::error::ApiError;
use crate::state::AuthState;
use crate::store::SessionStore;

/// Outbound policy. May add, replace, or remove headers.
pub trait RequestInterceptor: Send + Sync {
    fn on_request(&self, request: &mut Request) -> Result<(), ApiError>;
}

/// Inbound policy. Observes the status of every response.
pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, status: StatusCode);
}

/// Attaches `Authorization: Bearer <token>` from the session store.
///
/// The store is read on every request, so a token set after the client was
/// built is honored and a cleared token stops being sent.
pub struct BearerAuth {
    session: Arc<SessionStore>,
}

impl BearerAuth {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self { session }
    }
}

impl RequestInterceptor for BearerAuth {
    fn on_request(&self, request: &mut Request) -> Result<(), ApiError> {
        let headers = request.headers_mut();
        match self.session.access_token().filter(|t| !t.is_empty()) {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            None => {
                headers.remove(AUTHORIZATION);
            }
        }
        Ok(())
    }
}

/// Tears the whole session down when any response comes back 401.
pub struct UnauthorizedTeardown {
    auth: AuthState,
}

impl UnauthorizedTeardown {
    pub fn new(auth: AuthState) -> Self {
        Self { auth }
    }
}

impl ResponseInterceptor for UnauthorizedTeardown {
    fn on_response(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            log::info!("Received 401, clearing session and profile");
            self.auth.sign_out();
        }
    }
}

/// Identifies this client to the backend with a fixed header.
pub struct ClientTypeHeader {
    value: HeaderValue,
}

pub const CLIENT_TYPE_HEADER: &str = "x-client-type";

impl ClientTypeHeader {
    pub fn new(client_type: &'static str) -> Self {
        Self {
            value: HeaderValue::from_static(client_type),
        }
    }
}

impl RequestInterceptor for ClientTypeHeader {
    fn on_request(&self, request: &mut Request) -> Result<(), ApiError> {
        request
            .headers_mut()
            .insert(CLIENT_TYPE_HEADER, self.value.clone());
        Ok(())
    }
}
