//! Login and registration calls. Neither requires an existing session.

use crate::models::{Credentials, LoginResult};
use crate::services::http::{HttpClient, RequestFailure, RequestOptions};
use std::rc::Rc;

const LOGIN_PATH: &str = "/users/login";
const REGISTER_PATH: &str = "/users/register";

/// Account endpoints.
#[derive(Clone)]
pub struct AccountService {
    http: Rc<HttpClient>,
}

impl AccountService {
    /// Wrap a shared client.
    #[must_use]
    pub const fn new(http: Rc<HttpClient>) -> Self {
        Self { http }
    }

    /// Exchange credentials for a token.
    ///
    /// # Errors
    /// Returns the request layer's failure, or `Decode` when no token comes back.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResult, RequestFailure> {
        let envelope = self
            .http
            .post(LOGIN_PATH, credentials, RequestOptions::default())
            .await?;
        envelope.decode().map_err(|err| {
            tracing::error!(path = LOGIN_PATH, error = %err, "login returned no token");
            RequestFailure::Decode(err.to_string())
        })
    }

    /// Create an account with the given credentials.
    ///
    /// # Errors
    /// Returns the request layer's failure.
    pub async fn register(&self, credentials: &Credentials) -> Result<(), RequestFailure> {
        self.http
            .post(REGISTER_PATH, credentials, RequestOptions::default())
            .await
            .map(drop)
    }
}
