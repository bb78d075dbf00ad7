//! `POST /auth/login`.

use protocolos_auth::Session;
use serde::Serialize;

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a session record. A 401 here means bad
    /// credentials, not an expired token; the login screen handles it inline.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        self.post_json("/auth/login", &Credentials { email, password })
            .await
    }
}
