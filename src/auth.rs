//! Token exchange with the service's authorization endpoint.
//!
//! The exporter runs non-interactively: the parameters file carries a
//! previously issued refresh token, and this module trades it for a bearer
//! access token used by all three fetch stages. Missing credential keys
//! fail here, never in the config loader.

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::config::Params;

/// Default URL of the token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Scope required to read the user's saved tracks.
pub const LIBRARY_READ_SCOPE: &str = "user-library-read";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("parameters file is missing required key '{0}'")]
    MissingKey(&'static str),

    #[error("token request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("token endpoint {url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode token response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },
}

/// Access token as returned by the token endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

/// Exchange the refresh token from the parameters file for an access token.
pub async fn request_access_token(
    client: &reqwest::Client,
    params: &Params,
) -> Result<AccessToken, AuthError> {
    let client_id = params
        .client_id
        .as_deref()
        .ok_or(AuthError::MissingKey("client_id"))?;
    let client_secret = params
        .client_secret
        .as_deref()
        .ok_or(AuthError::MissingKey("client_secret"))?;
    let refresh_token = params
        .refresh_token
        .as_deref()
        .ok_or(AuthError::MissingKey("refresh_token"))?;

    if let Some(scope) = params.scope.as_deref() {
        if !scope.split_whitespace().any(|s| s == LIBRARY_READ_SCOPE) {
            warn!(
                "Configured scope does not include '{}'; the library fetch may be rejected",
                LIBRARY_READ_SCOPE
            );
        }
    }

    let url = params
        .token_url
        .clone()
        .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());

    let form = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];

    let response = client
        .post(&url)
        .basic_auth(client_id, Some(client_secret))
        .form(&form)
        .send()
        .await
        .map_err(|source| AuthError::Request {
            url: url.clone(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Status { url, status });
    }

    response
        .json()
        .await
        .map_err(|source| AuthError::Decode { url, source })
}
