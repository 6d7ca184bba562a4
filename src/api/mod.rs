//! HTTP client for the streaming service Web API.

mod models;

pub use models::{
    AlbumRef, ArtistRef, AudioFeaturesResponse, ExternalUrls, FeatureRecord, SavedItem,
    SavedTrackRef, SavedTracksPage, TrackRecord, TracksResponse,
};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::auth::AccessToken;

/// Default base URL of the Web API.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Per-call id limit of the batched track lookup.
pub const TRACKS_BATCH_LIMIT: usize = 50;

/// Per-call id limit of the batched audio-features lookup.
pub const FEATURES_BATCH_LIMIT: usize = 100;

/// Page size of the saved-tracks listing.
pub const SAVED_TRACKS_PAGE_LIMIT: usize = 50;

/// Errors from a remote call or a malformed response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode { url: String, source: reqwest::Error },

    #[error("track {track_id} has an empty artist list")]
    EmptyArtistList { track_id: String },

    #[error("audio-features response has {got} entries for {expected} requested ids")]
    MisalignedBatch { expected: usize, got: usize },
}

/// The three remote operations the exporter consumes.
///
/// The pipeline and the fetch loops are written against this trait so tests
/// can substitute a fake for the real HTTP client.
#[async_trait]
pub trait SavedTracksApi: Send + Sync {
    /// One page of the user's saved tracks at the given offset.
    async fn saved_tracks_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<SavedTracksPage, ApiError>;

    /// Catalog metadata for up to [`TRACKS_BATCH_LIMIT`] ids.
    async fn tracks(&self, ids: &[String]) -> Result<Vec<TrackRecord>, ApiError>;

    /// Audio features for up to [`FEATURES_BATCH_LIMIT`] ids. The result is
    /// positionally aligned with `ids`; an entry is `None` when the catalog
    /// has no analysis data for that id.
    async fn audio_features(&self, ids: &[String]) -> Result<Vec<Option<FeatureRecord>>, ApiError>;
}

/// reqwest-backed client holding the session token for the whole run.
pub struct WebApiClient {
    client: reqwest::Client,
    base_url: String,
    token: AccessToken,
}

impl WebApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Web API (e.g. "https://api.spotify.com/v1")
    /// * `token` - Access token obtained from the token exchange
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: String, token: AccessToken, timeout_sec: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .expect("Failed to create HTTP client");

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Self {
            client,
            base_url,
            token,
        }
    }

    /// Get the base URL of the Web API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token.access_token)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { url, source })
    }
}

#[async_trait]
impl SavedTracksApi for WebApiClient {
    async fn saved_tracks_page(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<SavedTracksPage, ApiError> {
        let url = format!(
            "{}/me/tracks?limit={}&offset={}",
            self.base_url, limit, offset
        );
        self.get_json(url).await
    }

    async fn tracks(&self, ids: &[String]) -> Result<Vec<TrackRecord>, ApiError> {
        let url = format!("{}/tracks?ids={}", self.base_url, ids.join(","));
        let response: TracksResponse = self.get_json(url).await?;
        Ok(response.tracks)
    }

    async fn audio_features(&self, ids: &[String]) -> Result<Vec<Option<FeatureRecord>>, ApiError> {
        let url = format!("{}/audio-features?ids={}", self.base_url, ids.join(","));
        let response: AudioFeaturesResponse = self.get_json(url).await?;
        Ok(response.audio_features)
    }
}
