//! Models for the streaming service Web API responses.
//!
//! These types match the JSON structure of the three endpoints the exporter
//! consumes: the saved-tracks listing, the batched track lookup and the
//! batched audio-features lookup.

use serde::Deserialize;

/// One page of the user's saved tracks.
#[derive(Clone, Debug, Deserialize)]
pub struct SavedTracksPage {
    pub items: Vec<SavedItem>,
    /// Total number of saved tracks in the library, as reported by the API.
    #[serde(default)]
    pub total: Option<u64>,
}

/// One saved track: when it was saved, and a reference to the track.
#[derive(Clone, Debug, Deserialize)]
pub struct SavedItem {
    pub added_at: String,
    pub track: SavedTrackRef,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SavedTrackRef {
    pub id: String,
}

/// External links keyed by provider; only the service's own link is used.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AlbumRef {
    pub id: String,
    pub name: String,
}

/// One entry of a track's artist list.
#[derive(Clone, Debug, Deserialize)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
}

/// Catalog metadata for one track.
#[derive(Clone, Debug, Deserialize)]
pub struct TrackRecord {
    pub id: String,
    pub name: String,
    pub album: AlbumRef,
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
}

/// Response wrapper for the batched track lookup.
#[derive(Clone, Debug, Deserialize)]
pub struct TracksResponse {
    pub tracks: Vec<TrackRecord>,
}

/// Acoustic feature set for one track.
///
/// The batched endpoint returns `null` in place of a record when the
/// catalog has no analysis data for an id, hence the `Option` in
/// [`AudioFeaturesResponse`].
#[derive(Clone, Debug, Deserialize)]
pub struct FeatureRecord {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub mode: i32,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub time_signature: i32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub track_href: String,
    #[serde(default)]
    pub analysis_url: String,
}

/// Response wrapper for the batched audio-features lookup, positionally
/// aligned with the requested ids.
#[derive(Clone, Debug, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<FeatureRecord>>,
}
