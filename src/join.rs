//! Joiner: merges the three fetch results on the track identifier.
//!
//! All joins are inner: a library entry with no matching metadata or
//! feature record is silently dropped from the output. This mirrors the
//! remote catalog's behavior of lacking analysis data for some tracks and
//! is accepted lossy behavior. The `type` and `uri` fields exist on both
//! the track and the feature side; the output row carries the track
//! metadata pair only, so no duplicate columns can arise.

use std::collections::HashMap;

use crate::api::{FeatureRecord, TrackRecord};
use crate::library::LibraryEntry;
use crate::tracks::ArtistColumns;

/// One fully joined output row, in library order.
#[derive(Clone, Debug)]
pub struct OutputRow {
    pub added_on: String,
    pub track: TrackRecord,
    pub artists: ArtistColumns,
    pub features: FeatureRecord,
}

/// Inner-join library entries with track metadata, flattened artist columns
/// and feature records, keyed on the track id, preserving library order.
pub fn join_output(
    library: Vec<LibraryEntry>,
    tracks: Vec<TrackRecord>,
    artist_columns: Vec<ArtistColumns>,
    features: Vec<FeatureRecord>,
) -> Vec<OutputRow> {
    let mut tracks_by_id: HashMap<String, TrackRecord> =
        tracks.into_iter().map(|t| (t.id.clone(), t)).collect();
    let mut artists_by_id: HashMap<String, ArtistColumns> = artist_columns
        .into_iter()
        .map(|a| (a.track_id.clone(), a))
        .collect();
    let mut features_by_id: HashMap<String, FeatureRecord> =
        features.into_iter().map(|f| (f.id.clone(), f)).collect();

    library
        .into_iter()
        .filter_map(|entry| {
            let track = tracks_by_id.remove(&entry.track_id)?;
            let artists = artists_by_id.remove(&entry.track_id)?;
            let features = features_by_id.remove(&entry.track_id)?;
            Some(OutputRow {
                added_on: entry.added_on,
                track,
                artists,
                features,
            })
        })
        .collect()
}
