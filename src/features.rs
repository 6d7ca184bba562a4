//! Audio Feature Fetcher.
//!
//! The batched endpoint returns an array positionally aligned with the
//! requested ids, with `null` where the catalog has no analysis data. The
//! fetcher makes that alignment explicit by pairing each id with its entry
//! before filtering the nulls out, so a short or long response is caught as
//! an error instead of silently misattributing features.

use tracing::debug;

use crate::api::{ApiError, FeatureRecord, SavedTracksApi, FEATURES_BATCH_LIMIT};
use crate::progress;

/// Fetch audio features for all ids, in contiguous batches of
/// [`FEATURES_BATCH_LIMIT`]. Ids without analysis data are simply absent
/// from the result; the caller must tolerate fewer rows than input ids.
pub async fn fetch_audio_features(
    api: &dyn SavedTracksApi,
    ids: &[String],
) -> Result<Vec<FeatureRecord>, ApiError> {
    let mut records = Vec::with_capacity(ids.len());
    let bar = progress::fetch_bar(ids.len() as u64, "audio features");

    for batch in ids.chunks(FEATURES_BATCH_LIMIT) {
        let entries = api.audio_features(batch).await?;

        if entries.len() != batch.len() {
            return Err(ApiError::MisalignedBatch {
                expected: batch.len(),
                got: entries.len(),
            });
        }

        for (id, entry) in batch.iter().zip(entries) {
            match entry {
                Some(record) => records.push(record),
                None => debug!("No audio features for track {id}"),
            }
        }

        bar.inc(batch.len() as u64);
    }

    bar.finish_and_clear();
    Ok(records)
}
