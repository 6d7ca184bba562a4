//! The export pipeline: fetch, flatten, join, write.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::api::SavedTracksApi;
use crate::{export, features, join, library, tracks};

/// What a successful run produced.
#[derive(Debug)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub row_count: usize,
}

/// Run the whole export sequentially: saved tracks, then catalog metadata
/// and artist flattening, then audio features, then the joins and the CSV.
///
/// Any stage error aborts the run; a failed run writes no output file.
pub async fn run_export(
    api: &dyn SavedTracksApi,
    username: &str,
    out_dir: &Path,
) -> Result<ExportSummary> {
    let library = library::fetch_library(api)
        .await
        .context("Failed to fetch saved tracks")?;
    info!("Fetched {} saved tracks", library.len());

    let ids: Vec<String> = library.iter().map(|e| e.track_id.clone()).collect();

    let track_records = tracks::fetch_track_metadata(api, &ids)
        .await
        .context("Failed to fetch track metadata")?;
    let artist_columns =
        tracks::flatten_all(&track_records).context("Failed to flatten artist fields")?;

    let feature_records = features::fetch_audio_features(api, &ids)
        .await
        .context("Failed to fetch audio features")?;
    info!(
        "Fetched metadata for {} tracks, features for {}",
        track_records.len(),
        feature_records.len()
    );

    let rows = join::join_output(library, track_records, artist_columns, feature_records);

    let (output_path, row_count) =
        export::write_csv(&rows, username, out_dir).context("Failed to write output CSV")?;
    info!("Wrote {} rows to {:?}", row_count, output_path);

    Ok(ExportSummary {
        output_path,
        row_count,
    })
}
