//! CSV Exporter.
//!
//! Writes the joined rows to `<username>_<YYYY-MM-DD>.csv`, header first,
//! columns in join construction order: library fields, track fields,
//! flattened `artist.<field>` columns, then the audio-feature fields. The
//! multi-valued artist cells hold one value per artist, joined with
//! [`ARTIST_LIST_SEPARATOR`] in artist-list order.

use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::join::OutputRow;

/// Separator between per-artist values inside one CSV cell.
pub const ARTIST_LIST_SEPARATOR: &str = "; ";

/// Column order of the output file.
pub const OUTPUT_COLUMNS: &[&str] = &[
    "added_on",
    "id",
    "name",
    "album.id",
    "album.name",
    "href",
    "external_urls.spotify",
    "type",
    "uri",
    "artist.id",
    "artist.name",
    "artist.href",
    "artist.external_urls",
    "artist.type",
    "artist.uri",
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "duration_ms",
    "time_signature",
    "track_href",
    "analysis_url",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn join_values(values: &[String]) -> String {
    values.join(ARTIST_LIST_SEPARATOR)
}

fn to_record(row: &OutputRow) -> Vec<String> {
    vec![
        row.added_on.clone(),
        row.track.id.clone(),
        row.track.name.clone(),
        row.track.album.id.clone(),
        row.track.album.name.clone(),
        row.track.href.clone(),
        row.track.external_urls.spotify.clone(),
        row.track.kind.clone(),
        row.track.uri.clone(),
        join_values(&row.artists.ids),
        join_values(&row.artists.names),
        join_values(&row.artists.hrefs),
        join_values(&row.artists.external_urls),
        join_values(&row.artists.kinds),
        join_values(&row.artists.uris),
        row.features.danceability.to_string(),
        row.features.energy.to_string(),
        row.features.key.to_string(),
        row.features.loudness.to_string(),
        row.features.mode.to_string(),
        row.features.speechiness.to_string(),
        row.features.acousticness.to_string(),
        row.features.instrumentalness.to_string(),
        row.features.liveness.to_string(),
        row.features.valence.to_string(),
        row.features.tempo.to_string(),
        row.features.duration_ms.to_string(),
        row.features.time_signature.to_string(),
        row.features.track_href.clone(),
        row.features.analysis_url.clone(),
    ]
}

/// Name of the output file for an account on a given date.
pub fn output_file_name(username: &str, date: &str) -> String {
    format!("{username}_{date}.csv")
}

/// Write the joined rows to a dated, account-named CSV file in `dir`.
///
/// Returns the file path and the number of exported rows.
pub fn write_csv(
    rows: &[OutputRow],
    username: &str,
    dir: &Path,
) -> Result<(PathBuf, usize), ExportError> {
    let date = Local::now().format("%Y-%m-%d").to_string();
    let path = dir.join(output_file_name(username, &date));

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        writer.write_record(to_record(row))?;
    }
    writer.flush()?;

    Ok((path, rows.len()))
}
