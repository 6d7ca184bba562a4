//! Library Fetcher: pages through the user's saved tracks.

use tracing::debug;

use crate::api::{ApiError, SavedTracksApi, SAVED_TRACKS_PAGE_LIMIT};
use crate::progress;

/// Safety cap on the pagination offset, not a real limit.
const OFFSET_CAP: usize = 100_000;

/// One saved track: its id and when the user saved it, in pagination order.
#[derive(Clone, Debug, PartialEq)]
pub struct LibraryEntry {
    pub track_id: String,
    pub added_on: String,
}

/// Fetch the whole saved-track library, one page of
/// [`SAVED_TRACKS_PAGE_LIMIT`] entries per remote call, until a page comes
/// back empty or the offset cap is reached.
pub async fn fetch_library(api: &dyn SavedTracksApi) -> Result<Vec<LibraryEntry>, ApiError> {
    let mut entries = Vec::new();
    let bar = progress::fetch_spinner("saved tracks");

    for offset in (0..OFFSET_CAP).step_by(SAVED_TRACKS_PAGE_LIMIT) {
        let page = api.saved_tracks_page(SAVED_TRACKS_PAGE_LIMIT, offset).await?;

        if offset == 0 {
            if let Some(total) = page.total {
                progress::set_known_length(&bar, total);
            }
        }

        if page.items.is_empty() {
            break;
        }

        debug!("Fetched {} saved tracks at offset {}", page.items.len(), offset);
        bar.inc(page.items.len() as u64);

        for item in page.items {
            entries.push(LibraryEntry {
                track_id: item.track.id,
                added_on: item.added_at,
            });
        }
    }

    bar.finish_and_clear();
    Ok(entries)
}
