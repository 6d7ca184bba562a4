//! Track Metadata Fetcher and Artist Field Flattener.

use crate::api::{ApiError, SavedTracksApi, TrackRecord, TRACKS_BATCH_LIMIT};
use crate::progress;

/// Fetch catalog metadata for all ids, in contiguous batches of
/// [`TRACKS_BATCH_LIMIT`], one remote call per batch, preserving batch order.
pub async fn fetch_track_metadata(
    api: &dyn SavedTracksApi,
    ids: &[String],
) -> Result<Vec<TrackRecord>, ApiError> {
    let mut records = Vec::with_capacity(ids.len());
    let bar = progress::fetch_bar(ids.len() as u64, "track metadata");

    for batch in ids.chunks(TRACKS_BATCH_LIMIT) {
        let tracks = api.tracks(batch).await?;
        bar.inc(batch.len() as u64);
        records.extend(tracks);
    }

    bar.finish_and_clear();
    Ok(records)
}

/// One track's artist list flattened into per-field value vectors, in
/// artist-list order, keyed back to the track. Rendered into the CSV as the
/// `artist.<field>` columns.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtistColumns {
    pub track_id: String,
    pub ids: Vec<String>,
    pub names: Vec<String>,
    pub hrefs: Vec<String>,
    pub external_urls: Vec<String>,
    pub kinds: Vec<String>,
    pub uris: Vec<String>,
}

/// Flatten one track's artist list.
///
/// The catalog guarantees at least one artist per track, so an empty list
/// means the response was malformed and the run aborts.
pub fn flatten_artists(track: &TrackRecord) -> Result<ArtistColumns, ApiError> {
    if track.artists.is_empty() {
        return Err(ApiError::EmptyArtistList {
            track_id: track.id.clone(),
        });
    }

    Ok(ArtistColumns {
        track_id: track.id.clone(),
        ids: track.artists.iter().map(|a| a.id.clone()).collect(),
        names: track.artists.iter().map(|a| a.name.clone()).collect(),
        hrefs: track.artists.iter().map(|a| a.href.clone()).collect(),
        external_urls: track
            .artists
            .iter()
            .map(|a| a.external_urls.spotify.clone())
            .collect(),
        kinds: track.artists.iter().map(|a| a.kind.clone()).collect(),
        uris: track.artists.iter().map(|a| a.uri.clone()).collect(),
    })
}

/// Flatten every track's artist list, one [`ArtistColumns`] per track.
pub fn flatten_all(tracks: &[TrackRecord]) -> Result<Vec<ArtistColumns>, ApiError> {
    tracks.iter().map(flatten_artists).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::{AlbumRef, ArtistRef, ExternalUrls, FeatureRecord, SavedTracksPage};
    use async_trait::async_trait;
    use std::sync::Mutex;

    pub(crate) fn make_artist(id: &str, name: &str) -> ArtistRef {
        ArtistRef {
            id: id.to_string(),
            name: name.to_string(),
            href: format!("https://api.example.com/v1/artists/{id}"),
            external_urls: ExternalUrls {
                spotify: format!("https://open.example.com/artist/{id}"),
            },
            kind: "artist".to_string(),
            uri: format!("spotify:artist:{id}"),
        }
    }

    pub(crate) fn make_track(id: &str, name: &str, artists: Vec<ArtistRef>) -> TrackRecord {
        TrackRecord {
            id: id.to_string(),
            name: name.to_string(),
            album: AlbumRef {
                id: format!("album-{id}"),
                name: format!("Album of {name}"),
            },
            artists,
            href: format!("https://api.example.com/v1/tracks/{id}"),
            external_urls: ExternalUrls {
                spotify: format!("https://open.example.com/track/{id}"),
            },
            kind: "track".to_string(),
            uri: format!("spotify:track:{id}"),
        }
    }

    /// Fake API recording the size of every metadata batch it serves.
    struct FakeTracksApi {
        batch_sizes: Mutex<Vec<usize>>,
    }

    #[async_trait]
    impl SavedTracksApi for FakeTracksApi {
        async fn saved_tracks_page(
            &self,
            _limit: usize,
            _offset: usize,
        ) -> Result<SavedTracksPage, ApiError> {
            unimplemented!("not used by tracks tests")
        }

        async fn tracks(&self, ids: &[String]) -> Result<Vec<TrackRecord>, ApiError> {
            self.batch_sizes.lock().unwrap().push(ids.len());
            Ok(ids
                .iter()
                .map(|id| make_track(id, id, vec![make_artist("a1", "Artist One")]))
                .collect())
        }

        async fn audio_features(
            &self,
            _ids: &[String],
        ) -> Result<Vec<Option<FeatureRecord>>, ApiError> {
            unimplemented!("not used by tracks tests")
        }
    }

    fn make_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("track{i}")).collect()
    }

    #[tokio::test]
    async fn test_batches_of_fifty() {
        let api = FakeTracksApi {
            batch_sizes: Mutex::new(Vec::new()),
        };
        let ids = make_ids(120);

        let records = fetch_track_metadata(&api, &ids).await.unwrap();

        assert_eq!(records.len(), 120);
        // ceil(120/50) = 3 calls, last batch is 120 mod 50 = 20
        let sizes = api.batch_sizes.lock().unwrap().clone();
        assert_eq!(sizes, vec![50, 50, 20]);
    }

    #[tokio::test]
    async fn test_evenly_divisible_batches() {
        let api = FakeTracksApi {
            batch_sizes: Mutex::new(Vec::new()),
        };
        let ids = make_ids(100);

        fetch_track_metadata(&api, &ids).await.unwrap();

        let sizes = api.batch_sizes.lock().unwrap().clone();
        assert_eq!(sizes, vec![50, 50]);
    }

    #[tokio::test]
    async fn test_batch_order_preserved() {
        let api = FakeTracksApi {
            batch_sizes: Mutex::new(Vec::new()),
        };
        let ids = make_ids(75);

        let records = fetch_track_metadata(&api, &ids).await.unwrap();

        let returned: Vec<_> = records.iter().map(|t| t.id.as_str()).collect();
        let expected: Vec<_> = ids.iter().map(String::as_str).collect();
        assert_eq!(returned, expected);
    }

    #[test]
    fn test_flatten_preserves_artist_order() {
        let track = make_track(
            "t1",
            "Song",
            vec![
                make_artist("a1", "First"),
                make_artist("a2", "Second"),
                make_artist("a3", "Third"),
            ],
        );

        let columns = flatten_artists(&track).unwrap();

        assert_eq!(columns.track_id, "t1");
        assert_eq!(columns.ids, vec!["a1", "a2", "a3"]);
        assert_eq!(columns.names, vec!["First", "Second", "Third"]);
        assert_eq!(columns.hrefs.len(), 3);
        assert_eq!(columns.external_urls.len(), 3);
        assert_eq!(columns.kinds, vec!["artist", "artist", "artist"]);
        assert_eq!(columns.uris.len(), 3);
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let track = make_track(
            "t1",
            "Song",
            vec![make_artist("a1", "First"), make_artist("a2", "Second")],
        );

        assert_eq!(
            flatten_artists(&track).unwrap(),
            flatten_artists(&track).unwrap()
        );
    }

    #[test]
    fn test_flatten_empty_artist_list_is_error() {
        let track = make_track("t1", "Song", Vec::new());

        let result = flatten_artists(&track);

        assert!(matches!(
            result,
            Err(ApiError::EmptyArtistList { track_id }) if track_id == "t1"
        ));
    }

    #[test]
    fn test_flatten_all() {
        let tracks = vec![
            make_track("t1", "One", vec![make_artist("a1", "A")]),
            make_track("t2", "Two", vec![make_artist("a2", "B"), make_artist("a3", "C")]),
        ];

        let columns = flatten_all(&tracks).unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].track_id, "t1");
        assert_eq!(columns[1].names, vec!["B", "C"]);
    }
}
