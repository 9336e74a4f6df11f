//! Track-list domain models.

use bridge_traits::media::RawAssetRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default artist shown when no artist tag could be extracted.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Default album shown when no album tag could be extracted.
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// A single audio file discoverable on the device.
///
/// Created by the source adapter from a raw device record, then enriched in
/// place: the metadata enricher fills `title`/`artist`/`album` and the artwork
/// cache manager fills `artwork_uri`. Assets are never deleted during a
/// session; the collection is replaced wholesale only by a fresh fetch.
///
/// Once `artwork_uri` holds a resolved local path it is never cleared back to
/// `None` within the same session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioAsset {
    /// Stable, unique identifier for the device asset.
    pub id: String,
    /// Display filename, including extension.
    pub filename: String,
    /// Playable URI.
    pub uri: String,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Track title from tags, when extracted.
    pub title: Option<String>,
    /// Artist from enumeration or tags.
    pub artist: Option<String>,
    /// Album from tags.
    pub album: Option<String>,
    /// Transient device artwork reference (may expire mid-session).
    pub artwork_ref: Option<String>,
    /// Durable locally-cached artwork path.
    pub artwork_uri: Option<PathBuf>,
}

impl AudioAsset {
    /// Title used for display and queueing: the tag title, else the filename.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.filename)
    }

    /// Artist used for display and queueing.
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or(UNKNOWN_ARTIST)
    }

    /// Duration rendered as `m:ss` for the list row.
    pub fn format_duration(&self) -> String {
        let total = self.duration_secs.max(0.0) as u64;
        let minutes = total / 60;
        let seconds = total % 60;
        format!("{}:{:02}", minutes, seconds)
    }
}

impl From<RawAssetRecord> for AudioAsset {
    fn from(record: RawAssetRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            uri: record.uri,
            duration_secs: record.duration_secs,
            title: None,
            artist: record.artist,
            album: None,
            artwork_ref: record.artwork_ref,
            artwork_uri: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(filename: &str, duration_secs: f64) -> AudioAsset {
        AudioAsset {
            id: "asset-1".to_string(),
            filename: filename.to_string(),
            uri: format!("file:///music/{}", filename),
            duration_secs,
            title: None,
            artist: None,
            album: None,
            artwork_ref: None,
            artwork_uri: None,
        }
    }

    #[test]
    fn display_title_falls_back_to_filename() {
        let mut a = asset("song.mp3", 10.0);
        assert_eq!(a.display_title(), "song.mp3");

        a.title = Some("A Real Title".to_string());
        assert_eq!(a.display_title(), "A Real Title");
    }

    #[test]
    fn display_artist_falls_back_to_unknown() {
        let mut a = asset("song.mp3", 10.0);
        assert_eq!(a.display_artist(), UNKNOWN_ARTIST);

        a.artist = Some("The Band".to_string());
        assert_eq!(a.display_artist(), "The Band");
    }

    #[test]
    fn duration_is_rendered_minutes_and_padded_seconds() {
        assert_eq!(asset("a.mp3", 0.0).format_duration(), "0:00");
        assert_eq!(asset("a.mp3", 7.9).format_duration(), "0:07");
        assert_eq!(asset("a.mp3", 65.0).format_duration(), "1:05");
        assert_eq!(asset("a.mp3", 600.0).format_duration(), "10:00");
    }

    #[test]
    fn raw_record_maps_onto_asset() {
        let record = RawAssetRecord {
            id: "42".to_string(),
            filename: "track.flac".to_string(),
            uri: "file:///music/track.flac".to_string(),
            duration_secs: 123.0,
            artist: Some("Someone".to_string()),
            artwork_ref: Some("ph://artwork/42".to_string()),
        };

        let a = AudioAsset::from(record);
        assert_eq!(a.id, "42");
        assert_eq!(a.artist.as_deref(), Some("Someone"));
        assert_eq!(a.artwork_ref.as_deref(), Some("ph://artwork/42"));
        assert!(a.title.is_none());
        assert!(a.album.is_none());
        assert!(a.artwork_uri.is_none());
    }
}
