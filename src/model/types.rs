//! Core catalog entities and derived home-screen types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id reported by the store for artists it could not identify.
pub const UNKNOWN_ARTIST_ID: i64 = -1;

/// A song in the local library
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist_name: String,
    pub artist_id: i64,
    pub album_id: i64,
    pub duration_ms: u32,
    /// Ordering key for "last added".
    pub date_added: DateTime<Utc>,
    /// Ordering key for "top tracks".
    #[serde(default)]
    pub play_count: u32,
    #[serde(default)]
    pub favorite: bool,
}

/// An album grouping songs of one artist
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: i64,
    pub title: String,
    pub artist_id: i64,
    #[serde(default)]
    pub artist_name: String,
    pub track_count: u32,
    #[serde(default)]
    pub art: Option<String>,
}

/// An artist; `id` may be [`UNKNOWN_ARTIST_ID`], in which case only the name identifies it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub album_count: u32,
    #[serde(default)]
    pub artwork: Option<String>,
}

impl Artist {
    pub fn is_unknown(&self) -> bool {
        self.id == UNKNOWN_ARTIST_ID
    }
}

/// A genre tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
    pub song_count: u32,
}

/// Which category a home section was built from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Albums,
    Artists,
    RecentlyPlayed,
    TopTracks,
}

impl SectionKind {
    /// Key the presentation layer resolves into a localized title.
    pub fn title_key(self) -> &'static str {
        match self {
            SectionKind::Albums => "home.albums",
            SectionKind::Artists => "home.artists",
            SectionKind::RecentlyPlayed => "home.recently_played",
            SectionKind::TopTracks => "home.top_tracks",
        }
    }
}

/// Items carried by one home section
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SectionItems {
    Albums(Vec<Album>),
    Artists(Vec<Artist>),
    Songs(Vec<Song>),
}

impl SectionItems {
    pub fn len(&self) -> usize {
        match self {
            SectionItems::Albums(items) => items.len(),
            SectionItems::Artists(items) => items.len(),
            SectionItems::Songs(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A named, never-empty group shown on the home screen
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeSection {
    pub kind: SectionKind,
    pub title_key: &'static str,
    pub items: SectionItems,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_deserializes_with_defaults() {
        let json = r#"{
            "id": 1,
            "title": "Intro",
            "artist_name": "Band",
            "artist_id": 7,
            "album_id": 3,
            "duration_ms": 90000,
            "date_added": "2024-05-01T10:00:00Z"
        }"#;
        let song: Song = serde_json::from_str(json).unwrap();
        assert_eq!(song.play_count, 0);
        assert!(!song.favorite);
        assert_eq!(song.artist_id, 7);
    }

    #[test]
    fn unknown_artist_is_detected() {
        let artist = Artist {
            id: UNKNOWN_ARTIST_ID,
            name: "Unknown".to_string(),
            album_count: 0,
            artwork: None,
        };
        assert!(artist.is_unknown());
    }

    #[test]
    fn section_items_length() {
        let items = SectionItems::Songs(vec![]);
        assert!(items.is_empty());
        assert_eq!(SectionKind::TopTracks.title_key(), "home.top_tracks");
    }
}
