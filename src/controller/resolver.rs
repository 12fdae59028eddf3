//! Entity resolution for detail screens.
//!
//! Albums resolve by id only. Artists resolve by id first and fall back to a
//! case-insensitive name match; the id match always wins when both would hit.

use crate::model::{Album, Artist, UNKNOWN_ARTIST_ID};

/// A resolved album together with the artist's other albums
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedAlbum {
    pub album: Album,
    /// Other albums of the same artist, snapshot order, the album itself excluded.
    pub more_by_artist: Vec<Album>,
}

/// Which lookup path matched an artist
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchedBy {
    Id,
    Name,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtistResolution {
    /// The artist snapshot is empty; nothing can be concluded yet.
    Deferred,
    Found { artist: Artist, matched_by: MatchedBy },
    /// Neither id nor name matched a non-empty snapshot.
    Missing,
}

/// Find `id` in `albums`. Empty snapshots and misses both return `None`; the
/// caller knows whether the snapshot has been loaded.
pub fn resolve_album(id: i64, albums: &[Album]) -> Option<ResolvedAlbum> {
    let album = albums.iter().find(|a| a.id == id)?.clone();
    let more_by_artist = albums
        .iter()
        .filter(|a| a.artist_id == album.artist_id && a.id != album.id)
        .cloned()
        .collect();

    Some(ResolvedAlbum {
        album,
        more_by_artist,
    })
}

pub fn resolve_artist(id: i64, name: Option<&str>, artists: &[Artist]) -> ArtistResolution {
    if artists.is_empty() {
        return ArtistResolution::Deferred;
    }

    if id != UNKNOWN_ARTIST_ID {
        if let Some(artist) = artists.iter().find(|a| a.id == id) {
            return ArtistResolution::Found {
                artist: artist.clone(),
                matched_by: MatchedBy::Id,
            };
        }
    }

    if let Some(name) = name {
        let wanted = name.to_lowercase();
        if let Some(artist) = artists.iter().find(|a| a.name.to_lowercase() == wanted) {
            return ArtistResolution::Found {
                artist: artist.clone(),
                matched_by: MatchedBy::Name,
            };
        }
    }

    ArtistResolution::Missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::memory_store::fixtures::{album, artist};

    #[test]
    fn album_resolves_with_siblings_in_order() {
        let albums = vec![
            album(1, "One", 7),
            album(2, "Two", 8),
            album(3, "Three", 7),
            album(4, "Four", 7),
        ];
        let resolved = resolve_album(3, &albums).unwrap();
        assert_eq!(resolved.album.id, 3);
        let siblings: Vec<i64> = resolved.more_by_artist.iter().map(|a| a.id).collect();
        assert_eq!(siblings, vec![1, 4]);
    }

    #[test]
    fn album_missing_or_empty_is_none() {
        assert!(resolve_album(1, &[]).is_none());
        assert!(resolve_album(9, &[album(1, "One", 1)]).is_none());
    }

    #[test]
    fn artist_on_empty_snapshot_is_deferred() {
        assert_eq!(
            resolve_artist(3, Some("Anyone"), &[]),
            ArtistResolution::Deferred
        );
    }

    #[test]
    fn artist_resolves_by_id() {
        let artists = vec![artist(1, "A"), artist(2, "B")];
        match resolve_artist(2, None, &artists) {
            ArtistResolution::Found { artist, matched_by } => {
                assert_eq!(artist.id, 2);
                assert_eq!(matched_by, MatchedBy::Id);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn id_match_preempts_name_match() {
        let artists = vec![artist(1, "KHẢI"), artist(2, "Other")];
        match resolve_artist(2, Some("khải"), &artists) {
            ArtistResolution::Found { artist, matched_by } => {
                assert_eq!(artist.id, 2);
                assert_eq!(matched_by, MatchedBy::Id);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn unknown_id_falls_back_to_name() {
        let artists = vec![artist(5, "Khải")];
        match resolve_artist(UNKNOWN_ARTIST_ID, Some("khải"), &artists) {
            ArtistResolution::Found { artist, matched_by } => {
                assert_eq!(artist.id, 5);
                assert_eq!(matched_by, MatchedBy::Name);
            }
            other => panic!("unexpected resolution: {:?}", other),
        }
    }

    #[test]
    fn unknown_id_never_matches_by_id() {
        let artists = vec![artist(UNKNOWN_ARTIST_ID, "Unknown artist")];
        assert_eq!(
            resolve_artist(UNKNOWN_ARTIST_ID, None, &artists),
            ArtistResolution::Missing
        );
    }

    #[test]
    fn name_must_match_exactly() {
        let artists = vec![artist(5, "Khải Band")];
        assert_eq!(
            resolve_artist(9, Some("khải"), &artists),
            ArtistResolution::Missing
        );
    }
}
