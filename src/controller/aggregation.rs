//! Home sections built from albums, artists, recently played and top tracks

use tokio::task::JoinHandle;

use super::join::join4;
use super::scope::ScreenScope;
use crate::model::{
    Album, Artist, HomeSection, SectionItems, SectionKind, Snapshot, SnapshotSubscription, Song,
};
use crate::view::ViewStatePublisher;

/// Build home sections in fixed order: albums, artists, recently played, top tracks.
///
/// Each section keeps the first `limit` entries of its source; an empty source
/// produces no section at all.
pub fn build_home_sections(
    albums: &[Album],
    artists: &[Artist],
    recently_played: &[Song],
    top_tracks: &[Song],
    limit: usize,
) -> Vec<HomeSection> {
    let candidates = [
        (
            SectionKind::Albums,
            SectionItems::Albums(albums.iter().take(limit).cloned().collect()),
        ),
        (
            SectionKind::Artists,
            SectionItems::Artists(artists.iter().take(limit).cloned().collect()),
        ),
        (
            SectionKind::RecentlyPlayed,
            SectionItems::Songs(recently_played.iter().take(limit).cloned().collect()),
        ),
        (
            SectionKind::TopTracks,
            SectionItems::Songs(top_tracks.iter().take(limit).cloned().collect()),
        ),
    ];

    candidates
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .map(|(kind, items)| HomeSection {
            kind,
            title_key: kind.title_key(),
            items,
        })
        .collect()
}

/// Sources feeding the home sections
pub struct HomeSources {
    pub albums: SnapshotSubscription<Album>,
    pub artists: SnapshotSubscription<Artist>,
    pub recently_played: SnapshotSubscription<Song>,
    pub top_tracks: SnapshotSubscription<Song>,
}

fn items<T>(slot: &Option<Snapshot<T>>) -> &[T] {
    slot.as_deref().unwrap_or(&[])
}

/// Keep `out` in sync with the latest value of every source. A source that has
/// not produced a snapshot yet counts as empty.
pub fn spawn_home_sections(
    scope: &ScreenScope,
    sources: HomeSources,
    limit: usize,
    out: ViewStatePublisher<Vec<HomeSection>>,
) -> JoinHandle<()> {
    join4(
        scope,
        sources.albums.into_receiver(),
        sources.artists.into_receiver(),
        sources.recently_played.into_receiver(),
        sources.top_tracks.into_receiver(),
        out,
        move |albums, artists, recent, top| {
            let sections = build_home_sections(
                items(albums),
                items(artists),
                items(recent),
                items(top),
                limit,
            );
            tracing::debug!(sections = sections.len(), "Home sections recomputed");
            Some(sections)
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SnapshotSource;
    use crate::model::memory_store::fixtures::{album, artist, songs};
    use std::time::Duration;
    use tokio::time::timeout;

    fn albums(count: i64) -> Vec<Album> {
        (1..=count)
            .map(|id| album(id, &format!("Album {}", id), id % 4))
            .collect()
    }

    fn artists(count: i64) -> Vec<Artist> {
        (1..=count)
            .map(|id| artist(id, &format!("Artist {}", id)))
            .collect()
    }

    #[test]
    fn twelve_albums_and_three_artists() {
        let sections = build_home_sections(&albums(12), &artists(3), &[], &[], 10);
        assert_eq!(sections.len(), 2);

        assert_eq!(sections[0].kind, SectionKind::Albums);
        match &sections[0].items {
            SectionItems::Albums(items) => {
                let ids: Vec<i64> = items.iter().map(|a| a.id).collect();
                assert_eq!(ids, (1..=10).collect::<Vec<_>>());
            }
            other => panic!("unexpected items: {:?}", other),
        }

        assert_eq!(sections[1].kind, SectionKind::Artists);
        assert_eq!(sections[1].items.len(), 3);
        assert_eq!(sections[1].title_key, "home.artists");
    }

    #[test]
    fn empty_sources_produce_no_sections() {
        assert!(build_home_sections(&[], &[], &[], &[], 10).is_empty());
    }

    #[test]
    fn never_emits_empty_section() {
        let catalog = songs(3);
        let sections = build_home_sections(&[], &artists(2), &[], &catalog, 10);
        assert_eq!(sections.len(), 2);
        assert!(sections.iter().all(|s| !s.items.is_empty()));
        assert_eq!(sections[1].kind, SectionKind::TopTracks);
    }

    #[tokio::test]
    async fn artist_update_keeps_album_section() {
        let scope = ScreenScope::root("home");
        let album_source = SnapshotSource::new("albums");
        let artist_source = SnapshotSource::new("artists");
        let recent_source = SnapshotSource::new("recent");
        let top_source = SnapshotSource::new("top");
        let out = ViewStatePublisher::new(Vec::new(), &scope);
        let mut reader = out.observe();

        spawn_home_sections(
            &scope,
            HomeSources {
                albums: album_source.subscribe(),
                artists: artist_source.subscribe(),
                recently_played: recent_source.subscribe(),
                top_tracks: top_source.subscribe(),
            },
            10,
            out,
        );

        album_source.publish(albums(2));
        let sections = timeout(Duration::from_secs(1), reader.wait_for(|s| s.len() == 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sections[0].kind, SectionKind::Albums);

        artist_source.publish(artists(1));
        let sections = timeout(Duration::from_secs(1), reader.wait_for(|s| s.len() == 2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sections[0].kind, SectionKind::Albums);
        assert_eq!(sections[1].kind, SectionKind::Artists);

        artist_source.publish(Vec::new());
        let sections = timeout(Duration::from_secs(1), reader.wait_for(|s| s.len() == 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(sections[0].kind, SectionKind::Albums);
    }
}
