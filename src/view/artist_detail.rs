//! Artist detail screen.
//!
//! The artist is resolved by id, falling back to its name, on every artist
//! snapshot. While the artist catalog is empty nothing is published; a miss
//! against a non-empty catalog is reported as `NotFound` and the screen keeps
//! listening, since a later snapshot may still contain the artist.

use std::sync::Arc;

use crate::config::ViewConfig;
use crate::controller::{
    join3, resolve_artist, ArtistResolution, MatchedBy, PlaybackController, ScreenScope,
};
use crate::model::{
    Album, Artist, ArtworkUpdate, LibraryStore, PermissionHandle, PlaybackEngine, Snapshot, Song,
};

use super::notice::NoticeBoard;
use super::state::{ViewState, ViewStatePublisher};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub matched_by: MatchedBy,
    pub albums: Vec<Album>,
    pub songs: Vec<Song>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ArtistDetailState {
    #[default]
    Loading,
    Ready(ArtistDetail),
    NotFound,
}

fn artist_detail(
    artist_id: i64,
    artist_name: Option<&str>,
    artists: &Option<Snapshot<Artist>>,
    albums: &Option<Snapshot<Album>>,
    songs: &Option<Snapshot<Song>>,
) -> Option<ArtistDetailState> {
    let artists = artists.as_deref().unwrap_or(&[]);

    match resolve_artist(artist_id, artist_name, artists) {
        ArtistResolution::Deferred => None,
        ArtistResolution::Missing => {
            tracing::warn!(
                artist_id,
                artist_name = artist_name.unwrap_or_default(),
                artists = artists.len(),
                "Artist not found by id or name"
            );
            Some(ArtistDetailState::NotFound)
        }
        ArtistResolution::Found { artist, matched_by } => {
            if matched_by == MatchedBy::Name {
                tracing::debug!(artist_id, resolved_id = artist.id, "Artist resolved by name");
            }
            let albums = albums
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .filter(|a| a.artist_id == artist.id)
                .cloned()
                .collect();
            let songs = songs
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .filter(|s| song_belongs_to(s, &artist))
                .cloned()
                .collect();
            Some(ArtistDetailState::Ready(ArtistDetail {
                artist,
                matched_by,
                albums,
                songs,
            }))
        }
    }
}

/// Songs of an unidentified artist can only be attributed by name.
fn song_belongs_to(song: &Song, artist: &Artist) -> bool {
    if artist.is_unknown() {
        song.artist_name.to_lowercase() == artist.name.to_lowercase()
    } else {
        song.artist_id == artist.id
    }
}

pub struct ArtistDetailScreen {
    scope: ScreenScope,
    store: Arc<dyn LibraryStore>,
    state: ViewState<ArtistDetailState>,
    pending_permission: ViewStatePublisher<Option<PermissionHandle>>,
    playback: PlaybackController,
    notices: NoticeBoard,
}

impl ArtistDetailScreen {
    pub fn open(
        store: Arc<dyn LibraryStore>,
        engine: Arc<dyn PlaybackEngine>,
        artist_id: i64,
        artist_name: Option<String>,
        config: &ViewConfig,
        parent: &ScreenScope,
    ) -> Self {
        let scope = parent.child("artist_detail");
        let notices = NoticeBoard::new(config.notice_ttl(), &scope);
        let out = ViewStatePublisher::new(ArtistDetailState::Loading, &scope);
        let state = out.observe();

        join3(
            &scope,
            store.artists().into_receiver(),
            store.albums().into_receiver(),
            store.all_songs().into_receiver(),
            out,
            move |artists, albums, songs| {
                artist_detail(artist_id, artist_name.as_deref(), artists, albums, songs)
            },
        );

        tracing::debug!(artist_id, "Artist detail opened");

        Self {
            pending_permission: ViewStatePublisher::new(None, &scope),
            playback: PlaybackController::new(engine, notices.clone()),
            scope,
            store,
            state,
            notices,
        }
    }

    pub fn state(&self) -> ViewState<ArtistDetailState> {
        self.state.clone()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Artwork write waiting for the host to obtain a system permission.
    pub fn pending_permission(&self) -> ViewState<Option<PermissionHandle>> {
        self.pending_permission.observe()
    }

    /// Replace the artist's artwork. A permission request is parked until
    /// [`resume_artwork`](Self::resume_artwork); a failure becomes a notice.
    pub async fn update_artwork(&self, artwork: String) -> ArtworkUpdate {
        let artist_id = match self.state.get() {
            ArtistDetailState::Ready(detail) => detail.artist.id,
            _ => {
                let outcome = ArtworkUpdate::Failure("Artist is not available yet".to_string());
                self.handle_artwork_outcome(&outcome);
                return outcome;
            }
        };

        let outcome = self.store.update_artist_artwork(artist_id, artwork).await;
        self.handle_artwork_outcome(&outcome);
        outcome
    }

    /// Continue the parked artwork write once the host answered the permission
    /// prompt. Returns `None` when nothing was pending.
    pub async fn resume_artwork(&self, granted: bool) -> Option<ArtworkUpdate> {
        let handle = self.pending_permission.current()?;
        self.pending_permission.publish(None);

        if !granted {
            tracing::info!(request_id = handle.request_id, "Artwork permission denied");
            return None;
        }

        let outcome = self.store.resume_artwork_update(handle).await;
        self.handle_artwork_outcome(&outcome);
        Some(outcome)
    }

    fn handle_artwork_outcome(&self, outcome: &ArtworkUpdate) {
        match outcome {
            ArtworkUpdate::Success => {
                tracing::info!("Artist artwork saved");
            }
            ArtworkUpdate::PermissionRequired(handle) => {
                tracing::info!(request_id = handle.request_id, "Artwork write needs permission");
                self.pending_permission.publish(Some(handle.clone()));
            }
            ArtworkUpdate::Failure(reason) => {
                tracing::error!(reason = %reason, "Artwork update failed");
                self.notices.post(format!("Could not update artwork: {}", reason));
            }
        }
    }

    pub async fn play_from(&self, index: usize, shuffle: bool) -> bool {
        match self.state.get() {
            ArtistDetailState::Ready(detail) => {
                self.playback.play(detail.songs, index, shuffle).await
            }
            _ => false,
        }
    }

    pub async fn shuffle_all(&self) -> bool {
        match self.state.get() {
            ArtistDetailState::Ready(detail) => self.playback.shuffle_all(detail.songs).await,
            _ => false,
        }
    }

    pub async fn enqueue(&self, song: Song) -> bool {
        self.playback.enqueue(song).await
    }

    pub fn close(&self) {
        self.scope.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::memory_store::fixtures::{album, artist, song};
    use crate::model::{InMemoryLibraryStore, InMemoryPlayback, UNKNOWN_ARTIST_ID};
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(1);

    fn open(
        store: Arc<InMemoryLibraryStore>,
        artist_id: i64,
        name: Option<&str>,
        root: &ScreenScope,
    ) -> ArtistDetailScreen {
        ArtistDetailScreen::open(
            store,
            Arc::new(InMemoryPlayback::new()),
            artist_id,
            name.map(str::to_string),
            &ViewConfig::default(),
            root,
        )
    }

    fn ready(state: &ArtistDetailState) -> Option<&ArtistDetail> {
        match state {
            ArtistDetailState::Ready(detail) => Some(detail),
            _ => None,
        }
    }

    #[tokio::test]
    async fn name_fallback_after_catalog_loads() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        let screen = open(store.clone(), UNKNOWN_ARTIST_ID, Some("khải"), &root);
        let mut state = screen.state();

        store.set_artists(Vec::new());
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(state.get(), ArtistDetailState::Loading);

        store.set_artists(vec![artist(4, "Khải")]);
        let resolved = timeout(WAIT, state.wait_for(|s| ready(s).is_some()))
            .await
            .unwrap()
            .unwrap();
        let detail = ready(&resolved).unwrap();
        assert_eq!(detail.artist.id, 4);
        assert_eq!(detail.matched_by, MatchedBy::Name);
    }

    #[tokio::test]
    async fn id_match_wins_over_name() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        store.set_artists(vec![artist(1, "KHẢI"), artist(2, "Second")]);
        let screen = open(store.clone(), 2, Some("khải"), &root);
        let mut state = screen.state();

        let resolved = timeout(WAIT, state.wait_for(|s| ready(s).is_some()))
            .await
            .unwrap()
            .unwrap();
        let detail = ready(&resolved).unwrap();
        assert_eq!(detail.artist.id, 2);
        assert_eq!(detail.matched_by, MatchedBy::Id);
    }

    #[tokio::test]
    async fn lists_albums_and_songs_of_artist() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        store.set_artists(vec![artist(1, "One"), artist(2, "Two")]);
        store.set_albums(vec![album(1, "A", 1), album(2, "B", 2), album(3, "C", 1)]);
        store
            .set_songs(vec![song(1, "x", 1, 1), song(2, "y", 2, 2), song(3, "z", 1, 3)])
            .await;
        let screen = open(store.clone(), 1, None, &root);
        let mut state = screen.state();

        let resolved = timeout(
            WAIT,
            state.wait_for(|s| ready(s).is_some_and(|d| d.songs.len() == 2)),
        )
        .await
        .unwrap()
        .unwrap();
        let detail = ready(&resolved).unwrap();
        assert_eq!(detail.albums.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(detail.songs.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[tokio::test]
    async fn missing_artist_reports_not_found_and_keeps_waiting() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        let screen = open(store.clone(), 9, Some("Nobody"), &root);
        let mut state = screen.state();

        store.set_artists(vec![artist(1, "One")]);
        timeout(WAIT, state.wait_for(|s| *s == ArtistDetailState::NotFound))
            .await
            .unwrap()
            .unwrap();

        store.set_artists(vec![artist(1, "One"), artist(9, "Nobody")]);
        timeout(WAIT, state.wait_for(|s| ready(s).is_some()))
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn artwork_permission_is_parked_and_resumed() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        store.set_artists(vec![artist(1, "One")]);
        store.revoke_artwork_permission();
        let screen = open(store.clone(), 1, None, &root);
        let mut state = screen.state();
        timeout(WAIT, state.wait_for(|s| ready(s).is_some()))
            .await
            .unwrap()
            .unwrap();

        let outcome = screen.update_artwork("art://one".to_string()).await;
        assert!(matches!(outcome, ArtworkUpdate::PermissionRequired(_)));
        assert!(screen.pending_permission().get().is_some());

        store.grant_artwork_permission();
        assert_eq!(screen.resume_artwork(true).await, Some(ArtworkUpdate::Success));
        assert!(screen.pending_permission().get().is_none());

        let updated = timeout(
            WAIT,
            state.wait_for(|s| ready(s).is_some_and(|d| d.artist.artwork.is_some())),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(
            ready(&updated).unwrap().artist.artwork.as_deref(),
            Some("art://one")
        );
    }

    #[tokio::test]
    async fn denied_permission_drops_pending_write() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        store.set_artists(vec![artist(1, "One")]);
        store.revoke_artwork_permission();
        let screen = open(store.clone(), 1, None, &root);
        let mut state = screen.state();
        timeout(WAIT, state.wait_for(|s| ready(s).is_some()))
            .await
            .unwrap()
            .unwrap();

        screen.update_artwork("art://one".to_string()).await;
        assert_eq!(screen.resume_artwork(false).await, None);
        assert!(screen.pending_permission().get().is_none());
        assert_eq!(screen.resume_artwork(true).await, None);
    }

    #[tokio::test]
    async fn artwork_before_resolution_posts_notice() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        let screen = open(store, 1, None, &root);

        let outcome = screen.update_artwork("art://one".to_string()).await;
        assert!(matches!(outcome, ArtworkUpdate::Failure(_)));
        assert!(screen.notices().current().is_some());
    }

    #[tokio::test]
    async fn unknown_artist_songs_match_by_name() {
        let root = ScreenScope::root("app");
        let store = Arc::new(InMemoryLibraryStore::new());
        store.set_artists(vec![artist(UNKNOWN_ARTIST_ID, "Street Band")]);
        let mut busker = song(1, "Live", UNKNOWN_ARTIST_ID, 1);
        busker.artist_name = "street band".to_string();
        store.set_songs(vec![busker, song(2, "Other", 3, 1)]).await;
        let screen = open(store.clone(), UNKNOWN_ARTIST_ID, Some("Street Band"), &root);
        let mut state = screen.state();

        let resolved = timeout(
            WAIT,
            state.wait_for(|s| ready(s).is_some_and(|d| !d.songs.is_empty())),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(ready(&resolved).unwrap().songs[0].id, 1);
    }
}
