//! Album detail screen

use std::sync::Arc;

use crate::config::ViewConfig;
use crate::controller::{join2, resolve_album, PlaybackController, ScreenScope};
use crate::model::{Album, LibraryStore, PlaybackEngine, Snapshot, Song};

use super::notice::NoticeBoard;
use super::state::{ViewState, ViewStatePublisher};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlbumDetail {
    pub album: Album,
    /// Songs of the album in snapshot order.
    pub tracks: Vec<Song>,
    pub more_by_artist: Vec<Album>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AlbumDetailState {
    /// The album catalog has not been loaded yet.
    #[default]
    Loading,
    Ready(AlbumDetail),
    NotFound,
}

fn album_detail(
    album_id: i64,
    albums: &Option<Snapshot<Album>>,
    songs: &Option<Snapshot<Song>>,
) -> Option<AlbumDetailState> {
    let albums = albums.as_ref().filter(|a| !a.is_empty())?;

    match resolve_album(album_id, albums) {
        Some(resolved) => {
            let tracks = songs
                .as_deref()
                .unwrap_or(&[])
                .iter()
                .filter(|s| s.album_id == album_id)
                .cloned()
                .collect();
            Some(AlbumDetailState::Ready(AlbumDetail {
                album: resolved.album,
                tracks,
                more_by_artist: resolved.more_by_artist,
            }))
        }
        None => {
            tracing::warn!(album_id, albums = albums.len(), "Album not found in library");
            Some(AlbumDetailState::NotFound)
        }
    }
}

pub struct AlbumDetailScreen {
    scope: ScreenScope,
    album_id: i64,
    state: ViewState<AlbumDetailState>,
    playback: PlaybackController,
    notices: NoticeBoard,
}

impl AlbumDetailScreen {
    /// Open the detail page of `album_id`. The album is resolved again on every
    /// album or song snapshot.
    pub fn open(
        store: &dyn LibraryStore,
        engine: Arc<dyn PlaybackEngine>,
        album_id: i64,
        config: &ViewConfig,
        parent: &ScreenScope,
    ) -> Self {
        let scope = parent.child("album_detail");
        let notices = NoticeBoard::new(config.notice_ttl(), &scope);
        let out = ViewStatePublisher::new(AlbumDetailState::Loading, &scope);
        let state = out.observe();

        join2(
            &scope,
            store.albums().into_receiver(),
            store.all_songs().into_receiver(),
            out,
            move |albums, songs| album_detail(album_id, albums, songs),
        );

        tracing::debug!(album_id, "Album detail opened");

        Self {
            playback: PlaybackController::new(engine, notices.clone()),
            scope,
            album_id,
            state,
            notices,
        }
    }

    pub fn album_id(&self) -> i64 {
        self.album_id
    }

    pub fn state(&self) -> ViewState<AlbumDetailState> {
        self.state.clone()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    /// Play the album's tracks starting at `index`.
    pub async fn play_from(&self, index: usize, shuffle: bool) -> bool {
        match self.state.get() {
            AlbumDetailState::Ready(detail) => {
                self.playback.play(detail.tracks, index, shuffle).await
            }
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
