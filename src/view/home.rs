//! Home screen: pushed home sections plus pull-based lists refreshed on demand

use std::sync::Arc;

use crate::config::ViewConfig;
use crate::controller::{
    spawn_home_sections, HomeSources, PlaybackController, RefreshCoordinator, ScreenScope,
};
use crate::model::{HomeSection, LibraryStore, PlaybackEngine, Song};

use super::notice::NoticeBoard;
use super::state::{ViewState, ViewStatePublisher};

pub struct HomeScreen {
    scope: ScreenScope,
    sections: ViewState<Vec<HomeSection>>,
    refresh: Arc<RefreshCoordinator>,
    playback: PlaybackController,
    notices: NoticeBoard,
    grid_columns: usize,
}

impl HomeScreen {
    /// Open the home screen. Home sections follow the store from now on; the
    /// favorites, last-added, top-tracks and suggestion lists are computed once
    /// here and afterwards only on the matching `refresh_*` call.
    pub fn open(
        store: Arc<dyn LibraryStore>,
        engine: Arc<dyn PlaybackEngine>,
        config: &ViewConfig,
        parent: &ScreenScope,
    ) -> Self {
        let scope = parent.child("home");
        let notices = NoticeBoard::new(config.notice_ttl(), &scope);

        let sections_out = ViewStatePublisher::new(Vec::new(), &scope);
        let sections = sections_out.observe();
        spawn_home_sections(
            &scope,
            HomeSources {
                albums: store.albums(),
                artists: store.artists(),
                recently_played: store.recently_played(),
                top_tracks: store.top_tracks(),
            },
            config.home_section_limit,
            sections_out,
        );

        let refresh = Arc::new(RefreshCoordinator::new(store, config, &scope));
        let initial = refresh.clone();
        scope.spawn(async move {
            initial.refresh_all().await;
        });

        tracing::info!("Home screen opened");

        Self {
            playback: PlaybackController::new(engine, notices.clone()),
            scope,
            sections,
            refresh,
            notices,
            grid_columns: config.grid_columns,
        }
    }

    pub fn sections(&self) -> ViewState<Vec<HomeSection>> {
        self.sections.clone()
    }

    pub fn favorites(&self) -> ViewState<Vec<Song>> {
        self.refresh.favorites()
    }

    pub fn last_added(&self) -> ViewState<Vec<Song>> {
        self.refresh.last_added()
    }

    pub fn top_tracks(&self) -> ViewState<Vec<Song>> {
        self.refresh.top_tracks()
    }

    pub fn suggestions(&self) -> ViewState<Vec<Song>> {
        self.refresh.suggestions()
    }

    pub fn smart_mix(&self) -> ViewState<Vec<Song>> {
        self.refresh.smart_mix()
    }

    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub fn grid_columns(&self) -> usize {
        self.grid_columns
    }

    pub async fn refresh_favorites(&self) -> Option<Vec<Song>> {
        self.refresh.refresh_favorites().await
    }

    pub async fn refresh_last_added(&self) -> Option<Vec<Song>> {
        self.refresh.refresh_last_added().await
    }

    pub async fn refresh_top_tracks(&self) -> Option<Vec<Song>> {
        self.refresh.refresh_top_tracks().await
    }

    pub async fn refresh_suggestions(&self) -> Option<Vec<Song>> {
        self.refresh.refresh_suggestions().await
    }

    pub async fn refresh_smart_mix(&self) -> Option<Vec<Song>> {
        self.refresh.refresh_smart_mix().await
    }

    /// Rescan the media source. Failures are shown as a notice.
    pub async fn rescan(&self) -> Option<usize> {
        match self.refresh.rescan_library().await {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::error!(error = %e, "Library rescan failed");
                self.notices.post(format!("Library scan failed: {}", e));
                None
            }
        }
    }

    pub async fn play_smart_mix(&self) -> bool {
        let mix = self.refresh.smart_mix().get();
        self.playback.play(mix, 0, false).await
    }

    /// Play a list shown on the home screen starting at `index`.
    pub async fn play_from(&self, songs: Vec<Song>, index: usize) -> bool {
        self.playback.play(songs, index, false).await
    }

    pub async fn enqueue(&self, song: Song) -> bool {
        self.playback.enqueue(song).await
    }

    pub fn close(&self) {
        self.scope.close();
    }
}
