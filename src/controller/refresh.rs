//! Explicitly triggered recomputation of pull-based home states.
//!
//! Every operation pulls one snapshot, computes the new value and publishes it
//! exactly once. Calls for the same state are serialized; the previous value
//! stays visible until the new one is published. A pull still in flight when
//! the scope closes returns `None` and publishes nothing.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use super::scope::ScreenScope;
use super::suggestions::SuggestionGenerator;
use crate::config::ViewConfig;
use crate::error::Result;
use crate::model::{LibraryStore, Snapshot, SnapshotSubscription, Song};
use crate::view::{ViewState, ViewStatePublisher};

/// A published state and the gate serializing its recomputations
struct RefreshTarget<T> {
    label: &'static str,
    publisher: ViewStatePublisher<T>,
    gate: Mutex<()>,
}

impl<T: Clone + Send + Sync + 'static> RefreshTarget<T> {
    fn new(label: &'static str, initial: T, scope: &ScreenScope) -> Self {
        Self {
            label,
            publisher: ViewStatePublisher::new(initial, scope),
            gate: Mutex::new(()),
        }
    }

    fn publish(&self, value: T) -> Option<T> {
        if self.publisher.publish(value.clone()) {
            tracing::debug!(state = self.label, "Refreshed state published");
            Some(value)
        } else {
            tracing::debug!(state = self.label, "Scope closed, refresh dropped");
            None
        }
    }
}

pub struct RefreshCoordinator {
    store: Arc<dyn LibraryStore>,
    generator: SuggestionGenerator,
    last_added_limit: usize,
    grid_size: usize,
    mix_size: usize,
    scope: CancellationToken,
    favorites: RefreshTarget<Vec<Song>>,
    last_added: RefreshTarget<Vec<Song>>,
    top_tracks: RefreshTarget<Vec<Song>>,
    suggestions: RefreshTarget<Vec<Song>>,
    smart_mix: RefreshTarget<Vec<Song>>,
}

impl RefreshCoordinator {
    pub fn new(store: Arc<dyn LibraryStore>, config: &ViewConfig, scope: &ScreenScope) -> Self {
        Self {
            store,
            generator: SuggestionGenerator::new(config.rng_seed),
            last_added_limit: config.last_added_limit,
            grid_size: config.grid_suggestion_size,
            mix_size: config.smart_mix_size,
            scope: scope.token(),
            favorites: RefreshTarget::new("favorites", Vec::new(), scope),
            last_added: RefreshTarget::new("last_added", Vec::new(), scope),
            top_tracks: RefreshTarget::new("top_tracks", Vec::new(), scope),
            suggestions: RefreshTarget::new("suggestions", Vec::new(), scope),
            smart_mix: RefreshTarget::new("smart_mix", Vec::new(), scope),
        }
    }

    pub fn favorites(&self) -> ViewState<Vec<Song>> {
        self.favorites.publisher.observe()
    }

    pub fn last_added(&self) -> ViewState<Vec<Song>> {
        self.last_added.publisher.observe()
    }

    pub fn top_tracks(&self) -> ViewState<Vec<Song>> {
        self.top_tracks.publisher.observe()
    }

    pub fn suggestions(&self) -> ViewState<Vec<Song>> {
        self.suggestions.publisher.observe()
    }

    pub fn smart_mix(&self) -> ViewState<Vec<Song>> {
        self.smart_mix.publisher.observe()
    }

    async fn pull<T: Send + Sync + 'static>(
        &self,
        mut source: SnapshotSubscription<T>,
    ) -> Option<Snapshot<T>> {
        tokio::select! {
            _ = self.scope.cancelled() => None,
            snapshot = source.first() => snapshot,
        }
    }

    pub async fn refresh_favorites(&self) -> Option<Vec<Song>> {
        let _gate = self.favorites.gate.lock().await;
        let snapshot = self.pull(self.store.favorite_songs()).await?;
        self.favorites.publish(snapshot.to_vec())
    }

    /// Newest songs first, capped to the configured limit.
    pub async fn refresh_last_added(&self) -> Option<Vec<Song>> {
        let _gate = self.last_added.gate.lock().await;
        let snapshot = self.pull(self.store.all_songs()).await?;
        self.last_added
            .publish(newest_first(&snapshot, self.last_added_limit))
    }

    pub async fn refresh_top_tracks(&self) -> Option<Vec<Song>> {
        let _gate = self.top_tracks.gate.lock().await;
        let snapshot = self.pull(self.store.top_tracks()).await?;
        self.top_tracks.publish(snapshot.to_vec())
    }

    /// Draw a new grid suggestion set.
    pub async fn refresh_suggestions(&self) -> Option<Vec<Song>> {
        let _gate = self.suggestions.gate.lock().await;
        let snapshot = self.pull(self.store.all_songs()).await?;
        let picked = self.generator.generate(self.grid_size, &snapshot).await;
        self.suggestions.publish(picked)
    }

    /// Draw a new smart mix.
    pub async fn refresh_smart_mix(&self) -> Option<Vec<Song>> {
        let _gate = self.smart_mix.gate.lock().await;
        let snapshot = self.pull(self.store.all_songs()).await?;
        let picked = self.generator.generate(self.mix_size, &snapshot).await;
        self.smart_mix.publish(picked)
    }

    pub async fn refresh_all(&self) {
        tracing::debug!("Refreshing all pull-based states");
        tokio::join!(
            self.refresh_favorites(),
            self.refresh_last_added(),
            self.refresh_top_tracks(),
            self.refresh_suggestions(),
            self.refresh_smart_mix(),
        );
    }

    /// Re-read the media source and hand the result to the store. The store then
    /// pushes fresh snapshots to every subscriber. Returns the number of songs saved.
    pub async fn rescan_library(&self) -> Result<usize> {
        tracing::info!("Rescanning library source");
        let songs = self.store.load_from_source().await;
        crate::log_store_result!("load_from_source", songs);
        let songs = songs?;

        let count = songs.len();
        let saved = self.store.save_songs(songs).await;
        crate::log_store_result!("save_songs", saved);
        saved?;

        tracing::info!(count, "Library rescan saved");
        Ok(count)
    }
}

fn newest_first(songs: &[Song], limit: usize) -> Vec<Song> {
    let mut sorted = songs.to_vec();
    sorted.sort_by(|a, b| b.date_added.cmp(&a.date_added));
    sorted.truncate(limit);
    sorted
}
