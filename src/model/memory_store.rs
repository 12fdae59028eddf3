//! In-memory library store and playback engine.
//!
//! Used by the `library-view` binary (catalog loaded from a JSON file) and by tests.
//! Favorites, top tracks and recently played are derived from the song list each
//! time it changes, the same way a persistent store would refresh its queries.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::playback::PlaybackEngine;
use super::snapshot::{SnapshotSource, SnapshotSubscription};
use super::store::{ArtworkUpdate, LibraryStore, PermissionHandle};
use super::types::{Album, Artist, Genre, Song};
use crate::error::{LibraryError, Result};

/// On-disk catalog format read by [`InMemoryLibraryStore::load_catalog_file`]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default)]
    pub albums: Vec<Album>,
    #[serde(default)]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub genres: Vec<Genre>,
}

pub struct InMemoryLibraryStore {
    songs: SnapshotSource<Song>,
    albums: SnapshotSource<Album>,
    artists: SnapshotSource<Artist>,
    genres: SnapshotSource<Genre>,
    favorites: SnapshotSource<Song>,
    recently_played: SnapshotSource<Song>,
    top_tracks: SnapshotSource<Song>,
    /// Raw media source returned by `load_from_source`; `None` when no source is mounted.
    source: RwLock<Option<Vec<Song>>>,
    /// Song ids, most recent play first.
    history: RwLock<Vec<i64>>,
    artwork_permission: AtomicBool,
    next_request_id: AtomicU64,
}

impl InMemoryLibraryStore {
    /// A store that has not produced any snapshot yet.
    pub fn new() -> Self {
        Self {
            songs: SnapshotSource::new("songs"),
            albums: SnapshotSource::new("albums"),
            artists: SnapshotSource::new("artists"),
            genres: SnapshotSource::new("genres"),
            favorites: SnapshotSource::new("favorites"),
            recently_played: SnapshotSource::new("recently_played"),
            top_tracks: SnapshotSource::new("top_tracks"),
            source: RwLock::new(None),
            history: RwLock::new(Vec::new()),
            artwork_permission: AtomicBool::new(true),
            next_request_id: AtomicU64::new(1),
        }
    }

    pub async fn from_catalog(catalog: CatalogFile) -> Self {
        let store = Self::new();
        store.set_source(catalog.songs.clone()).await;
        store.set_albums(catalog.albums);
        store.set_artists(catalog.artists);
        store.set_genres(catalog.genres);
        store.set_songs(catalog.songs).await;
        store
    }

    pub async fn load_catalog_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let catalog: CatalogFile = serde_json::from_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            songs = catalog.songs.len(),
            albums = catalog.albums.len(),
            artists = catalog.artists.len(),
            genres = catalog.genres.len(),
            "Catalog file loaded"
        );
        Ok(Self::from_catalog(catalog).await)
    }

    /// Replace the song list and every query derived from it.
    pub async fn set_songs(&self, songs: Vec<Song>) {
        let history = self.history.read().await;
        self.publish_songs(songs, &history);
    }

    pub fn set_albums(&self, albums: Vec<Album>) {
        self.albums.publish(albums);
    }

    pub fn set_artists(&self, artists: Vec<Artist>) {
        self.artists.publish(artists);
    }

    pub fn set_genres(&self, genres: Vec<Genre>) {
        self.genres.publish(genres);
    }

    pub async fn set_source(&self, songs: Vec<Song>) {
        *self.source.write().await = Some(songs);
    }

    /// Count a play and move the song to the front of the history.
    pub async fn record_play(&self, song_id: i64) {
        let mut history = self.history.write().await;
        history.retain(|id| *id != song_id);
        history.insert(0, song_id);

        let mut songs = self.songs.latest().map(|s| s.to_vec()).unwrap_or_default();
        if let Some(song) = songs.iter_mut().find(|s| s.id == song_id) {
            song.play_count += 1;
        }
        self.publish_songs(songs, &history);
    }

    pub fn grant_artwork_permission(&self) {
        self.artwork_permission.store(true, Ordering::SeqCst);
    }

    pub fn revoke_artwork_permission(&self) {
        self.artwork_permission.store(false, Ordering::SeqCst);
    }

    fn publish_songs(&self, songs: Vec<Song>, history: &[i64]) {
        let favorites: Vec<Song> = songs.iter().filter(|s| s.favorite).cloned().collect();

        let mut top: Vec<Song> = songs.iter().filter(|s| s.play_count > 0).cloned().collect();
        top.sort_by(|a, b| b.play_count.cmp(&a.play_count));

        let recent: Vec<Song> = history
            .iter()
            .filter_map(|id| songs.iter().find(|s| s.id == *id).cloned())
            .collect();

        tracing::debug!(
            songs = songs.len(),
            favorites = favorites.len(),
            top_tracks = top.len(),
            recently_played = recent.len(),
            "Song queries refreshed"
        );

        self.favorites.publish(favorites);
        self.top_tracks.publish(top);
        self.recently_played.publish(recent);
        self.songs.publish(songs);
    }

    fn write_artwork(&self, artist_id: i64, artwork: String) -> ArtworkUpdate {
        let mut artists = self.artists.latest().map(|s| s.to_vec()).unwrap_or_default();
        match artists.iter_mut().find(|a| a.id == artist_id) {
            Some(artist) => {
                artist.artwork = Some(artwork);
                self.artists.publish(artists);
                tracing::info!(artist_id, "Artist artwork updated");
                ArtworkUpdate::Success
            }
            None => {
                tracing::warn!(artist_id, "Artwork update for unknown artist");
                ArtworkUpdate::Failure(format!("Artist {} is not in the library", artist_id))
            }
        }
    }
}

impl Default for InMemoryLibraryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LibraryStore for InMemoryLibraryStore {
    fn all_songs(&self) -> SnapshotSubscription<Song> {
        self.songs.subscribe()
    }

    fn albums(&self) -> SnapshotSubscription<Album> {
        self.albums.subscribe()
    }

    fn artists(&self) -> SnapshotSubscription<Artist> {
        self.artists.subscribe()
    }

    fn genres(&self) -> SnapshotSubscription<Genre> {
        self.genres.subscribe()
    }

    fn favorite_songs(&self) -> SnapshotSubscription<Song> {
        self.favorites.subscribe()
    }

    fn recently_played(&self) -> SnapshotSubscription<Song> {
        self.recently_played.subscribe()
    }

    fn top_tracks(&self) -> SnapshotSubscription<Song> {
        self.top_tracks.subscribe()
    }

    async fn load_from_source(&self) -> Result<Vec<Song>> {
        self.source
            .read()
            .await
            .clone()
            .ok_or_else(|| LibraryError::SourceUnavailable("no media source mounted".to_string()))
    }

    async fn save_songs(&self, songs: Vec<Song>) -> Result<()> {
        tracing::info!(count = songs.len(), "Saving songs");
        self.set_songs(songs).await;
        Ok(())
    }

    async fn update_artist_artwork(&self, artist_id: i64, artwork: String) -> ArtworkUpdate {
        if !self.artwork_permission.load(Ordering::SeqCst) {
            let request_id = self.next_request_id.fetch_add(1, Ordering::SeqCst);
            tracing::debug!(artist_id, request_id, "Artwork write needs permission");
            return ArtworkUpdate::PermissionRequired(PermissionHandle {
                request_id,
                artist_id,
                artwork,
            });
        }
        self.write_artwork(artist_id, artwork)
    }

    async fn resume_artwork_update(&self, handle: PermissionHandle) -> ArtworkUpdate {
        if !self.artwork_permission.load(Ordering::SeqCst) {
            return ArtworkUpdate::PermissionRequired(handle);
        }
        self.write_artwork(handle.artist_id, handle.artwork)
    }
}

#[derive(Default)]
struct QueueState {
    queue: Vec<Song>,
    current: Option<i64>,
    playing: bool,
}

/// Playback engine that only keeps the queue in memory
#[derive(Default)]
pub struct InMemoryPlayback {
    state: Mutex<QueueState>,
}

impl InMemoryPlayback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> Vec<Song> {
        self.lock().queue.clone()
    }

    pub fn stop(&self) {
        self.lock().playing = false;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PlaybackEngine for InMemoryPlayback {
    async fn play_songs(
        &self,
        mut songs: Vec<Song>,
        start_index: usize,
        shuffle: bool,
    ) -> Result<()> {
        if start_index >= songs.len() {
            return Err(LibraryError::Playback(format!(
                "start index {} out of range for {} songs",
                start_index,
                songs.len()
            )));
        }

        let start = if shuffle {
            // The chosen song plays first, the rest follow in random order.
            let first = songs.remove(start_index);
            songs.shuffle(&mut rand::rng());
            songs.insert(0, first);
            0
        } else {
            start_index
        };

        let mut state = self.lock();
        state.current = Some(songs[start].id);
        state.queue = songs;
        state.playing = true;
        tracing::info!(queue = state.queue.len(), shuffle, "Playback started");
        Ok(())
    }

    async fn enqueue_song(&self, song: Song) -> Result<()> {
        let mut state = self.lock();
        tracing::debug!(song_id = song.id, "Song enqueued");
        state.queue.push(song);
        Ok(())
    }

    fn is_playing(&self) -> bool {
        self.lock().playing
    }

    fn current_item_id(&self) -> Option<i64> {
        self.lock().current
    }
}
