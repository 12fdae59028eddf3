//! Contract of the library store the view layer reads from

use async_trait::async_trait;

use super::snapshot::SnapshotSubscription;
use super::types::{Album, Artist, Genre, Song};
use crate::error::Result;

/// Opaque handle the host uses to resume an operation after granting a permission
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermissionHandle {
    pub request_id: u64,
    pub artist_id: i64,
    pub artwork: String,
}

/// Outcome of an artwork write
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArtworkUpdate {
    Success,
    /// The write needs a system permission; the operation is deferred, not failed.
    PermissionRequired(PermissionHandle),
    Failure(String),
}

/// Persistent catalog owned outside of the view layer.
///
/// Read streams deliver whole snapshots; the store replaces them after every
/// scan, save or artwork change.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    fn all_songs(&self) -> SnapshotSubscription<Song>;

    fn albums(&self) -> SnapshotSubscription<Album>;

    fn artists(&self) -> SnapshotSubscription<Artist>;

    fn genres(&self) -> SnapshotSubscription<Genre>;

    fn favorite_songs(&self) -> SnapshotSubscription<Song>;

    /// Most recently played first.
    fn recently_played(&self) -> SnapshotSubscription<Song>;

    /// Highest play count first.
    fn top_tracks(&self) -> SnapshotSubscription<Song>;

    /// Enumerate the raw media source.
    async fn load_from_source(&self) -> Result<Vec<Song>>;

    async fn save_songs(&self, songs: Vec<Song>) -> Result<()>;

    async fn update_artist_artwork(&self, artist_id: i64, artwork: String) -> ArtworkUpdate;

    /// Retry a deferred artwork write once the host has obtained the permission.
    async fn resume_artwork_update(&self, handle: PermissionHandle) -> ArtworkUpdate;
}
