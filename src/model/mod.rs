//! Model module - catalog data and the contracts of external collaborators
//!
//! - `types`: Catalog entities and home-section types
//! - `snapshot`: Snapshot sources and subscriptions (the data source adapter)
//! - `store`: Library store contract
//! - `playback`: Playback engine contract and transport flags
//! - `memory_store`: In-memory store and playback engine

mod types;
mod snapshot;
mod store;
mod playback;
pub(crate) mod memory_store;

pub use types::{
    Album, Artist, Genre, HomeSection, SectionItems, SectionKind, Song, UNKNOWN_ARTIST_ID,
};

pub use snapshot::{Snapshot, SnapshotSource, SnapshotSubscription};

pub use store::{ArtworkUpdate, LibraryStore, PermissionHandle};

pub use playback::{PlaybackEngine, TransportState};

pub use memory_store::{CatalogFile, InMemoryLibraryStore, InMemoryPlayback};
