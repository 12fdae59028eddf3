//! Controller module - derivation engines and screen coordination
//!
//! This module turns catalog snapshots into screen states. It is organized into
//! submodules by responsibility:
//!
//! - `scope`: Screen-scoped cancellation of every task a screen starts
//! - `join`: Fan-in join nodes recomputing on any input change
//! - `resolver`: Album and artist resolution with name fallback
//! - `aggregation`: Home sections built from several catalog sources
//! - `suggestions`: Random suggestion sets
//! - `filter`: Live substring filtering
//! - `refresh`: Explicitly triggered one-shot recomputation
//! - `playback`: Play and enqueue requests

mod scope;
mod join;
mod resolver;
mod aggregation;
mod suggestions;
mod filter;
mod refresh;
mod playback;

pub use scope::ScreenScope;

pub use join::{join2, join3, join4};

pub use resolver::{
    resolve_album, resolve_artist, ArtistResolution, MatchedBy, ResolvedAlbum,
};

pub use aggregation::{build_home_sections, spawn_home_sections, HomeSources};

pub use suggestions::{sample, SuggestionGenerator};

pub use filter::{apply as apply_filter, FilterEngine, Searchable};

pub use refresh::RefreshCoordinator;

pub use playback::PlaybackController;
