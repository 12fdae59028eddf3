//! View module - screen states published to the presentation layer
//!
//! Each screen owns a scope, starts its subscriptions inside it and exposes
//! last-value-wins states:
//!
//! - `state`: View state publishers and readers
//! - `notice`: Transient notices for failed external operations
//! - `home`: Home sections, suggestion sets and other home lists
//! - `album_detail`: Album page
//! - `artist_detail`: Artist page with artwork updates
//! - `library`: Searchable lists

mod state;
mod notice;
mod home;
mod album_detail;
mod artist_detail;
mod library;

pub use state::{ViewState, ViewStatePublisher};

pub use notice::{Notice, NoticeBoard};

pub use home::HomeScreen;

pub use album_detail::{AlbumDetail, AlbumDetailScreen, AlbumDetailState};

pub use artist_detail::{ArtistDetail, ArtistDetailScreen, ArtistDetailState};

pub use library::LibraryListScreen;
