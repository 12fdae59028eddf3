//! Reactive view-state layer of a local music library browser.
//!
//! Catalog categories arrive from a [`LibraryStore`](model::LibraryStore) as whole
//! snapshots. Screens in [`view`] combine them through the engines in
//! [`controller`] into last-value-wins states for the presentation layer.

pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod view;

pub use config::ViewConfig;
pub use error::{LibraryError, Result};
