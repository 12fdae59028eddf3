//! Searchable library lists (songs, albums, artists, genres, favorites)

use crate::controller::{FilterEngine, ScreenScope, Searchable};
use crate::model::{Album, Artist, Genre, LibraryStore, SnapshotSubscription, Song};

use super::state::ViewState;

pub struct LibraryListScreen<T> {
    scope: ScreenScope,
    filter: FilterEngine<T>,
}

impl<T> LibraryListScreen<T>
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    pub fn open(name: &'static str, source: SnapshotSubscription<T>, parent: &ScreenScope) -> Self {
        let scope = parent.child(name);
        let filter = FilterEngine::start(&scope, source);
        tracing::debug!(list = name, "Library list opened");
        Self { scope, filter }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn clear_query(&self) {
        self.filter.set_query(String::new());
    }

    pub fn query(&self) -> String {
        self.filter.query()
    }

    pub fn results(&self) -> ViewState<Vec<T>> {
        self.filter.results()
    }

    pub fn close(&self) {
        self.scope.close();
    }
}

impl LibraryListScreen<Song> {
    pub fn songs(store: &dyn LibraryStore, parent: &ScreenScope) -> Self {
        Self::open("songs", store.all_songs(), parent)
    }

    pub fn favorites(store: &dyn LibraryStore, parent: &ScreenScope) -> Self {
        Self::open("favorites", store.favorite_songs(), parent)
    }
}

impl LibraryListScreen<Album> {
    pub fn albums(store: &dyn LibraryStore, parent: &ScreenScope) -> Self {
        Self::open("albums", store.albums(), parent)
    }
}

impl LibraryListScreen<Artist> {
    pub fn artists(store: &dyn LibraryStore, parent: &ScreenScope) -> Self {
        Self::open("artists", store.artists(), parent)
    }
}

impl LibraryListScreen<Genre> {
    pub fn genres(store: &dyn LibraryStore, parent: &ScreenScope) -> Self {
        Self::open("genres", store.genres(), parent)
    }
}
