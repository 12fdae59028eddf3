//! Live substring filtering over catalog snapshots

use tokio::sync::watch;

use super::join::join2;
use super::scope::ScreenScope;
use crate::model::{Album, Artist, Genre, SnapshotSubscription, Song};
use crate::view::{ViewState, ViewStatePublisher};

/// Text fields a filter query is matched against
pub trait Searchable {
    fn title(&self) -> &str;

    fn secondary(&self) -> Option<&str> {
        None
    }
}

impl Searchable for Song {
    fn title(&self) -> &str {
        &self.title
    }

    fn secondary(&self) -> Option<&str> {
        Some(&self.artist_name)
    }
}

impl Searchable for Album {
    fn title(&self) -> &str {
        &self.title
    }

    fn secondary(&self) -> Option<&str> {
        Some(&self.artist_name)
    }
}

impl Searchable for Artist {
    fn title(&self) -> &str {
        &self.name
    }
}

impl Searchable for Genre {
    fn title(&self) -> &str {
        &self.name
    }
}

/// Entries whose title or secondary text contains `query`, ignoring case, in
/// snapshot order. An empty query keeps every entry.
pub fn apply<T: Searchable + Clone>(query: &str, snapshot: &[T]) -> Vec<T> {
    if query.is_empty() {
        return snapshot.to_vec();
    }

    let needle = query.to_lowercase();
    snapshot
        .iter()
        .filter(|item| {
            item.title().to_lowercase().contains(&needle)
                || item
                    .secondary()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

/// A query input joined with a snapshot subscription
pub struct FilterEngine<T> {
    query: watch::Sender<String>,
    results: ViewState<Vec<T>>,
}

impl<T> FilterEngine<T>
where
    T: Searchable + Clone + Send + Sync + 'static,
{
    /// Start filtering `source` inside `scope`. Results stay empty until the
    /// first snapshot arrives.
    pub fn start(scope: &ScreenScope, source: SnapshotSubscription<T>) -> Self {
        let (query, query_rx) = watch::channel(String::new());
        let out = ViewStatePublisher::new(Vec::new(), scope);
        let results = out.observe();

        join2(
            scope,
            query_rx,
            source.into_receiver(),
            out,
            |query, snapshot| {
                let snapshot = snapshot.as_ref()?;
                let filtered = apply(query, snapshot);
                tracing::trace!(query = %query, matches = filtered.len(), "Filter applied");
                Some(filtered)
            },
        );

        Self { query, results }
    }

    pub fn set_query(&self, query: impl Into<String>) {
        self.query.send_replace(query.into());
    }

    pub fn query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn results(&self) -> ViewState<Vec<T>> {
        self.results.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SnapshotSource;
    use crate::model::memory_store::fixtures::{artist, song, songs};
    use std::time::Duration;
    use tokio::time::timeout;

    #[test]
    fn empty_query_returns_snapshot_unchanged() {
        let catalog = songs(50);
        assert_eq!(apply("", &catalog), catalog);
    }

    #[test]
    fn matches_title_or_secondary_ignoring_case() {
        let mut first = song(1, "Blue Monday", 1, 1);
        first.artist_name = "New Order".to_string();
        let mut second = song(2, "Ceremony", 2, 2);
        second.artist_name = "Joy Division".to_string();
        let third = song(3, "True Faith", 1, 1);

        let result = apply("ORDER", &[first.clone(), second.clone(), third.clone()]);
        assert_eq!(result, vec![first.clone()]);

        let result = apply("e", &[first.clone(), second.clone(), third.clone()]);
        assert_eq!(result, vec![first, second, third]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let catalog = songs(30);
        for query in ["", "1", "song 2", "artist 3", "zzz"] {
            let once = apply(query, &catalog);
            assert_eq!(apply(query, &once), once);
        }
    }

    #[test]
    fn unicode_names_match_case_insensitively() {
        let artists = vec![artist(1, "Khải"), artist(2, "Other")];
        assert_eq!(apply("KHẢI", &artists), vec![artist(1, "Khải")]);
    }

    #[tokio::test]
    async fn recomputes_on_query_and_snapshot_changes() {
        let scope = ScreenScope::root("songs");
        let source = SnapshotSource::new("songs");
        let engine = FilterEngine::start(&scope, source.subscribe());
        let mut results = engine.results();

        source.publish(songs(12));
        let all = timeout(Duration::from_secs(1), results.wait_for(|r| r.len() == 12))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(all[0].id, 1);

        engine.set_query("song 1");
        // "Song 1", "Song 10", "Song 11", "Song 12"
        timeout(Duration::from_secs(1), results.wait_for(|r| r.len() == 4))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(engine.query(), "song 1");

        source.publish(songs(9));
        let filtered = timeout(Duration::from_secs(1), results.wait_for(|r| r.len() == 1))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(filtered[0].title, "Song 1");
    }
}
