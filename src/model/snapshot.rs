//! Snapshot streams bridging the library store to the derived view states.
//!
//! Every catalog category is exposed as a [`SnapshotSource`] (one writer, owned by
//! the store) and any number of [`SnapshotSubscription`]s. A subscription sees the
//! current snapshot as soon as it is known and every later one after it; a reader
//! that falls behind only observes the latest snapshot.

use std::ops::Deref;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// An immutable, wholesale-replaced view of one catalog category
#[derive(Debug)]
pub struct Snapshot<T> {
    items: Arc<[T]>,
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Snapshot<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> From<Vec<T>> for Snapshot<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

/// Writer side of a catalog category. `None` means "not produced yet".
pub struct SnapshotSource<T> {
    tx: watch::Sender<Option<Snapshot<T>>>,
    category: &'static str,
}

impl<T: Send + Sync + 'static> SnapshotSource<T> {
    pub fn new(category: &'static str) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx, category }
    }

    /// Replace the category with a new snapshot and notify every subscriber.
    pub fn publish(&self, items: Vec<T>) {
        let count = items.len();
        self.tx.send_replace(Some(Snapshot::new(items)));
        tracing::trace!(category = self.category, count, "Snapshot published");
    }

    pub fn subscribe(&self) -> SnapshotSubscription<T> {
        SnapshotSubscription {
            rx: self.tx.subscribe(),
            primed: false,
        }
    }

    pub fn latest(&self) -> Option<Snapshot<T>> {
        self.tx.borrow().clone()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Reader side of a catalog category
pub struct SnapshotSubscription<T> {
    rx: watch::Receiver<Option<Snapshot<T>>>,
    primed: bool,
}

impl<T> Clone for SnapshotSubscription<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
            primed: self.primed,
        }
    }
}

impl<T: Send + Sync + 'static> SnapshotSubscription<T> {
    /// Latest known snapshot without waiting.
    pub fn latest(&self) -> Option<Snapshot<T>> {
        self.rx.borrow().clone()
    }

    /// Next snapshot for this subscriber. The first call returns the current
    /// snapshot immediately if one is known. Returns `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Snapshot<T>> {
        if !self.primed {
            self.primed = true;
            if let Some(snapshot) = self.rx.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
        loop {
            self.rx.changed().await.ok()?;
            if let Some(snapshot) = self.rx.borrow_and_update().clone() {
                return Some(snapshot);
            }
        }
    }

    /// Wait for the first known snapshot (a one-shot pull).
    pub async fn first(&mut self) -> Option<Snapshot<T>> {
        let current = self.rx.wait_for(Option::is_some).await.ok()?;
        current.clone()
    }

    /// Every snapshot from now on as a stream, starting with the current one if known.
    pub fn into_stream(self) -> impl Stream<Item = Snapshot<T>> {
        WatchStream::new(self.rx).filter_map(|snapshot| async move { snapshot })
    }

    pub(crate) fn into_receiver(self) -> watch::Receiver<Option<Snapshot<T>>> {
        self.rx
    }
}
