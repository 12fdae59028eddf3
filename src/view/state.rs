//! Last-value-wins view states.
//!
//! A [`ViewStatePublisher`] is the single writer path of one screen state; any
//! number of [`ViewState`] readers observe it. Values are replaced atomically, so a
//! reader only ever sees fully computed values.

use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;

use crate::controller::ScreenScope;

pub struct ViewStatePublisher<T> {
    tx: Arc<watch::Sender<T>>,
    scope: CancellationToken,
}

impl<T> Clone for ViewStatePublisher<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            scope: self.scope.clone(),
        }
    }
}

impl<T: Send + Sync + 'static> ViewStatePublisher<T> {
    pub fn new(initial: T, scope: &ScreenScope) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx: Arc::new(tx),
            scope: scope.token(),
        }
    }

    /// Replace the published value. Does nothing once the owning scope is closed.
    pub fn publish(&self, value: T) -> bool {
        if self.scope.is_cancelled() {
            return false;
        }
        self.tx.send_replace(value);
        true
    }

    pub fn observe(&self) -> ViewState<T> {
        ViewState {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T: Clone> ViewStatePublisher<T> {
    pub fn current(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// Read side of a screen state
pub struct ViewState<T> {
    rx: watch::Receiver<T>,
}

impl<T> Clone for ViewState<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ViewState<T> {
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next published value. Returns `None` once the publisher is gone.
    pub async fn changed(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Wait until the current or a later value satisfies `predicate`.
    pub async fn wait_for(&mut self, predicate: impl FnMut(&T) -> bool) -> Option<T> {
        let value = self.rx.wait_for(predicate).await.ok()?;
        Some(value.clone())
    }

    pub fn into_stream(self) -> impl Stream<Item = T> {
        WatchStream::new(self.rx)
    }
}
