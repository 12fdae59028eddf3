//! Screen-scoped task ownership.
//!
//! Every screen owns a [`ScreenScope`]. Subscriptions and one-shot pulls started
//! by the screen run inside it; closing or dropping the scope cancels them and
//! every child scope with them.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub struct ScreenScope {
    name: &'static str,
    token: CancellationToken,
}

impl ScreenScope {
    pub fn root(name: &'static str) -> Self {
        Self {
            name,
            token: CancellationToken::new(),
        }
    }

    /// Scope cancelled together with `self`, but closable on its own.
    pub fn child(&self, name: &'static str) -> Self {
        Self {
            name,
            token: self.token.child_token(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Run `task` until it finishes or the scope closes.
    pub fn spawn<F>(&self, task: F) -> JoinHandle<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = self.token.clone();
        let name = self.name;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!(scope = name, "Task cancelled with its scope");
                }
                _ = task => {}
            }
        })
    }

    pub fn close(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!(scope = self.name, "Closing screen scope");
        }
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub(crate) fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
