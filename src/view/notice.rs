//! Transient, dismissible notices for failed external operations

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use super::state::{ViewState, ViewStatePublisher};
use crate::controller::ScreenScope;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub posted_at: Instant,
}

/// Holds at most one notice per screen; a newer notice replaces the older one.
///
/// Each posted notice is dismissed on its own once the ttl elapses, unless a
/// newer notice replaced it first or the screen closed.
#[derive(Clone)]
pub struct NoticeBoard {
    publisher: ViewStatePublisher<Option<Notice>>,
    ttl: Duration,
    scope: CancellationToken,
}

impl NoticeBoard {
    pub fn new(ttl: Duration, scope: &ScreenScope) -> Self {
        Self {
            publisher: ViewStatePublisher::new(None, scope),
            ttl,
            scope: scope.token(),
        }
    }

    pub fn post(&self, message: impl Into<String>) {
        let message = message.into();
        let posted_at = Instant::now();
        tracing::debug!(message = %message, "Notice posted");
        if !self.publisher.publish(Some(Notice { message, posted_at })) {
            return;
        }
        self.expire_after_ttl(posted_at);
    }

    fn expire_after_ttl(&self, posted_at: Instant) {
        let board = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = board.scope.cancelled() => {}
                _ = tokio::time::sleep(board.ttl) => {
                    let still_shown = board
                        .publisher
                        .current()
                        .is_some_and(|notice| notice.posted_at == posted_at);
                    if still_shown {
                        tracing::trace!("Notice expired");
                        board.dismiss();
                    }
                }
            }
        });
    }

    pub fn dismiss(&self) {
        self.publisher.publish(None);
    }

    /// Drop the current notice once it is older than the board's ttl.
    pub fn clear_expired(&self) {
        if let Some(notice) = self.publisher.current() {
            if notice.posted_at.elapsed() > self.ttl {
                self.dismiss();
            }
        }
    }

    pub fn current(&self) -> Option<Notice> {
        self.publisher.current()
    }

    pub fn observe(&self) -> ViewState<Option<Notice>> {
        self.publisher.observe()
    }
}
