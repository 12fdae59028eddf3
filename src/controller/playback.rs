//! Play and enqueue requests issued from screens

use std::sync::Arc;

use crate::model::{PlaybackEngine, Song, TransportState};
use crate::view::NoticeBoard;

/// Forwards play requests to the playback engine. Failures become notices on
/// the owning screen and never reach the caller.
#[derive(Clone)]
pub struct PlaybackController {
    engine: Arc<dyn PlaybackEngine>,
    notices: NoticeBoard,
}

impl PlaybackController {
    pub fn new(engine: Arc<dyn PlaybackEngine>, notices: NoticeBoard) -> Self {
        Self { engine, notices }
    }

    /// Play `songs` starting at `start_index`. Returns whether the engine accepted it.
    pub async fn play(&self, songs: Vec<Song>, start_index: usize, shuffle: bool) -> bool {
        if songs.is_empty() {
            tracing::debug!("Nothing to play");
            return false;
        }

        let count = songs.len();
        match self.engine.play_songs(songs, start_index, shuffle).await {
            Ok(()) => {
                tracing::info!(count, start_index, shuffle, "Playback requested");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Play request failed");
                self.notices.post(format!("Could not start playback: {}", e));
                false
            }
        }
    }

    /// Shuffle-play the whole list.
    pub async fn shuffle_all(&self, songs: Vec<Song>) -> bool {
        if songs.is_empty() {
            return false;
        }
        let start = rand::random_range(0..songs.len());
        self.play(songs, start, true).await
    }

    pub async fn enqueue(&self, song: Song) -> bool {
        let song_id = song.id;
        match self.engine.enqueue_song(song).await {
            Ok(()) => {
                tracing::debug!(song_id, "Song enqueued");
                true
            }
            Err(e) => {
                tracing::error!(song_id, error = %e, "Enqueue failed");
                self.notices.post(format!("Could not add to queue: {}", e));
                false
            }
        }
    }

    pub fn transport(&self) -> TransportState {
        self.engine.transport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ScreenScope;
    use crate::model::InMemoryPlayback;
    use crate::model::memory_store::fixtures::songs;
    use std::time::Duration;

    fn controller(scope: &ScreenScope) -> (Arc<InMemoryPlayback>, PlaybackController) {
        let engine = Arc::new(InMemoryPlayback::new());
        let notices = NoticeBoard::new(Duration::from_secs(5), scope);
        (engine.clone(), PlaybackController::new(engine, notices))
    }

    #[tokio::test]
    async fn play_updates_transport() {
        let scope = ScreenScope::root("album");
        let (engine, controller) = controller(&scope);

        assert!(controller.play(songs(3), 1, false).await);
        let transport = controller.transport();
        assert!(transport.is_playing);
        assert_eq!(transport.current_item_id, Some(2));
        assert_eq!(engine.queue().len(), 3);
    }

    #[tokio::test]
    async fn failed_play_posts_notice() {
        let scope = ScreenScope::root("album");
        let (_engine, controller) = controller(&scope);

        assert!(!controller.play(songs(2), 5, false).await);
        assert!(controller.notices.current().is_some());
    }

    #[tokio::test]
    async fn shuffle_all_plays_every_song() {
        let scope = ScreenScope::root("home");
        let (engine, controller) = controller(&scope);

        assert!(controller.shuffle_all(songs(6)).await);
        assert_eq!(engine.queue().len(), 6);
        assert!(!controller.shuffle_all(Vec::new()).await);
    }

    #[tokio::test]
    async fn enqueue_appends() {
        let scope = ScreenScope::root("home");
        let (engine, controller) = controller(&scope);
        let song = songs(1).remove(0);

        assert!(controller.enqueue(song.clone()).await);
        assert_eq!(engine.queue(), vec![song]);
    }
}
