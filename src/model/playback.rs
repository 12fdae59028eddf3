//! Contract of the playback engine and the transport flags the view layer reads

use async_trait::async_trait;

use super::types::Song;
use crate::error::Result;

/// Transport flags exposed to screens, e.g. to highlight the playing row
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportState {
    pub is_playing: bool,
    pub current_item_id: Option<i64>,
}

impl TransportState {
    pub fn is_current(&self, song: &Song) -> bool {
        self.current_item_id == Some(song.id)
    }
}

/// Playback engine owning queueing and audio output
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    async fn play_songs(&self, songs: Vec<Song>, start_index: usize, shuffle: bool) -> Result<()>;

    async fn enqueue_song(&self, song: Song) -> Result<()>;

    fn is_playing(&self) -> bool;

    fn current_item_id(&self) -> Option<i64>;

    fn transport(&self) -> TransportState {
        TransportState {
            is_playing: self.is_playing(),
            current_item_id: self.current_item_id(),
        }
    }
}
