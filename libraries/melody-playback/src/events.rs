//! Playback Events
//!
//! Event-based communication for UI synchronization. Sessions queue events
//! as transitions happen; the host drains them after each operation:
//! - State changes (play/pause)
//! - Track changes (next/previous/end-of-track advance)
//! - Position updates (tick/seek/restart)
//! - Repeat, shuffle and like flag changes

use crate::types::{PlaybackState, RepeatMode};
use serde::{Deserialize, Serialize};

/// Events emitted by a playback session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Playback state changed
    StateChanged {
        /// The new playback state
        state: PlaybackState,
    },

    /// Current track changed
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// ID of the previous track
        previous_track_id: Option<String>,
        /// Position of the new track in the source list
        index: usize,
    },

    /// Track reached its end
    TrackFinished {
        /// ID of the finished track
        track_id: String,
    },

    /// Elapsed time moved
    PositionUpdate {
        /// Elapsed seconds
        elapsed_secs: f64,
        /// Track duration in seconds
        duration_secs: u32,
    },

    /// Repeat mode changed
    RepeatModeChanged {
        /// New mode
        mode: RepeatMode,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// New flag
        enabled: bool,
    },

    /// Like flag changed
    LikedChanged {
        /// New flag
        liked: bool,
    },
}

impl PlaybackEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            PlaybackEvent::StateChanged { .. } => "state_changed",
            PlaybackEvent::TrackChanged { .. } => "track_changed",
            PlaybackEvent::TrackFinished { .. } => "track_finished",
            PlaybackEvent::PositionUpdate { .. } => "position_update",
            PlaybackEvent::RepeatModeChanged { .. } => "repeat_mode_changed",
            PlaybackEvent::ShuffleChanged { .. } => "shuffle_changed",
            PlaybackEvent::LikedChanged { .. } => "liked_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_variant_name() {
        let event = PlaybackEvent::TrackFinished {
            track_id: "rp1".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["TrackFinished"]["track_id"], "rp1");
        assert_eq!(event.kind(), "track_finished");
    }
}
