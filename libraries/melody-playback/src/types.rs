//! Core types for playback sessions

use crate::error::BootstrapError;
use melody_core::{format_time, ListType, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Idle,

    /// Currently playing
    Playing,

    /// Paused (or stopped at a boundary)
    Paused,

    /// Bootstrap failed; terminal for this session
    Failed,
}

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop at the end of the list
    #[default]
    Off,

    /// Loop the whole source list
    Context,

    /// Loop the current track
    Track,
}

impl RepeatMode {
    /// Next mode in the `Off -> Context -> Track -> Off` rotation
    pub fn cycled(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::Context,
            RepeatMode::Context => RepeatMode::Track,
            RepeatMode::Track => RepeatMode::Off,
        }
    }

    /// Icon name used by the player controls
    pub fn icon_name(self) -> &'static str {
        match self {
            RepeatMode::Off => "repeat-off",
            RepeatMode::Context => "repeat",
            RepeatMode::Track => "repeat-once",
        }
    }
}

/// Configuration for playback sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial repeat mode (default: Off)
    pub repeat: RepeatMode,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Elapsed seconds above which "previous" restarts the current track
    /// instead of moving back (default: 3)
    pub restart_threshold_secs: f64,

    /// Progress timer period in milliseconds (default: 1000)
    pub tick_interval_ms: u64,
}

impl PlaybackConfig {
    /// Progress timer period
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            repeat: RepeatMode::Off,
            shuffle: false,
            restart_threshold_secs: 3.0,
            tick_interval_ms: 1000,
        }
    }
}

/// Read model of a session for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Overall state
    pub state: PlaybackState,

    /// Track being played, if any
    pub current_track: Option<Track>,

    /// Index into the source list, -1 when no track is resolved
    pub current_index: i64,

    /// List the session plays from
    pub source_list_type: ListType,

    /// Number of tracks in the source list
    pub source_list_len: usize,

    /// Elapsed seconds in the current track
    pub elapsed_secs: f64,

    /// Duration of the current track (0 when unknown or no track)
    pub duration_secs: u32,

    /// Whether playback is running
    pub is_playing: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Shuffle flag
    pub shuffle_enabled: bool,

    /// Like flag
    pub liked: bool,

    /// Bootstrap failure, for failed sessions
    pub last_error: Option<BootstrapError>,
}

impl SessionSnapshot {
    /// Elapsed time as `M:SS`
    pub fn elapsed_display(&self) -> String {
        format_time(self.elapsed_secs)
    }

    /// Duration as `M:SS`
    pub fn duration_display(&self) -> String {
        format_time(f64::from(self.duration_secs))
    }

    /// Progress through the current track in `0.0..=1.0`
    pub fn progress(&self) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        (self.elapsed_secs / f64::from(self.duration_secs)).clamp(0.0, 1.0)
    }

    /// Title bar text, e.g. "Playing from Recently Played"
    pub fn playing_from(&self) -> String {
        format!("Playing from {}", self.source_list_type.display_name())
    }
}
