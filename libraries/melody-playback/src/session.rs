//! Playback session - the "now playing" state machine
//!
//! Owns what is playing, from which list, at what position and under which
//! repeat policy. Every operation is synchronous and total: boundary input
//! is clamped, and operations that make no sense in the current state are
//! no-ops.

use crate::{
    error::BootstrapError,
    events::PlaybackEvent,
    types::{PlaybackConfig, PlaybackState, RepeatMode, SessionSnapshot},
};
use melody_core::{ListType, Track};
use tracing::{debug, info};

/// Live, ephemeral playback state for one player view
///
/// The current track is always derived from `current_index`, so
/// `source_list[current_index] == current_track` holds by construction.
/// Without a track the index is `None`, playback is paused and elapsed
/// time is zero.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    // Catalog context (copied at bootstrap, never re-fetched)
    source_list: Vec<Track>,
    source_list_type: ListType,
    current_index: Option<usize>,

    // Position
    elapsed_secs: f64,
    is_playing: bool,

    // Settings
    repeat: RepeatMode,
    shuffle_enabled: bool,
    liked: bool,
    restart_threshold_secs: f64,

    last_error: Option<BootstrapError>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackSession {
    /// Create a session with no track loaded
    pub fn idle(config: &PlaybackConfig) -> Self {
        Self {
            source_list: Vec::new(),
            source_list_type: ListType::Unknown,
            current_index: None,
            elapsed_secs: 0.0,
            is_playing: false,
            repeat: config.repeat,
            shuffle_enabled: config.shuffle,
            liked: false,
            restart_threshold_secs: config.restart_threshold_secs,
            last_error: None,
            pending_events: Vec::new(),
        }
    }

    /// Create a session in the terminal error state
    ///
    /// Every operation on a failed session is a no-op; the only way out is a
    /// fresh bootstrap.
    pub fn failed(error: BootstrapError) -> Self {
        let mut session = Self::idle(&PlaybackConfig::default());
        session.last_error = Some(error);
        session
    }

    /// Create a session positioned on `source_list[index]`
    ///
    /// `elapsed_secs` is clamped to the track's duration. Callers guarantee
    /// `index` is in bounds.
    pub(crate) fn loaded(
        source_list: Vec<Track>,
        source_list_type: ListType,
        index: usize,
        elapsed_secs: f64,
        is_playing: bool,
        config: &PlaybackConfig,
    ) -> Self {
        debug_assert!(index < source_list.len());
        let mut session = Self::idle(config);
        session.source_list = source_list;
        session.source_list_type = source_list_type;
        session.current_index = Some(index);
        session.elapsed_secs = session.clamp_to_duration(elapsed_secs);
        session.is_playing = is_playing;
        session
    }

    // ===== Playback Control =====

    /// Flip between playing and paused
    ///
    /// When paused at the very end of a track of known length, this restarts
    /// the track from zero instead of resuming at the boundary.
    pub fn toggle_play_pause(&mut self) {
        if self.is_failed() {
            return;
        }
        let Some(duration) = self.current_duration() else {
            return;
        };

        if !self.is_playing && duration > 0.0 && self.elapsed_secs >= duration {
            self.elapsed_secs = 0.0;
            self.emit_position_update();
        }
        self.set_playing(!self.is_playing);
    }

    /// Move to `target_secs`, clamped to `[0, duration]`
    pub fn seek(&mut self, target_secs: f64) {
        if self.is_failed() || self.current_index.is_none() {
            return;
        }
        self.elapsed_secs = self.clamp_to_duration(target_secs);
        debug!(elapsed_secs = self.elapsed_secs, "Seek");
        self.emit_position_update();
    }

    /// Advance one second of progress
    ///
    /// Reaching the end of the track (elapsed + 1 >= duration) fires
    /// [`on_track_end`](Self::on_track_end) instead of stepping onto the
    /// boundary. Tracks of unknown length never advance.
    pub fn tick(&mut self) {
        if !self.is_playing {
            return;
        }
        let Some(duration) = self.current_duration() else {
            return;
        };
        if duration <= 0.0 {
            return;
        }

        if self.elapsed_secs + 1.0 >= duration {
            self.on_track_end();
        } else {
            self.elapsed_secs += 1.0;
            self.emit_position_update();
        }
    }

    /// Resolve the end of the current track according to the repeat mode
    pub fn on_track_end(&mut self) {
        if self.is_failed() {
            return;
        }
        let Some(index) = self.current_index else {
            return;
        };

        let finished_id = self.source_list[index].id.to_string();
        debug!(track_id = %finished_id, repeat = ?self.repeat, "Track ended");
        self.pending_events.push(PlaybackEvent::TrackFinished {
            track_id: finished_id,
        });

        match self.repeat {
            RepeatMode::Track => self.restart(),
            RepeatMode::Context => match self.successor(index, true) {
                Some(target) => self.load(target, true),
                None => self.end_without_repeat(index),
            },
            RepeatMode::Off => self.end_without_repeat(index),
        }
    }

    /// Skip to the next track in the source list
    ///
    /// Past the end this wraps with context repeat, otherwise playback stops
    /// at the start of the current track.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.is_failed() || self.source_list.is_empty() {
            return;
        }
        let Some(index) = self.current_index else {
            return;
        };

        match self.successor(index, self.repeat == RepeatMode::Context) {
            Some(target) => self.load(target, true),
            None => {
                debug!("No next track, stopping");
                self.elapsed_secs = 0.0;
                self.emit_position_update();
                self.set_playing(false);
            }
        }
    }

    /// Go to the previous track
    ///
    /// More than the restart threshold (3 seconds by default) into the
    /// current track, this restarts it. Before the first track it wraps with
    /// context repeat, otherwise restarts the current track.
    pub fn previous(&mut self) {
        if self.is_failed() || self.source_list.is_empty() {
            return;
        }
        let Some(index) = self.current_index else {
            return;
        };

        if self.elapsed_secs > self.restart_threshold_secs {
            self.restart();
            return;
        }

        let target = if index > 0 {
            Some(index - 1)
        } else if self.repeat == RepeatMode::Context {
            Some(self.source_list.len() - 1)
        } else {
            None
        };

        match target {
            Some(target) => self.load(target, true),
            None => self.restart(),
        }
    }

    // ===== Settings =====

    /// Rotate `Off -> Context -> Track -> Off`
    pub fn cycle_repeat_mode(&mut self) {
        if self.is_failed() {
            return;
        }
        self.repeat = self.repeat.cycled();
        debug!(repeat = ?self.repeat, "Repeat mode changed");
        self.pending_events
            .push(PlaybackEvent::RepeatModeChanged { mode: self.repeat });
    }

    /// Set the repeat mode directly
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        if self.is_failed() || self.repeat == mode {
            return;
        }
        self.repeat = mode;
        self.pending_events
            .push(PlaybackEvent::RepeatModeChanged { mode });
    }

    /// Flip the shuffle flag
    ///
    /// The flag is state only: next/previous keep source list order.
    pub fn toggle_shuffle(&mut self) {
        if self.is_failed() {
            return;
        }
        self.shuffle_enabled = !self.shuffle_enabled;
        self.pending_events.push(PlaybackEvent::ShuffleChanged {
            enabled: self.shuffle_enabled,
        });
    }

    /// Set the like flag
    pub fn set_liked(&mut self, liked: bool) {
        if self.is_failed() || self.liked == liked {
            return;
        }
        self.liked = liked;
        self.pending_events.push(PlaybackEvent::LikedChanged { liked });
    }

    /// Flip the like flag
    pub fn toggle_liked(&mut self) {
        self.set_liked(!self.liked);
    }

    // ===== State Queries =====

    /// Overall state
    pub fn state(&self) -> PlaybackState {
        if self.last_error.is_some() {
            PlaybackState::Failed
        } else if self.current_index.is_none() {
            PlaybackState::Idle
        } else if self.is_playing {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        }
    }

    /// Track being played
    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.map(|i| &self.source_list[i])
    }

    /// Position of the current track in the source list
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Tracks of the list the session plays from
    pub fn source_list(&self) -> &[Track] {
        &self.source_list
    }

    /// Tag of the list the session plays from
    pub fn source_list_type(&self) -> ListType {
        self.source_list_type
    }

    /// Elapsed seconds in the current track
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Whether playback is running
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    /// Shuffle flag
    pub fn shuffle_enabled(&self) -> bool {
        self.shuffle_enabled
    }

    /// Like flag
    pub fn is_liked(&self) -> bool {
        self.liked
    }

    /// Bootstrap failure, for failed sessions
    pub fn last_error(&self) -> Option<&BootstrapError> {
        self.last_error.as_ref()
    }

    /// Whether the session is in the terminal error state
    pub fn is_failed(&self) -> bool {
        self.last_error.is_some()
    }

    /// Whether the progress timer should be running for this session
    pub fn wants_progress_timer(&self) -> bool {
        self.is_playing && self.current_duration().is_some_and(|d| d > 0.0)
    }

    /// Render model of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        let current_track = self.current_track().cloned();
        SessionSnapshot {
            state: self.state(),
            duration_secs: current_track.as_ref().map_or(0, |t| t.duration_secs),
            current_track,
            current_index: self.current_index.map_or(-1, |i| i as i64),
            source_list_type: self.source_list_type,
            source_list_len: self.source_list.len(),
            elapsed_secs: self.elapsed_secs,
            is_playing: self.is_playing,
            repeat_mode: self.repeat,
            shuffle_enabled: self.shuffle_enabled,
            liked: self.liked,
            last_error: self.last_error.clone(),
        }
    }

    // ===== Events =====

    /// Take all queued events, oldest first
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn current_duration(&self) -> Option<f64> {
        self.current_track().map(|t| f64::from(t.duration_secs))
    }

    fn clamp_to_duration(&self, secs: f64) -> f64 {
        let duration = self.current_duration().unwrap_or(0.0);
        if secs.is_nan() {
            return 0.0;
        }
        secs.clamp(0.0, duration)
    }

    fn successor(&self, index: usize, wrap: bool) -> Option<usize> {
        if index + 1 < self.source_list.len() {
            Some(index + 1)
        } else if wrap && !self.source_list.is_empty() {
            Some(0)
        } else {
            None
        }
    }

    /// End-of-track handling with repeat off: advance without auto-play, or
    /// park at the end of the last track.
    fn end_without_repeat(&mut self, index: usize) {
        match self.successor(index, false) {
            Some(target) => self.load(target, false),
            None => {
                self.elapsed_secs = self.current_duration().unwrap_or(0.0);
                self.emit_position_update();
                self.set_playing(false);
            }
        }
    }

    fn restart(&mut self) {
        self.elapsed_secs = 0.0;
        self.emit_position_update();
        self.set_playing(true);
    }

    fn load(&mut self, index: usize, play: bool) {
        let previous = self.current_index.replace(index);
        self.elapsed_secs = 0.0;

        if previous != Some(index) {
            let track = &self.source_list[index];
            info!(
                track_id = %track.id,
                title = %track.title,
                index,
                "Now playing"
            );
            let previous_track_id = previous.map(|i| self.source_list[i].id.to_string());
            self.pending_events.push(PlaybackEvent::TrackChanged {
                track_id: track.id.to_string(),
                previous_track_id,
                index,
            });
        }
        self.emit_position_update();
        self.set_playing(play);
    }

    fn set_playing(&mut self, playing: bool) {
        if self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        let state = self.state();
        self.pending_events.push(PlaybackEvent::StateChanged { state });
    }

    fn emit_position_update(&mut self) {
        if let Some(track) = self.current_track() {
            let duration_secs = track.duration_secs;
            self.pending_events.push(PlaybackEvent::PositionUpdate {
                elapsed_secs: self.elapsed_secs,
                duration_secs,
            });
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::idle(&PlaybackConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_list(durations: &[u32]) -> Vec<Track> {
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| Track::new(format!("t{}", i), format!("Track {}", i), *d))
            .collect()
    }

    fn session_at(index: usize, elapsed: f64, playing: bool) -> PlaybackSession {
        PlaybackSession::loaded(
            create_test_list(&[100, 100, 100]),
            ListType::RecentlyPlayed,
            index,
            elapsed,
            playing,
            &PlaybackConfig::default(),
        )
    }

    #[test]
    fn idle_session_has_no_track() {
        let session = PlaybackSession::default();
        assert_eq!(session.state(), PlaybackState::Idle);
        assert!(session.current_track().is_none());
        assert_eq!(session.snapshot().current_index, -1);
        assert!(!session.is_playing());
        assert_eq!(session.elapsed_secs(), 0.0);
    }

    #[test]
    fn loaded_clamps_elapsed_to_duration() {
        let session = PlaybackSession::loaded(
            create_test_list(&[30]),
            ListType::Carousel,
            0,
            45.0,
            true,
            &PlaybackConfig::default(),
        );
        assert_eq!(session.elapsed_secs(), 30.0);
    }

    #[test]
    fn toggle_is_noop_without_track() {
        let mut session = PlaybackSession::default();
        session.toggle_play_pause();
        assert!(!session.is_playing());
        assert!(!session.has_pending_events());
    }

    #[test]
    fn toggle_at_end_restarts_track() {
        let mut session = session_at(2, 100.0, false);
        session.toggle_play_pause();
        assert!(session.is_playing());
        assert_eq!(session.elapsed_secs(), 0.0);
    }

    #[test]
    fn seek_clamps_into_range() {
        let mut session = session_at(0, 0.0, false);
        session.seek(-5.0);
        assert_eq!(session.elapsed_secs(), 0.0);
        session.seek(500.0);
        assert_eq!(session.elapsed_secs(), 100.0);
        session.seek(f64::NAN);
        assert_eq!(session.elapsed_secs(), 0.0);
    }

    #[test]
    fn tick_only_advances_while_playing() {
        let mut session = session_at(0, 10.0, false);
        session.tick();
        assert_eq!(session.elapsed_secs(), 10.0);

        session.toggle_play_pause();
        session.tick();
        assert_eq!(session.elapsed_secs(), 11.0);
    }

    #[test]
    fn unknown_duration_never_advances() {
        let mut session = PlaybackSession::loaded(
            create_test_list(&[0, 10]),
            ListType::Carousel,
            0,
            0.0,
            true,
            &PlaybackConfig::default(),
        );
        for _ in 0..5 {
            session.tick();
        }
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.elapsed_secs(), 0.0);
        assert!(!session.wants_progress_timer());
    }

    #[test]
    fn next_past_end_without_repeat_stops() {
        let mut session = session_at(2, 50.0, true);
        session.next();
        assert_eq!(session.current_index(), Some(2));
        assert_eq!(session.elapsed_secs(), 0.0);
        assert!(!session.is_playing());
    }

    #[test]
    fn previous_at_start_without_repeat_restarts() {
        let mut session = session_at(0, 2.0, false);
        session.previous();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.elapsed_secs(), 0.0);
        assert!(session.is_playing());
    }

    #[test]
    fn failed_session_ignores_everything() {
        let mut session = PlaybackSession::failed(BootstrapError::MissingTrackId);
        session.toggle_play_pause();
        session.next();
        session.previous();
        session.seek(10.0);
        session.tick();
        session.cycle_repeat_mode();
        session.toggle_shuffle();
        session.set_liked(true);

        assert_eq!(session.state(), PlaybackState::Failed);
        assert_eq!(session.repeat_mode(), RepeatMode::Off);
        assert!(!session.shuffle_enabled());
        assert!(!session.is_liked());
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn events_are_emitted_in_order() {
        let mut session = session_at(0, 0.0, false);
        session.next();

        let events = session.drain_events();
        assert_eq!(
            events[0],
            PlaybackEvent::TrackChanged {
                track_id: "t1".to_string(),
                previous_track_id: Some("t0".to_string()),
                index: 1,
            }
        );
        assert!(matches!(
            events.last(),
            Some(PlaybackEvent::StateChanged {
                state: PlaybackState::Playing
            })
        ));
        assert!(!session.has_pending_events());
    }

    #[test]
    fn set_liked_emits_only_on_change() {
        let mut session = session_at(0, 0.0, false);
        session.set_liked(false);
        assert!(!session.has_pending_events());
        session.toggle_liked();
        assert!(session.is_liked());
        assert_eq!(
            session.drain_events(),
            vec![PlaybackEvent::LikedChanged { liked: true }]
        );
    }
}
