//! Player host
//!
//! Owns one playback session and its progress timer for the lifetime of a
//! player view. The timer is reconciled after every operation: it runs only
//! while the session is playing a track of known length and the view has
//! focus. Its schedule restarts whenever the current track changes.
//! [`PlayerHost::run`] drives everything from a single task, so a tick can
//! never re-enter.

use crate::{
    bootstrap::{bootstrap, BootstrapParams},
    events::PlaybackEvent,
    session::PlaybackSession,
    timer::ProgressTimer,
    types::{PlaybackConfig, SessionSnapshot},
};
use melody_core::CatalogProvider;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Operations the hosting view can request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    /// Play/pause button
    TogglePlayPause,
    /// Progress slider released at a position (seconds)
    Seek(f64),
    /// Skip forward
    Next,
    /// Skip back / restart
    Previous,
    /// Repeat button
    CycleRepeat,
    /// Shuffle button
    ToggleShuffle,
    /// Set the like flag
    SetLiked(bool),
    /// Like button
    ToggleLiked,
    /// The view went to the background
    FocusLost,
    /// The view came back to the foreground
    FocusGained,
    /// The view is being left
    Close,
}

/// Owner of a session and its timer
pub struct PlayerHost {
    session: PlaybackSession,
    timer: ProgressTimer,
    focused: bool,
    // Track the armed schedule belongs to
    timed_index: Option<usize>,
}

impl PlayerHost {
    /// Bootstrap a session and wrap it
    ///
    /// A failed bootstrap still yields a host, holding a session in the
    /// terminal error state whose timer is never armed.
    pub fn open<C>(catalog: &C, params: &BootstrapParams, config: &PlaybackConfig) -> Self
    where
        C: CatalogProvider + ?Sized,
    {
        let session = match bootstrap(catalog, params, config) {
            Ok(session) => session,
            Err(error) => {
                warn!(error = %error, "Player opened in error state");
                PlaybackSession::failed(error)
            }
        };
        Self::from_session(session, config)
    }

    /// Wrap an existing session
    pub fn from_session(session: PlaybackSession, config: &PlaybackConfig) -> Self {
        let mut host = Self {
            session,
            timer: ProgressTimer::new(config.tick_interval()),
            focused: true,
            timed_index: None,
        };
        host.reconcile_timer();
        host
    }

    /// The hosted session
    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    /// Render model of the hosted session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Whether the progress timer is running
    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Whether the view currently has focus
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Apply one command
    ///
    /// Returns `false` once the view is closed.
    pub fn apply(&mut self, command: PlayerCommand) -> bool {
        debug!(command = ?command, "Player command");
        match command {
            PlayerCommand::TogglePlayPause => self.session.toggle_play_pause(),
            PlayerCommand::Seek(secs) => self.session.seek(secs),
            PlayerCommand::Next => self.session.next(),
            PlayerCommand::Previous => self.session.previous(),
            PlayerCommand::CycleRepeat => self.session.cycle_repeat_mode(),
            PlayerCommand::ToggleShuffle => self.session.toggle_shuffle(),
            PlayerCommand::SetLiked(liked) => self.session.set_liked(liked),
            PlayerCommand::ToggleLiked => self.session.toggle_liked(),
            PlayerCommand::FocusLost => self.focused = false,
            PlayerCommand::FocusGained => self.focused = true,
            PlayerCommand::Close => {
                self.timer.disarm();
                return false;
            }
        }
        self.reconcile_timer();
        true
    }

    /// Handle one timer period
    pub fn tick(&mut self) {
        self.session.tick();
        self.reconcile_timer();
    }

    /// Stop the timer because the view lost focus
    pub fn on_focus_lost(&mut self) {
        self.apply(PlayerCommand::FocusLost);
    }

    /// Resume the timer if the session still wants it
    pub fn on_focus_gained(&mut self) {
        self.apply(PlayerCommand::FocusGained);
    }

    /// Take queued session events
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.session.drain_events()
    }

    /// Drive the host until the view closes
    ///
    /// Commands and timer ticks are handled one at a time on this task.
    /// A snapshot is published after every handled input. Returns the final
    /// snapshot when `Close` arrives or every command sender is dropped; the
    /// timer is released on every exit path.
    pub async fn run(
        mut self,
        mut commands: mpsc::Receiver<PlayerCommand>,
        snapshots: watch::Sender<SessionSnapshot>,
    ) -> SessionSnapshot {
        snapshots.send_replace(self.snapshot());

        loop {
            let keep_going = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.apply(command),
                    None => false,
                },
                () = self.timer.tick() => {
                    self.tick();
                    true
                }
            };

            for event in self.session.drain_events() {
                debug!(kind = event.kind(), event = ?event, "Playback event");
            }
            snapshots.send_replace(self.snapshot());

            if !keep_going {
                break;
            }
        }

        self.close()
    }

    /// Tear the host down, releasing the timer
    pub fn close(mut self) -> SessionSnapshot {
        self.timer.disarm();
        let snapshot = self.snapshot();
        info!(
            state = ?snapshot.state,
            elapsed_secs = snapshot.elapsed_secs,
            "Player closed"
        );
        snapshot
    }

    fn reconcile_timer(&mut self) {
        if self.focused && self.session.wants_progress_timer() {
            let index = self.session.current_index();
            if self.timer.is_armed() && self.timed_index != index {
                debug!(index = ?index, "Track changed, restarting progress timer");
                self.timer.disarm();
            }
            self.timed_index = index;
            self.timer.arm();
        } else {
            self.timer.disarm();
        }
    }
}
