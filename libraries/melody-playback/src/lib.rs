//! Melody Player - Playback Sessions
//!
//! Platform-agnostic "now playing" management for Melody Player.
//!
//! This crate provides:
//! - Session bootstrap from navigation parameters
//! - Play/pause, seek, next/previous with a 3 second restart window
//! - End-of-track handling for repeat modes (Off, Context, Track)
//! - Shuffle and like flags
//! - An explicitly owned one-second progress timer
//! - A single-task host that drives a session from view commands
//!
//! # Architecture
//!
//! `melody-playback` never decodes or outputs audio and never fetches
//! catalog data itself:
//! - Catalog lists come from a `melody_core::CatalogProvider`
//! - Sessions are pure state machines; all operations are synchronous
//! - Time only advances through `tick()`, driven by the host's timer
//!
//! # Example: Bootstrap and control
//!
//! ```rust
//! use melody_core::InMemoryCatalog;
//! use melody_playback::{bootstrap, BootstrapParams, PlaybackConfig, RepeatMode};
//!
//! let catalog = InMemoryCatalog::sample();
//! let params = BootstrapParams::new("rp2")
//!     .with_list_type("recentlyPlayed")
//!     .with_resume_seconds("45")
//!     .with_resume_playing("true");
//!
//! let mut session = bootstrap(&catalog, &params, &PlaybackConfig::default()).unwrap();
//! assert_eq!(session.current_index(), Some(1));
//! assert_eq!(session.elapsed_secs(), 45.0);
//! assert!(session.is_playing());
//!
//! session.cycle_repeat_mode();
//! assert_eq!(session.repeat_mode(), RepeatMode::Context);
//!
//! session.next();
//! assert_eq!(session.current_track().unwrap().title, "Stay");
//! ```
//!
//! # Example: Hosting a session
//!
//! ```rust,no_run
//! use melody_core::InMemoryCatalog;
//! use melody_playback::{BootstrapParams, PlaybackConfig, PlayerCommand, PlayerHost};
//! use tokio::sync::{mpsc, watch};
//!
//! # async fn example() {
//! let config = PlaybackConfig::default();
//! let params = BootstrapParams::new("rp1").with_list_type("recentlyPlayed");
//! let host = PlayerHost::open(&InMemoryCatalog::sample(), &params, &config);
//!
//! let (commands, rx) = mpsc::channel(16);
//! let (snapshots, _watch) = watch::channel(host.snapshot());
//! let task = tokio::spawn(host.run(rx, snapshots));
//!
//! commands.send(PlayerCommand::TogglePlayPause).await.ok();
//! commands.send(PlayerCommand::Close).await.ok();
//! let final_snapshot = task.await.unwrap();
//! # }
//! ```

mod bootstrap;
mod error;
mod events;
mod host;
mod session;
mod timer;
pub mod types;

// Public exports
pub use bootstrap::{bootstrap, BootstrapParams};
pub use error::{BootstrapError, Result};
pub use events::PlaybackEvent;
pub use host::{PlayerCommand, PlayerHost};
pub use session::PlaybackSession;
pub use timer::ProgressTimer;
pub use types::{PlaybackConfig, PlaybackState, RepeatMode, SessionSnapshot};
