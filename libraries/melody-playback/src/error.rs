//! Error types for session bootstrap

use melody_core::ListType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a playback session could not be built
///
/// Both variants are terminal for the session being constructed: the
/// navigation parameters cannot change without a fresh navigation, so the
/// caller should render an error state and offer only "go back".
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum BootstrapError {
    /// No track identifier was supplied
    #[error("No track id provided")]
    MissingTrackId,

    /// The track is not part of the resolved list
    #[error("Track {track_id} not found in list {list_type}")]
    TrackNotFound {
        /// Requested identifier
        track_id: String,
        /// List that was searched (after tag normalization)
        list_type: ListType,
    },
}

/// Result type for bootstrap
pub type Result<T> = std::result::Result<T, BootstrapError>;
