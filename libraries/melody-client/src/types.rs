//! Types for Melody API requests and responses.

use melody_core::Track;
use serde::{Deserialize, Serialize};

// =============================================================================
// Authentication Types
// =============================================================================

/// Form body for the login endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Bearer token returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRead {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// ISO 8601 timestamp, kept as sent
    pub created_at: String,
}

/// Signup request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UserCreate {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: Some(password.into()),
        }
    }
}

// =============================================================================
// Library Types
// =============================================================================

/// A track as the backend describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRead {
    pub id: i64,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_seconds: Option<f64>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub cover_art_url: Option<String>,
}

/// A track in the user's library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryTrackRead {
    pub track: TrackRead,
    /// ISO 8601 timestamp, kept as sent
    pub added_at: String,
}

impl From<TrackRead> for Track {
    fn from(track: TrackRead) -> Self {
        // Missing or nonsensical durations become 0 (unknown)
        let duration = track
            .duration_seconds
            .filter(|d| d.is_finite() && *d > 0.0)
            .map_or(0, |d| d.round().min(f64::from(u32::MAX)) as u32);

        let mut converted = Track::new(track.id.to_string(), track.title, duration)
            .with_artist(track.artist);
        if let Some(album) = track.album {
            converted = converted.with_album(album);
        }
        if let Some(cover) = track.cover_art_url {
            converted = converted.with_artwork(cover);
        }
        converted
    }
}

impl From<LibraryTrackRead> for Track {
    fn from(entry: LibraryTrackRead) -> Self {
        entry.track.into()
    }
}
