//! Track domain type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Track identifier, unique within a catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    /// Create a new track ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for TrackId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TrackId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Playable catalog item
///
/// Immutable once loaded; owned by the catalog provider and copied into
/// playback sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: Option<String>,

    /// Album name
    #[serde(default)]
    pub album: Option<String>,

    /// Artwork reference (usually an image URL)
    #[serde(default)]
    pub artwork: Option<String>,

    /// Duration in whole seconds, 0 when unknown
    #[serde(default)]
    pub duration_secs: u32,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: None,
            album: None,
            artwork: None,
            duration_secs,
        }
    }

    /// Set the artist
    #[must_use]
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    /// Set the album
    #[must_use]
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    /// Set the artwork reference
    #[must_use]
    pub fn with_artwork(mut self, artwork: impl Into<String>) -> Self {
        self.artwork = Some(artwork.into());
        self
    }

    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Whether the duration is known (non-zero)
    ///
    /// Tracks of unknown length never auto-advance.
    pub fn has_known_duration(&self) -> bool {
        self.duration_secs > 0
    }

    /// Artist for display, falling back to "Unknown Artist"
    pub fn display_artist(&self) -> &str {
        self.artist.as_deref().unwrap_or("Unknown Artist")
    }
}
