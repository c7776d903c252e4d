//! Session bootstrap
//!
//! Turns navigation parameters into an initialized [`PlaybackSession`].
//! Parameters arrive string-encoded; anything malformed apart from the track
//! id is normalized rather than rejected.

use crate::{
    error::{BootstrapError, Result},
    session::PlaybackSession,
    types::PlaybackConfig,
};
use melody_core::{CatalogList, CatalogProvider, ListType};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Parameters passed to the player view at navigation time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapParams {
    /// Identifier of the track to play
    #[serde(default, alias = "id")]
    pub track_id: Option<String>,

    /// Tag of the list the track was picked from
    #[serde(default)]
    pub list_type: Option<String>,

    /// Resume position, string-encoded seconds
    #[serde(default, alias = "initialTime")]
    pub resume_seconds: Option<String>,

    /// Resume play flag, string-encoded boolean
    #[serde(default, alias = "initiallyPlaying")]
    pub resume_playing: Option<String>,
}

impl BootstrapParams {
    /// Parameters for a track id with everything else defaulted
    pub fn new(track_id: impl Into<String>) -> Self {
        Self {
            track_id: Some(track_id.into()),
            ..Self::default()
        }
    }

    /// Set the list tag
    #[must_use]
    pub fn with_list_type(mut self, list_type: impl Into<String>) -> Self {
        self.list_type = Some(list_type.into());
        self
    }

    /// Set the resume position
    #[must_use]
    pub fn with_resume_seconds(mut self, seconds: impl ToString) -> Self {
        self.resume_seconds = Some(seconds.to_string());
        self
    }

    /// Set the resume play flag
    #[must_use]
    pub fn with_resume_playing(mut self, playing: impl ToString) -> Self {
        self.resume_playing = Some(playing.to_string());
        self
    }

    /// Track id, if present and not blank
    pub fn track_id(&self) -> Option<&str> {
        self.track_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// List tag resolved against the closed set
    pub fn resolved_list_type(&self) -> ListType {
        self.list_type
            .as_deref()
            .map_or(ListType::Unknown, ListType::parse)
    }

    /// Resume position; invalid, negative or missing input yields 0
    pub fn resume_seconds(&self) -> f64 {
        self.resume_seconds
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .unwrap_or(0.0)
    }

    /// Resume play flag; anything but `true`/`1` yields false
    pub fn resume_playing(&self) -> bool {
        self.resume_playing.as_deref().is_some_and(|raw| {
            let raw = raw.trim();
            raw.eq_ignore_ascii_case("true") || raw == "1"
        })
    }
}

/// Build a playback session from navigation parameters
///
/// Resolves the list tag (unrecognized tags become `unknown`), fetches that
/// list from the catalog and positions the session on the first track whose
/// id matches. The resume position is clamped to the track's duration.
pub fn bootstrap<C>(
    catalog: &C,
    params: &BootstrapParams,
    config: &PlaybackConfig,
) -> Result<PlaybackSession>
where
    C: CatalogProvider + ?Sized,
{
    let Some(track_id) = params.track_id() else {
        warn!("Bootstrap without a track id");
        return Err(BootstrapError::MissingTrackId);
    };

    let list_type = params.resolved_list_type();
    if let Some(raw) = params.list_type.as_deref() {
        if list_type == ListType::Unknown && raw != ListType::Unknown.as_str() {
            warn!(tag = %raw, "Unrecognized list tag, using unknown");
        }
    }

    let list = CatalogList::new(list_type, catalog.get_list(list_type));
    let Some(index) = list.position_of(track_id) else {
        warn!(track_id = %track_id, list = %list_type, "Track not found");
        return Err(BootstrapError::TrackNotFound {
            track_id: track_id.to_string(),
            list_type,
        });
    };

    let session = PlaybackSession::loaded(
        list.tracks,
        list_type,
        index,
        params.resume_seconds(),
        params.resume_playing(),
        config,
    );

    info!(
        track_id = %track_id,
        list = %list_type,
        index,
        elapsed_secs = session.elapsed_secs(),
        playing = session.is_playing(),
        "Playback session bootstrapped"
    );

    Ok(session)
}
