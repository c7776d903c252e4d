//! Catalog list identifiers

use super::Track;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag identifying one of the catalog's named lists
///
/// The set is closed. Anything that is not a known tag resolves to
/// [`ListType::Unknown`], whose list is always empty.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ListType {
    /// Curated playlists on the home screen
    TopPlaylists,
    /// Recently played tracks
    RecentlyPlayed,
    /// Personalised mixes
    MadeForYou,
    /// New releases
    NewReleases,
    /// Featured carousel
    Carousel,
    /// Fallback for unrecognized tags
    #[default]
    Unknown,
}

impl ListType {
    /// Every tag, in home screen order
    pub const ALL: [ListType; 6] = [
        ListType::Carousel,
        ListType::TopPlaylists,
        ListType::RecentlyPlayed,
        ListType::MadeForYou,
        ListType::NewReleases,
        ListType::Unknown,
    ];

    /// Resolve a raw tag, normalizing anything unrecognized to `Unknown`
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "topPlaylists" => Self::TopPlaylists,
            "recentlyPlayed" => Self::RecentlyPlayed,
            "madeForYou" => Self::MadeForYou,
            "newReleases" => Self::NewReleases,
            "carousel" => Self::Carousel,
            _ => Self::Unknown,
        }
    }

    /// Wire form of the tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopPlaylists => "topPlaylists",
            Self::RecentlyPlayed => "recentlyPlayed",
            Self::MadeForYou => "madeForYou",
            Self::NewReleases => "newReleases",
            Self::Carousel => "carousel",
            Self::Unknown => "unknown",
        }
    }

    /// Human readable section title
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TopPlaylists => "Top Playlists",
            Self::RecentlyPlayed => "Recently Played",
            Self::MadeForYou => "Made For You",
            Self::NewReleases => "New Releases",
            Self::Carousel => "Featured",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named, ordered sequence of tracks
///
/// Order is significant: it defines next/previous during playback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogList {
    /// Which list this is
    pub list_type: ListType,

    /// Tracks in playback order
    pub tracks: Vec<Track>,
}

impl CatalogList {
    /// Create a new list
    pub fn new(list_type: ListType, tracks: Vec<Track>) -> Self {
        Self { list_type, tracks }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the list has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Position of the first track with the given id
    pub fn position_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == *track_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip_through_as_str() {
        for list_type in ListType::ALL {
            assert_eq!(ListType::parse(list_type.as_str()), list_type);
        }
    }

    #[test]
    fn unrecognized_tags_become_unknown() {
        assert_eq!(ListType::parse("not-a-real-tag"), ListType::Unknown);
        assert_eq!(ListType::parse(""), ListType::Unknown);
        // Tags are case sensitive
        assert_eq!(ListType::parse("RecentlyPlayed"), ListType::Unknown);
    }

    #[test]
    fn serializes_as_camel_case() {
        let json = serde_json::to_string(&ListType::MadeForYou).unwrap();
        assert_eq!(json, "\"madeForYou\"");
    }

    #[test]
    fn position_of_returns_first_match() {
        let list = CatalogList::new(
            ListType::Carousel,
            vec![
                Track::new("a", "A", 10),
                Track::new("b", "B", 10),
                Track::new("b", "B again", 10),
            ],
        );
        assert_eq!(list.position_of("b"), Some(1));
        assert_eq!(list.position_of("z"), None);
    }
}
