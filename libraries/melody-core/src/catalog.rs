//! Catalog provider
//!
//! The playback core never owns catalog data. It asks a [`CatalogProvider`]
//! for a named list at bootstrap time and keeps its own copy.

use crate::error::Result;
use crate::types::{CatalogList, ListType, Track};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only source of named track lists
///
/// Implementations never fail: an unknown tag, or a tag with no entry,
/// yields an empty list.
pub trait CatalogProvider {
    /// Get the ordered tracks of a list
    fn get_list(&self, list_type: ListType) -> Vec<Track>;
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for &T {
    fn get_list(&self, list_type: ListType) -> Vec<Track> {
        (**self).get_list(list_type)
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Arc<T> {
    fn get_list(&self, list_type: ListType) -> Vec<Track> {
        (**self).get_list(list_type)
    }
}

impl<T: CatalogProvider + ?Sized> CatalogProvider for Box<T> {
    fn get_list(&self, list_type: ListType) -> Vec<Track> {
        (**self).get_list(list_type)
    }
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    lists: HashMap<ListType, Vec<Track>>,
}

impl InMemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a list
    ///
    /// Tracks given for `ListType::Unknown` are discarded so that the
    /// fallback list stays empty.
    #[must_use]
    pub fn with_list(mut self, list_type: ListType, tracks: Vec<Track>) -> Self {
        self.insert(list_type, tracks);
        self
    }

    /// Add or replace a list in place
    pub fn insert(&mut self, list_type: ListType, tracks: Vec<Track>) {
        if list_type == ListType::Unknown {
            if !tracks.is_empty() {
                warn!(count = tracks.len(), "Ignoring tracks assigned to the unknown list");
            }
            return;
        }
        self.lists.insert(list_type, tracks);
    }

    /// All non-empty lists in home screen order
    pub fn lists(&self) -> Vec<CatalogList> {
        ListType::ALL
            .iter()
            .filter_map(|list_type| {
                self.lists
                    .get(list_type)
                    .filter(|tracks| !tracks.is_empty())
                    .map(|tracks| CatalogList::new(*list_type, tracks.clone()))
            })
            .collect()
    }

    /// Parse a catalog from JSON
    ///
    /// The document is an object keyed by list tag whose values are arrays of
    /// tracks. Unrecognized keys are dropped with a warning.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<Track>> = serde_json::from_str(json)?;

        let mut catalog = Self::new();
        for (tag, tracks) in raw {
            let list_type = ListType::parse(&tag);
            if list_type == ListType::Unknown {
                warn!(tag = %tag, "Dropping catalog entry with unrecognized list tag");
                continue;
            }
            debug!(list = %list_type, tracks = tracks.len(), "Loaded catalog list");
            catalog.insert(list_type, tracks);
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    /// Built-in sample catalog shown on the home screen
    pub fn sample() -> Self {
        fn item(id: &str, title: &str, artist: &str, artwork: &str, duration: u32) -> Track {
            Track::new(id, title, duration)
                .with_artist(artist)
                .with_artwork(format!("https://source.unsplash.com/600x600/?{artwork}"))
        }

        Self::new()
            .with_list(
                ListType::Carousel,
                vec![
                    item("c1", "Featured 1", "Various Artists", "music,concert", 180),
                    item("c2", "Featured 2", "Various Artists", "sheet,music", 210),
                    item("c3", "Featured 3", "Various Artists", "headphones", 240),
                ],
            )
            .with_list(
                ListType::TopPlaylists,
                vec![
                    item("pl1", "Chill Vibes", "Various Artists", "chill", 180),
                    item("pl2", "Workout Hits", "Various Artists", "gym,running", 210),
                    item("pl3", "Focus Flow", "Various Artists", "focus", 240),
                    item("pl4", "Party Starters", "Various Artists", "party,dj", 195),
                    item("pl5", "Indie Anthems", "Various Artists", "indie,guitar", 225),
                ],
            )
            .with_list(
                ListType::RecentlyPlayed,
                vec![
                    item("rp1", "Good Days", "SZA", "sunrise", 279),
                    item("rp2", "Levitating", "Dua Lipa", "dj,disco", 203),
                    item("rp3", "Stay", "The Kid LAROI", "night,city", 141),
                    item("rp4", "Peaches", "Justin Bieber", "peach", 198),
                    item("rp5", "Blinding Lights", "The Weeknd", "music,neon", 200),
                ],
            )
            .with_list(
                ListType::MadeForYou,
                vec![
                    item("mfy1", "Discover Weekly", "Playlist", "discover", 3600),
                    item("mfy2", "Daily Mix 1", "Playlist", "mix", 3600),
                    item("mfy3", "Release Radar", "Playlist", "radar", 3600),
                    item("mfy4", "Chill Hits", "Playlist", "chill,beach", 3600),
                    item("mfy5", "Summer Rewind", "Playlist", "summer", 3600),
                ],
            )
            .with_list(
                ListType::NewReleases,
                vec![
                    item("nr1", "Midnights", "Taylor Swift", "midnight", 2400),
                    item("nr2", "Dawn FM", "The Weeknd", "radio", 2800),
                    item("nr3", "SOS", "SZA", "ocean", 2900),
                    item("nr4", "Un Verano Sin Ti", "Bad Bunny", "beach,summer", 3100),
                    item("nr5", "Harry's House", "Harry Styles", "house", 2500),
                ],
            )
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn get_list(&self, list_type: ListType) -> Vec<Track> {
        if list_type == ListType::Unknown {
            return Vec::new();
        }
        self.lists.get(&list_type).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn unknown_list_is_always_empty() {
        let catalog = InMemoryCatalog::new()
            .with_list(ListType::Unknown, vec![Track::new("x", "X", 10)]);
        assert!(catalog.get_list(ListType::Unknown).is_empty());
    }

    #[test]
    fn missing_list_is_empty() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.get_list(ListType::NewReleases).is_empty());
    }

    #[test]
    fn sample_has_every_home_screen_list() {
        let catalog = InMemoryCatalog::sample();
        let lists = catalog.lists();
        assert_eq!(lists.len(), 5);
        assert_eq!(lists[0].list_type, ListType::Carousel);
        assert!(lists.iter().all(|l| l.len() >= 3));
    }

    #[test]
    fn provider_works_through_references_and_arcs() {
        let catalog = Arc::new(InMemoryCatalog::sample());
        let by_ref = &*catalog;
        assert_eq!(
            by_ref.get_list(ListType::RecentlyPlayed),
            catalog.get_list(ListType::RecentlyPlayed)
        );
    }

    #[test]
    fn from_json_drops_unrecognized_keys() {
        let json = r#"{
            "recentlyPlayed": [{"id": "a", "title": "A", "duration_secs": 30}],
            "bogus": [{"id": "b", "title": "B"}],
            "unknown": [{"id": "c", "title": "C"}]
        }"#;
        let catalog = InMemoryCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.get_list(ListType::RecentlyPlayed).len(), 1);
        assert_eq!(catalog.lists().len(), 1);
        assert!(catalog.get_list(ListType::Unknown).is_empty());
    }

    #[test]
    fn from_json_rejects_malformed_documents() {
        let err = InMemoryCatalog::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CoreError::Serialization(_)));
        assert!(err.to_string().starts_with("Malformed catalog: "));
    }
}
