mod list_type;
mod track;

pub use list_type::{CatalogList, ListType};
pub use track::{Track, TrackId};
