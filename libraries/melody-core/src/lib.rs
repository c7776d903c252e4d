//! Melody Player Core
//!
//! Platform-agnostic core types, the catalog provider seam and error handling
//! shared by the playback, client and application crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `TrackId`, `ListType`, `CatalogList`
//! - **Catalog Provider**: the read-only `CatalogProvider` trait and an
//!   in-memory implementation with the built-in sample lists
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use melody_core::{CatalogProvider, InMemoryCatalog, ListType};
//!
//! let catalog = InMemoryCatalog::sample();
//! let recent = catalog.get_list(ListType::parse("recentlyPlayed"));
//! assert_eq!(recent[0].title, "Good Days");
//!
//! // Unrecognized tags never fail, they resolve to the empty `unknown` list
//! assert!(catalog.get_list(ListType::parse("not-a-real-tag")).is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod time;
pub mod types;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use error::{CoreError, Result};
pub use time::format_time;
pub use types::{CatalogList, ListType, Track, TrackId};
