//! Core data model definitions shared across CineVision crates.
#![allow(missing_docs)]

pub mod details;
pub mod image;
pub mod key;
pub mod media_kind;
pub mod search;

// Intentionally curated re-exports for downstream consumers.
pub use details::{CastMember, MediaDetails};
pub use image::{BackdropSize, ImagePath, PosterSize, ProfileSize};
pub use key::MediaKey;
pub use media_kind::MediaKind;
pub use search::{SearchPage, SearchResult};
