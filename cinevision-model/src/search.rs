use crate::image::ImagePath;
use crate::key::MediaKey;

/// A single ranked search hit as ingested from the provider.
///
/// Immutable once received; result lists are replaced or appended to
/// wholesale, never edited in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub key: MediaKey,
    /// Display title ("Untitled" when the provider sends neither form).
    pub title: String,
    pub poster_path: Option<ImagePath>,
    pub backdrop_path: Option<ImagePath>,
    /// Provider vote average, 0.0 when absent.
    pub rating: f32,
    /// Provider-form date string (`YYYY-MM-DD`), possibly empty.
    pub release_date: String,
    pub overview: String,
}

impl SearchResult {
    /// Release year, if the date string carries one.
    pub fn year(&self) -> Option<&str> {
        self.release_date
            .split('-')
            .next()
            .filter(|y| !y.is_empty())
    }
}

/// One page of provider results.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
    pub page: u32,
    pub total_pages: u32,
}

impl SearchPage {
    /// Whether a page after this one exists.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}
