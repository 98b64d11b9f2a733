use std::fmt::Formatter;

use std::fmt::Display;

/// Simple enum for the two catalog media kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaKind {
    /// Feature film
    Movie,
    /// Television show
    Show,
}

impl MediaKind {
    /// Path segment used by the metadata provider ("movie" / "tv").
    pub const fn as_provider_tag(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "tv",
        }
    }

    /// Parse a provider `media_type` tag.
    ///
    /// Returns `None` for kinds the catalog does not carry (people,
    /// collections), which callers drop at ingestion.
    pub fn from_provider_tag(tag: &str) -> Option<Self> {
        match tag {
            "movie" => Some(MediaKind::Movie),
            "tv" => Some(MediaKind::Show),
            _ => None,
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Show => write!(f, "Show"),
        }
    }
}
