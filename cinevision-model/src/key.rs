use std::fmt::Formatter;

use std::fmt::Display;

use crate::media_kind::MediaKind;

/// Unique identity of a catalog item: provider kind plus numeric id.
///
/// Movie and show id spaces overlap at the provider, so the pair is the key
/// everywhere items are cached, deduplicated, or favorited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaKey {
    pub kind: MediaKind,
    pub id: u64,
}

impl MediaKey {
    pub const fn new(kind: MediaKind, id: u64) -> Self {
        Self { kind, id }
    }
}

impl Display for MediaKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.kind.as_provider_tag(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_provider_tag() {
        let key = MediaKey::new(MediaKind::Movie, 603);
        assert_eq!(key.to_string(), "movie-603");

        let key = MediaKey::new(MediaKind::Show, 1396);
        assert_eq!(key.to_string(), "tv-1396");
    }

    #[test]
    fn same_id_different_kind_is_distinct() {
        let movie = MediaKey::new(MediaKind::Movie, 42);
        let show = MediaKey::new(MediaKind::Show, 42);
        assert_ne!(movie, show);
    }
}
