use crate::image::ImagePath;

/// A credited cast member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_path: Option<ImagePath>,
}

/// Enriched metadata fetched on demand for a focused item.
///
/// Everything a base search result does not carry: genres, runtime and
/// the leading cast. Cast lists are truncated at ingestion, not here.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaDetails {
    pub genres: Vec<String>,
    /// Runtime in minutes; shows use the first episode runtime when present.
    pub runtime_minutes: Option<u32>,
    pub cast: Vec<CastMember>,
    pub backdrop_path: Option<ImagePath>,
}

impl MediaDetails {
    /// Genre names joined for display, `None` when the provider sent none.
    pub fn genre_line(&self) -> Option<String> {
        if self.genres.is_empty() {
            None
        } else {
            Some(self.genres.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_line_joins_names() {
        let details = MediaDetails {
            genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
            runtime_minutes: Some(136),
            cast: vec![],
            backdrop_path: None,
        };
        assert_eq!(details.genre_line().as_deref(), Some("Action, Sci-Fi"));
    }

    #[test]
    fn genre_line_absent_without_genres() {
        let details = MediaDetails {
            genres: vec![],
            runtime_minutes: None,
            cast: vec![],
            backdrop_path: None,
        };
        assert_eq!(details.genre_line(), None);
    }
}
