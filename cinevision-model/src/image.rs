use std::fmt::Formatter;

use std::fmt::Display;

/// Provider-relative image path (always carries a leading slash).
///
/// The provider returns paths like `/xBKGJQsAIeweesB79KC89FpBrVr.jpg`; a full
/// URL is only formed once a size class is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImagePath(String);

impl ImagePath {
    /// Wrap a raw provider path, normalizing a missing leading slash.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.starts_with('/') {
            Self(raw)
        } else {
            Self(format!("/{raw}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build a fetchable URL from an image base and a size segment.
    pub fn url(&self, base: &str, size: &str) -> String {
        format!("{}/{}{}", base.trim_end_matches('/'), size, self.0)
    }
}

impl Display for ImagePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Poster image sizes (2:3 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PosterSize {
    /// 342px width - carousel card (default)
    #[default]
    W342,
    /// 500px width - detail panel poster
    W500,
    /// 780px width - focused card and poster-derived backgrounds
    W780,
}

impl PosterSize {
    pub const fn width(&self) -> u16 {
        match self {
            Self::W342 => 342,
            Self::W500 => 500,
            Self::W780 => 780,
        }
    }

    /// Convert to the URL size segment
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
        }
    }
}

impl Display for PosterSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.width())
    }
}

/// 16:9 widescreen backdrop sizes
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BackdropSize {
    /// 780px width - reduced backdrop
    W780,
    /// 1280px width - full-bleed background (default)
    #[default]
    W1280,
}

impl BackdropSize {
    pub const fn width(&self) -> u16 {
        match self {
            Self::W780 => 780,
            Self::W1280 => 1280,
        }
    }

    /// Convert to the URL size segment
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W780 => "w780",
            Self::W1280 => "w1280",
        }
    }
}

impl Display for BackdropSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.width())
    }
}

/// Profile/cast image sizes (2:3 aspect ratio)
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProfileSize {
    /// 185px width - cast strip (default)
    #[default]
    W185,
}

impl ProfileSize {
    pub const fn width(&self) -> u16 {
        match self {
            Self::W185 => 185,
        }
    }

    /// Convert to the URL size segment
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::W185 => "w185",
        }
    }
}

impl Display for ProfileSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}px", self.width())
    }
}
