//! Background image resolution and crossfade sequencing.
//!
//! The stage behind the carousel shows one image derived from the focused
//! item. Source resolution prefers the poster rendered large; failing that,
//! a backdrop (the enriched one first, the inline search-result one second);
//! failing both, the stage is empty.

use std::time::Duration;

use cinevision_model::{BackdropSize, MediaDetails, PosterSize, SearchResult};

/// Resolve the background URL for a focused item.
pub fn resolve_url(
    image_base: &str,
    item: &SearchResult,
    details: Option<&MediaDetails>,
) -> Option<String> {
    if let Some(poster) = &item.poster_path {
        return Some(poster.url(image_base, PosterSize::W780.as_str()));
    }
    details
        .and_then(|d| d.backdrop_path.as_ref())
        .or(item.backdrop_path.as_ref())
        .map(|backdrop| backdrop.url(image_base, BackdropSize::W1280.as_str()))
}

/// Crossfade state for the stage background.
///
/// Opacity moves between 0 and the configured display value over a fixed
/// fade duration, regardless of where the fade starts. Swapping one image
/// for another keeps the current opacity; only appearing and disappearing
/// animate. On a fade to empty the URL is held until opacity reaches 0.
#[derive(Debug, Clone)]
pub struct BackdropState {
    url: Option<String>,
    opacity: f32,
    fade_from: f32,
    target: f32,
    elapsed: Duration,
    display_opacity: f32,
    fade: Duration,
}

impl BackdropState {
    pub fn new(display_opacity: f32, fade: Duration) -> Self {
        Self {
            url: None,
            opacity: 0.0,
            fade_from: 0.0,
            target: 0.0,
            elapsed: Duration::ZERO,
            display_opacity,
            fade,
        }
    }

    /// Point the stage at a new resolved URL, or at nothing.
    pub fn retarget(&mut self, url: Option<String>) {
        match url {
            Some(url) => {
                self.url = Some(url);
                if self.target != self.display_opacity {
                    self.begin_fade(self.display_opacity);
                }
            }
            None => {
                if self.target != 0.0 {
                    self.begin_fade(0.0);
                }
                // Nothing was visible yet, so there is no fade to run.
                if self.opacity == 0.0 {
                    self.url = None;
                }
            }
        }
    }

    fn begin_fade(&mut self, target: f32) {
        self.fade_from = self.opacity;
        self.target = target;
        self.elapsed = Duration::ZERO;
    }

    /// Advance the fade by elapsed wall time.
    pub fn tick(&mut self, dt: Duration) {
        if !self.is_fading() {
            return;
        }
        self.elapsed += dt;
        let progress = (self.elapsed.as_secs_f32() / self.fade.as_secs_f32()).min(1.0);
        self.opacity = self.fade_from + (self.target - self.fade_from) * progress;
        if progress >= 1.0 {
            self.opacity = self.target;
            if self.target == 0.0 {
                self.url = None;
            }
        }
    }

    /// The URL currently on the stage. Held through a fade-out.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn is_fading(&self) -> bool {
        self.opacity != self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinevision_model::{ImagePath, MediaKey, MediaKind};

    const BASE: &str = "https://image.tmdb.org/t/p";

    fn item(poster: Option<&str>, backdrop: Option<&str>) -> SearchResult {
        SearchResult {
            key: MediaKey::new(MediaKind::Movie, 603),
            title: "The Matrix".to_string(),
            poster_path: poster.map(ImagePath::new),
            backdrop_path: backdrop.map(ImagePath::new),
            rating: 8.2,
            release_date: "1999-03-31".to_string(),
            overview: String::new(),
        }
    }

    fn enriched(backdrop: Option<&str>) -> MediaDetails {
        MediaDetails {
            genres: vec![],
            runtime_minutes: None,
            cast: vec![],
            backdrop_path: backdrop.map(ImagePath::new),
        }
    }

    fn shown(state: &mut BackdropState, url: &str) {
        state.retarget(Some(url.to_string()));
        state.tick(Duration::from_millis(350));
    }

    #[test]
    fn poster_wins_over_any_backdrop() {
        let item = item(Some("/poster.jpg"), Some("/inline.jpg"));
        let details = enriched(Some("/enriched.jpg"));
        assert_eq!(
            resolve_url(BASE, &item, Some(&details)).as_deref(),
            Some("https://image.tmdb.org/t/p/w780/poster.jpg")
        );
    }

    #[test]
    fn enriched_backdrop_beats_inline_then_falls_back() {
        let item = item(None, Some("/inline.jpg"));
        let details = enriched(Some("/enriched.jpg"));
        assert_eq!(
            resolve_url(BASE, &item, Some(&details)).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/enriched.jpg")
        );
        // Enrichment succeeded but carried no backdrop: use the inline one.
        assert_eq!(
            resolve_url(BASE, &item, Some(&enriched(None))).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/inline.jpg")
        );
        assert_eq!(
            resolve_url(BASE, &item, None).as_deref(),
            Some("https://image.tmdb.org/t/p/w1280/inline.jpg")
        );
    }

    #[test]
    fn nothing_resolvable_yields_empty() {
        assert_eq!(resolve_url(BASE, &item(None, None), None), None);
    }

    #[test]
    fn fade_out_holds_the_url_until_fully_transparent() {
        let mut state = BackdropState::new(0.9, Duration::from_millis(350));
        shown(&mut state, "a.jpg");
        assert!((state.opacity() - 0.9).abs() < 1e-4);

        state.retarget(None);
        assert_eq!(state.url(), Some("a.jpg"));
        state.tick(Duration::from_millis(175));
        assert!((state.opacity() - 0.45).abs() < 1e-4);
        assert_eq!(state.url(), Some("a.jpg"));
        state.tick(Duration::from_millis(200));
        assert_eq!(state.opacity(), 0.0);
        assert_eq!(state.url(), None);
        assert!(!state.is_fading());
    }

    #[test]
    fn swapping_images_is_immediate_and_keeps_opacity() {
        let mut state = BackdropState::new(0.9, Duration::from_millis(350));
        shown(&mut state, "a.jpg");

        state.retarget(Some("b.jpg".to_string()));
        assert_eq!(state.url(), Some("b.jpg"));
        assert!((state.opacity() - 0.9).abs() < 1e-4);
        assert!(!state.is_fading());
    }

    #[test]
    fn refocusing_mid_fade_out_fades_back_in() {
        let mut state = BackdropState::new(0.9, Duration::from_millis(350));
        shown(&mut state, "a.jpg");
        state.retarget(None);
        state.tick(Duration::from_millis(175));
        assert!((state.opacity() - 0.45).abs() < 1e-4);

        state.retarget(Some("a.jpg".to_string()));
        assert_eq!(state.url(), Some("a.jpg"));
        state.tick(Duration::from_millis(350));
        assert!((state.opacity() - 0.9).abs() < 1e-4);
    }

    #[test]
    fn empty_to_empty_is_a_no_op() {
        let mut state = BackdropState::new(0.9, Duration::from_millis(350));
        state.retarget(None);
        assert_eq!(state.url(), None);
        assert_eq!(state.opacity(), 0.0);
        assert!(!state.is_fading());
    }

    #[test]
    fn clearing_a_never_shown_image_drops_it_immediately() {
        let mut state = BackdropState::new(0.9, Duration::from_millis(350));
        // Armed but never ticked: still fully transparent.
        state.retarget(Some("a.jpg".to_string()));
        state.retarget(None);
        assert_eq!(state.url(), None);
        assert!(!state.is_fading());
    }
}
