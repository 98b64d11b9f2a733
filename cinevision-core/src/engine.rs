//! The session state machine.
//!
//! [`Engine::update`] is the only state transition: it consumes one
//! [`Message`] (a UI gesture or an async completion) and returns the
//! [`Effect`]s the caller must perform. The engine itself never sleeps and
//! never touches the network, which keeps every behavior in this module
//! testable without a runtime. [`crate::driver`] supplies the tokio side.

use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use cinevision_model::{MediaDetails, MediaKey, SearchPage, SearchResult};

use crate::backdrop::{self, BackdropState};
use crate::carousel::{self, ProjectedItem, ViewportClass};
use crate::config::EngineConfig;
use crate::details::DetailCache;
use crate::input::{DragSession, Key, NavCommand, WheelAccumulator};
use crate::providers::ProviderError;
use crate::search::{CommitOutcome, SearchSession, SEARCH_FAILURE_MESSAGE};

/// Cadence of backdrop fade ticks while a fade is running.
const FADE_TICK: Duration = Duration::from_millis(16);

/// Everything the engine reacts to. UI gestures and async completions
/// arrive through the same funnel, so state only ever changes in
/// [`Engine::update`].
#[derive(Debug)]
pub enum Message {
    /// The query input changed.
    QueryEdited(String),
    /// A debounce timer armed by [`Effect::ScheduleDebounce`] fired.
    DebounceElapsed(String),
    /// The query input gained or lost input focus.
    QueryFocusChanged(bool),
    /// Pointer or touch press at a client X coordinate.
    PointerDown { x: f32 },
    /// Pointer or touch movement while pressed.
    PointerMoved { x: f32 },
    /// Pointer or touch release.
    PointerUp,
    /// Wheel or trackpad scroll deltas.
    Wheel { delta_x: f32, delta_y: f32 },
    /// A key press already translated from the host's event names.
    KeyPressed(Key),
    /// Click or tap on a visible card, by absolute result index.
    ItemActivated { index: usize },
    /// Flip the focused item in and out of the favorites set.
    ToggleFavorite,
    /// Request the next result page of the committed query.
    LoadMore,
    /// The hosting viewport was resized.
    ViewportResized { width: f32 },
    /// Wall-clock advancement for the backdrop fade.
    Tick(Duration),
    /// A search round-trip finished.
    SearchCompleted {
        query: String,
        result: Result<SearchPage, ProviderError>,
    },
    /// An enrichment round-trip finished.
    DetailsCompleted {
        key: MediaKey,
        result: Result<MediaDetails, ProviderError>,
    },
}

/// Work the caller performs on the engine's behalf. Effects are
/// descriptions only; completions come back as [`Message`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Sleep for the debounce window, then feed back
    /// [`Message::DebounceElapsed`] carrying the same query.
    ScheduleDebounce { query: String },
    /// Call the provider's search, then feed back
    /// [`Message::SearchCompleted`].
    Search { query: String, page: u32 },
    /// Call the provider's details, then feed back
    /// [`Message::DetailsCompleted`].
    FetchDetails { key: MediaKey },
    /// The user committed to an item: hand its key to the navigation sink.
    OpenDetail { key: MediaKey },
    /// A fade is running: feed back [`Message::Tick`] after this long.
    ScheduleTick { after: Duration },
}

/// One search-and-browse session.
pub struct Engine {
    config: EngineConfig,
    viewport_width: f32,
    wheel: WheelAccumulator,
    drag: Option<DragSession>,
    query_input_focused: bool,
    search: SearchSession,
    details: DetailCache,
    favorites: HashSet<MediaKey>,
    backdrop: BackdropState,
    tick_pending: bool,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let wheel = WheelAccumulator::new(config.wheel_threshold);
        let backdrop = BackdropState::new(config.backdrop_opacity, config.backdrop_fade);
        Self {
            config,
            viewport_width: 0.0,
            wheel,
            drag: None,
            query_input_focused: false,
            search: SearchSession::new(),
            details: DetailCache::new(),
            favorites: HashSet::new(),
            backdrop,
            tick_pending: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn details(&self) -> &DetailCache {
        &self.details
    }

    pub fn backdrop(&self) -> &BackdropState {
        &self.backdrop
    }

    pub fn is_favorite(&self, key: MediaKey) -> bool {
        self.favorites.contains(&key)
    }

    pub fn viewport_class(&self) -> ViewportClass {
        ViewportClass::from_width(self.viewport_width)
    }

    /// Project the visible carousel window for the current viewport.
    pub fn window(&self) -> Vec<ProjectedItem> {
        carousel::project(
            self.search.results.len(),
            self.search.results.focus(),
            self.viewport_class(),
        )
    }

    /// Apply one message and return the effects it demands.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();
        match message {
            Message::QueryEdited(query) => {
                self.search.set_raw_query(query.clone());
                effects.push(Effect::ScheduleDebounce { query });
            }
            Message::DebounceElapsed(query) => {
                // The user may have typed more since this timer was armed.
                if self.search.raw_query() == query {
                    self.commit_query(&mut effects);
                }
            }
            Message::QueryFocusChanged(focused) => {
                self.query_input_focused = focused;
            }
            Message::PointerDown { x } => {
                self.drag = Some(DragSession::begin(x));
            }
            Message::PointerMoved { x } => {
                let threshold = self.config.drag_threshold(self.viewport_width);
                if let Some(drag) = self.drag.as_mut() {
                    let commands = drag.feed(x, threshold);
                    self.apply_commands(commands, &mut effects);
                }
            }
            Message::PointerUp => {
                self.drag = None;
            }
            Message::Wheel { delta_x, delta_y } => {
                // An empty stage banks no deltas.
                if !self.search.results.is_empty() {
                    let commands = self.wheel.feed(delta_x, delta_y);
                    self.apply_commands(commands, &mut effects);
                }
            }
            Message::KeyPressed(key) => match key {
                Key::Escape => {
                    self.search.clear();
                    self.refresh_focus(&mut effects);
                }
                Key::Enter => {
                    if self.query_input_focused {
                        self.commit_query(&mut effects);
                    }
                }
                other => {
                    if let Some(command) = other.nav_command() {
                        self.apply_commands(vec![command], &mut effects);
                    }
                }
            },
            Message::ItemActivated { index } => {
                if index >= self.search.results.len() {
                    debug!(index, "activation outside the result set ignored");
                } else if index == self.search.results.focus() {
                    if let Some(key) = self.search.results.focused_key() {
                        info!(%key, "opening detail page");
                        effects.push(Effect::OpenDetail { key });
                    }
                } else {
                    self.search.results.set_focus(index);
                    self.refresh_focus(&mut effects);
                }
            }
            Message::ToggleFavorite => {
                if let Some(key) = self.search.results.focused_key() {
                    if self.favorites.remove(&key) {
                        debug!(%key, "unfavorited");
                    } else {
                        debug!(%key, "favorited");
                        self.favorites.insert(key);
                    }
                }
            }
            Message::LoadMore => {
                if let Some((query, page)) = self.search.next_page_request() {
                    self.search.is_searching = true;
                    effects.push(Effect::Search { query, page });
                }
            }
            Message::ViewportResized { width } => {
                self.viewport_width = width;
            }
            Message::Tick(dt) => {
                self.tick_pending = false;
                self.backdrop.tick(dt);
                self.schedule_tick_if_fading(&mut effects);
            }
            Message::SearchCompleted { query, result } => match result {
                Ok(page) => {
                    let merged = page.page > 1;
                    if self.search.apply_results(&query, page) {
                        info!(
                            query,
                            merged,
                            total = self.search.results.len(),
                            "search results applied"
                        );
                        self.refresh_focus(&mut effects);
                    }
                }
                Err(error) => {
                    if self.search.apply_error(&query, SEARCH_FAILURE_MESSAGE) {
                        warn!(query, %error, "search failed");
                    }
                }
            },
            Message::DetailsCompleted { key, result } => {
                match result {
                    Ok(details) => self.details.fulfill(key, details),
                    Err(error) => {
                        // Enrichment is best-effort and never surfaces to the user.
                        warn!(%key, %error, "detail enrichment failed");
                        self.details.fail(key);
                    }
                }
                if self.search.results.focused_key() == Some(key) {
                    self.refresh_backdrop(&mut effects);
                }
            }
        }
        effects
    }

    /// Render-ready copy of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let results = &self.search.results;
        Snapshot {
            query: self.search.raw_query().to_string(),
            committed_query: self.search.committed_query().map(str::to_string),
            is_searching: self.search.is_searching,
            error: self.search.error.clone(),
            items: results.items().to_vec(),
            focus: results.focus(),
            page: results.page(),
            total_pages: results.total_pages(),
            window: self.window(),
            focused_details: results
                .focused_key()
                .and_then(|key| self.details.ready(key))
                .cloned(),
            favorites: self.favorites.clone(),
            backdrop_url: self.backdrop.url().map(str::to_string),
            backdrop_opacity: self.backdrop.opacity(),
        }
    }

    fn commit_query(&mut self, effects: &mut Vec<Effect>) {
        match self.search.commit_current() {
            CommitOutcome::Cleared => {
                debug!("query cleared without a request");
                self.refresh_focus(effects);
            }
            CommitOutcome::Fetch(query) => {
                info!(query, "query committed");
                effects.push(Effect::Search { query, page: 1 });
            }
        }
    }

    fn apply_commands(&mut self, commands: Vec<NavCommand>, effects: &mut Vec<Effect>) {
        if commands.is_empty() || self.search.results.is_empty() {
            return;
        }
        let before = self.search.results.focus();
        for command in commands {
            match command {
                NavCommand::Advance => self.search.results.advance(),
                NavCommand::Retreat => self.search.results.retreat(),
            }
        }
        if self.search.results.focus() != before {
            debug!(focus = self.search.results.focus(), "focus moved");
            self.refresh_focus(effects);
        }
    }

    /// Runs after anything that can change which item is focused:
    /// enrichment-on-focus, then backdrop rederivation.
    fn refresh_focus(&mut self, effects: &mut Vec<Effect>) {
        if let Some(key) = self.search.results.focused_key() {
            if self.details.request(key) {
                effects.push(Effect::FetchDetails { key });
            }
        }
        self.refresh_backdrop(effects);
    }

    fn refresh_backdrop(&mut self, effects: &mut Vec<Effect>) {
        let url = self.search.results.focused().and_then(|item| {
            backdrop::resolve_url(&self.config.image_base, item, self.details.ready(item.key))
        });
        self.backdrop.retarget(url);
        self.schedule_tick_if_fading(effects);
    }

    fn schedule_tick_if_fading(&mut self, effects: &mut Vec<Effect>) {
        if self.backdrop.is_fading() && !self.tick_pending {
            self.tick_pending = true;
            effects.push(Effect::ScheduleTick { after: FADE_TICK });
        }
    }
}

/// Immutable view of engine state, published by the driver after every
/// message.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Snapshot {
    pub query: String,
    pub committed_query: Option<String>,
    pub is_searching: bool,
    pub error: Option<String>,
    pub items: Vec<SearchResult>,
    pub focus: usize,
    pub page: u32,
    pub total_pages: u32,
    pub window: Vec<ProjectedItem>,
    pub focused_details: Option<MediaDetails>,
    pub favorites: HashSet<MediaKey>,
    pub backdrop_url: Option<String>,
    pub backdrop_opacity: f32,
}
