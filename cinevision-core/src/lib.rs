//! # CineVision Core
//!
//! Engine for the CineVision search carousel: a message-driven state machine
//! that fuses pointer drags, wheel scrolls, and key presses into circular
//! navigation over a searched result list, debounces query edits into
//! provider calls, enriches the focused title on demand, and derives a
//! cross-faded background image from whatever is focused.
//!
//! ## Overview
//!
//! - **Input translation**: per-channel accumulator reducers that fold raw
//!   deltas into discrete advance/retreat commands
//! - **Circular carousel**: wraparound focus arithmetic plus a windowed
//!   projection yielding per-card transform parameters
//! - **Search sessions**: 450 ms debounce, last-committed-query-wins stale
//!   filtering, page-merging pagination
//! - **Detail cache**: request-deduplicated enrichment, never evicted within
//!   a session
//! - **Backdrop crossfade**: poster-first source resolution with a fixed
//!   350 ms fade
//! - **Providers**: async trait boundary with a TMDB-backed implementation
//!
//! ## Architecture
//!
//! [`engine::Engine`] is synchronous and single-threaded: feed it
//! [`engine::Message`]s, execute the [`engine::Effect`]s it returns. The
//! [`driver`] module wraps an engine in a tokio loop that performs those
//! effects (debounce timers, provider round-trips) and feeds completions
//! back in, so hosts only deal in messages and state snapshots.

// TODO: Document properly
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Background image resolution and crossfade sequencing
pub mod backdrop;

/// Circular focus arithmetic, viewport classes, and window projection
pub mod carousel;

/// Engine tuning constants
pub mod config;

/// Detail enrichment cache with request deduplication
pub mod details;

/// Tokio effect loop around an engine instance
pub mod driver;

/// The message/effect state machine
pub mod engine;

/// Gesture-to-command reducers (wheel, drag, keys)
pub mod input;

/// External catalog providers (TMDB integration)
pub mod providers;

/// Query lifecycle and result-set state
pub mod search;

pub use config::EngineConfig;
pub use engine::{Effect, Engine, Message, Snapshot};
pub use providers::{CatalogProvider, ProviderError, TmdbProvider};
