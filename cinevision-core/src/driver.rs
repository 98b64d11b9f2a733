//! Tokio loop around an [`Engine`].
//!
//! The driver owns the engine on a single task, so state transitions stay
//! serialized: messages arrive over an unbounded channel, effects run on
//! spawned tasks, and their completions come back as messages. Hosts
//! observe the session through a watch channel of [`Snapshot`]s that is
//! refreshed after every applied message.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::debug;

use cinevision_model::MediaKey;

use crate::engine::{Effect, Engine, Message, Snapshot};
use crate::providers::CatalogProvider;

/// Handle to a running engine loop.
///
/// Cloning is cheap; all clones feed the same engine. Once every snapshot
/// receiver is gone the loop stops at the next applied message.
#[derive(Clone)]
pub struct Driver {
    messages: mpsc::UnboundedSender<Message>,
    snapshots: watch::Receiver<Snapshot>,
}

impl Driver {
    /// Spawn the engine loop onto the current runtime.
    ///
    /// `on_open` is the navigation sink: it runs on the loop task whenever
    /// the user commits to an item's detail page.
    pub fn spawn<P>(
        engine: Engine,
        provider: Arc<P>,
        on_open: impl Fn(MediaKey) + Send + 'static,
    ) -> Self
    where
        P: CatalogProvider + ?Sized + 'static,
    {
        let (message_tx, mut message_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());

        let loop_tx = message_tx.clone();
        tokio::spawn(async move {
            let mut engine = engine;
            let debounce = engine.config().debounce;
            while let Some(message) = message_rx.recv().await {
                for effect in engine.update(message) {
                    perform(effect, debounce, &loop_tx, &provider, &on_open);
                }
                if snapshot_tx.send(engine.snapshot()).is_err() {
                    debug!("all snapshot receivers dropped, stopping engine loop");
                    break;
                }
            }
        });

        Self {
            messages: message_tx,
            snapshots: snapshot_rx,
        }
    }

    /// Queue one message for the engine. Returns false once the loop has
    /// shut down.
    pub fn send(&self, message: Message) -> bool {
        self.messages.send(message).is_ok()
    }

    /// A fresh receiver on the snapshot channel.
    pub fn snapshots(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// The most recently published snapshot.
    pub fn latest(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }
}

fn perform<P>(
    effect: Effect,
    debounce: Duration,
    tx: &mpsc::UnboundedSender<Message>,
    provider: &Arc<P>,
    on_open: &impl Fn(MediaKey),
) where
    P: CatalogProvider + ?Sized + 'static,
{
    match effect {
        Effect::ScheduleDebounce { query } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(debounce).await;
                let _ = tx.send(Message::DebounceElapsed(query));
            });
        }
        Effect::ScheduleTick { after } => {
            let tx = tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(after).await;
                let _ = tx.send(Message::Tick(after));
            });
        }
        Effect::Search { query, page } => {
            let tx = tx.clone();
            let provider = Arc::clone(provider);
            tokio::spawn(async move {
                let result = provider.search(&query, page).await;
                let _ = tx.send(Message::SearchCompleted { query, result });
            });
        }
        Effect::FetchDetails { key } => {
            let tx = tx.clone();
            let provider = Arc::clone(provider);
            tokio::spawn(async move {
                let result = provider.details(key).await;
                let _ = tx.send(Message::DetailsCompleted { key, result });
            });
        }
        Effect::OpenDetail { key } => on_open(key),
    }
}
