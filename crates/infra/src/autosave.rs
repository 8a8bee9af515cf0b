//! Periodic and on-shutdown snapshots through an [`AppDataBridge`].

use std::time::{Duration, Instant};

use stockroom_inventory::{AppDataBridge, Clock, InventoryStore, KeyValueStore};

pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(60);

/// Saves a store snapshot at most once per `interval`.
///
/// The caller drives it: call [`Autosave::tick`] from the event loop and
/// [`Autosave::shutdown`] on exit. Bridge failures are logged and reported as
/// `false`.
#[derive(Debug)]
pub struct Autosave<B> {
    bridge: B,
    interval: Duration,
    last_saved: Option<Instant>,
}

impl<B: AppDataBridge> Autosave<B> {
    pub fn new(bridge: B, interval: Duration) -> Self {
        Self {
            bridge,
            interval,
            last_saved: None,
        }
    }

    /// Whether a save is due at `now`. The first tick after construction is
    /// always due.
    pub fn is_due(&self, now: Instant) -> bool {
        self.last_saved
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }

    /// Save if the interval has elapsed. Returns whether a save succeeded.
    pub fn tick<P, C>(&mut self, store: &InventoryStore<P, C>, now: Instant) -> bool
    where
        P: KeyValueStore,
        C: Clock,
    {
        if !self.is_due(now) {
            return false;
        }
        self.save_now(store, now)
    }

    /// Save unconditionally and restart the interval.
    pub fn save_now<P, C>(&mut self, store: &InventoryStore<P, C>, now: Instant) -> bool
    where
        P: KeyValueStore,
        C: Clock,
    {
        // Restart the interval even on failure so a broken disk is not retried
        // on every tick.
        self.last_saved = Some(now);
        match self.bridge.save_app_data(&store.snapshot()) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %err, "failed to save app data");
                false
            }
        }
    }

    /// Final save on exit.
    pub fn shutdown<P, C>(mut self, store: &InventoryStore<P, C>) -> bool
    where
        P: KeyValueStore,
        C: Clock,
    {
        let saved = self.save_now(store, Instant::now());
        tracing::info!(saved, "autosave shut down");
        saved
    }
}
