//! Observable alert state for display.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::client::AlertSource;
use super::types::Alert;

/// What the alerts view should show.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertsState {
    /// A fetch is in progress (or none has completed yet).
    Loading,
    /// The last fetch succeeded.
    Loaded {
        alerts: Arc<Vec<Alert>>,
        fetched_at: DateTime<Utc>,
    },
    /// The last fetch failed.
    Failed { message: String },
}

/// Latest alert state, shared by every subscriber.
#[derive(Clone)]
pub struct AlertFeed {
    state: Arc<watch::Sender<AlertsState>>,
    latest: Arc<AtomicU64>,
}

impl AlertFeed {
    /// Create a feed in the `Loading` state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(AlertsState::Loading);
        Self {
            state: Arc::new(state),
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn current(&self) -> AlertsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AlertsState> {
        self.state.subscribe()
    }

    /// Fetch alerts from `source` and publish the outcome.
    ///
    /// Subscribers see `Loading` first, then `Loaded` or `Failed`. When
    /// reloads overlap only the most recently started one publishes its
    /// outcome; an older one still returns what it fetched.
    pub async fn reload<S: AlertSource>(&self, source: &S) -> AlertsState {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(AlertsState::Loading);

        let next = match source.fetch_alerts().await {
            Ok(alerts) => {
                info!(count = alerts.len(), "alerts loaded");
                AlertsState::Loaded {
                    alerts: Arc::new(alerts),
                    fetched_at: Utc::now(),
                }
            }
            Err(e) => {
                warn!(error = %e, "alert fetch failed");
                AlertsState::Failed {
                    message: e.user_message(),
                }
            }
        };

        // Ticket is compared under the channel lock.
        let published = self.state.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = next.clone();
            true
        });
        if !published {
            debug!(ticket, "alert reload superseded by a newer one");
        }

        next
    }
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::new()
    }
}
