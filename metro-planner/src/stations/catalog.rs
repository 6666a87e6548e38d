//! Observable station catalog.

use std::collections::HashSet;
use std::sync::Arc;

use futures::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::domain::{LineId, Station, StationId};

use super::error::StorageError;
use super::store::StationStore;

/// What subscribers receive on every catalog change.
pub type CatalogUpdate = Result<Snapshot, StorageError>;

/// The complete, ordered station list at one point in time.
///
/// Order is significant: neighbouring stations are adjacent on the line.
/// Snapshots never contain two stations with the same id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    stations: Arc<Vec<Station>>,
}

impl Snapshot {
    /// Build a snapshot, dropping any repeated id after its first occurrence.
    pub fn new(stations: Vec<Station>) -> Self {
        let mut seen = HashSet::with_capacity(stations.len());
        let total = stations.len();
        let stations: Vec<Station> = stations
            .into_iter()
            .filter(|s| seen.insert(s.id()))
            .collect();

        if stations.len() != total {
            warn!(
                dropped = total - stations.len(),
                "dropped stations with duplicate ids"
            );
        }

        Self {
            stations: Arc::new(stations),
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// All stations in line order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Zero-based position of a station in line order.
    pub fn position(&self, id: StationId) -> Option<usize> {
        self.stations.iter().position(|s| s.id() == id)
    }

    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.iter().find(|s| s.id() == id)
    }
}

/// Filter for [`StationCatalog::search`].
#[derive(Debug, Clone, Default)]
pub struct StationQuery {
    /// Case-insensitive substring matched against name and district.
    pub text: Option<String>,
    /// Restrict results to one line.
    pub line: Option<LineId>,
}

impl StationQuery {
    fn matches(&self, station: &Station) -> bool {
        if let Some(line) = self.line
            && station.line() != line
        {
            return false;
        }

        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                station.name().to_lowercase().contains(&needle)
                    || station.district().to_lowercase().contains(&needle)
            }
        }
    }
}

/// Result of [`StationCatalog::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store was empty and the seed was written.
    Seeded { count: usize },
    /// The store already held stations; nothing was written.
    AlreadyPopulated { count: usize },
}

/// Authoritative, observable station list.
///
/// Every change is published as a full replacement [`Snapshot`]. New
/// subscribers immediately see the latest value. Cloning shares the same
/// catalog.
#[derive(Clone)]
pub struct StationCatalog {
    store: Arc<dyn StationStore>,
    updates: Arc<watch::Sender<CatalogUpdate>>,
}

impl StationCatalog {
    /// Create a catalog over `store`, publishing its current contents.
    pub fn new(store: Arc<dyn StationStore>) -> Self {
        let initial = store.load().map(Snapshot::new);
        if let Err(e) = &initial {
            warn!(error = %e, "initial station load failed");
        }

        let (updates, _) = watch::channel(initial);
        Self {
            store,
            updates: Arc::new(updates),
        }
    }

    /// Stream of catalog updates, starting with the current one.
    pub fn observe(&self) -> impl Stream<Item = CatalogUpdate> + Send + 'static {
        WatchStream::new(self.updates.subscribe())
    }

    /// Raw watch receiver, for consumers that select over several sources.
    pub fn subscribe(&self) -> watch::Receiver<CatalogUpdate> {
        self.updates.subscribe()
    }

    /// The latest published update.
    pub fn snapshot(&self) -> CatalogUpdate {
        self.updates.borrow().clone()
    }

    /// Look up a station in the latest snapshot.
    pub fn get(&self, id: StationId) -> Option<Station> {
        match &*self.updates.borrow() {
            Ok(snapshot) => snapshot.get(id).cloned(),
            Err(_) => None,
        }
    }

    /// Stations from the latest snapshot matching `query`, in line order.
    pub fn search(&self, query: &StationQuery) -> Result<Vec<Station>, StorageError> {
        let snapshot = self.snapshot()?;
        Ok(snapshot
            .stations()
            .iter()
            .filter(|s| query.matches(s))
            .cloned()
            .collect())
    }

    /// Reload from the store and publish the result.
    ///
    /// A failed load is published too, so subscribers learn about it.
    pub fn refresh(&self) -> Result<usize, StorageError> {
        match self.store.load() {
            Ok(stations) => {
                let snapshot = Snapshot::new(stations);
                let count = snapshot.len();
                self.publish(Ok(snapshot));
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "station reload failed");
                self.publish(Err(e.clone()));
                Err(e)
            }
        }
    }

    /// Write stations through to the store, then publish.
    pub fn upsert_all(&self, stations: &[Station]) -> Result<usize, StorageError> {
        self.store.upsert_all(stations)?;
        self.refresh()
    }

    /// Populate an empty store with `initial`.
    ///
    /// Idempotent: a store that already holds stations is left untouched.
    pub fn seed(&self, initial: &[Station]) -> Result<SeedOutcome, StorageError> {
        let existing = self.store.load()?;
        if !existing.is_empty() {
            let count = existing.len();
            debug!(count, "station store already populated");
            self.publish(Ok(Snapshot::new(existing)));
            return Ok(SeedOutcome::AlreadyPopulated { count });
        }

        let count = self.upsert_all(initial)?;
        info!(count, "seeded station store");
        Ok(SeedOutcome::Seeded { count })
    }

    /// Publish `update`, notifying subscribers only if it differs.
    fn publish(&self, update: CatalogUpdate) {
        self.updates.send_if_modified(|current| {
            if *current == update {
                false
            } else {
                *current = update;
                true
            }
        });
    }
}
