//! Single-owner task around [`RoutePlanner`].
//!
//! Selection commands and catalog updates are both delivered to one task,
//! so a recompute never observes a half-applied change.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::domain::Station;
use crate::stations::CatalogUpdate;

use super::config::PlannerConfig;
use super::plan::RoutePlanner;
use super::route::{RouteResult, RouteSelection};

/// Capacity of the command queue.
const COMMAND_BUFFER: usize = 32;

/// Error from a planner handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    /// The planner task is no longer running
    #[error("route planner task has stopped")]
    Closed,
}

/// Selection and result as seen right after a command was applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerView {
    pub selection: RouteSelection,
    pub result: RouteResult,
}

enum Command {
    SelectOrigin(Option<Station>, oneshot::Sender<PlannerView>),
    SelectDestination(Option<Station>, oneshot::Sender<PlannerView>),
    Swap(oneshot::Sender<PlannerView>),
    View(oneshot::Sender<PlannerView>),
}

/// Cloneable handle to a running planner task.
#[derive(Clone)]
pub struct PlannerHandle {
    commands: mpsc::Sender<Command>,
    results: watch::Receiver<RouteResult>,
}

impl PlannerHandle {
    pub async fn select_origin(&self, station: Option<Station>) -> Result<PlannerView, PlannerError> {
        self.request(|reply| Command::SelectOrigin(station, reply))
            .await
    }

    pub async fn select_destination(
        &self,
        station: Option<Station>,
    ) -> Result<PlannerView, PlannerError> {
        self.request(|reply| Command::SelectDestination(station, reply))
            .await
    }

    pub async fn swap(&self) -> Result<PlannerView, PlannerError> {
        self.request(Command::Swap).await
    }

    /// Current selection and result.
    pub async fn view(&self) -> Result<PlannerView, PlannerError> {
        self.request(Command::View).await
    }

    /// Latest published result, without a round trip to the task.
    pub fn current(&self) -> RouteResult {
        self.results.borrow().clone()
    }

    /// Subscribe to result changes.
    pub fn subscribe(&self) -> watch::Receiver<RouteResult> {
        self.results.clone()
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<PlannerView>) -> Command,
    ) -> Result<PlannerView, PlannerError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| PlannerError::Closed)?;
        response.await.map_err(|_| PlannerError::Closed)
    }
}

/// Start a planner task fed by `catalog`.
///
/// The task runs until every handle has been dropped. Must be called from
/// within a tokio runtime.
pub fn spawn_planner(
    config: PlannerConfig,
    catalog: watch::Receiver<CatalogUpdate>,
) -> PlannerHandle {
    let planner = RoutePlanner::new(config);
    let results = planner.subscribe();
    let (commands, receiver) = mpsc::channel(COMMAND_BUFFER);

    tokio::spawn(run(planner, receiver, catalog));

    PlannerHandle { commands, results }
}

async fn run(
    mut planner: RoutePlanner,
    mut commands: mpsc::Receiver<Command>,
    mut catalog: watch::Receiver<CatalogUpdate>,
) {
    let initial = catalog.borrow_and_update().clone();
    planner.apply_catalog(initial);

    let mut catalog_open = true;
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(command) => handle(&mut planner, command),
                None => break,
            },
            changed = catalog.changed(), if catalog_open => match changed {
                Ok(()) => {
                    let update = catalog.borrow_and_update().clone();
                    planner.apply_catalog(update);
                }
                Err(_) => {
                    debug!("station catalog closed, keeping last snapshot");
                    catalog_open = false;
                }
            },
        }
    }

    info!("route planner stopped");
}

fn handle(planner: &mut RoutePlanner, command: Command) {
    let reply = match command {
        Command::SelectOrigin(station, reply) => {
            planner.select_origin(station);
            reply
        }
        Command::SelectDestination(station, reply) => {
            planner.select_destination(station);
            reply
        }
        Command::Swap(reply) => {
            planner.swap();
            reply
        }
        Command::View(reply) => reply,
    };

    // The requester may have given up waiting
    let _ = reply.send(PlannerView {
        selection: planner.selection().clone(),
        result: planner.result(),
    });
}
