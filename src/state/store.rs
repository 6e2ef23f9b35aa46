//! Single-owner task driving [`ArticlesState`]
//!
//! All mutations happen on the owner task. Fetches run on their own tasks
//! and report back through a completion channel, so the owner never waits
//! on the network and processes strategy changes and completions strictly
//! in arrival order.

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::machine::{ArticlesSnapshot, ArticlesState, Completion, FetchTicket};
use crate::common::channels::{create_snapshot_channel, SnapshotReceiver, SnapshotSender};
use crate::common::errors::{ClientError, FetchError, Result};
use crate::common::types::Article;
use crate::nytimes::client::MostPopularClient;
use crate::strategy::FetchStrategy;

/// Requests from handles to the owner task
#[derive(Debug)]
enum Command {
    SetStrategy(FetchStrategy),
    Subscribe(SnapshotSender),
    Snapshot(oneshot::Sender<ArticlesSnapshot>),
}

/// A finished fetch on its way back to the owner
#[derive(Debug)]
struct FetchDone {
    ticket: FetchTicket,
    outcome: std::result::Result<Vec<Article>, FetchError>,
}

/// Cloneable handle to the articles state owner
///
/// The owner task stops once every handle has been dropped. Fetches
/// still in flight at that point finish and are ignored.
#[derive(Debug, Clone)]
pub struct ArticlesStore {
    commands: mpsc::UnboundedSender<Command>,
}

impl ArticlesStore {
    /// Spawn the owner task and immediately start fetching `initial`
    pub fn spawn(client: MostPopularClient, initial: FetchStrategy) -> (Self, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (owner, done_rx) = Owner::new(client, initial);
        let handle = tokio::spawn(owner.run(commands_rx, done_rx));
        (
            Self {
                commands: commands_tx,
            },
            handle,
        )
    }

    /// Spawn with the default strategy (most viewed, 7 days)
    pub fn spawn_default(client: MostPopularClient) -> (Self, JoinHandle<()>) {
        Self::spawn(client, FetchStrategy::default())
    }

    /// Make `strategy` current and fetch it
    ///
    /// Any fetch still outstanding keeps running but its result will be
    /// discarded.
    pub fn set_strategy_and_fetch(&self, strategy: FetchStrategy) -> Result<()> {
        self.send(Command::SetStrategy(strategy))
    }

    /// Receive the current snapshot first, then one snapshot per mutation
    /// in mutation order
    pub fn subscribe(&self) -> Result<SnapshotReceiver> {
        let (tx, rx) = create_snapshot_channel();
        self.send(Command::Subscribe(tx))?;
        Ok(rx)
    }

    /// Current snapshot
    pub async fn snapshot(&self) -> Result<ArticlesSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Snapshot(tx))?;
        rx.await
            .map_err(|e| ClientError::ChannelReceive(e.to_string()))
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| ClientError::ChannelSend("articles store stopped".to_string()))
    }
}

struct Owner {
    client: MostPopularClient,
    state: ArticlesState,
    subscribers: Vec<SnapshotSender>,
    done_tx: mpsc::UnboundedSender<FetchDone>,
}

impl Owner {
    fn new(
        client: MostPopularClient,
        initial: FetchStrategy,
    ) -> (Self, mpsc::UnboundedReceiver<FetchDone>) {
        let (done_tx, done_rx) = mpsc::unbounded_channel();
        let owner = Self {
            client,
            state: ArticlesState::new(initial),
            subscribers: Vec::new(),
            done_tx,
        };
        (owner, done_rx)
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut done_rx: mpsc::UnboundedReceiver<FetchDone>,
    ) {
        let initial = self.state.strategy();
        self.start_fetch(initial);

        loop {
            // Queued strategy changes take priority over completions so a
            // result never commits ahead of a newer request already sent
            tokio::select! {
                biased;
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(done) = done_rx.recv() => self.handle_done(done),
            }
        }

        debug!("Articles store stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::SetStrategy(strategy) => self.start_fetch(strategy),
            Command::Subscribe(tx) => {
                if tx.send(self.state.snapshot()).is_ok() {
                    self.subscribers.push(tx);
                }
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot());
            }
        }
    }

    fn start_fetch(&mut self, strategy: FetchStrategy) {
        let ticket = self.state.begin(strategy);
        info!(strategy = %strategy, generation = ticket.generation, "Fetching articles");
        self.publish();

        let client = self.client.clone();
        let done_tx = self.done_tx.clone();
        tokio::spawn(async move {
            let outcome = ticket.strategy.fetch(&client).await;
            let _ = done_tx.send(FetchDone { ticket, outcome });
        });
    }

    fn handle_done(&mut self, done: FetchDone) {
        if let Err(err) = &done.outcome {
            warn!(strategy = %done.ticket.strategy, error = %err, "Fetch failed");
        }

        match self.state.complete(done.ticket, done.outcome) {
            Completion::Applied => {
                info!(
                    strategy = %done.ticket.strategy,
                    count = self.state.articles().len(),
                    "Articles updated"
                );
                self.publish();
            }
            Completion::Stale => {
                debug!(
                    strategy = %done.ticket.strategy,
                    generation = done.ticket.generation,
                    "Discarding stale fetch result"
                );
            }
        }
    }

    fn publish(&mut self) {
        let snapshot = self.state.snapshot();
        self.subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
    }
}
