//! Pure state machine behind the articles store
//!
//! No I/O and no async: the owning task feeds it `begin` and `complete`
//! calls in the order it observes them.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::common::errors::FetchError;
use crate::common::types::Article;
use crate::strategy::FetchStrategy;

/// Whether a fetch is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

/// Identifies one issued fetch
///
/// Generations increase with every `begin`, so a reselection of an equal
/// strategy still supersedes the earlier fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub strategy: FetchStrategy,
}

/// What happened to a completed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Result committed to the state
    Applied,
    /// A newer fetch was issued meanwhile; the result was dropped
    Stale,
}

/// Immutable view handed to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlesSnapshot {
    pub strategy: FetchStrategy,
    pub articles: Arc<[Article]>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    /// Time of the last committed successful fetch
    pub updated_at: Option<DateTime<Utc>>,
}

/// Articles, loading flag and error message for the current strategy
#[derive(Debug, Clone)]
pub struct ArticlesState {
    strategy: FetchStrategy,
    articles: Arc<[Article]>,
    phase: Phase,
    error_message: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    generation: u64,
}

impl ArticlesState {
    /// Idle state with no data for the given strategy
    pub fn new(strategy: FetchStrategy) -> Self {
        Self {
            strategy,
            articles: Arc::from(Vec::new()),
            phase: Phase::Idle,
            error_message: None,
            updated_at: None,
            generation: 0,
        }
    }

    pub fn strategy(&self) -> FetchStrategy {
        self.strategy
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Record a new current strategy and enter Loading
    ///
    /// Previous articles stay visible until the new fetch commits.
    pub fn begin(&mut self, strategy: FetchStrategy) -> FetchTicket {
        self.generation += 1;
        self.strategy = strategy;
        self.error_message = None;
        self.phase = Phase::Loading;
        FetchTicket {
            generation: self.generation,
            strategy,
        }
    }

    /// Whether the ticket belongs to the most recently issued fetch
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a finished fetch, unless it has been superseded
    ///
    /// Failure keeps the previous articles and sets the error message.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        outcome: Result<Vec<Article>, FetchError>,
    ) -> Completion {
        if !self.is_current(&ticket) {
            return Completion::Stale;
        }

        match outcome {
            Ok(articles) => {
                self.articles = Arc::from(articles);
                self.error_message = None;
                self.updated_at = Some(Utc::now());
            }
            Err(err) => {
                self.error_message = Some(err.user_message());
            }
        }
        self.phase = Phase::Idle;
        Completion::Applied
    }

    pub fn snapshot(&self) -> ArticlesSnapshot {
        ArticlesSnapshot {
            strategy: self.strategy,
            articles: Arc::clone(&self.articles),
            is_loading: self.is_loading(),
            error_message: self.error_message.clone(),
            updated_at: self.updated_at,
        }
    }
}
