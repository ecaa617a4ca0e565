//! Single-flight generation session for the presentation layer.
//!
//! The orchestrator lets overlapping calls run to completion. A session
//! decides which result is shown: only the one belonging to the most recent
//! [`GenerationSession::begin`]. Older results are discarded when they land.

use crate::error::GenerationFailure;
use crate::orchestrator::{GeneratedHeadshot, GenerationResult};

/// Identifies one started generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// Sequence number of this ticket (1 for the first generation).
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What the presentation layer should currently render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing requested yet, or the upload changed.
    #[default]
    Idle,
    /// A generation is in flight.
    Pending(Ticket),
    /// The latest generation produced a headshot.
    Succeeded(GeneratedHeadshot),
    /// The latest generation failed.
    Failed(GenerationFailure),
}

/// Whether a completed result was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The result belonged to the latest ticket and is now the state.
    Applied,
    /// A newer generation was started; the result was dropped.
    Stale,
}

/// Tracks the latest generation and its outcome.
#[derive(Debug, Default)]
pub struct GenerationSession {
    state: SessionState,
    issued: u64,
}

impl GenerationSession {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Start a generation, superseding any still in flight.
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        if let SessionState::Pending(previous) = self.state {
            tracing::debug!(previous = previous.id(), next = ticket.id(), "superseding generation");
        }
        self.state = SessionState::Pending(ticket);
        ticket
    }

    /// Apply the result for `ticket` if it is still the latest one.
    pub fn complete(&mut self, ticket: Ticket, result: GenerationResult) -> Completion {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.id(), latest = self.issued, "discarding stale result");
            return Completion::Stale;
        }
        self.state = match result {
            Ok(headshot) => SessionState::Succeeded(headshot),
            Err(failure) => SessionState::Failed(failure),
        };
        Completion::Applied
    }
}
