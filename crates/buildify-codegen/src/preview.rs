//! Latest-wins slot for preview generation.
//!
//! Generation may run on a worker while the document keeps changing. Each run
//! takes a [`Ticket`] up front; a result is only published if no newer run
//! has started or published since.

use crate::GeneratedCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Identifies one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct PreviewSlot {
    latest: AtomicU64,
    published: Mutex<Option<(u64, GeneratedCode)>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a run; supersedes every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the most recently started run.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Publish the output of a run. Stale results are dropped and false is returned.
    pub fn publish(&self, ticket: Ticket, code: GeneratedCode) -> bool {
        let mut published = self.lock();
        if !self.is_current(ticket) {
            log::debug!("Dropping stale preview {}", ticket.0);
            return false;
        }
        if published.as_ref().is_some_and(|(seq, _)| *seq > ticket.0) {
            return false;
        }
        *published = Some((ticket.0, code));
        true
    }

    /// The most recently published output.
    pub fn current(&self) -> Option<GeneratedCode> {
        self.lock().as_ref().map(|(_, code)| code.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Option<(u64, GeneratedCode)>> {
        // A panicking publisher cannot leave a half-written value behind.
        self.published.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
