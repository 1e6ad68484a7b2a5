//! Linear undo/redo over full snapshots of the component set.

use crate::component::Component;
use std::collections::VecDeque;
use std::sync::Arc;

/// An immutable copy of the ordered component set.
///
/// Components are shared with the live store through `Arc`, so taking a
/// snapshot copies pointers; the store clones a component body only when it
/// mutates one that a snapshot still references.
#[derive(Debug, Clone, Default)]
pub struct Snapshot(Arc<[Arc<Component>]>);

impl Snapshot {
    pub fn new(components: Vec<Arc<Component>>) -> Self {
        Self(components.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Components in document order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.0.iter().map(|component| component.as_ref())
    }

    pub(crate) fn shared(&self) -> &[Arc<Component>] {
        &self.0
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.components().zip(other.components()).all(|(a, b)| a == b)
    }
}

/// Three-buffer history: `past`, `present` and `future`.
#[derive(Debug, Clone, Default)]
pub struct History {
    /// Prior states, oldest first.
    past: Vec<Snapshot>,
    /// The state matching the live store.
    present: Snapshot,
    /// Undone states, next redo first.
    future: VecDeque<Snapshot>,
    /// Maximum number of past states to keep; `None` keeps everything.
    limit: Option<usize>,
}

impl History {
    /// Create an empty, unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` undo states.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Start over with `present` as the only state.
    pub fn reset(&mut self, present: Snapshot) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    /// Record a new edit: the previous present becomes undoable and the
    /// redo branch is discarded.
    pub fn checkpoint(&mut self, current: Snapshot) {
        let previous = std::mem::replace(&mut self.present, current);
        self.past.push(previous);
        self.future.clear();

        if let Some(limit) = self.limit {
            if self.past.len() > limit {
                let excess = self.past.len() - limit;
                self.past.drain(..excess);
            }
        }
    }

    /// Step back. Returns the state the store must rebuild from, or `None`
    /// if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let previous = self.past.pop()?;
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        Some(&self.present)
    }

    /// Step forward. Returns the state the store must rebuild from, or
    /// `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.future.pop_front()?;
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        Some(&self.present)
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn present(&self) -> &Snapshot {
        &self.present
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }
}
