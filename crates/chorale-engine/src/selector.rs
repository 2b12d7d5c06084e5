//! Active-mode selection with FIFO eviction.
//!
//! At most two modes are active at once. Toggling a third mode in evicts the
//! oldest selection, so the operator can always layer a new intensity without
//! first deselecting one. Toggling mode 0 is special: it clears the whole
//! selection rather than joining it.

use crate::mode::{MAX_MODE, ModeError};

/// Maximum number of simultaneously active modes.
pub const MAX_ACTIVE_MODES: usize = 2;

/// Insertion-ordered set of active mode ids, capped at two entries.
///
/// The order is the insertion order, which is what makes eviction FIFO: when
/// a third mode is toggled in, the entry at index 0 (the oldest) is dropped.
/// An explicit ordered list is used instead of a set type so that eviction
/// order is part of the state rather than reconstructed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSelector {
    ids: [u8; MAX_ACTIVE_MODES],
    len: usize,
}

impl ModeSelector {
    /// A selector with mode 1 active, the engine's startup state.
    pub fn new() -> Self {
        Self { ids: [1, 0], len: 1 }
    }

    /// A selector with nothing active.
    pub fn empty() -> Self {
        Self { ids: [0, 0], len: 0 }
    }

    /// Toggle a mode id, returning the resulting active set.
    ///
    /// Semantics:
    /// - id 0 clears the selection entirely
    /// - an id already in the selection is removed
    /// - a new id is appended; if the selection is full, the oldest entry is
    ///   evicted first
    ///
    /// Ids above [`MAX_MODE`] are rejected and leave the selection untouched.
    pub fn toggle(&mut self, id: u8) -> Result<&[u8], ModeError> {
        if id > MAX_MODE {
            return Err(ModeError::InvalidMode(id));
        }

        if id == 0 {
            self.len = 0;
        } else if let Some(pos) = self.position(id) {
            self.remove_at(pos);
        } else {
            if self.len == MAX_ACTIVE_MODES {
                self.remove_at(0);
            }
            self.ids[self.len] = id;
            self.len += 1;
        }

        Ok(self.active())
    }

    /// The active mode ids in insertion order (oldest first).
    pub fn active(&self) -> &[u8] {
        &self.ids[..self.len]
    }

    /// Whether the given mode id is currently active.
    pub fn contains(&self, id: u8) -> bool {
        self.position(id).is_some()
    }

    /// Whether no mode is active.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn position(&self, id: u8) -> Option<usize> {
        self.active().iter().position(|&m| m == id)
    }

    fn remove_at(&mut self, pos: usize) {
        for i in pos..self.len - 1 {
            self.ids[i] = self.ids[i + 1];
        }
        self.len -= 1;
    }
}

impl Default for ModeSelector {
    fn default() -> Self {
        Self::new()
    }
}
