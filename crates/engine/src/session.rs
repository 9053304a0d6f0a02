//! Replay session state: the selected game, its normalized timeline, and
//! the current cursor.
//!
//! Loads are last-selection-wins: selecting a game hands out a ticket, and
//! a completed load is applied only if its ticket is still the newest.
//! A stale load for a superseded selection is discarded, never merged.

use grimview_domain::CompositeEvent;

/// Proof of which selection a load belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTicket {
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct ReplaySession {
    epoch: u64,
    game_id: Option<String>,
    events: Vec<CompositeEvent>,
    cursor: usize,
}

impl ReplaySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new selection, superseding any in-flight load.
    pub fn begin_selection(&mut self, game_id: impl Into<String>) -> SelectionTicket {
        self.epoch += 1;
        self.game_id = Some(game_id.into());
        SelectionTicket { epoch: self.epoch }
    }

    /// Install a completed load. Returns false (and changes nothing) if the
    /// ticket has been superseded by a newer selection.
    pub fn apply(&mut self, ticket: SelectionTicket, events: Vec<CompositeEvent>) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                stale = ticket.epoch,
                current = self.epoch,
                "discarding load for superseded selection"
            );
            return false;
        }
        self.events = events;
        // a new game may be shorter than the old cursor position
        self.cursor = 0;
        true
    }

    pub fn game_id(&self) -> Option<&str> {
        self.game_id.as_deref()
    }

    pub fn events(&self) -> &[CompositeEvent] {
        &self.events
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamping into `0..events.len()`. Returns the
    /// position actually taken.
    pub fn set_cursor(&mut self, index: usize) -> usize {
        self.cursor = index.min(self.events.len().saturating_sub(1));
        self.cursor
    }

    pub fn step_forward(&mut self) -> usize {
        self.set_cursor(self.cursor.saturating_add(1))
    }

    pub fn step_back(&mut self) -> usize {
        self.set_cursor(self.cursor.saturating_sub(1))
    }

    /// The event under the cursor; `None` only when no events are loaded.
    pub fn current_event(&self) -> Option<&CompositeEvent> {
        self.events.get(self.cursor)
    }
}
