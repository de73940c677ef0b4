//! The reading position and the only operations allowed to move it.

use crate::config::TerminalPage;
use crate::types::TurnCommand;

/// Owns `current_page`, the single authoritative piece of book state.
///
/// Turning past either end is a no-op, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookController {
    page_count: usize,
    limit: usize,
    current_page: usize,
}

impl BookController {
    /// A closed book: reading position 0.
    pub fn new(page_count: usize, terminal: TerminalPage) -> Self {
        Self {
            page_count,
            limit: terminal.limit(page_count),
            current_page: 0,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Largest reachable reading position.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Move one page forward. Returns `true` if the position changed.
    pub fn turn_forward(&mut self) -> bool {
        let next = (self.current_page + 1).min(self.limit);
        let changed = next != self.current_page;
        self.current_page = next;
        changed
    }

    /// Move one page back. Returns `true` if the position changed.
    pub fn turn_back(&mut self) -> bool {
        let previous = self.current_page.saturating_sub(1);
        let changed = previous != self.current_page;
        self.current_page = previous;
        changed
    }

    /// Dispatch a turn command.
    pub fn apply(&mut self, command: TurnCommand) -> bool {
        match command {
            TurnCommand::Forward => self.turn_forward(),
            TurnCommand::Back => self.turn_back(),
        }
    }

    /// Whether a page lies on the read (left) side.
    pub fn is_flipped(&self, index: usize) -> bool {
        crate::animator::is_flipped(index, self.current_page)
    }

    /// The top of the unread pile, eligible to turn forward.
    pub fn is_current_right(&self, index: usize) -> bool {
        index == self.current_page && index < self.page_count && self.current_page < self.limit
    }

    /// The top of the read pile, eligible to turn back.
    pub fn is_current_left(&self, index: usize) -> bool {
        self.current_page > 0 && index == self.current_page - 1
    }
}
