//! Pointer input to turn commands.
//!
//! Only two pages ever respond to clicks: the top of the unread pile (turns
//! forward) and the top of the read pile (turns back). Everything else,
//! including hits on pages the book does not have, is ignored.

use crate::book::BookController;
use crate::config::{BookConfig, ClickPolicy};
use crate::types::{PointerHit, TurnCommand};

/// Maps resolved pointer hits to turn commands under one click policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputMapper {
    policy: ClickPolicy,
    page_width: f32,
    edge_zone: f32,
}

impl InputMapper {
    pub fn new(policy: ClickPolicy, page_width: f32, edge_zone: f32) -> Self {
        Self {
            policy,
            page_width,
            edge_zone,
        }
    }

    pub fn from_config(config: &BookConfig) -> Self {
        Self::new(config.click_policy, config.page_width, config.edge_zone)
    }

    pub fn policy(&self) -> ClickPolicy {
        self.policy
    }

    /// Whether a page currently reacts to the pointer (for hover feedback).
    pub fn is_interactive(&self, controller: &BookController, index: usize) -> bool {
        controller.is_current_right(index) || controller.is_current_left(index)
    }

    /// Decide what a click should do. `None` means the click is ignored.
    pub fn map_click(&self, controller: &BookController, hit: &PointerHit) -> Option<TurnCommand> {
        let index = hit.page_index;
        if index >= controller.page_count() {
            log::warn!(
                "ignoring click on page {} of a {}-page book",
                index,
                controller.page_count()
            );
            return None;
        }

        let command = if controller.is_current_left(index) {
            TurnCommand::Back
        } else if controller.is_current_right(index) {
            TurnCommand::Forward
        } else {
            log::debug!("page {} is not eligible for turning", index);
            return None;
        };

        if self.accepts_position(hit.spine_distance()) {
            Some(command)
        } else {
            None
        }
    }

    fn accepts_position(&self, spine_distance: f32) -> bool {
        match self.policy {
            ClickPolicy::PageState => true,
            ClickPolicy::HalfSurface => spine_distance >= self.page_width * 0.5,
            ClickPolicy::EdgeOnly => spine_distance >= self.page_width - self.edge_zone,
        }
    }
}
