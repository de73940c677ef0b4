//! Thickness of the read and unread page piles.

use crate::config::BookConfig;
use serde::{Deserialize, Serialize};

/// Rendered thickness of the left (read) and right (unread) stacks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StackDepths {
    pub left: f32,
    pub right: f32,
}

impl StackDepths {
    /// Size both stacks from the reading position alone.
    ///
    /// `limit` is the largest reachable `current_page`. A stack holding any
    /// pages is never thinner than `min_depth`; an empty stack is exactly zero.
    pub fn compute(current_page: usize, limit: usize, max_depth: f32, min_depth: f32) -> Self {
        if limit == 0 {
            return Self::default();
        }

        let current_page = current_page.min(limit);
        let read_ratio = current_page as f32 / limit as f32;

        let left_floor = if current_page > 0 { min_depth } else { 0.0 };
        let right_floor = if current_page < limit { min_depth } else { 0.0 };

        Self {
            left: (read_ratio * max_depth).max(left_floor),
            right: ((1.0 - read_ratio) * max_depth).max(right_floor),
        }
    }

    /// Size both stacks with the limits and depths from a configuration.
    pub fn for_config(current_page: usize, page_count: usize, config: &BookConfig) -> Self {
        Self::compute(
            current_page,
            config.terminal_page.limit(page_count),
            config.stack_max_depth,
            config.stack_min_depth,
        )
    }

    pub fn total(&self) -> f32 {
        self.left + self.right
    }
}
