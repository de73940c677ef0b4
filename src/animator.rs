//! Per-page flip animation.
//!
//! A page never stores whether it is flipped. Each tick it reads the book's
//! reading position, derives where it should be, and closes part of the gap:
//! rotation and depth follow first-order approaches with separate rates, so a
//! turning page settles into its stack before it finishes rotating.

use crate::config::BookConfig;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Rest angle of a page lying on the left (read) stack.
pub const FLIPPED_ANGLE: f32 = -PI;

/// Rest angle of a page lying on the right (unread) stack.
pub const UNFLIPPED_ANGLE: f32 = 0.0;

/// Whether a page lies on the read side for a reading position.
pub fn is_flipped(index: usize, current_page: usize) -> bool {
    index < current_page
}

/// Rest angle a page is heading toward.
pub fn target_angle(index: usize, current_page: usize) -> f32 {
    if is_flipped(index, current_page) {
        FLIPPED_ANGLE
    } else {
        UNFLIPPED_ANGLE
    }
}

/// Stack depth a page is heading toward.
///
/// Read pages stack upward by index, unread pages by distance from the back,
/// so the top of each pile is always the page nearest the reading position.
pub fn target_depth(index: usize, current_page: usize, page_count: usize, z_offset: f32) -> f32 {
    if is_flipped(index, current_page) {
        index as f32 * z_offset
    } else {
        page_count.saturating_sub(index) as f32 * z_offset
    }
}

/// Motion classification of a page, derived from its angle and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipPhase {
    AtRestUnflipped,
    TurningToFlipped,
    AtRestFlipped,
    TurningToUnflipped,
}

impl FlipPhase {
    pub fn is_at_rest(&self) -> bool {
        matches!(self, FlipPhase::AtRestUnflipped | FlipPhase::AtRestFlipped)
    }
}

/// Continuous state of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageAnimator {
    index: usize,
    angle: f32,
    depth: f32,
}

impl PageAnimator {
    /// Start a page lying open on the right at its stack depth.
    pub fn new(index: usize, current_page: usize, page_count: usize, config: &BookConfig) -> Self {
        Self {
            index,
            angle: UNFLIPPED_ANGLE,
            depth: target_depth(index, current_page, page_count, config.page_z_offset),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Rotation about the spine in radians, within [-π, 0].
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Offset along the book normal used for z-ordering.
    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// How far the page has turned, 0 at rest on the right and 1 at rest on the left.
    pub fn flip_progress(&self) -> f32 {
        (self.angle.abs() / PI).clamp(0.0, 1.0)
    }

    /// Classify the page's motion relative to a reading position.
    pub fn phase(&self, current_page: usize, epsilon: f32) -> FlipPhase {
        let target = target_angle(self.index, current_page);
        let settled = (target - self.angle).abs() <= epsilon;
        match (is_flipped(self.index, current_page), settled) {
            (false, true) => FlipPhase::AtRestUnflipped,
            (false, false) => FlipPhase::TurningToUnflipped,
            (true, true) => FlipPhase::AtRestFlipped,
            (true, false) => FlipPhase::TurningToFlipped,
        }
    }

    /// Advance one frame toward the targets for `current_page`.
    ///
    /// Returns `true` if the page rotated this tick.
    pub fn tick(&mut self, current_page: usize, page_count: usize, config: &BookConfig) -> bool {
        let depth_target = target_depth(self.index, current_page, page_count, config.page_z_offset);
        self.depth += (depth_target - self.depth) * config.depth_smoothing;

        let delta = target_angle(self.index, current_page) - self.angle;
        if delta.abs() <= config.angle_epsilon {
            return false;
        }

        self.angle = (self.angle + delta * config.rotation_smoothing)
            .clamp(FLIPPED_ANGLE, UNFLIPPED_ANGLE);
        log::trace!(
            "page {} angle {:.4} depth {:.4} progress {:.3}",
            self.index,
            self.angle,
            self.depth,
            self.flip_progress()
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_still(
        animator: &mut PageAnimator,
        current_page: usize,
        config: &BookConfig,
    ) -> usize {
        let mut ticks = 0;
        while animator.tick(current_page, 5, config) {
            ticks += 1;
            assert!(ticks < 10_000, "animator never settled");
        }
        ticks
    }

    #[test]
    fn test_targets() {
        assert_eq!(target_angle(0, 1), FLIPPED_ANGLE);
        assert_eq!(target_angle(1, 1), UNFLIPPED_ANGLE);
        assert_eq!(target_depth(1, 3, 5, 0.025), 0.025);
        assert_eq!(target_depth(3, 3, 5, 0.025), 2.0 * 0.025);
    }

    #[test]
    fn test_converges_and_stops() {
        let config = BookConfig::default();
        let mut animator = PageAnimator::new(0, 0, 5, &config);

        let ticks = run_until_still(&mut animator, 1, &config);
        assert!(ticks > 0);
        assert!((animator.angle() - FLIPPED_ANGLE).abs() <= config.angle_epsilon);
        assert_eq!(animator.phase(1, config.angle_epsilon), FlipPhase::AtRestFlipped);

        let settled = animator.angle();
        for _ in 0..100 {
            assert!(!animator.tick(1, 5, &config));
        }
        assert_eq!(animator.angle(), settled);
    }

    #[test]
    fn test_progress_monotonic_while_flipping() {
        let config = BookConfig::default();
        let mut animator = PageAnimator::new(2, 2, 5, &config);

        let mut last = animator.flip_progress();
        while animator.tick(3, 5, &config) {
            let progress = animator.flip_progress();
            assert!(progress >= last);
            last = progress;
        }
        assert!(last > 0.99);

        while animator.tick(2, 5, &config) {
            let progress = animator.flip_progress();
            assert!(progress <= last);
            last = progress;
        }
        assert!(last < 0.01);
    }

    #[test]
    fn test_phase_while_turning() {
        let config = BookConfig::default();
        let mut animator = PageAnimator::new(1, 1, 5, &config);
        assert_eq!(animator.phase(1, config.angle_epsilon), FlipPhase::AtRestUnflipped);

        animator.tick(2, 5, &config);
        assert_eq!(animator.phase(2, config.angle_epsilon), FlipPhase::TurningToFlipped);
        assert!(!animator.phase(2, config.angle_epsilon).is_at_rest());

        animator.tick(1, 5, &config);
        assert_eq!(animator.phase(1, config.angle_epsilon), FlipPhase::TurningToUnflipped);
    }

    #[test]
    fn test_reversal_mid_turn() {
        let config = BookConfig::default();
        let mut animator = PageAnimator::new(0, 0, 5, &config);
        for _ in 0..10 {
            animator.tick(1, 5, &config);
        }
        let midway = animator.angle();
        assert!(midway < 0.0 && midway > FLIPPED_ANGLE);

        // New target takes effect on the very next tick.
        animator.tick(0, 5, &config);
        assert!(animator.angle() > midway);
    }

    #[test]
    fn test_depth_settles_faster_than_rotation() {
        let config = BookConfig::default();
        let mut animator = PageAnimator::new(2, 2, 5, &config);
        let start_depth = animator.depth();
        let end_depth = target_depth(2, 3, 5, config.page_z_offset);

        for _ in 0..10 {
            animator.tick(3, 5, &config);
        }
        let depth_done = (animator.depth() - start_depth) / (end_depth - start_depth);
        let angle_done = animator.flip_progress();
        assert!(depth_done > angle_done);
    }

    #[test]
    fn test_single_step_uses_smoothing() {
        let config = BookConfig::default();
        let mut animator = PageAnimator::new(0, 0, 5, &config);
        animator.tick(1, 5, &config);
        assert!((animator.angle() - FLIPPED_ANGLE * 0.1).abs() < 1e-6);
    }
}
