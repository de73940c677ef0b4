//! Book configuration.
//!
//! Every tunable of the flip engine lives here. Defaults reproduce the
//! keepsake book; a partial JSON file overrides only the keys it names.

use crate::error::{BookError, Result};
use serde::{Deserialize, Serialize};

/// How clicks on an eligible page become turn commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClickPolicy {
    /// Any click on the current right page turns forward, any click on the
    /// current left page turns back.
    #[default]
    PageState,
    /// Only the outer half of the eligible page (away from the spine) responds.
    HalfSurface,
    /// Only a strip of `edge_zone` width along the free edge responds.
    EdgeOnly,
}

/// Where the reading position stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminalPage {
    /// The back cover can be turned too: `current_page` runs up to `page_count`.
    #[default]
    BackCoverTurns,
    /// The back cover never turns: `current_page` stops at `page_count - 1`.
    BackCoverFixed,
}

impl TerminalPage {
    /// Largest reachable `current_page` for a book of `page_count` pages.
    pub fn limit(&self, page_count: usize) -> usize {
        match self {
            TerminalPage::BackCoverTurns => page_count,
            TerminalPage::BackCoverFixed => page_count.saturating_sub(1),
        }
    }
}

/// Upper bound on page grid segments along either axis.
pub const MAX_SEGMENTS: u32 = 1024;

/// Main book configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookConfig {
    /// Page width, spine to free edge.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Grid subdivisions along the turning axis.
    pub width_segments: u32,
    /// Grid subdivisions along the spine.
    pub height_segments: u32,
    /// Depth step between neighboring pages in a stack.
    pub page_z_offset: f32,
    /// Distance of each face from the page's mid plane.
    pub face_offset: f32,
    /// Fraction of the remaining angle covered per tick.
    pub rotation_smoothing: f32,
    /// Fraction of the remaining depth covered per tick.
    pub depth_smoothing: f32,
    /// Angle difference (radians) below which rotation stops.
    pub angle_epsilon: f32,
    /// Peak bend strength at mid-turn.
    pub bend_amplitude: f32,
    /// Fraction of a half sine wave spanned from spine to free edge.
    pub curl_span: f32,
    /// Thickness of a full stack.
    pub stack_max_depth: f32,
    /// Thickness of a stack holding a single page.
    pub stack_min_depth: f32,
    /// Width of the clickable strip for [`ClickPolicy::EdgeOnly`].
    pub edge_zone: f32,
    pub click_policy: ClickPolicy,
    pub terminal_page: TerminalPage,
    /// Idle bob amplitude of the whole book.
    pub sway_height: f32,
    /// Idle yaw amplitude of the whole book (radians).
    pub sway_yaw: f32,
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            page_width: 2.2,
            page_height: 3.0,
            width_segments: 30,
            height_segments: 1,
            page_z_offset: 0.025,
            face_offset: 0.002,
            rotation_smoothing: 0.1,
            depth_smoothing: 0.15,
            angle_epsilon: 0.001,
            bend_amplitude: 0.4,
            curl_span: 0.8,
            stack_max_depth: 0.12,
            stack_min_depth: 0.01,
            edge_zone: 0.3,
            click_policy: ClickPolicy::default(),
            terminal_page: TerminalPage::default(),
            sway_height: 0.03,
            sway_yaw: 0.015,
        }
    }
}

impl BookConfig {
    /// Use a specific click policy.
    pub fn with_click_policy(mut self, policy: ClickPolicy) -> Self {
        self.click_policy = policy;
        self
    }

    /// Use a specific terminal page convention.
    pub fn with_terminal_page(mut self, terminal: TerminalPage) -> Self {
        self.terminal_page = terminal;
        self
    }

    /// Use a different page size.
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Use a different grid resolution.
    pub fn with_segments(mut self, width_segments: u32, height_segments: u32) -> Self {
        self.width_segments = width_segments;
        self.height_segments = height_segments;
        self
    }

    /// Parse a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: BookConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check that every value is in its usable range.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(BookError::InvalidConfig(format!("{} must be positive, got {}", name, value)))
            }
        }

        fn non_negative(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(BookError::InvalidConfig(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )))
            }
        }

        fn fraction(name: &str, value: f32) -> Result<()> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(BookError::InvalidConfig(format!("{} must be in (0, 1], got {}", name, value)))
            }
        }

        positive("page_width", self.page_width)?;
        positive("page_height", self.page_height)?;
        positive("angle_epsilon", self.angle_epsilon)?;
        fraction("rotation_smoothing", self.rotation_smoothing)?;
        fraction("depth_smoothing", self.depth_smoothing)?;

        non_negative("page_z_offset", self.page_z_offset)?;
        non_negative("face_offset", self.face_offset)?;
        non_negative("bend_amplitude", self.bend_amplitude)?;
        non_negative("curl_span", self.curl_span)?;
        non_negative("stack_max_depth", self.stack_max_depth)?;
        non_negative("edge_zone", self.edge_zone)?;
        non_negative("sway_height", self.sway_height)?;
        non_negative("sway_yaw", self.sway_yaw)?;

        if self.edge_zone > self.page_width {
            return Err(BookError::InvalidConfig(format!(
                "edge_zone {} is wider than the page ({})",
                self.edge_zone, self.page_width
            )));
        }

        if self.width_segments == 0 || self.height_segments == 0 {
            return Err(BookError::InvalidConfig(
                "page grid needs at least one segment per axis".to_string(),
            ));
        }
        if self.width_segments > MAX_SEGMENTS || self.height_segments > MAX_SEGMENTS {
            return Err(BookError::InvalidConfig(format!(
                "page grid is limited to {} segments per axis, got {} x {}",
                MAX_SEGMENTS, self.width_segments, self.height_segments
            )));
        }
        if !(self.stack_min_depth >= 0.0 && self.stack_min_depth <= self.stack_max_depth) {
            return Err(BookError::InvalidConfig(format!(
                "stack_min_depth {} must be within [0, stack_max_depth {}]",
                self.stack_min_depth, self.stack_max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid() {
        assert!(BookConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BookConfig::from_json_str(
            r#"{ "page_width": 1.5, "click_policy": "half_surface" }"#,
        )
        .unwrap();
        assert_eq!(config.page_width, 1.5);
        assert_eq!(config.click_policy, ClickPolicy::HalfSurface);
        assert_eq!(config.rotation_smoothing, 0.1);
        assert_eq!(config.terminal_page, TerminalPage::BackCoverTurns);
    }

    #[test]
    fn test_invalid_smoothing_rejected() {
        let result = BookConfig::from_json_str(r#"{ "rotation_smoothing": 0.0 }"#);
        assert!(matches!(result, Err(BookError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_segments_rejected() {
        let config = BookConfig::default().with_segments(0, 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_huge_segments_rejected() {
        let result = BookConfig::from_json_str(r#"{ "width_segments": 4294967295 }"#);
        assert!(matches!(result, Err(BookError::InvalidConfig(_))));

        let config = BookConfig::default().with_segments(30, MAX_SEGMENTS + 1);
        assert!(config.validate().is_err());
        let config = BookConfig::default().with_segments(MAX_SEGMENTS, MAX_SEGMENTS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nan_offset_rejected() {
        let config = BookConfig {
            page_z_offset: f32::NAN,
            ..BookConfig::default()
        };
        assert!(matches!(config.validate(), Err(BookError::InvalidConfig(_))));

        let config = BookConfig {
            stack_min_depth: f32::NAN,
            ..BookConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_values_rejected() {
        let config = BookConfig {
            page_z_offset: -1.0,
            ..BookConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BookConfig {
            edge_zone: -5.0,
            ..BookConfig::default()
        };
        assert!(config.validate().is_err());

        let config = BookConfig {
            sway_yaw: f32::INFINITY,
            ..BookConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_edge_zone_within_page() {
        let config = BookConfig::default().with_page_size(1.0, 2.0);
        assert_eq!(config.page_width, 1.0);
        assert_eq!(config.page_height, 2.0);
        assert!(config.validate().is_ok());

        let config = BookConfig {
            edge_zone: 1.5,
            ..config
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_terminal_limits() {
        assert_eq!(TerminalPage::BackCoverTurns.limit(5), 5);
        assert_eq!(TerminalPage::BackCoverFixed.limit(5), 4);
        assert_eq!(TerminalPage::BackCoverFixed.limit(0), 0);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "terminal_page": "back_cover_fixed" }}"#).unwrap();

        let config = BookConfig::from_path(file.path()).unwrap();
        assert_eq!(config.terminal_page, TerminalPage::BackCoverFixed);
    }
}
