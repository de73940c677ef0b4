//! Turn commands and pointer hits.

use serde::{Deserialize, Serialize};

/// A request to move the reading position by one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnCommand {
    Forward,
    Back,
}

impl TurnCommand {
    /// Parse a command from a short script token ("f", "forward", "b", "back").
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "f" | "fwd" | "forward" | "next" => Some(TurnCommand::Forward),
            "b" | "back" | "prev" => Some(TurnCommand::Back),
            _ => None,
        }
    }
}

/// A pointer event already resolved by the host to a page and a surface-local point.
///
/// `local_position[0]` is measured from the spine along the page width, so the
/// free edge sits at `x == page_width` regardless of which side the page rests on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerHit {
    pub page_index: usize,
    pub local_position: [f32; 2],
}

impl PointerHit {
    pub fn new(page_index: usize, local_position: [f32; 2]) -> Self {
        Self {
            page_index,
            local_position,
        }
    }

    /// Distance from the spine along the page width.
    pub fn spine_distance(&self) -> f32 {
        self.local_position[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!(TurnCommand::parse("f"), Some(TurnCommand::Forward));
        assert_eq!(TurnCommand::parse(" Back "), Some(TurnCommand::Back));
        assert_eq!(TurnCommand::parse("sideways"), None);
    }
}
