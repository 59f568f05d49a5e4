//! Deck files: the declarative page description a presentation plays.
//!
//! A deck is a TOML document with page metadata and an ordered list of
//! `[[block]]` tables. Block attributes are kept string-typed and parsed
//! leniently, so a bad value degrades to a default instead of rejecting
//! the whole deck.

use serde::Deserialize;
use std::path::Path;

use crate::typewriter::Pace;
use crate::{Error, Result};

/// A parsed deck file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Deck {
    /// Page title, shown in the status bar and terminal title
    #[serde(default)]
    pub title: Option<String>,
    /// Blocks in display order
    #[serde(default, rename = "block")]
    pub blocks: Vec<BlockSpec>,
}

/// What a block renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// Typewriter animation fed by a `lines` payload
    #[default]
    Type,
    /// Static text revealed once it scrolls into view
    Note,
}

/// Declarative attributes for one block
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockSpec {
    #[serde(default)]
    pub kind: BlockKind,
    /// Window title drawn on the block border
    #[serde(default)]
    pub title: Option<String>,
    /// JSON-encoded list of strings to type; absent means no instance
    #[serde(default)]
    pub lines: Option<String>,
    /// Boolean-like string; exactly "true" starts the block immediately
    #[serde(default)]
    pub autostart: Option<String>,
    /// Per-character delay in milliseconds, as a numeric string
    #[serde(default)]
    pub speed: Option<String>,
    /// Line-break pause in milliseconds, as a numeric string
    #[serde(default)]
    pub delay: Option<String>,
    /// Pre-measure and lock this block's height before animating
    #[serde(default)]
    pub lock_height: bool,
    /// Plain text body for `note` blocks
    #[serde(default)]
    pub text: Option<String>,
}

impl Deck {
    /// Load a deck from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Deck(e.to_string()))
    }
}

impl BlockSpec {
    /// Whether the block starts typing at setup instead of on visibility
    pub fn autostart(&self) -> bool {
        self.autostart.as_deref() == Some("true")
    }

    /// Per-character delay override, if a valid positive number was given
    pub fn speed_override(&self) -> Option<u64> {
        parse_millis(self.speed.as_deref())
    }

    /// Line-break pause override, if a valid positive number was given
    pub fn delay_override(&self) -> Option<u64> {
        parse_millis(self.delay.as_deref())
    }

    /// Resolve this block's pacing on top of the configured base pace
    pub fn pace(&self, base: Pace) -> Pace {
        base.with_overrides(self.speed_override(), self.delay_override())
    }
}

/// Lenient numeric-attribute parse; zero and garbage both fall through to
/// the default, matching the original attribute semantics.
fn parse_millis(attr: Option<&str>) -> Option<u64> {
    attr.and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_parse_minimal_deck() {
        let deck: Deck = toml::from_str(
            r#"
            title = "demo"

            [[block]]
            lines = '["hello"]'
            "#,
        )
        .unwrap();
        assert_eq!(deck.title.as_deref(), Some("demo"));
        assert_eq!(deck.blocks.len(), 1);
        assert_eq!(deck.blocks[0].kind, BlockKind::Type);
        assert!(!deck.blocks[0].autostart());
    }

    #[test]
    fn test_autostart_is_exactly_true() {
        let mut spec = BlockSpec::default();
        assert!(!spec.autostart());
        spec.autostart = Some("yes".to_string());
        assert!(!spec.autostart());
        spec.autostart = Some("true".to_string());
        assert!(spec.autostart());
    }

    #[test]
    fn test_invalid_pacing_attributes_fall_back() {
        let mut spec = BlockSpec::default();
        spec.speed = Some("fast".to_string());
        spec.delay = Some("0".to_string());
        assert_eq!(spec.speed_override(), None);
        assert_eq!(spec.delay_override(), None);

        spec.speed = Some("80".to_string());
        let pace = spec.pace(Pace::brisk());
        assert_eq!(pace.speed, Duration::from_millis(80));
        assert_eq!(pace.delay, Duration::from_millis(320));
    }

    #[test]
    fn test_note_block() {
        let deck: Deck = toml::from_str(
            r#"
            [[block]]
            kind = "note"
            text = "plain body"
            "#,
        )
        .unwrap();
        assert_eq!(deck.blocks[0].kind, BlockKind::Note);
        assert_eq!(deck.blocks[0].text.as_deref(), Some("plain body"));
    }
}
