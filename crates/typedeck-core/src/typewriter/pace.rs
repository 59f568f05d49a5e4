use std::time::Duration;

use crate::config::TypingConfig;

/// Animation pacing for one instance: per-character delay and the pause
/// inserted after each finished line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pace {
    pub speed: Duration,
    pub delay: Duration,
}

impl Default for Pace {
    fn default() -> Self {
        Self::brisk()
    }
}

impl Pace {
    /// Canonical profile: 45 ms per character, 320 ms between lines
    pub fn brisk() -> Self {
        Self {
            speed: Duration::from_millis(45),
            delay: Duration::from_millis(320),
        }
    }

    /// Slower profile: 60 ms per character, 450 ms between lines
    pub fn relaxed() -> Self {
        Self {
            speed: Duration::from_millis(60),
            delay: Duration::from_millis(450),
        }
    }

    /// Look up a named profile; unknown names fall back to `brisk`
    pub fn profile(name: &str) -> Self {
        match name {
            "relaxed" => Self::relaxed(),
            _ => Self::brisk(),
        }
    }

    /// Apply optional millisecond overrides on top of this pace
    pub fn with_overrides(self, speed_ms: Option<u64>, delay_ms: Option<u64>) -> Self {
        Self {
            speed: speed_ms.map(Duration::from_millis).unwrap_or(self.speed),
            delay: delay_ms.map(Duration::from_millis).unwrap_or(self.delay),
        }
    }

    /// Resolve the base pace from configuration: named profile first, then
    /// explicit overrides
    pub fn from_config(config: &TypingConfig) -> Self {
        Self::profile(&config.profile).with_overrides(config.speed_ms, config.delay_ms)
    }
}
