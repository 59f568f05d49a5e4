//! Height stabilization.
//!
//! A block that types itself out grows line by line, shoving everything
//! below it around. Blocks that opt in get their final height measured up
//! front (an off-screen probe of the fully revealed text) and locked, so
//! the page layout is stable before the first character appears.
//!
//! All math here works in pixel-like width/height units; the presentation
//! layer converts terminal cells to units before calling in.

/// Minimum viewport width for height locking. Narrower viewports size
/// naturally so the final lines are not clipped.
pub const LOCK_MIN_WIDTH: u32 = 560;
/// Widths at or below this get the generous narrow-viewport allowance
pub const NARROW_MAX_WIDTH: u32 = 720;

const DESKTOP_ALLOWANCE: f64 = 64.0;
const NARROW_ALLOWANCE_MIN: f64 = 180.0;
const NARROW_ALLOWANCE_MAX: f64 = 320.0;
const NARROW_ALLOWANCE_FRACTION: f64 = 0.28;

/// Viewport size in width/height units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Extra space added above the probed height: a bounded fraction of the
/// viewport height on narrow viewports, a small fixed pad otherwise
pub fn padding_allowance(viewport: ViewportSize) -> f64 {
    if viewport.width <= NARROW_MAX_WIDTH {
        (viewport.height as f64 * NARROW_ALLOWANCE_FRACTION)
            .round()
            .clamp(NARROW_ALLOWANCE_MIN, NARROW_ALLOWANCE_MAX)
    } else {
        DESKTOP_ALLOWANCE
    }
}

/// Height to force on a block given its probed natural height, or `None`
/// when the viewport is too narrow to lock (or the probe came up empty)
pub fn locked_height(probe_height: f64, viewport: ViewportSize) -> Option<u32> {
    if viewport.width <= LOCK_MIN_WIDTH || probe_height <= 0.0 {
        return None;
    }
    Some((probe_height + padding_allowance(viewport)).ceil() as u32)
}

/// Minimum height to propagate to the enclosing panel, which keeps its
/// own padding on top of the locked block height
pub fn panel_min_height(locked: u32, pad_top: u32, pad_bottom: u32) -> u32 {
    locked + pad_top + pad_bottom
}

/// Height lock state for one block.
///
/// `restabilize` is the one entry point; it clears any previously forced
/// sizing, probes, and locks again. A simple in-flight guard collapses
/// overlapping runs (resize storms) into one.
#[derive(Debug, Default)]
pub struct HeightLock {
    locked: Option<u32>,
    measuring: bool,
}

impl HeightLock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently forced height in units, if any
    pub fn locked(&self) -> Option<u32> {
        self.locked
    }

    /// Drop any forced sizing
    pub fn clear(&mut self) {
        self.locked = None;
    }

    /// Re-measure and re-lock for the given viewport. `probe` receives the
    /// viewport width in units and returns the natural height of the final
    /// text, or `None` when there is nothing to measure.
    pub fn restabilize<F>(&mut self, viewport: ViewportSize, probe: F) -> Option<u32>
    where
        F: FnOnce(u32) -> Option<f64>,
    {
        if self.measuring {
            return self.locked;
        }
        self.measuring = true;

        self.locked = None;
        if viewport.width > LOCK_MIN_WIDTH {
            if let Some(height) = probe(viewport.width) {
                self.locked = locked_height(height, viewport);
            }
        }

        self.measuring = false;
        self.locked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_allowance_is_fixed() {
        let viewport = ViewportSize::new(1280, 800);
        assert_eq!(padding_allowance(viewport), 64.0);
        assert_eq!(locked_height(420.0, viewport), Some(484));
        // Fractional probe heights round up
        assert_eq!(locked_height(420.5, viewport), Some(485));
    }

    #[test]
    fn test_narrow_allowance_tracks_viewport_height() {
        // 0.28 * 1000 = 280, inside the clamp
        assert_eq!(padding_allowance(ViewportSize::new(700, 1000)), 280.0);
        // Clamped below at 180
        assert_eq!(padding_allowance(ViewportSize::new(700, 500)), 180.0);
        // Clamped above at 320
        assert_eq!(padding_allowance(ViewportSize::new(700, 2000)), 320.0);

        assert_eq!(locked_height(100.0, ViewportSize::new(700, 1000)), Some(380));
    }

    #[test]
    fn test_narrow_breakpoint_boundaries() {
        // 720 still counts as narrow, 721 does not
        assert_eq!(padding_allowance(ViewportSize::new(720, 1000)), 280.0);
        assert_eq!(padding_allowance(ViewportSize::new(721, 1000)), 64.0);
    }

    #[test]
    fn test_no_lock_on_narrow_viewports_or_empty_probes() {
        assert_eq!(locked_height(400.0, ViewportSize::new(560, 800)), None);
        assert_eq!(locked_height(400.0, ViewportSize::new(320, 800)), None);
        assert_eq!(locked_height(0.0, ViewportSize::new(1280, 800)), None);
        // Just past the breakpoint it locks, with the narrow allowance
        assert_eq!(locked_height(400.0, ViewportSize::new(561, 800)), Some(624));
    }

    #[test]
    fn test_panel_min_height_keeps_padding() {
        assert_eq!(panel_min_height(484, 24, 24), 532);
    }

    #[test]
    fn test_restabilize_clears_then_locks() {
        let mut lock = HeightLock::new();
        let wide = ViewportSize::new(1280, 800);

        assert_eq!(lock.restabilize(wide, |_| Some(100.0)), Some(164));
        assert_eq!(lock.locked(), Some(164));

        // Shrinking below the breakpoint clears the forced sizing
        let narrow = ViewportSize::new(500, 800);
        assert_eq!(lock.restabilize(narrow, |_| Some(100.0)), None);
        assert_eq!(lock.locked(), None);

        // An empty probe also leaves the block natural
        assert_eq!(lock.restabilize(wide, |_| None), None);
    }

    #[test]
    fn test_probe_receives_viewport_width() {
        let mut lock = HeightLock::new();
        let mut seen = 0;
        lock.restabilize(ViewportSize::new(1280, 800), |width| {
            seen = width;
            Some(10.0)
        });
        assert_eq!(seen, 1280);
    }
}
