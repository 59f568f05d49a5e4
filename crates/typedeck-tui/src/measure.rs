//! Probe measurement: how tall will text be once fully revealed?
//!
//! The stabilizer math works in pixel-like units; terminal cells convert
//! at a nominal 8x16 units per cell, the conventional bitmap-font cell.
//! Width counting uses display width, so CJK and emoji measure as the two
//! cells they occupy.

use typedeck_core::stabilizer::ViewportSize;
use unicode_width::UnicodeWidthStr;

/// Nominal width of one terminal cell in units
pub const CELL_WIDTH_UNITS: u32 = 8;
/// Nominal height of one terminal cell in units
pub const CELL_HEIGHT_UNITS: u32 = 16;

/// Convert a terminal size in cells to stabilizer units
pub fn viewport_units(width_cells: u16, height_cells: u16) -> ViewportSize {
    ViewportSize::new(
        width_cells as u32 * CELL_WIDTH_UNITS,
        height_cells as u32 * CELL_HEIGHT_UNITS,
    )
}

/// Convert a height in units back to whole terminal rows, rounding up
pub fn rows_from_units(units: u32) -> u16 {
    units.div_ceil(CELL_HEIGHT_UNITS).min(u16::MAX as u32) as u16
}

/// Number of terminal rows `text` occupies when wrapped to `width` cells.
/// An empty line still takes a row; zero width degrades to unwrapped
/// line counting.
pub fn wrapped_rows(text: &str, width: u16) -> u16 {
    let mut rows = 0u16;
    for line in text.split('\n') {
        let line_width = line.width();
        let line_rows = if line_width == 0 || width == 0 {
            1
        } else {
            line_width.div_ceil(width as usize).min(u16::MAX as usize) as u16
        };
        rows = rows.saturating_add(line_rows);
    }
    rows.max(1)
}

/// Natural height, in units, of the final joined text rendered at
/// `width_cells`. `None` when there is nothing to measure.
pub fn probe_height_units(lines: &[String], width_cells: u16) -> Option<f64> {
    if lines.is_empty() || width_cells == 0 {
        return None;
    }
    let joined = lines.join("\n");
    Some(wrapped_rows(&joined, width_cells) as f64 * CELL_HEIGHT_UNITS as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_rows() {
        assert_eq!(wrapped_rows("hello", 80), 1);
        assert_eq!(wrapped_rows("hello", 3), 2);
        assert_eq!(wrapped_rows("a\nb\nc", 80), 3);
        assert_eq!(wrapped_rows("", 80), 1);
        assert_eq!(wrapped_rows("ab\n\ncd", 80), 3);
    }

    #[test]
    fn test_wrapped_rows_uses_display_width() {
        // Five fullwidth chars occupy ten cells
        assert_eq!(wrapped_rows("ターミナル", 10), 1);
        assert_eq!(wrapped_rows("ターミナル", 4), 3);
    }

    #[test]
    fn test_zero_width_degrades() {
        assert_eq!(wrapped_rows("abc\ndef", 0), 2);
    }

    #[test]
    fn test_probe_height_units() {
        let lines: Vec<String> = vec!["one".into(), "two".into()];
        assert_eq!(probe_height_units(&lines, 80), Some(32.0));
        assert_eq!(probe_height_units(&[], 80), None);
        assert_eq!(probe_height_units(&lines, 0), None);
    }

    #[test]
    fn test_unit_conversions() {
        let vp = viewport_units(100, 40);
        assert_eq!(vp.width, 800);
        assert_eq!(vp.height, 640);
        assert_eq!(rows_from_units(640), 40);
        assert_eq!(rows_from_units(641), 41);
    }
}
