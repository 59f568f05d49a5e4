//! Viewport visibility: intersection math and the observe-once watcher.

/// Intersection fraction at which a typewriter block starts
pub const TYPEWRITER_THRESHOLD: f64 = 0.35;
/// Intersection fraction at which a note block is revealed
pub const NOTE_THRESHOLD: f64 = 0.12;

/// Axis-aligned region in page coordinates (cells)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Region {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Region {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Overlapping region of two rects; zero-sized when they are disjoint
    pub fn intersection(&self, other: &Region) -> Region {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Region {
            x,
            y,
            width: right.saturating_sub(x),
            height: bottom.saturating_sub(y),
        }
    }
}

/// Fraction of `region`'s area that lies inside `viewport`, in 0.0..=1.0
pub fn intersection_ratio(region: Region, viewport: Region) -> f64 {
    let area = region.area();
    if area == 0 {
        return 0.0;
    }
    region.intersection(&viewport).area() as f64 / area as f64
}

struct WatchEntry<K> {
    key: K,
    threshold: f64,
}

/// Observe-once visibility watcher.
///
/// Holds non-owning keys with a per-entry threshold. `sweep` fires every
/// entry whose region meets its threshold and deregisters it, so each key
/// triggers at most once per page.
pub struct VisibilityWatcher<K> {
    entries: Vec<WatchEntry<K>>,
}

impl<K> Default for VisibilityWatcher<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + PartialEq> VisibilityWatcher<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch a key until it first meets `threshold` visibility
    pub fn observe(&mut self, key: K, threshold: f64) {
        if !self.is_watching(key) {
            self.entries.push(WatchEntry { key, threshold });
        }
    }

    /// Stop watching a key without firing it
    pub fn unobserve(&mut self, key: K) {
        self.entries.retain(|entry| entry.key != key);
    }

    pub fn is_watching(&self, key: K) -> bool {
        self.entries.iter().any(|entry| entry.key == key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fire and deregister every watched key whose current region meets
    /// its threshold. `rect_of` maps a key to its page region; keys it
    /// cannot resolve stay watched.
    pub fn sweep<F>(&mut self, viewport: Region, rect_of: F) -> Vec<K>
    where
        F: Fn(K) -> Option<Region>,
    {
        let mut fired = Vec::new();
        self.entries.retain(|entry| match rect_of(entry.key) {
            Some(rect) if intersection_ratio(rect, viewport) >= entry.threshold => {
                fired.push(entry.key);
                false
            }
            _ => true,
        });
        fired
    }
}
