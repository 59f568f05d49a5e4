use std::time::Instant;

use chrono::NaiveDateTime;
use tracing::warn;

use typedeck_core::{
    deck::{BlockKind, Deck},
    registry::{RegionId, Registry},
    stabilizer::{self, HeightLock},
    typewriter::{lines::parse_lines, Pace, Typewriter},
    visibility::{Region, VisibilityWatcher, NOTE_THRESHOLD, TYPEWRITER_THRESHOLD},
    AppConfig,
};

use crate::input::Action;
use crate::measure;

/// Stable block identity within a page: its position in display order
pub type BlockId = usize;

/// One renderable block of the page
pub struct BlockView {
    pub kind: BlockKind,
    pub title: Option<String>,
    /// Animation instance, for typewriter blocks
    pub region: Option<RegionId>,
    pub autostart: bool,
    /// Static body, for note blocks
    pub text: String,
    pub lock_height: bool,
    pub height_lock: HeightLock,
    /// Note blocks stay dim until they first scroll into view
    pub revealed: bool,
}

/// Application state
pub struct App {
    /// Deck title
    pub title: Option<String>,
    /// Blocks in display order; indices are `BlockId`s
    pub blocks: Vec<BlockView>,
    /// Owner of all animation instances
    pub registry: Registry,
    /// Observe-once visibility watch over block ids
    pub watcher: VisibilityWatcher<BlockId>,
    /// Page scroll offset in rows
    pub scroll: u16,
    /// Page area width in cells
    pub page_width: u16,
    /// Page area height in cells (terminal minus the status bar)
    pub page_height: u16,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Pending key for multi-key sequences (e.g. 'gg')
    pub pending_key: Option<char>,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    /// Build the page from a deck. Typewriter blocks without a `lines`
    /// attribute are skipped entirely; malformed payloads degrade to an
    /// empty line list inside the parser. `now_wall` feeds the one-shot
    /// last-login substitution.
    pub fn new(config: &AppConfig, deck: Deck, now_wall: NaiveDateTime) -> Self {
        let base_pace = Pace::from_config(&config.typing);
        let mut registry = Registry::new();
        let mut watcher = VisibilityWatcher::new();
        let mut blocks: Vec<BlockView> = Vec::new();

        for spec in deck.blocks {
            let id = blocks.len();
            match spec.kind {
                BlockKind::Type => {
                    let Some(payload) = spec.lines.as_deref() else {
                        warn!("skipping typewriter block without a lines attribute");
                        continue;
                    };
                    let lines = parse_lines(payload, now_wall);
                    let region = registry.insert(Typewriter::new(lines, spec.pace(base_pace)));
                    let autostart = spec.autostart();
                    if !autostart {
                        watcher.observe(id, TYPEWRITER_THRESHOLD);
                    }
                    blocks.push(BlockView {
                        kind: BlockKind::Type,
                        title: spec.title,
                        region: Some(region),
                        autostart,
                        text: String::new(),
                        lock_height: spec.lock_height,
                        height_lock: HeightLock::new(),
                        revealed: true,
                    });
                }
                BlockKind::Note => {
                    watcher.observe(id, NOTE_THRESHOLD);
                    blocks.push(BlockView {
                        kind: BlockKind::Note,
                        title: spec.title,
                        region: None,
                        autostart: false,
                        text: spec.text.unwrap_or_default(),
                        lock_height: false,
                        height_lock: HeightLock::new(),
                        revealed: false,
                    });
                }
            }
        }

        Self {
            title: deck.title,
            blocks,
            registry,
            watcher,
            scroll: 0,
            page_width: 0,
            page_height: 0,
            should_quit: false,
            pending_key: None,
            status_message: None,
        }
    }

    /// Kick the page off: lock heights, start autostart blocks, and take
    /// the initial visibility sweep for everything already on screen.
    pub fn activate(&mut self, now: Instant) {
        self.restabilize();
        for view in &self.blocks {
            if view.autostart {
                if let Some(id) = view.region {
                    self.registry.start(id, now);
                }
            }
        }
        self.sweep_visibility(now);
    }

    fn inner_width(&self) -> u16 {
        self.page_width.saturating_sub(2)
    }

    /// Rows of content inside a block's borders at the current width,
    /// sized to what is visible right now. This is exactly the growth the
    /// height lock prevents.
    fn natural_rows(&self, view: &BlockView) -> u16 {
        let text = match view.kind {
            BlockKind::Type => view
                .region
                .and_then(|id| self.registry.get(id))
                .map(|instance| instance.machine().visible_text())
                .unwrap_or_default(),
            BlockKind::Note => view.text.clone(),
        };
        measure::wrapped_rows(&text, self.inner_width())
    }

    /// Full height of a block including its bordered frame. A locked
    /// block propagates its forced height to the frame, which keeps one
    /// border row of padding above and below.
    fn block_height(&self, view: &BlockView) -> u16 {
        if let Some(locked) = view.height_lock.locked() {
            let panel = stabilizer::panel_min_height(
                locked,
                measure::CELL_HEIGHT_UNITS,
                measure::CELL_HEIGHT_UNITS,
            );
            return measure::rows_from_units(panel);
        }
        self.natural_rows(view).saturating_add(2)
    }

    /// Page rect of every block at the current width, in display order
    pub fn layout(&self) -> Vec<Region> {
        let mut rects = Vec::with_capacity(self.blocks.len());
        let mut y = 0u16;
        for view in &self.blocks {
            let height = self.block_height(view);
            rects.push(Region::new(0, y, self.page_width, height));
            y = y.saturating_add(height).saturating_add(1);
        }
        rects
    }

    /// Total page height in rows
    pub fn content_height(&self) -> u16 {
        self.layout().last().map(|rect| rect.bottom()).unwrap_or(0)
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height().saturating_sub(self.page_height)
    }

    /// The viewport as a page region
    pub fn viewport_region(&self) -> Region {
        Region::new(0, self.scroll, self.page_width, self.page_height)
    }

    /// Fire visibility triggers for blocks now sufficiently on screen
    pub fn sweep_visibility(&mut self, now: Instant) {
        let rects = self.layout();
        let viewport = self.viewport_region();
        let fired = self.watcher.sweep(viewport, |id| rects.get(id).copied());
        for id in fired {
            let Some(view) = self.blocks.get_mut(id) else {
                continue;
            };
            match view.kind {
                BlockKind::Type => {
                    if let Some(region) = view.region {
                        self.registry.start(region, now);
                    }
                }
                BlockKind::Note => view.revealed = true,
            }
        }
    }

    /// Advance due animation steps; returns true when a redraw is needed.
    /// Growth can move later blocks across the visibility threshold, so a
    /// sweep follows every batch of steps.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        let stepped = self.registry.poll(now);
        if stepped {
            self.sweep_visibility(now);
        }
        stepped
    }

    /// Adopt a new terminal size: one row is reserved for the status bar,
    /// locked heights are re-measured, and the scroll is re-clamped.
    pub fn on_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.page_width = width;
        self.page_height = height.saturating_sub(1);
        self.restabilize();
        self.scroll = self.scroll.min(self.max_scroll());
        self.sweep_visibility(now);
    }

    /// Re-measure and re-lock every height-locked block for the current
    /// viewport
    pub fn restabilize(&mut self) {
        let viewport = measure::viewport_units(self.page_width, self.page_height);
        let inner_width = self.page_width.saturating_sub(2);
        let App {
            blocks, registry, ..
        } = self;
        for view in blocks.iter_mut() {
            if view.kind != BlockKind::Type || !view.lock_height {
                continue;
            }
            let lines = view
                .region
                .and_then(|id| registry.get(id))
                .map(|instance| instance.machine().lines().to_vec())
                .unwrap_or_default();
            view.height_lock
                .restabilize(viewport, |_width_units| {
                    measure::probe_height_units(&lines, inner_width)
                });
        }
    }

    /// Freeze all running animations where they are
    pub fn cancel_animations(&mut self) {
        self.registry.cancel_all();
        self.status_message = Some("animations cancelled".to_string());
    }

    /// Teardown: cancel every pending step before the page goes away
    pub fn shutdown(&mut self) {
        self.registry.cancel_all();
    }

    /// Apply an input action
    pub fn apply(&mut self, action: Action, now: Instant) {
        if action != Action::PendingG {
            self.pending_key = None;
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(1),
            Action::ScrollUp => self.scroll_by(-1),
            Action::ScrollHalfPageDown => self.scroll_by(self.half_page()),
            Action::ScrollHalfPageUp => self.scroll_by(-self.half_page()),
            Action::ScrollPageDown => self.scroll_by(self.page_height as i32),
            Action::ScrollPageUp => self.scroll_by(-(self.page_height as i32)),
            Action::JumpToTop => self.scroll = 0,
            Action::JumpToBottom => self.scroll = self.max_scroll(),
            Action::PendingG => self.pending_key = Some('g'),
            Action::CancelAnimations => self.cancel_animations(),
            Action::None => {}
        }
        self.sweep_visibility(now);
    }

    fn half_page(&self) -> i32 {
        (self.page_height / 2).max(1) as i32
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.max_scroll() as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max) as u16;
    }
}
