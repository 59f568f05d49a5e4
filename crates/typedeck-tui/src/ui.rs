//! Frame composition.
//!
//! The page is rendered at its full natural height into an off-screen
//! buffer, then the viewport's rows are copied to the frame. Blocks that
//! straddle the viewport edge come out correctly clipped for free.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    widgets::{Block, Widget},
    Frame,
};

use typedeck_core::deck::BlockKind;

use crate::app::App;
use crate::theme::Theme;
use crate::widgets::{NoteBlockWidget, StatusBarWidget, TypingBlockWidget};

/// Draw one frame: the scrolled page plus the status bar
pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let chunks =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(frame.area());
    let page_area = chunks[0];

    Block::default()
        .style(Style::default().bg(theme.bg))
        .render(page_area, frame.buffer_mut());
    draw_page(frame, page_area, app, theme);

    StatusBarWidget::render(frame, chunks[1], app, theme);
}

fn draw_page(frame: &mut Frame, page_area: Rect, app: &App, theme: &Theme) {
    if page_area.width == 0 || page_area.height == 0 {
        return;
    }

    let content_height = app.content_height();
    if content_height == 0 {
        return;
    }

    let mut page = Buffer::empty(Rect::new(0, 0, page_area.width, content_height));
    page.set_style(page.area, Style::default().bg(theme.bg));

    let rects = app.layout();
    for (view, rect) in app.blocks.iter().zip(&rects) {
        let area = Rect::new(rect.x, rect.y, rect.width, rect.height);
        match view.kind {
            BlockKind::Type => {
                let Some(instance) = view.region.and_then(|id| app.registry.get(id)) else {
                    continue;
                };
                TypingBlockWidget::render(
                    &mut page,
                    area,
                    instance,
                    view.title.as_deref(),
                    theme,
                );
            }
            BlockKind::Note => {
                NoteBlockWidget::render(
                    &mut page,
                    area,
                    &view.text,
                    view.title.as_deref(),
                    view.revealed,
                    theme,
                );
            }
        }
    }

    // Blit the visible window of the page into the frame
    let buf = frame.buffer_mut();
    for row in 0..page_area.height {
        let src_y = app.scroll.saturating_add(row);
        if src_y >= content_height {
            break;
        }
        for col in 0..page_area.width {
            if let Some(cell) = page.cell(Position::new(col, src_y)) {
                if let Some(dest) = buf.cell_mut(Position::new(
                    page_area.x + col,
                    page_area.y + row,
                )) {
                    *dest = cell.clone();
                }
            }
        }
    }
}
