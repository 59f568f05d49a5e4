use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use typedeck_core::registry::Instance;

use crate::theme::Theme;

/// Cursor glyph appended after the revealed text
const CURSOR: &str = "▌";

pub struct TypingBlockWidget;

impl TypingBlockWidget {
    /// Render one typewriter block into the page buffer. The cursor is
    /// re-appended as the trailing span of the last visible line on every
    /// render; it stays hidden until the instance starts.
    pub fn render(buf: &mut Buffer, area: Rect, instance: &Instance, title: Option<&str>, theme: &Theme) {
        let block = bordered(title, theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let machine = instance.machine();
        let visible = machine.visible_text();
        let mut lines: Vec<Line> = visible
            .split('\n')
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(theme.text))))
            .collect();

        if machine.is_started() {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled(
                    CURSOR,
                    Style::default()
                        .fg(theme.cursor)
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }

        Paragraph::new(lines)
            .style(Style::default().bg(theme.panel_bg))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// Terminal-window chrome shared by the block widgets
pub(crate) fn bordered<'a>(title: Option<&str>, theme: &Theme) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.panel_bg));
    if let Some(title) = title {
        block = block.title(format!(" {} ", title)).title_style(
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        );
    }
    block
}
