use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::theme::Theme;
use super::typing_block::bordered;

pub struct NoteBlockWidget;

impl NoteBlockWidget {
    /// Render a static note block. Until its first visibility trigger the
    /// body is withheld and the frame drawn dim; afterwards it shows
    /// normally, permanently.
    pub fn render(buf: &mut Buffer, area: Rect, text: &str, title: Option<&str>, revealed: bool, theme: &Theme) {
        let mut block = bordered(title, theme);
        if !revealed {
            block = block
                .border_style(Style::default().fg(theme.dim))
                .title_style(Style::default().fg(theme.dim));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if !revealed {
            return;
        }

        Paragraph::new(text.to_string())
            .style(Style::default().fg(theme.text).bg(theme.panel_bg))
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
