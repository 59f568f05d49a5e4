use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, theme: &Theme) {
        let (completed, total) = app.registry.progress();

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            let title = app.title.as_deref().unwrap_or("typedeck");
            if total > 0 {
                format!(" {} | typed {}/{}", title, completed, total)
            } else {
                format!(" {}", title)
            }
        };

        let help_hint = " q:quit j/k:scroll space:page g/G:top/bottom c:cancel ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default().fg(theme.status_fg).bg(theme.status_bg),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(theme.status_bg),
            ),
            Span::styled(
                help_hint,
                Style::default().fg(theme.hint).bg(theme.status_bg),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
