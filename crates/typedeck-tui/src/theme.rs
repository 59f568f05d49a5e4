use ratatui::style::Color;

/// Presentation theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub panel_bg: Color,
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub dim: Color,
    pub cursor: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Phosphor terminal: green text on near-black
        Self {
            bg: Color::Rgb(0x0a, 0x0d, 0x0a),
            panel_bg: Color::Rgb(0x10, 0x14, 0x10),
            border: Color::Rgb(0x2e, 0x3d, 0x2e),
            title: Color::Rgb(0x8e, 0xc0, 0x7c),
            text: Color::Rgb(0xb8, 0xe0, 0xa8),
            dim: Color::Rgb(0x4a, 0x5a, 0x4a),
            cursor: Color::Rgb(0xd8, 0xf0, 0xc8),
            status_bg: Color::Rgb(0x1a, 0x22, 0x1a),
            status_fg: Color::Rgb(0xb8, 0xe0, 0xa8),
            hint: Color::Rgb(0x6a, 0x7d, 0x6a),
        }
    }
}
