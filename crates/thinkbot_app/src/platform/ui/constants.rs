use ratatui::style::{Color, Modifier, Style};
use thinkbot_core::BorderColor;

pub const TRANSCRIPT_TITLE: &str = " ThinkBot ";
pub const INPUT_TITLE: &str = " Message ";
pub const KEY_HINTS: &str = "Enter send | Tab endpoint | Ctrl+L clear | PgUp/PgDn scroll | Esc quit";

pub const ENTRY_BAR: &str = "▌";
/// Columns taken by the entry bar and the space after it.
pub const ENTRY_INDENT: usize = 2;
pub const SPINNER: &str = "◌";

pub const PAGE_SCROLL_LINES: i32 = 10;

pub fn border_color(color: BorderColor) -> Color {
    let (r, g, b) = color.rgb();
    Color::Rgb(r, g, b)
}

/// Plain entries get a neutral bar.
pub fn bar_style(border: Option<BorderColor>) -> Style {
    Style::new().fg(border.map_or(Color::DarkGray, border_color))
}

pub fn error_style() -> Style {
    Style::new()
        .fg(Color::Rgb(0x72, 0x1c, 0x24))
        .bg(Color::Rgb(0xf8, 0xd7, 0xda))
}

pub fn timestamp_style() -> Style {
    Style::new().add_modifier(Modifier::DIM)
}

pub fn label_style() -> Style {
    Style::new().add_modifier(Modifier::BOLD)
}
