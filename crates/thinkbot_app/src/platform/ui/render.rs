use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;
use thinkbot_core::{AppViewModel, EntryView, SendButtonView};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::*;

/// Draws the whole screen and returns the transcript's scroll limit.
pub fn render(frame: &mut Frame, view: &AppViewModel) -> u16 {
    let [transcript_area, input_area, footer_area] = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let max_scroll_back = render_transcript(frame, transcript_area, view);
    render_input(frame, input_area, view);
    frame.render_widget(Paragraph::new(footer_line(view)), footer_area);
    max_scroll_back
}

fn render_transcript(frame: &mut Frame, area: Rect, view: &AppViewModel) -> u16 {
    let block = Block::bordered().title(TRANSCRIPT_TITLE);
    let inner = block.inner(area);
    let lines = transcript_lines(&view.entries, usize::from(inner.width));

    let visible = usize::from(inner.height);
    let bottom = lines.len().saturating_sub(visible);
    let offset = bottom.saturating_sub(usize::from(view.scroll_back));
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), area);
    u16::try_from(bottom).unwrap_or(u16::MAX)
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let block = Block::bordered().title(INPUT_TITLE);
    let inner = block.inner(area);

    let (line, cursor_col) = if view.input.is_empty() {
        (
            Line::from(Span::styled(view.placeholder, timestamp_style())),
            0,
        )
    } else {
        let tail = visible_tail(&view.input, usize::from(inner.width).saturating_sub(1));
        let width = tail.width();
        (Line::from(tail.to_string()), width)
    };

    frame.render_widget(Paragraph::new(line).block(block), area);
    if inner.width > 0 && inner.height > 0 {
        let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        frame.set_cursor_position(Position::new(
            inner.x + col.min(inner.width - 1),
            inner.y,
        ));
    }
}

fn footer_line(view: &AppViewModel) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("[ {} ]", view.endpoint.display_name()),
            Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        send_span(&view.send),
        Span::raw("  "),
        Span::styled(KEY_HINTS, timestamp_style()),
    ])
}

fn send_span(send: &SendButtonView) -> Span<'static> {
    if send.spinner {
        Span::styled(
            format!("{SPINNER} {}", send.label),
            Style::new().fg(Color::Yellow),
        )
    } else if send.enabled {
        Span::styled(
            format!("[ {} ]", send.label),
            Style::new().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(format!("[ {} ]", send.label), Style::new().fg(Color::DarkGray))
    }
}

fn transcript_lines(entries: &[EntryView], width: usize) -> Vec<Line<'static>> {
    let body_width = width.saturating_sub(ENTRY_INDENT).max(1);
    let mut lines = Vec::new();

    for (idx, entry) in entries.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        let bar = bar_style(entry.border);
        let body_style = if entry.is_error {
            error_style()
        } else {
            Style::new()
        };

        let mut header = vec![
            Span::styled(ENTRY_BAR, bar),
            Span::raw(" "),
            Span::styled(entry.label, label_style()),
        ];
        if let Some(timestamp) = &entry.timestamp {
            header.push(Span::styled(format!(" [{timestamp}]"), timestamp_style()));
        }
        lines.push(Line::from(header));

        for text in entry.body.lines() {
            for chunk in hard_wrap(text, body_width) {
                lines.push(Line::from(vec![
                    Span::styled(ENTRY_BAR, bar),
                    Span::raw(" "),
                    Span::styled(chunk, body_style),
                ]));
            }
        }
    }
    lines
}

/// Splits `text` into chunks no wider than `max` columns, so the line count
/// used for scrolling is exact.
fn hard_wrap(text: &str, max: usize) -> Vec<String> {
    let text = text.replace('\t', "    ");
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > max && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    chunks.push(current);
    chunks
}

/// Longest suffix of `text` that fits in `max` columns.
fn visible_tail(text: &str, max: usize) -> &str {
    let mut width = 0;
    for (idx, c) in text.char_indices().rev() {
        width += c.width().unwrap_or(0);
        if width > max {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use thinkbot_core::{BorderColor, Endpoint};

    use super::*;

    fn screen_text(view: &AppViewModel, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| {
                render(frame, view);
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn entry(label: &'static str, body: &str, border: Option<BorderColor>) -> EntryView {
        EntryView {
            label,
            body: body.to_string(),
            timestamp: Some("10:11:12".to_string()),
            border,
            is_error: false,
        }
    }

    fn idle_send() -> SendButtonView {
        SendButtonView {
            label: "Send".to_string(),
            enabled: true,
            spinner: false,
        }
    }

    #[test]
    fn empty_input_shows_placeholder_and_send() {
        let view = AppViewModel {
            placeholder: Endpoint::KbAnswer.placeholder(),
            endpoint: Endpoint::KbAnswer,
            send: idle_send(),
            ..AppViewModel::default()
        };
        let text = screen_text(&view, 120, 12);

        assert!(text.contains("Ask a question from the knowledge base..."));
        assert!(text.contains("[ Send ]"));
        assert!(text.contains("Ask knowledge base"));
    }

    #[test]
    fn busy_label_is_rendered() {
        let view = AppViewModel {
            send: SendButtonView {
                label: "Searching knowledge base... (4s)".to_string(),
                enabled: false,
                spinner: true,
            },
            ..AppViewModel::default()
        };
        let text = screen_text(&view, 140, 8);

        assert!(text.contains("Searching knowledge base... (4s)"));
        assert!(!text.contains("[ Send ]"));
    }

    #[test]
    fn newest_entry_is_visible_when_pinned() {
        let entries = (0..30)
            .map(|i| entry("You:", &format!("message number {i}"), None))
            .collect();
        let view = AppViewModel {
            entries,
            send: idle_send(),
            ..AppViewModel::default()
        };
        let text = screen_text(&view, 60, 14);

        assert!(text.contains("message number 29"));
        assert!(!text.contains("message number 0 "));
        assert!(text.contains("[10:11:12]"));
    }

    #[test]
    fn scroll_back_reveals_older_entries() {
        let entries = (0..30)
            .map(|i| entry("You:", &format!("message number {i}"), None))
            .collect();
        let view = AppViewModel {
            entries,
            scroll_back: u16::MAX,
            send: idle_send(),
            ..AppViewModel::default()
        };
        let text = screen_text(&view, 60, 14);

        assert!(text.contains("message number 0 "));
        assert!(!text.contains("message number 29"));
    }

    #[test]
    fn render_reports_scroll_limit() {
        let entries = (0..30)
            .map(|i| entry("You:", &format!("message number {i}"), None))
            .collect();
        let view = AppViewModel {
            entries,
            send: idle_send(),
            ..AppViewModel::default()
        };
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        let mut limit = 0;
        terminal
            .draw(|frame| limit = render(frame, &view))
            .unwrap();

        // 30 two-line entries plus 29 separators, 8 rows visible.
        assert_eq!(limit, 89 - 8);
    }

    #[test]
    fn hard_wrap_respects_width() {
        assert_eq!(hard_wrap("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(hard_wrap("", 3), vec![""]);
        assert_eq!(hard_wrap("日本語", 4), vec!["日本", "語"]);
    }

    #[test]
    fn visible_tail_keeps_end_of_input() {
        assert_eq!(visible_tail("hello world", 5), "world");
        assert_eq!(visible_tail("hi", 5), "hi");
    }
}
