/// Turns a server-supplied reply body into text that is safe to paint on a terminal.
pub trait MarkupRenderer: Send + Sync {
    fn to_display_text(&self, body: &str) -> String;
}

/// Converts embedded HTML to plain text and drops control characters, so
/// replies cannot smuggle escape sequences into the terminal.
///
/// html2md does the HTML parsing; its Markdown escapes and emphasis markers
/// are then removed so the server's wording comes through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct Html2TextRenderer;

impl MarkupRenderer for Html2TextRenderer {
    fn to_display_text(&self, body: &str) -> String {
        let text = if looks_like_markup(body) {
            strip_markdown(&html2md::parse_html(body))
        } else {
            body.to_string()
        };
        strip_control_chars(text.trim_end())
    }
}

fn looks_like_markup(body: &str) -> bool {
    body.find('<')
        .is_some_and(|open| body[open..].contains('>'))
}

/// Characters html2md prefixes with a backslash outside code.
const MARKDOWN_ESCAPED: &[char] = &['<', '>', '*', '\\', '_', '~', '=', '+', '-', '#'];

/// Undoes html2md's Markdown layer: escaped characters become literal again
/// and emphasis markers go away. List bullets and code spans are kept as is.
fn strip_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_code = false;
    let mut line_start = true;

    while let Some(c) = chars.next() {
        match c {
            '`' => {
                in_code = !in_code;
                out.push(c);
            }
            _ if in_code => out.push(c),
            '\\' => match chars.peek() {
                Some(&next) if MARKDOWN_ESCAPED.contains(&next) => {
                    out.push(next);
                    chars.next();
                }
                _ => out.push(c),
            },
            '*' if line_start && chars.peek() == Some(&' ') => out.push(c),
            '*' | '_' | '~' => {}
            _ => out.push(c),
        }
        line_start = c == '\n' || (line_start && c == ' ');
    }
    out
}

fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
