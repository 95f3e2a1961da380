use crate::transcript::{EntryKind, TranscriptEntry};
use crate::{Endpoint, ResponseType};

/// Left-border accent of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderColor {
    Blue,
    Green,
    Amber,
    Red,
}

impl BorderColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            BorderColor::Blue => (0x00, 0x7b, 0xff),
            BorderColor::Green => (0x28, 0xa7, 0x45),
            BorderColor::Amber => (0xff, 0xc1, 0x07),
            BorderColor::Red => (0xdc, 0x35, 0x45),
        }
    }

    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub entries: Vec<EntryView>,
    pub input: String,
    pub placeholder: &'static str,
    pub endpoint: Endpoint,
    pub send: SendButtonView,
    /// Lines scrolled back from the newest entry; 0 pins the view to the bottom.
    pub scroll_back: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SendButtonView {
    pub label: String,
    pub enabled: bool,
    pub spinner: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub label: &'static str,
    pub body: String,
    /// Formatted local time, `HH:MM:SS`.
    pub timestamp: Option<String>,
    pub border: Option<BorderColor>,
    pub is_error: bool,
}

impl EntryView {
    pub(crate) fn from_entry(entry: &TranscriptEntry) -> Self {
        let (label, border) = match entry.kind {
            EntryKind::User => ("👤 You:", None),
            EntryKind::Assistant(Some(ResponseType::Chatbot)) => {
                ("🤖 ThinkBot (General AI chatbot):", Some(BorderColor::Blue))
            }
            EntryKind::Assistant(Some(ResponseType::KnowledgeBase)) => {
                ("📚 ThinkBot (Knowledge Base):", Some(BorderColor::Green))
            }
            EntryKind::Assistant(Some(ResponseType::Search)) => (
                "🔍 ThinkBot (Knowledge Base Search Results):",
                Some(BorderColor::Amber),
            ),
            EntryKind::Assistant(None) => ("🤖 ThinkBot:", None),
            EntryKind::Error => ("⚠️ Error:", Some(BorderColor::Red)),
        };

        Self {
            label,
            body: entry.body.clone(),
            timestamp: entry
                .timestamp
                .map(|at| at.format("%H:%M:%S").to_string()),
            border,
            is_error: entry.is_error(),
        }
    }
}
