/// Backend endpoint chosen by the selector control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endpoint {
    Search,
    KbAnswer,
    #[default]
    Answer,
}

impl Endpoint {
    /// Selector order, as presented to the user.
    pub const ALL: [Endpoint; 3] = [Endpoint::Answer, Endpoint::KbAnswer, Endpoint::Search];

    /// Maps a raw selector value to an endpoint. Unknown values fall back to `Answer`.
    pub fn from_selector(value: &str) -> Self {
        match value {
            "search" => Endpoint::Search,
            "kbanswer" => Endpoint::KbAnswer,
            _ => Endpoint::Answer,
        }
    }

    pub fn selector_value(self) -> &'static str {
        match self {
            Endpoint::Search => "search",
            Endpoint::KbAnswer => "kbanswer",
            Endpoint::Answer => "answer",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "/search",
            Endpoint::KbAnswer => "/kbanswer",
            Endpoint::Answer => "/answer",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Endpoint::Search => "Search knowledge base",
            Endpoint::KbAnswer => "Ask knowledge base",
            Endpoint::Answer => "General chat",
        }
    }

    /// Input hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            Endpoint::Search => "Search the knowledge base...",
            Endpoint::KbAnswer => "Ask a question from the knowledge base...",
            Endpoint::Answer => "Ask me anything...",
        }
    }

    /// Knowledge-base endpoints are slow; their busy label shows elapsed seconds.
    pub fn tracks_elapsed(self) -> bool {
        matches!(self, Endpoint::Search | Endpoint::KbAnswer)
    }

    pub fn busy_label(self) -> &'static str {
        if self.tracks_elapsed() {
            "Searching knowledge base..."
        } else {
            "Processing..."
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|e| *e == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Server-supplied tag selecting how an assistant entry is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseType {
    Chatbot,
    KnowledgeBase,
    Search,
}

impl ResponseType {
    /// Parses the `response_type` field; anything unrecognised means generic styling.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "chatbot" => Some(ResponseType::Chatbot),
            "knowledge_base" => Some(ResponseType::KnowledgeBase),
            "search" => Some(ResponseType::Search),
            _ => None,
        }
    }
}
