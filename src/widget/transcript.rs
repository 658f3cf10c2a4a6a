use std::fmt;

/// Text shown while a reply is outstanding.
pub const PENDING_TEXT: &str = "… thinking";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Ai,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::You => write!(f, "You"),
            Speaker::Ai => write!(f, "AI"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub speaker: Speaker,
    pub text: String,
    pending: bool,
}

impl Entry {
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker, self.text)
    }
}

/// Append-only chat log. Entries are never removed or reordered; the only
/// mutation of an existing entry is resolving a pending placeholder.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<Entry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) -> usize {
        self.push(Entry {
            speaker,
            text: text.into(),
            pending: false,
        })
    }

    pub fn append_pending(&mut self) -> usize {
        self.push(Entry {
            speaker: Speaker::Ai,
            text: PENDING_TEXT.to_string(),
            pending: true,
        })
    }

    /// Resolves the most recent pending entry. Returns its index, or `None`
    /// if nothing was pending.
    pub fn replace_last_pending(&mut self, text: impl Into<String>) -> Option<usize> {
        let index = self.entries.iter().rposition(Entry::is_pending)?;
        let entry = &mut self.entries[index];
        entry.text = text.into();
        entry.pending = false;
        Some(index)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn has_pending(&self) -> bool {
        self.entries.iter().any(Entry::is_pending)
    }

    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(Entry::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }
}
