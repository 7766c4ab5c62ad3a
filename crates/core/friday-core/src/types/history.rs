//! Answers, combined responses and the session history

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Number of history entries the dashboard shows
pub const HISTORY_DISPLAY_LIMIT: usize = 5;

/// Separator placed between persona answers
pub const FRAGMENT_SEPARATOR: &str = "\n\n";

/// Text returned by one persona, labeled with that persona's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFragment {
    persona: String,
    text: String,
}

impl AnswerFragment {
    /// Label `text` with `persona`
    pub fn new(persona: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            text: text.into(),
        }
    }

    /// Persona display name
    pub fn persona(&self) -> &str {
        &self.persona
    }

    /// Unlabeled answer text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for AnswerFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.persona, self.text)
    }
}

/// All fragments of one submission, joined by a blank line in persona order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinedResponse {
    text: String,
}

impl CombinedResponse {
    /// Join fragments in the order given
    pub fn from_fragments<'a, I>(fragments: I) -> Self
    where
        I: IntoIterator<Item = &'a AnswerFragment>,
    {
        let text = fragments
            .into_iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(FRAGMENT_SEPARATOR);
        Self { text }
    }

    /// Rendered response text
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for CombinedResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One completed submission. Fields are read-only after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    query: String,
    response: CombinedResponse,
    timestamp: DateTime<Local>,
}

impl HistoryEntry {
    /// Entry stamped with the current local time
    pub fn now(query: impl Into<String>, response: CombinedResponse) -> Self {
        Self::at(query, response, Local::now())
    }

    /// Entry stamped with an explicit time
    pub fn at(query: impl Into<String>, response: CombinedResponse, timestamp: DateTime<Local>) -> Self {
        Self {
            query: query.into(),
            response,
            timestamp,
        }
    }

    /// Query as typed by the user (untrimmed)
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Combined response recorded for the query
    pub fn response(&self) -> &CombinedResponse {
        &self.response
    }

    /// Completion time
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Timestamp in the dashboard's locale-style format, e.g. `3/7/2025, 9:05:01 PM`
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
    }
}

/// Session history, newest first. Storage is unbounded; display is capped.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
}

impl HistoryLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry in front of all previous ones
    pub fn prepend(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);
    }

    /// Total number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Up to `limit` most recent entries, newest first
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().take(limit)
    }

    /// The entries the dashboard displays
    pub fn visible(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.recent(HISTORY_DISPLAY_LIMIT)
    }

    /// Every entry, newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}
