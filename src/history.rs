//! Interaction history for the query pipeline.
//!
//! Keeps an in-memory log of the current session's questions, oldest
//! first. Nothing is persisted; a new process starts with an empty log.

use chrono::{DateTime, Local};

/// A single logged interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionRecord {
    /// The question as the user typed it.
    pub question: String,
    /// The SQL statement produced by translation.
    pub sql: String,
    /// Number of rows the statement returned (0 when execution failed).
    pub row_count: usize,
    /// When the interaction completed.
    pub timestamp: DateTime<Local>,
}

impl InteractionRecord {
    /// Creates a record stamped with the current local time.
    pub fn new(question: impl Into<String>, sql: impl Into<String>, row_count: usize) -> Self {
        Self {
            question: question.into(),
            sql: sql.into(),
            row_count,
            timestamp: Local::now(),
        }
    }
}

/// Session-scoped interaction log.
#[derive(Debug, Default)]
pub struct HistoryLog {
    /// Stored records (oldest first).
    entries: Vec<InteractionRecord>,
}

impl HistoryLog {
    /// Creates a new empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the log.
    pub fn record(&mut self, record: InteractionRecord) {
        self.entries.push(record);
    }

    /// Returns all records, oldest first.
    pub fn list(&self) -> &[InteractionRecord] {
        &self.entries
    }

    /// Removes all records.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the log has no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
