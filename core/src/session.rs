//! Per-session state: the pending recommendation and the saved history.
//!
//! A [`Session`] is created when an interactive run starts and dropped when it
//! ends. Nothing here is persisted.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::errors::SessionError;
use crate::selection::{GenreSelection, YearRange};

/// A recommendation together with the input that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub text: String,
    pub genres: GenreSelection,
    pub years: YearRange,
}

/// One saved entry of the history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub recommendation: Recommendation,
    pub saved_at: DateTime<Utc>,
}

/// Append-only list of saved recommendations, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RecommendationHistory {
    entries: Vec<HistoryEntry>,
}

impl RecommendationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends to the end. No deduplication and no cap.
    pub fn append(&mut self, recommendation: Recommendation) -> &HistoryEntry {
        self.entries.push(HistoryEntry {
            recommendation,
            saved_at: Utc::now(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

/// State owned by one interactive session
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier
    pub id: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Most recent successful recommendation, not yet necessarily saved
    last_recommendation: Option<Recommendation>,
    history: RecommendationHistory,
}

impl Session {
    pub fn new() -> Self {
        let session = Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            last_recommendation: None,
            history: RecommendationHistory::new(),
        };
        debug!("Created session: {}", session.id);
        session
    }

    /// Time since the session was created
    pub fn elapsed(&self) -> chrono::Duration {
        Utc::now() - self.created_at
    }

    pub fn history(&self) -> &RecommendationHistory {
        &self.history
    }

    pub fn last_recommendation(&self) -> Option<&Recommendation> {
        self.last_recommendation.as_ref()
    }

    /// Replaces the pending recommendation; `None` after a failed generation.
    pub fn set_last_recommendation(&mut self, recommendation: Option<Recommendation>) {
        self.last_recommendation = recommendation;
    }

    /// Saves the pending recommendation into history.
    ///
    /// Saving the same recommendation twice stores it twice.
    pub fn save_recommendation(&mut self) -> Result<&HistoryEntry, SessionError> {
        let recommendation = self
            .last_recommendation
            .clone()
            .ok_or(SessionError::NothingToSave)?;
        let entry = self.history.append(recommendation);
        debug!("Saved recommendation to history of session");
        Ok(entry)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
