//! Live answers for one browsing session plus an explicit, caller-owned history log.

use super::domain::ReadinessLevel;
use super::engine::{AssessmentReport, ReadinessEngine};
use super::recommendations::MissingLevelTextError;
use super::report::ExportError;
use super::responses::{CommentSet, InvalidResponseError, ResponseSet};
use super::scoring::AssessmentResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Mutable answers and notes for a single assessment run.
#[derive(Debug, Clone)]
pub struct AssessmentSession {
    engine: Arc<ReadinessEngine>,
    responses: ResponseSet,
    comments: CommentSet,
}

impl AssessmentSession {
    pub fn new(engine: Arc<ReadinessEngine>) -> Self {
        Self {
            engine,
            responses: ResponseSet::new(),
            comments: CommentSet::new(),
        }
    }

    pub fn engine(&self) -> &ReadinessEngine {
        &self.engine
    }

    pub fn responses(&self) -> &ResponseSet {
        &self.responses
    }

    pub fn comments(&self) -> &CommentSet {
        &self.comments
    }

    /// Records one answer. A rejected write leaves the session unchanged.
    pub fn respond(&mut self, subfactor_id: &str, value: i64) -> Result<(), InvalidResponseError> {
        match self
            .responses
            .record(self.engine.rubric(), subfactor_id, value)
        {
            Ok(previous) => {
                debug!(subfactor_id, value, ?previous, "recorded response");
                Ok(())
            }
            Err(err) => {
                warn!(subfactor_id, value, error = %err, "rejected response");
                Err(err)
            }
        }
    }

    pub fn clear_response(&mut self, subfactor_id: &str) -> Option<u8> {
        self.responses.clear(subfactor_id)
    }

    pub fn comment(
        &mut self,
        subfactor_id: &str,
        text: impl Into<String>,
    ) -> Result<(), InvalidResponseError> {
        self.comments
            .set(self.engine.rubric(), subfactor_id, text)
    }

    pub fn result(&self) -> AssessmentResult {
        self.engine.score(&self.responses)
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete(&self.responses)
    }

    pub fn report(&self) -> Result<AssessmentReport, MissingLevelTextError> {
        self.engine.report(&self.responses, &self.comments)
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        self.engine.export_csv(&self.responses, &self.comments)
    }
}

/// Point-in-time copy of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub sequence: usize,
    pub saved_at: DateTime<Utc>,
    pub responses: ResponseSet,
    pub comments: CommentSet,
    pub overall_score: f64,
    pub level: ReadinessLevel,
}

/// Append-only log of saved sessions. Entries own independent copies of the answers.
#[derive(Debug, Clone, Default)]
pub struct AssessmentHistory {
    entries: Vec<HistoryEntry>,
}

impl AssessmentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, session: &AssessmentSession, saved_at: DateTime<Utc>) -> &HistoryEntry {
        let result = session.result();
        let sequence = self.entries.len() + 1;
        self.entries.push(HistoryEntry {
            sequence,
            saved_at,
            responses: session.responses().clone(),
            comments: session.comments().clone(),
            overall_score: result.overall_score,
            level: result.level(),
        });
        debug!(sequence, overall = result.overall_score, "saved assessment snapshot");
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
