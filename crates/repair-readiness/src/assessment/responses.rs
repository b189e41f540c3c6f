use super::domain::ReadinessLevel;
use super::rubric::Rubric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Highest value on the response scale.
pub const MAX_RESPONSE_VALUE: u8 = 5;

/// Rejected attempt to record an answer or comment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidResponseError {
    #[error("unknown subfactor '{0}'")]
    UnknownSubfactor(String),
    #[error("response {value} for subfactor '{subfactor_id}' is outside 0-5")]
    OutOfRange { subfactor_id: String, value: i64 },
}

/// Sparse map of subfactor id to chosen level value. A missing key means unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<String, u8>);

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one answer, returning the value it replaced.
    ///
    /// Unknown ids and values outside 0-5 are rejected and leave the set untouched.
    pub fn record(
        &mut self,
        rubric: &Rubric,
        subfactor_id: &str,
        value: i64,
    ) -> Result<Option<u8>, InvalidResponseError> {
        let value = validate_value(rubric, subfactor_id, value)?;
        Ok(self.0.insert(subfactor_id.to_string(), value))
    }

    pub fn clear(&mut self, subfactor_id: &str) -> Option<u8> {
        self.0.remove(subfactor_id)
    }

    pub fn get(&self, subfactor_id: &str) -> Option<u8> {
        self.0.get(subfactor_id).copied()
    }

    pub fn is_answered(&self, subfactor_id: &str) -> bool {
        self.0.contains_key(subfactor_id)
    }

    pub fn answered_count(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u8)> {
        self.0.iter().map(|(id, value)| (id.as_str(), *value))
    }

    pub fn as_map(&self) -> &BTreeMap<String, u8> {
        &self.0
    }
}

fn validate_value(
    rubric: &Rubric,
    subfactor_id: &str,
    value: i64,
) -> Result<u8, InvalidResponseError> {
    if !rubric.contains_subfactor(subfactor_id) {
        return Err(InvalidResponseError::UnknownSubfactor(
            subfactor_id.to_string(),
        ));
    }

    u8::try_from(value)
        .ok()
        .filter(|value| *value <= MAX_RESPONSE_VALUE)
        .ok_or_else(|| InvalidResponseError::OutOfRange {
            subfactor_id: subfactor_id.to_string(),
            value,
        })
}

/// Free-text notes keyed by subfactor id, independent of the answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommentSet(BTreeMap<String, String>);

impl CommentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the note for a subfactor. Blank text removes it.
    pub fn set(
        &mut self,
        rubric: &Rubric,
        subfactor_id: &str,
        text: impl Into<String>,
    ) -> Result<(), InvalidResponseError> {
        if !rubric.contains_subfactor(subfactor_id) {
            return Err(InvalidResponseError::UnknownSubfactor(
                subfactor_id.to_string(),
            ));
        }

        let text = text.into();
        if text.trim().is_empty() {
            self.0.remove(subfactor_id);
        } else {
            self.0.insert(subfactor_id.to_string(), text);
        }
        Ok(())
    }

    pub fn get(&self, subfactor_id: &str) -> Option<&str> {
        self.0.get(subfactor_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Raw answers and notes as submitted by a client, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSubmission {
    #[serde(default)]
    pub responses: BTreeMap<String, i64>,
    #[serde(default)]
    pub comments: BTreeMap<String, String>,
}

impl AssessmentSubmission {
    /// Validates every entry against the rubric; the first invalid entry fails the whole set.
    pub fn into_sets(
        self,
        rubric: &Rubric,
    ) -> Result<(ResponseSet, CommentSet), InvalidResponseError> {
        let mut responses = ResponseSet::new();
        for (subfactor_id, value) in &self.responses {
            responses.record(rubric, subfactor_id, *value)?;
        }

        let mut comments = CommentSet::new();
        for (subfactor_id, text) in self.comments {
            comments.set(rubric, &subfactor_id, text)?;
        }

        Ok((responses, comments))
    }
}

/// How a view presents a subfactor that has no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// Show the subfactor as unanswered (`N/A`).
    #[default]
    OmitUnanswered,
    /// Show the subfactor as if it were rated 0 (Inactive).
    TreatAsInactive,
}

impl DisplayPolicy {
    /// Values a view shows, keyed by subfactor id. Missing keys render as unanswered.
    pub fn displayed(self, rubric: &Rubric, responses: &ResponseSet) -> BTreeMap<String, u8> {
        match self {
            Self::OmitUnanswered => responses.as_map().clone(),
            Self::TreatAsInactive => merge_with_defaults(
                &uniform_defaults(rubric, ReadinessLevel::Inactive.value()),
                responses,
            ),
        }
    }
}

/// Dense view of `responses` over `defaults`. An explicit response always wins.
///
/// Ids present only in `responses` are kept as well. The result is for display;
/// it never replaces the sparse set used for scoring.
pub fn merge_with_defaults(
    defaults: &BTreeMap<String, u8>,
    responses: &ResponseSet,
) -> BTreeMap<String, u8> {
    let mut merged = defaults.clone();
    for (subfactor_id, value) in responses.iter() {
        merged.insert(subfactor_id.to_string(), value);
    }
    merged
}

/// Default map that assigns `value` to every subfactor of the rubric.
pub fn uniform_defaults(rubric: &Rubric, value: u8) -> BTreeMap<String, u8> {
    rubric
        .all_subfactors()
        .into_iter()
        .map(|entry| (entry.subfactor.id.clone(), value))
        .collect()
}
