//! Static factor -> subfactor -> level hierarchy that every assessment is scored against.
//!
//! The rubric is content, not logic: it is parsed from a JSON table (the bundled
//! `rubric/standard.json` or an operator-supplied file), validated once, and then shared
//! read-only behind an `Arc`.

mod validation;

pub use validation::RubricValidationError;

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

const STANDARD_RUBRIC: &str = include_str!("../../../rubric/standard.json");

/// Number of rungs on the response scale (values 0 through 5).
pub const LEVEL_COUNT: usize = 6;

/// One rung of a subfactor's ordinal scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub value: u8,
    pub label: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_steps: Option<String>,
}

/// Individually rated dimension of a factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subfactor {
    pub id: String,
    pub title: String,
    pub question: String,
    pub levels: Vec<Level>,
}

impl Subfactor {
    /// Level whose value matches `value`. Validated rubrics keep levels indexed by value.
    pub fn level(&self, value: u8) -> Option<&Level> {
        self.levels
            .get(value as usize)
            .filter(|level| level.value == value)
            .or_else(|| self.levels.iter().find(|level| level.value == value))
    }
}

/// Thematic grouping of subfactors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub subfactors: Vec<Subfactor>,
}

/// Validated, immutable rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rubric {
    factors: Vec<Factor>,
}

#[derive(Deserialize)]
struct RubricDocument {
    factors: Vec<Factor>,
}

/// A subfactor viewed in question order together with its owning factor.
#[derive(Debug, Clone, Copy)]
pub struct SubfactorRef<'a> {
    /// Zero-based position in the question sequence.
    pub position: usize,
    pub factor: &'a Factor,
    pub subfactor: &'a Subfactor,
}

impl<'a> SubfactorRef<'a> {
    pub fn factor_id(&self) -> &'a str {
        &self.factor.id
    }

    pub fn factor_title(&self) -> &'a str {
        &self.factor.title
    }

    pub fn to_question(&self) -> QuestionView {
        QuestionView {
            position: self.position,
            factor_id: self.factor.id.clone(),
            factor_title: self.factor.title.clone(),
            subfactor_id: self.subfactor.id.clone(),
            title: self.subfactor.title.clone(),
            question: self.subfactor.question.clone(),
            levels: self.subfactor.levels.clone(),
        }
    }
}

/// Owned, serializable form of a [`SubfactorRef`] used by the question listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionView {
    pub position: usize,
    pub factor_id: String,
    pub factor_title: String,
    pub subfactor_id: String,
    pub title: String,
    pub question: String,
    pub levels: Vec<Level>,
}

impl Rubric {
    /// Validates factors and returns a rubric with each subfactor's levels ordered by value.
    pub fn from_factors(mut factors: Vec<Factor>) -> Result<Self, RubricValidationError> {
        validation::validate(&factors)?;
        for factor in &mut factors {
            for subfactor in &mut factor.subfactors {
                subfactor.levels.sort_by_key(|level| level.value);
            }
        }
        Ok(Self { factors })
    }

    /// The rubric bundled with the crate.
    pub fn standard() -> Result<Self, RubricLoadError> {
        Self::from_json_str(STANDARD_RUBRIC)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RubricLoadError> {
        let document: RubricDocument = serde_json::from_str(raw)?;
        Ok(Self::from_factors(document.factors)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RubricLoadError> {
        let document: RubricDocument = serde_json::from_reader(reader)?;
        Ok(Self::from_factors(document.factors)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RubricLoadError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let rubric = Self::from_reader(BufReader::new(file))?;
        info!(
            path = %path.display(),
            factors = rubric.factors.len(),
            subfactors = rubric.total_subfactors(),
            "loaded assessment rubric"
        );
        Ok(rubric)
    }

    /// Loads `path` when given, otherwise the bundled rubric, and wraps it for sharing.
    pub fn load_shared(path: Option<&Path>) -> Result<Arc<Self>, RubricLoadError> {
        let rubric = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::standard()?,
        };
        Ok(Arc::new(rubric))
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Every subfactor in question order: factor order, then subfactor order.
    pub fn all_subfactors(&self) -> Vec<SubfactorRef<'_>> {
        self.factors
            .iter()
            .flat_map(|factor| {
                factor
                    .subfactors
                    .iter()
                    .map(move |subfactor| (factor, subfactor))
            })
            .enumerate()
            .map(|(position, (factor, subfactor))| SubfactorRef {
                position,
                factor,
                subfactor,
            })
            .collect()
    }

    pub fn subfactor(&self, subfactor_id: &str) -> Option<SubfactorRef<'_>> {
        self.all_subfactors()
            .into_iter()
            .find(|entry| entry.subfactor.id == subfactor_id)
    }

    pub fn contains_subfactor(&self, subfactor_id: &str) -> bool {
        self.factors
            .iter()
            .flat_map(|factor| factor.subfactors.iter())
            .any(|subfactor| subfactor.id == subfactor_id)
    }

    pub fn total_subfactors(&self) -> usize {
        self.factors
            .iter()
            .map(|factor| factor.subfactors.len())
            .sum()
    }

    pub fn questions(&self) -> Vec<QuestionView> {
        self.all_subfactors()
            .iter()
            .map(SubfactorRef::to_question)
            .collect()
    }
}

/// Failure to obtain a usable rubric at startup.
#[derive(Debug, thiserror::Error)]
pub enum RubricLoadError {
    #[error("failed to read rubric file: {0}")]
    Io(#[from] std::io::Error),
    #[error("rubric file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] RubricValidationError),
}
