//! Aggregation of a sparse response set into subfactor, factor, and overall scores.
//!
//! Every function here is pure: results are recomputed from the response set on each
//! call and nothing is cached.

use super::domain::ReadinessLevel;
use super::responses::ResponseSet;
use super::rubric::Rubric;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw answer snapshot for one subfactor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubfactorScore {
    pub id: String,
    pub title: String,
    pub score: Option<u8>,
}

/// Mean of a factor's answered subfactors, or `None` when nothing in it is answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor_id: String,
    pub title: String,
    pub score: Option<f64>,
    pub answered: usize,
    pub subfactors: Vec<SubfactorScore>,
}

impl FactorScore {
    pub fn level(&self) -> Option<ReadinessLevel> {
        self.score.map(ReadinessLevel::classify)
    }
}

/// Aggregate outcome of scoring a response set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    /// Per-factor scores in rubric order.
    pub factor_scores: Vec<FactorScore>,
    /// Unweighted mean of the scored factors' means; 0 when no factor is scored.
    pub overall_score: f64,
    pub answered: usize,
    pub total: usize,
}

impl AssessmentResult {
    pub fn factor_score(&self, factor_id: &str) -> Option<&FactorScore> {
        self.factor_scores
            .iter()
            .find(|factor| factor.factor_id == factor_id)
    }

    pub fn level(&self) -> ReadinessLevel {
        ReadinessLevel::classify(self.overall_score)
    }

    pub fn is_complete(&self) -> bool {
        self.answered == self.total
    }

    /// Factors with at least one answered subfactor.
    pub fn scored_factors(&self) -> impl Iterator<Item = (&FactorScore, f64)> {
        self.factor_scores
            .iter()
            .filter_map(|factor| factor.score.map(|score| (factor, score)))
    }
}

/// Scores `responses` against `rubric`.
///
/// Factors without any answer are reported with `score: None` and left out of the overall
/// average, so the overall score is the mean of per-factor means over answered factors only.
pub fn score(rubric: &Rubric, responses: &ResponseSet) -> AssessmentResult {
    let mut answered = 0;
    let mut factor_means = Vec::new();

    let factor_scores: Vec<FactorScore> = rubric
        .factors()
        .iter()
        .map(|factor| {
            let subfactors: Vec<SubfactorScore> = factor
                .subfactors
                .iter()
                .map(|subfactor| SubfactorScore {
                    id: subfactor.id.clone(),
                    title: subfactor.title.clone(),
                    score: responses.get(&subfactor.id),
                })
                .collect();

            let values: Vec<u8> = subfactors.iter().filter_map(|entry| entry.score).collect();
            let score = mean(values.iter().map(|value| f64::from(*value)));
            answered += values.len();
            if let Some(factor_mean) = score {
                factor_means.push(factor_mean);
            }

            FactorScore {
                factor_id: factor.id.clone(),
                title: factor.title.clone(),
                score,
                answered: values.len(),
                subfactors,
            }
        })
        .collect();

    AssessmentResult {
        factor_scores,
        overall_score: mean(factor_means.into_iter()).unwrap_or(0.0),
        answered,
        total: rubric.total_subfactors(),
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Classifies a numeric score. See [`ReadinessLevel::classify`] for the band edges.
pub fn classify(score: f64) -> ReadinessLevel {
    ReadinessLevel::classify(score)
}

/// Counts answered subfactors per readiness level. Every level is present, possibly with 0.
pub fn distribution(rubric: &Rubric, responses: &ResponseSet) -> BTreeMap<ReadinessLevel, usize> {
    let mut counts: BTreeMap<ReadinessLevel, usize> = ReadinessLevel::ordered()
        .into_iter()
        .map(|level| (level, 0))
        .collect();

    for entry in rubric.all_subfactors() {
        if let Some(value) = responses.get(&entry.subfactor.id) {
            *counts.entry(classify(f64::from(value))).or_default() += 1;
        }
    }

    counts
}

/// Number of rubric subfactors that have an answer.
pub fn answered_count(rubric: &Rubric, responses: &ResponseSet) -> usize {
    rubric
        .all_subfactors()
        .iter()
        .filter(|entry| responses.is_answered(&entry.subfactor.id))
        .count()
}

pub fn is_complete(rubric: &Rubric, responses: &ResponseSet) -> bool {
    answered_count(rubric, responses) == rubric.total_subfactors()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([1.0, 2.0, 4.5].into_iter()), Some(2.5));
    }
}
