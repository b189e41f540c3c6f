use super::super::domain::ReadinessLevel;
use super::super::responses::{CommentSet, DisplayPolicy, ResponseSet};
use super::super::rubric::Rubric;
use super::super::scoring::{self, AssessmentResult};
use super::views::{DashboardSummary, DistributionEntry, FactorSummaryEntry, ResultRow};

/// Per-subfactor rows in question order.
///
/// `policy` decides whether an unanswered subfactor shows as absent or as a 0 rating. The
/// level column follows the displayed value.
pub fn result_rows(
    rubric: &Rubric,
    responses: &ResponseSet,
    comments: &CommentSet,
    policy: DisplayPolicy,
) -> Vec<ResultRow> {
    let shown = policy.displayed(rubric, responses);
    rubric
        .all_subfactors()
        .into_iter()
        .map(|entry| {
            let score = shown.get(&entry.subfactor.id).copied();
            let level = score
                .and_then(|value| entry.subfactor.level(value))
                .map(|level| level.label.clone());

            ResultRow {
                factor_id: entry.factor_id().to_string(),
                factor: entry.factor_title().to_string(),
                subfactor_id: entry.subfactor.id.clone(),
                subfactor: entry.subfactor.title.clone(),
                score,
                level,
                comment: comments.get(&entry.subfactor.id).map(str::to_string),
            }
        })
        .collect()
}

/// Dashboard figures derived from a scored result.
pub fn dashboard(
    rubric: &Rubric,
    responses: &ResponseSet,
    result: &AssessmentResult,
) -> DashboardSummary {
    let overall_level = result.level();

    let factors = result
        .factor_scores
        .iter()
        .map(|factor| {
            let level = factor.level();
            FactorSummaryEntry {
                factor_id: factor.factor_id.clone(),
                title: factor.title.clone(),
                score: factor.score,
                level,
                level_label: level.map(ReadinessLevel::label),
                level_color: level.map(ReadinessLevel::color),
                answered: factor.answered,
                total: factor.subfactors.len(),
            }
        })
        .collect();

    let distribution = scoring::distribution(rubric, responses)
        .into_iter()
        .map(|(level, count)| DistributionEntry {
            level,
            label: level.label(),
            color: level.color(),
            count,
        })
        .collect();

    // Ties keep the earliest factor in rubric order.
    let mut strongest: Option<(&str, f64)> = None;
    let mut focus: Option<(&str, f64)> = None;
    for (factor, score) in result.scored_factors() {
        if strongest.map_or(true, |(_, best)| score > best) {
            strongest = Some((factor.title.as_str(), score));
        }
        if focus.map_or(true, |(_, lowest)| score < lowest) {
            focus = Some((factor.title.as_str(), score));
        }
    }

    let completion_pct = if result.total > 0 {
        (result.answered as f32 / result.total as f32 * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    };

    DashboardSummary {
        overall_score: result.overall_score,
        overall_level,
        level_label: overall_level.label(),
        level_color: overall_level.color(),
        answered: result.answered,
        total: result.total,
        completion_pct,
        complete: result.is_complete(),
        factors,
        distribution,
        strongest_factor: strongest.map(|(title, _)| title.to_string()),
        focus_factor: focus.map(|(title, _)| title.to_string()),
    }
}
