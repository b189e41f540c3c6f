use super::domain::{Priority, PriorityPolicy};
use super::rubric::Rubric;
use super::scoring::AssessmentResult;
use serde::Serialize;

/// Answered level has no next-step guidance in the rubric.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rubric has no next-step guidance for subfactor '{subfactor_id}' at level {value}")]
pub struct MissingLevelTextError {
    pub subfactor_id: String,
    pub value: u8,
}

/// Prioritized next step derived from one answered subfactor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub factor_id: String,
    pub factor: String,
    pub subfactor_id: String,
    pub subfactor: String,
    pub score: u8,
    pub level: String,
    pub priority: Priority,
    pub priority_label: &'static str,
    pub action: String,
    #[serde(skip)]
    position: usize,
}

/// Builds one recommendation per answered subfactor in `result`.
///
/// Ordering is priority (High first), then raw score ascending, then question order, so
/// equal keys always keep their rubric sequence.
pub fn recommend(
    result: &AssessmentResult,
    rubric: &Rubric,
    policy: PriorityPolicy,
) -> Result<Vec<Recommendation>, MissingLevelTextError> {
    let mut recommendations = Vec::new();

    for entry in rubric.all_subfactors() {
        let Some(score) = result
            .factor_score(entry.factor_id())
            .and_then(|factor| {
                factor
                    .subfactors
                    .iter()
                    .find(|subfactor| subfactor.id == entry.subfactor.id)
            })
            .and_then(|subfactor| subfactor.score)
        else {
            continue;
        };

        let missing = || MissingLevelTextError {
            subfactor_id: entry.subfactor.id.clone(),
            value: score,
        };
        let level = entry.subfactor.level(score).ok_or_else(missing)?;
        let action = level
            .next_steps
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .ok_or_else(missing)?;

        let priority = policy.priority_for(score);
        recommendations.push(Recommendation {
            factor_id: entry.factor_id().to_string(),
            factor: entry.factor_title().to_string(),
            subfactor_id: entry.subfactor.id.clone(),
            subfactor: entry.subfactor.title.clone(),
            score,
            level: level.label.clone(),
            priority,
            priority_label: priority.label(),
            action: action.to_string(),
            position: entry.position,
        });
    }

    recommendations.sort_by_key(|item| (item.priority.rank(), item.score, item.position));
    Ok(recommendations)
}

/// Recommendations of one priority, in recommendation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPlanSection {
    pub priority: Priority,
    pub priority_label: &'static str,
    pub items: Vec<Recommendation>,
}

/// Recommendations grouped by priority. Every priority has a section, possibly empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionPlan {
    pub policy: PriorityPolicy,
    pub sections: Vec<ActionPlanSection>,
}

impl ActionPlan {
    pub fn from_recommendations(
        policy: PriorityPolicy,
        recommendations: Vec<Recommendation>,
    ) -> Self {
        let mut sections: Vec<ActionPlanSection> = Priority::ordered()
            .into_iter()
            .map(|priority| ActionPlanSection {
                priority,
                priority_label: priority.label(),
                items: Vec::new(),
            })
            .collect();

        for recommendation in recommendations {
            if let Some(section) = sections
                .iter_mut()
                .find(|section| section.priority == recommendation.priority)
            {
                section.items.push(recommendation);
            }
        }

        Self { policy, sections }
    }

    pub fn section(&self, priority: Priority) -> Option<&ActionPlanSection> {
        self.sections
            .iter()
            .find(|section| section.priority == priority)
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|section| section.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
