use super::domain::{PriorityPolicy, ReadinessLevel};
use super::recommendations::{self, ActionPlan, MissingLevelTextError, Recommendation};
use super::report::{self, views::DashboardSummary, views::ResultRow, ExportError};
use super::responses::{CommentSet, DisplayPolicy, ResponseSet};
use super::rubric::Rubric;
use super::scoring::{self, AssessmentResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Stateless scorer bound to one rubric and one priority policy.
#[derive(Debug, Clone)]
pub struct ReadinessEngine {
    rubric: Arc<Rubric>,
    policy: PriorityPolicy,
}

impl ReadinessEngine {
    pub fn new(rubric: Arc<Rubric>, policy: PriorityPolicy) -> Self {
        Self { rubric, policy }
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn policy(&self) -> PriorityPolicy {
        self.policy
    }

    pub fn score(&self, responses: &ResponseSet) -> AssessmentResult {
        let result = scoring::score(&self.rubric, responses);
        debug!(
            answered = result.answered,
            total = result.total,
            overall = result.overall_score,
            "scored assessment"
        );
        result
    }

    pub fn distribution(&self, responses: &ResponseSet) -> BTreeMap<ReadinessLevel, usize> {
        scoring::distribution(&self.rubric, responses)
    }

    pub fn is_complete(&self, responses: &ResponseSet) -> bool {
        scoring::is_complete(&self.rubric, responses)
    }

    pub fn recommend(
        &self,
        result: &AssessmentResult,
    ) -> Result<Vec<Recommendation>, MissingLevelTextError> {
        recommendations::recommend(result, &self.rubric, self.policy)
    }

    pub fn action_plan(
        &self,
        result: &AssessmentResult,
    ) -> Result<ActionPlan, MissingLevelTextError> {
        let recommendations = self.recommend(result)?;
        Ok(ActionPlan::from_recommendations(self.policy, recommendations))
    }

    pub fn dashboard(
        &self,
        responses: &ResponseSet,
        result: &AssessmentResult,
    ) -> DashboardSummary {
        report::dashboard(&self.rubric, responses, result)
    }

    pub fn result_rows(
        &self,
        responses: &ResponseSet,
        comments: &CommentSet,
        policy: DisplayPolicy,
    ) -> Vec<ResultRow> {
        report::result_rows(&self.rubric, responses, comments, policy)
    }

    /// CSV export of the current answers. Unanswered subfactors render as `N/A`.
    pub fn export_csv(
        &self,
        responses: &ResponseSet,
        comments: &CommentSet,
    ) -> Result<String, ExportError> {
        let result = self.score(responses);
        let rows = self.result_rows(responses, comments, DisplayPolicy::OmitUnanswered);
        report::to_csv_string(&rows, &result)
    }

    /// Everything the results, dashboard, and action plan views need in one pass.
    pub fn report(
        &self,
        responses: &ResponseSet,
        comments: &CommentSet,
    ) -> Result<AssessmentReport, MissingLevelTextError> {
        let result = self.score(responses);
        let dashboard = self.dashboard(responses, &result);
        let action_plan = self.action_plan(&result)?;
        let rows = self.result_rows(responses, comments, DisplayPolicy::OmitUnanswered);

        Ok(AssessmentReport {
            result,
            dashboard,
            rows,
            action_plan,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub result: AssessmentResult,
    pub dashboard: DashboardSummary,
    pub rows: Vec<ResultRow>,
    pub action_plan: ActionPlan,
}
