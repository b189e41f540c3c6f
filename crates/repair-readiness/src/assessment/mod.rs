//! Home repair program readiness self-assessment.
//!
//! A fixed rubric of factors and subfactors is answered on a 0-5 scale. The scoring
//! functions aggregate the sparse answers into factor and overall scores, the readiness
//! bands classify them, and the recommendation step turns answered subfactors into a
//! prioritized action list. Reports and CSV export are views over those results.

pub mod domain;
mod engine;
pub mod guide;
pub mod recommendations;
pub mod report;
pub mod responses;
pub mod router;
pub mod rubric;
pub mod scoring;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{Priority, PriorityPolicy, ReadinessLevel, UnknownPriorityPolicy};
pub use engine::{AssessmentReport, ReadinessEngine};
pub use guide::{GuideLink, GUIDE_UNAVAILABLE_MESSAGE};
pub use recommendations::{ActionPlan, ActionPlanSection, MissingLevelTextError, Recommendation};
pub use report::ExportError;
pub use responses::{
    merge_with_defaults, uniform_defaults, AssessmentSubmission, CommentSet, DisplayPolicy,
    InvalidResponseError, ResponseSet,
};
pub use router::{assessment_router, AssessmentState};
pub use rubric::{
    Factor, Level, QuestionView, Rubric, RubricLoadError, RubricValidationError, Subfactor,
    SubfactorRef,
};
pub use scoring::{AssessmentResult, FactorScore, SubfactorScore};
pub use session::{AssessmentHistory, AssessmentSession, HistoryEntry};
