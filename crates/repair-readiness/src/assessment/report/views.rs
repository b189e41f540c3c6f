use super::super::domain::ReadinessLevel;
use serde::Serialize;

/// One subfactor row of the results table and CSV export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub factor_id: String,
    pub factor: String,
    pub subfactor_id: String,
    pub subfactor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorSummaryEntry {
    pub factor_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<ReadinessLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level_color: Option<&'static str>,
    pub answered: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionEntry {
    pub level: ReadinessLevel,
    pub label: &'static str,
    pub color: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub overall_score: f64,
    pub overall_level: ReadinessLevel,
    pub level_label: &'static str,
    pub level_color: &'static str,
    pub answered: usize,
    pub total: usize,
    pub completion_pct: f32,
    pub complete: bool,
    pub factors: Vec<FactorSummaryEntry>,
    pub distribution: Vec<DistributionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strongest_factor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_factor: Option<String>,
}
