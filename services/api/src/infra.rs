use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use repair_readiness::assessment::{PriorityPolicy, ReadinessEngine, Rubric};
use repair_readiness::config::AssessmentConfig;
use repair_readiness::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Loads the configured rubric and binds it to a priority policy.
///
/// `policy` overrides the configured policy when present.
pub(crate) fn build_engine(
    config: &AssessmentConfig,
    policy: Option<PriorityPolicy>,
) -> Result<Arc<ReadinessEngine>, AppError> {
    let rubric = Rubric::load_shared(config.rubric_path.as_deref())?;
    let policy = policy.unwrap_or(config.priority_policy);
    Ok(Arc::new(ReadinessEngine::new(rubric, policy)))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_policy(raw: &str) -> Result<PriorityPolicy, String> {
    raw.parse::<PriorityPolicy>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(
            parse_date(" 2026-05-01 "),
            Ok(NaiveDate::from_ymd_opt(2026, 5, 1).expect("valid date"))
        );
        assert!(parse_date("05/01/2026").is_err());
    }

    #[test]
    fn build_engine_prefers_explicit_policy() {
        let config = AssessmentConfig {
            priority_policy: PriorityPolicy::Graduated,
            ..AssessmentConfig::default()
        };

        let engine = build_engine(&config, Some(PriorityPolicy::Broad)).expect("engine builds");
        assert_eq!(engine.policy(), PriorityPolicy::Broad);
        assert_eq!(engine.rubric().total_subfactors(), 15);

        let engine = build_engine(&config, None).expect("engine builds");
        assert_eq!(engine.policy(), PriorityPolicy::Graduated);
    }

    #[test]
    fn parse_policy_reports_unknown_names() {
        assert_eq!(parse_policy("broad"), Ok(PriorityPolicy::Broad));
        assert!(parse_policy("strict").is_err());
    }
}
