use crate::cli::ServeArgs;
use crate::infra::{build_engine, AppState};
use crate::routes::with_assessment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use repair_readiness::assessment::AssessmentState;
use repair_readiness::config::AppConfig;
use repair_readiness::error::AppError;
use repair_readiness::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let engine = build_engine(&config.assessment, None)?;
    let assessment_state = AssessmentState {
        engine: Arc::clone(&engine),
        guide: config.assessment.guide_link(),
    };

    let app = with_assessment_routes(assessment_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = engine.rubric().total_subfactors(),
        policy = engine.policy().label(),
        "repair readiness service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
