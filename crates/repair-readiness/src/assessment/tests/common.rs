use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{PriorityPolicy, ReadinessLevel};
use crate::assessment::guide::GuideLink;
use crate::assessment::responses::{CommentSet, ResponseSet};
use crate::assessment::router::AssessmentState;
use crate::assessment::rubric::{Factor, Level, Rubric, Subfactor};
use crate::assessment::ReadinessEngine;

pub(super) fn levels() -> Vec<Level> {
    ReadinessLevel::ordered()
        .into_iter()
        .zip(0u8..)
        .map(|(level, value)| Level {
            value,
            label: level.label().to_string(),
            description: format!("{} description", level.label()),
            next_steps: Some(format!("Next step at level {value}")),
        })
        .collect()
}

pub(super) fn subfactor(id: &str, title: &str) -> Subfactor {
    Subfactor {
        id: id.to_string(),
        title: title.to_string(),
        question: format!("How ready is {title}?"),
        levels: levels(),
    }
}

/// Two factors with two subfactors each: `a`, `b` under Planning and `c`, `d` under
/// Operations, in that question order.
pub(super) fn small_factors() -> Vec<Factor> {
    vec![
        Factor {
            id: "planning".to_string(),
            title: "Planning".to_string(),
            description: String::new(),
            subfactors: vec![subfactor("a", "Alpha"), subfactor("b", "Bravo")],
        },
        Factor {
            id: "operations".to_string(),
            title: "Operations".to_string(),
            description: String::new(),
            subfactors: vec![subfactor("c", "Charlie"), subfactor("d", "Delta")],
        },
    ]
}

pub(super) fn small_rubric() -> Rubric {
    Rubric::from_factors(small_factors()).expect("small rubric validates")
}

pub(super) fn standard_rubric() -> Rubric {
    Rubric::standard().expect("bundled rubric validates")
}

pub(super) fn engine_for(rubric: Rubric, policy: PriorityPolicy) -> ReadinessEngine {
    ReadinessEngine::new(Arc::new(rubric), policy)
}

pub(super) fn small_engine() -> ReadinessEngine {
    engine_for(small_rubric(), PriorityPolicy::Graduated)
}

pub(super) fn standard_engine() -> ReadinessEngine {
    engine_for(standard_rubric(), PriorityPolicy::Graduated)
}

pub(super) fn answers(rubric: &Rubric, entries: &[(&str, i64)]) -> ResponseSet {
    let mut responses = ResponseSet::new();
    for (subfactor_id, value) in entries {
        responses
            .record(rubric, subfactor_id, *value)
            .expect("test answer is valid");
    }
    responses
}

pub(super) fn uniform_answers(rubric: &Rubric, value: i64) -> ResponseSet {
    let mut responses = ResponseSet::new();
    for entry in rubric.all_subfactors() {
        responses
            .record(rubric, &entry.subfactor.id, value)
            .expect("test answer is valid");
    }
    responses
}

pub(super) fn no_comments() -> CommentSet {
    CommentSet::new()
}

pub(super) fn state(guide: GuideLink) -> AssessmentState {
    AssessmentState {
        engine: Arc::new(standard_engine()),
        guide,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
