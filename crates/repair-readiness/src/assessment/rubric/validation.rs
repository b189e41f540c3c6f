use super::{Factor, LEVEL_COUNT};
use crate::assessment::domain::ReadinessLevel;
use std::collections::HashSet;

/// Structural problems that make a rubric unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RubricValidationError {
    #[error("rubric defines no factors")]
    NoFactors,
    #[error("factor '{factor_id}' defines no subfactors")]
    EmptyFactor { factor_id: String },
    #[error("factor id '{0}' is used more than once")]
    DuplicateFactorId(String),
    #[error("subfactor id '{0}' is used more than once")]
    DuplicateSubfactorId(String),
    #[error("subfactor '{subfactor_id}' must define exactly 6 levels, found {found}")]
    LevelCount { subfactor_id: String, found: usize },
    #[error("subfactor '{subfactor_id}' has level value {value} outside 0-5")]
    LevelOutOfRange { subfactor_id: String, value: u8 },
    #[error("subfactor '{subfactor_id}' defines level value {value} more than once")]
    DuplicateLevel { subfactor_id: String, value: u8 },
    #[error("subfactor '{subfactor_id}' level {value} uses unknown label '{label}'")]
    UnknownLevelLabel {
        subfactor_id: String,
        value: u8,
        label: String,
    },
    #[error(
        "subfactor '{subfactor_id}' level {value} is labelled '{label}', expected '{expected}'"
    )]
    MismatchedLevelLabel {
        subfactor_id: String,
        value: u8,
        label: String,
        expected: &'static str,
    },
}

pub(super) fn validate(factors: &[Factor]) -> Result<(), RubricValidationError> {
    if factors.is_empty() {
        return Err(RubricValidationError::NoFactors);
    }

    let mut factor_ids = HashSet::new();
    let mut subfactor_ids = HashSet::new();

    for factor in factors {
        if !factor_ids.insert(factor.id.as_str()) {
            return Err(RubricValidationError::DuplicateFactorId(factor.id.clone()));
        }
        if factor.subfactors.is_empty() {
            return Err(RubricValidationError::EmptyFactor {
                factor_id: factor.id.clone(),
            });
        }

        for subfactor in &factor.subfactors {
            if !subfactor_ids.insert(subfactor.id.as_str()) {
                return Err(RubricValidationError::DuplicateSubfactorId(
                    subfactor.id.clone(),
                ));
            }

            let mut seen = [false; LEVEL_COUNT];
            for level in &subfactor.levels {
                let slot = seen.get_mut(level.value as usize).ok_or_else(|| {
                    RubricValidationError::LevelOutOfRange {
                        subfactor_id: subfactor.id.clone(),
                        value: level.value,
                    }
                })?;
                if *slot {
                    return Err(RubricValidationError::DuplicateLevel {
                        subfactor_id: subfactor.id.clone(),
                        value: level.value,
                    });
                }
                *slot = true;

                let Some(named) = ReadinessLevel::from_label(&level.label) else {
                    return Err(RubricValidationError::UnknownLevelLabel {
                        subfactor_id: subfactor.id.clone(),
                        value: level.value,
                        label: level.label.clone(),
                    });
                };
                let expected = ReadinessLevel::ordered()[level.value as usize];
                if named != expected {
                    return Err(RubricValidationError::MismatchedLevelLabel {
                        subfactor_id: subfactor.id.clone(),
                        value: level.value,
                        label: level.label.clone(),
                        expected: expected.label(),
                    });
                }
            }

            // Range and uniqueness already hold, so a short list means a gap.
            if subfactor.levels.len() != LEVEL_COUNT {
                return Err(RubricValidationError::LevelCount {
                    subfactor_id: subfactor.id.clone(),
                    found: subfactor.levels.len(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::{Level, Rubric, Subfactor};
    use super::*;

    const LABELS: [&str; 6] = ["Inactive", "Aware", "Exploring", "Planning", "Preparing", "Ready"];

    fn levels(values: &[u8]) -> Vec<Level> {
        values
            .iter()
            .map(|value| Level {
                value: *value,
                label: LABELS.get(*value as usize).unwrap_or(&"Ready").to_string(),
                description: "desc".to_string(),
                next_steps: None,
            })
            .collect()
    }

    fn factor(id: &str, subfactors: Vec<Subfactor>) -> Factor {
        Factor {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            subfactors,
        }
    }

    fn subfactor(id: &str, values: &[u8]) -> Subfactor {
        Subfactor {
            id: id.to_string(),
            title: id.to_uppercase(),
            question: format!("{id}?"),
            levels: levels(values),
        }
    }

    #[test]
    fn rejects_label_that_does_not_match_its_value() {
        let mut swapped = subfactor("s", &[0, 1, 2, 3, 4, 5]);
        swapped.levels[0].label = "Ready".to_string();

        let err = Rubric::from_factors(vec![factor("f", vec![swapped])]).unwrap_err();

        assert_eq!(
            err,
            RubricValidationError::MismatchedLevelLabel {
                subfactor_id: "s".to_string(),
                value: 0,
                label: "Ready".to_string(),
                expected: "Inactive",
            }
        );
    }

    #[test]
    fn accepts_canonical_labels_in_any_case() {
        let mut lowercase = subfactor("s", &[0, 1, 2, 3, 4, 5]);
        for level in &mut lowercase.levels {
            level.label = level.label.to_lowercase();
        }

        assert!(Rubric::from_factors(vec![factor("f", vec![lowercase])]).is_ok());
    }

    #[test]
    fn rejects_empty_rubric() {
        assert_eq!(
            Rubric::from_factors(Vec::new()).unwrap_err(),
            RubricValidationError::NoFactors
        );
    }

    #[test]
    fn rejects_factor_without_subfactors() {
        let err = Rubric::from_factors(vec![factor("f", Vec::new())]).unwrap_err();
        assert_eq!(
            err,
            RubricValidationError::EmptyFactor {
                factor_id: "f".to_string()
            }
        );
    }

    #[test]
    fn rejects_gap_in_level_values() {
        let err = Rubric::from_factors(vec![factor("f", vec![subfactor("s", &[0, 1, 2, 4, 5])])])
            .unwrap_err();
        assert_eq!(
            err,
            RubricValidationError::LevelCount {
                subfactor_id: "s".to_string(),
                found: 5
            }
        );
    }

    #[test]
    fn rejects_duplicate_level_values() {
        let err = Rubric::from_factors(vec![factor(
            "f",
            vec![subfactor("s", &[0, 1, 2, 3, 3, 5])],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            RubricValidationError::DuplicateLevel {
                subfactor_id: "s".to_string(),
                value: 3
            }
        );
    }

    #[test]
    fn rejects_level_values_above_five() {
        let err = Rubric::from_factors(vec![factor(
            "f",
            vec![subfactor("s", &[0, 1, 2, 3, 4, 6])],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            RubricValidationError::LevelOutOfRange {
                subfactor_id: "s".to_string(),
                value: 6
            }
        );
    }

    #[test]
    fn rejects_duplicate_subfactor_ids_across_factors() {
        let all = [0, 1, 2, 3, 4, 5];
        let err = Rubric::from_factors(vec![
            factor("a", vec![subfactor("shared", &all)]),
            factor("b", vec![subfactor("shared", &all)]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            RubricValidationError::DuplicateSubfactorId("shared".to_string())
        );
    }

    #[test]
    fn rejects_duplicate_factor_ids() {
        let all = [0, 1, 2, 3, 4, 5];
        let err = Rubric::from_factors(vec![
            factor("a", vec![subfactor("one", &all)]),
            factor("a", vec![subfactor("two", &all)]),
        ])
        .unwrap_err();
        assert_eq!(err, RubricValidationError::DuplicateFactorId("a".to_string()));
    }

    #[test]
    fn rejects_labels_outside_the_readiness_vocabulary() {
        let mut entry = subfactor("s", &[0, 1, 2, 3, 4, 5]);
        entry.levels[2].label = "Curious".to_string();
        let err = Rubric::from_factors(vec![factor("f", vec![entry])]).unwrap_err();
        assert_eq!(
            err,
            RubricValidationError::UnknownLevelLabel {
                subfactor_id: "s".to_string(),
                value: 2,
                label: "Curious".to_string()
            }
        );
    }
}
