use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Six-rung readiness vocabulary shared by rubric levels and score classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessLevel {
    Inactive,
    Aware,
    Exploring,
    Planning,
    Preparing,
    Ready,
}

impl ReadinessLevel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Inactive,
            Self::Aware,
            Self::Exploring,
            Self::Planning,
            Self::Preparing,
            Self::Ready,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Aware => "Aware",
            Self::Exploring => "Exploring",
            Self::Planning => "Planning",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Inactive => "#dc2626",
            Self::Aware => "#ea580c",
            Self::Exploring => "#d97706",
            Self::Planning => "#ca8a04",
            Self::Preparing => "#65a30d",
            Self::Ready => "#16a34a",
        }
    }

    /// Ordinal rung (0-5) of this level on the response scale.
    pub const fn value(self) -> u8 {
        match self {
            Self::Inactive => 0,
            Self::Aware => 1,
            Self::Exploring => 2,
            Self::Planning => 3,
            Self::Preparing => 4,
            Self::Ready => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(label.trim()))
    }

    /// Maps a 0-5 score onto a level.
    ///
    /// Bands are half-open with an inclusive lower bound: `[0, 0.8)` Inactive,
    /// `[0.8, 1.8)` Aware, `[1.8, 2.8)` Exploring, `[2.8, 3.8)` Planning,
    /// `[3.8, 4.8)` Preparing and `[4.8, ..)` Ready. The top band is wider than
    /// the others. Anything below 0.8, including NaN, is Inactive.
    pub fn classify(score: f64) -> Self {
        if score >= 4.8 {
            Self::Ready
        } else if score >= 3.8 {
            Self::Preparing
        } else if score >= 2.8 {
            Self::Planning
        } else if score >= 1.8 {
            Self::Exploring
        } else if score >= 0.8 {
            Self::Aware
        } else {
            Self::Inactive
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Urgency bucket attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn ordered() -> [Self; 3] {
        [Self::High, Self::Medium, Self::Low]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Sort rank, lowest first.
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

/// Thresholds used to turn a raw subfactor score into a [`Priority`].
///
/// | policy      | High    | Medium      | Low    |
/// |-------------|---------|-------------|--------|
/// | `Graduated` | `< 2`   | `2 ..< 4`   | `>= 4` |
/// | `Broad`     | `< 3`   | `3 ..< 4`   | `>= 4` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityPolicy {
    #[default]
    Graduated,
    Broad,
}

impl PriorityPolicy {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Graduated => "graduated",
            Self::Broad => "broad",
        }
    }

    /// Upper bound (exclusive) of the High bucket.
    pub const fn high_below(self) -> u8 {
        match self {
            Self::Graduated => 2,
            Self::Broad => 3,
        }
    }

    /// Upper bound (exclusive) of the Medium bucket.
    pub const fn medium_below(self) -> u8 {
        4
    }

    pub const fn priority_for(self, score: u8) -> Priority {
        if score < self.high_below() {
            Priority::High
        } else if score < self.medium_below() {
            Priority::Medium
        } else {
            Priority::Low
        }
    }
}

impl FromStr for PriorityPolicy {
    type Err = UnknownPriorityPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "graduated" => Ok(Self::Graduated),
            "broad" => Ok(Self::Broad),
            other => Err(UnknownPriorityPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority policy '{0}' (expected 'graduated' or 'broad')")]
pub struct UnknownPriorityPolicy(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_respects_exact_band_edges() {
        assert_eq!(ReadinessLevel::classify(0.0), ReadinessLevel::Inactive);
        assert_eq!(ReadinessLevel::classify(0.79999), ReadinessLevel::Inactive);
        assert_eq!(ReadinessLevel::classify(0.8), ReadinessLevel::Aware);
        assert_eq!(ReadinessLevel::classify(1.79999), ReadinessLevel::Aware);
        assert_eq!(ReadinessLevel::classify(1.8), ReadinessLevel::Exploring);
        assert_eq!(ReadinessLevel::classify(2.8), ReadinessLevel::Planning);
        assert_eq!(ReadinessLevel::classify(3.0), ReadinessLevel::Planning);
        assert_eq!(ReadinessLevel::classify(3.8), ReadinessLevel::Preparing);
        assert_eq!(ReadinessLevel::classify(4.79999), ReadinessLevel::Preparing);
        assert_eq!(ReadinessLevel::classify(4.8), ReadinessLevel::Ready);
        assert_eq!(ReadinessLevel::classify(5.0), ReadinessLevel::Ready);
    }

    #[test]
    fn classify_treats_nan_as_inactive() {
        assert_eq!(ReadinessLevel::classify(f64::NAN), ReadinessLevel::Inactive);
    }

    #[test]
    fn labels_round_trip_through_lookup() {
        for level in ReadinessLevel::ordered() {
            assert_eq!(ReadinessLevel::from_label(level.label()), Some(level));
        }
        assert_eq!(ReadinessLevel::from_label(" ready "), Some(ReadinessLevel::Ready));
        assert_eq!(ReadinessLevel::from_label("Launched"), None);
    }

    #[test]
    fn graduated_policy_boundaries() {
        let policy = PriorityPolicy::Graduated;
        assert_eq!(policy.priority_for(1), Priority::High);
        assert_eq!(policy.priority_for(2), Priority::Medium);
        assert_eq!(policy.priority_for(3), Priority::Medium);
        assert_eq!(policy.priority_for(4), Priority::Low);
    }

    #[test]
    fn broad_policy_boundaries() {
        let policy = PriorityPolicy::Broad;
        assert_eq!(policy.priority_for(2), Priority::High);
        assert_eq!(policy.priority_for(3), Priority::Medium);
        assert_eq!(policy.priority_for(4), Priority::Low);
    }

    #[test]
    fn policy_parses_from_config_names() {
        assert_eq!("Graduated".parse::<PriorityPolicy>(), Ok(PriorityPolicy::Graduated));
        assert_eq!(" broad".parse::<PriorityPolicy>(), Ok(PriorityPolicy::Broad));
        assert!("strict".parse::<PriorityPolicy>().is_err());
    }
}
