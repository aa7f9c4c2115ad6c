use serde::{Deserialize, Serialize};

use super::domain::ProfileSnapshot;
use super::requirements::{BoardRequirements, RequirementImportance};

/// Structured reason a candidate was rejected by the hard-filter gate.
///
/// Rejections are data, never errors: callers surface "why this candidate
/// doesn't qualify" straight from the variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FilterRejection {
    MissingAge,
    AgeOutOfRange {
        age: u8,
        min: Option<f64>,
        max: Option<f64>,
    },
    MissingHeight,
    HeightOutOfRange {
        height_cm: f64,
        min: Option<f64>,
        max: Option<f64>,
    },
    GenderNotAccepted {
        gender: String,
    },
    MissingCriticalComfort {
        missing: Vec<String>,
    },
}

impl FilterRejection {
    pub fn summary(&self) -> String {
        match self {
            FilterRejection::MissingAge => "Missing age".to_string(),
            FilterRejection::AgeOutOfRange { age, .. } => {
                format!("Age {age} outside required range")
            }
            FilterRejection::MissingHeight => "Missing height".to_string(),
            FilterRejection::HeightOutOfRange { height_cm, .. } => {
                format!("Height {height_cm}cm outside required range")
            }
            FilterRejection::GenderNotAccepted { gender } => {
                format!("Gender '{gender}' not accepted for this board")
            }
            FilterRejection::MissingCriticalComfort { missing } => {
                if missing.is_empty() {
                    "Missing critical comfort levels".to_string()
                } else {
                    format!("Missing critical comfort levels: {}", missing.join(", "))
                }
            }
        }
    }
}

/// Outcome of the hard-filter gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardFilterResult {
    pub passed: bool,
    pub rejection: Option<FilterRejection>,
}

impl HardFilterResult {
    fn pass() -> Self {
        Self {
            passed: true,
            rejection: None,
        }
    }

    fn reject(rejection: FilterRejection) -> Self {
        Self {
            passed: false,
            rejection: Some(rejection),
        }
    }
}

/// Evaluate the pass/fail gate that runs before any scoring.
///
/// Each rule is enforced only when its requirement is configured. Absence
/// of a requirement never blocks; absence of profile data blocks only when
/// the corresponding requirement exists. Pure, no side effects.
pub fn passes_hard_filters(
    profile: &ProfileSnapshot,
    requirements: &BoardRequirements,
) -> HardFilterResult {
    if requirements.age.is_configured() {
        match profile.age() {
            None => return HardFilterResult::reject(FilterRejection::MissingAge),
            Some(age) if !requirements.age.contains(f64::from(age)) => {
                return HardFilterResult::reject(FilterRejection::AgeOutOfRange {
                    age,
                    min: requirements.age.min,
                    max: requirements.age.max,
                });
            }
            Some(_) => {}
        }
    }

    if requirements.height_cm.is_configured() {
        match profile.height_cm {
            None => return HardFilterResult::reject(FilterRejection::MissingHeight),
            Some(height_cm) if !requirements.height_cm.contains(height_cm) => {
                return HardFilterResult::reject(FilterRejection::HeightOutOfRange {
                    height_cm,
                    min: requirements.height_cm.min,
                    max: requirements.height_cm.max,
                });
            }
            Some(_) => {}
        }
    }

    // A profile with no recorded gender is never blocked by the allow-list.
    if !requirements.genders.is_empty() {
        if let Some(gender) = &profile.gender {
            if !requirements.genders.contains(gender) {
                return HardFilterResult::reject(FilterRejection::GenderNotAccepted {
                    gender: gender.clone(),
                });
            }
        }
    }

    if requirements.comfort_importance == RequirementImportance::Critical
        && !requirements.comfort_tags.is_empty()
    {
        let missing: Vec<String> = requirements
            .comfort_tags
            .iter()
            .filter(|tag| !profile.comfort_tags.contains(tag))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return HardFilterResult::reject(FilterRejection::MissingCriticalComfort { missing });
        }
    }

    HardFilterResult::pass()
}
