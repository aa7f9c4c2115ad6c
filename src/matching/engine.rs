use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::ProfileSnapshot;
use super::filters::{passes_hard_filters, FilterRejection};
use super::requirements::BoardRequirements;
use super::scoring;
use super::weights::{BoardWeights, Criterion};

/// The requirements and weights records attached to one board, loaded as a
/// unit before any scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub requirements: BoardRequirements,
    pub weights: BoardWeights,
}

/// One criterion's contribution to an aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: u8,
    pub weight: u8,
}

/// Per-candidate scoring trail persisted alongside the aggregate score.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MatchBreakdown {
    /// Hard-filter rejection, when the gate failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection: Option<FilterRejection>,
    /// Subscore and weight per enabled criterion.
    #[serde(default)]
    pub criteria: BTreeMap<Criterion, CriterionScore>,
    /// Failure marker recorded by the recalculation orchestrator when this
    /// candidate's computation could not run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate result for one (candidate, board) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub score: u8,
    pub passed: bool,
    pub breakdown: MatchBreakdown,
}

impl MatchOutcome {
    fn rejected(rejection: FilterRejection) -> Self {
        Self {
            score: 0,
            passed: false,
            breakdown: MatchBreakdown {
                rejection: Some(rejection),
                ..MatchBreakdown::default()
            },
        }
    }

    pub(crate) fn failed(message: impl Into<String>) -> Self {
        Self {
            score: 0,
            passed: false,
            breakdown: MatchBreakdown {
                error: Some(message.into()),
                ..MatchBreakdown::default()
            },
        }
    }
}

/// Stateless aggregator applying one board's configuration to candidates.
///
/// Deterministic and side-effect free: identical snapshots always produce
/// identical outcomes, so the engine is safe to re-run at will during
/// recalculation.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: BoardConfig,
}

impl MatchEngine {
    pub fn new(config: BoardConfig) -> Self {
        Self {
            config: BoardConfig {
                requirements: config.requirements,
                weights: config.weights.clamped(),
            },
        }
    }

    /// Run the hard-filter gate and, on pass, the weighted aggregation.
    ///
    /// A gate failure short-circuits to score 0 without invoking a single
    /// scorer. Criteria with weight 0 are excluded from the aggregation
    /// entirely; when every weight is 0 a passing candidate scores exactly
    /// 0, never null.
    pub fn score(&self, profile: &ProfileSnapshot) -> MatchOutcome {
        let gate = passes_hard_filters(profile, &self.config.requirements);
        if let Some(rejection) = gate.rejection {
            return MatchOutcome::rejected(rejection);
        }

        let mut weighted_sum = 0u32;
        let mut weight_sum = 0u32;
        let mut criteria = BTreeMap::new();

        for criterion in Criterion::ALL {
            let weight = self.config.weights.weight(criterion);
            if weight == 0 {
                continue;
            }
            let score = score_criterion(criterion, profile, &self.config.requirements);
            weighted_sum += u32::from(score) * u32::from(weight);
            weight_sum += u32::from(weight);
            criteria.insert(criterion, CriterionScore { score, weight });
        }

        let score = if weight_sum > 0 {
            (f64::from(weighted_sum) / f64::from(weight_sum))
                .round()
                .clamp(0.0, 100.0) as u8
        } else {
            0
        };

        MatchOutcome {
            score,
            passed: true,
            breakdown: MatchBreakdown {
                rejection: None,
                criteria,
                error: None,
            },
        }
    }
}

/// Dispatch one criterion to its scorer.
pub fn score_criterion(
    criterion: Criterion,
    profile: &ProfileSnapshot,
    requirements: &BoardRequirements,
) -> u8 {
    match criterion {
        Criterion::Age => scoring::score_age(profile, requirements),
        Criterion::Height => scoring::score_height(profile, requirements),
        Criterion::Measurements => scoring::score_measurements(profile, requirements),
        Criterion::BodyType => scoring::score_body_type(profile, requirements),
        Criterion::Comfort => scoring::score_comfort(profile, requirements),
        Criterion::Experience => scoring::score_experience(profile, requirements),
        Criterion::Skills => scoring::score_skills(profile, requirements),
        Criterion::Location => scoring::score_location(profile, requirements),
        Criterion::SocialReach => scoring::score_social_reach(profile, requirements),
    }
}

/// Convenience wrapper scoring one candidate against one configuration.
pub fn calculate_match_score(profile: &ProfileSnapshot, config: &BoardConfig) -> MatchOutcome {
    MatchEngine::new(config.clone()).score(profile)
}
