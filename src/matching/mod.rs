//! Board matching: requirement and weight configuration, the hard-filter
//! gate, the nine criterion scorers, score aggregation, and the orchestration
//! that keeps persisted scores in step with configuration and assignments.

pub mod domain;
pub mod engine;
pub mod filters;
pub mod repository;
pub mod requirements;
pub mod scoring;
pub mod service;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{AgencyId, ApplicationId, Board, BoardId, ProfileId, ProfileSnapshot};
pub use engine::{
    calculate_match_score, BoardConfig, CriterionScore, MatchBreakdown, MatchEngine, MatchOutcome,
};
pub use filters::{passes_hard_filters, FilterRejection, HardFilterResult};
pub use repository::{
    ApplicationRecord, BoardMembership, CachedMatch, MatchStore, ScoreUpdate, StoreError,
};
pub use requirements::{BoardRequirements, RangeRequirement, RequirementImportance};
pub use scoring::{
    score_age, score_body_type, score_comfort, score_experience, score_height, score_location,
    score_measurements, score_skills, score_social_reach,
};
pub use service::{MatchService, RecalculationSummary, ServiceError};
pub use weights::{BoardWeights, Criterion, MAX_WEIGHT};
