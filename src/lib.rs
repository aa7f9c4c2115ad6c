//! Matching and scoring engine for agency talent boards.
//!
//! Agencies configure a board with a requirements record and a weights record;
//! the engine evaluates candidate profile snapshots against that configuration,
//! producing a pass/fail hard-filter verdict and a 0-100 weighted match score
//! with a per-criterion breakdown. The orchestration layer keeps stored scores
//! consistent whenever configuration or assignments change, working against a
//! storage trait implemented by the surrounding system.

pub mod config;
pub mod matching;
pub mod telemetry;

pub use matching::domain::{AgencyId, ApplicationId, Board, BoardId, ProfileId, ProfileSnapshot};
pub use matching::engine::{
    calculate_match_score, BoardConfig, CriterionScore, MatchBreakdown, MatchEngine, MatchOutcome,
};
pub use matching::filters::{passes_hard_filters, FilterRejection, HardFilterResult};
pub use matching::repository::{
    ApplicationRecord, BoardMembership, CachedMatch, MatchStore, ScoreUpdate, StoreError,
};
pub use matching::requirements::{BoardRequirements, RangeRequirement, RequirementImportance};
pub use matching::scoring::{
    score_age, score_body_type, score_comfort, score_experience, score_height, score_location,
    score_measurements, score_skills, score_social_reach,
};
pub use matching::service::{MatchService, RecalculationSummary, ServiceError};
pub use matching::weights::{BoardWeights, Criterion, MAX_WEIGHT};
