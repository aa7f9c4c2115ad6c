use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AgencyId, ApplicationId, BoardId, ProfileId, ProfileSnapshot};
use super::engine::MatchBreakdown;
use super::requirements::BoardRequirements;
use super::weights::BoardWeights;

/// A candidate's application to an agency, with the denormalized cache
/// columns used for fast listing without joining through memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub agency_id: AgencyId,
    pub profile_id: ProfileId,
    /// Authoritative current board; `None` when unassigned.
    pub board_id: Option<BoardId>,
    pub match_score: Option<u8>,
    pub match_calculated_at: Option<DateTime<Utc>>,
}

/// Join record linking one application to one board, carrying the last
/// computed score and its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMembership {
    pub board_id: BoardId,
    pub application_id: ApplicationId,
    pub score: Option<u8>,
    pub breakdown: Option<MatchBreakdown>,
    pub is_primary: bool,
}

/// Denormalized cache triple written onto an application after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedMatch {
    pub board_id: BoardId,
    pub match_score: u8,
    pub match_calculated_at: DateTime<Utc>,
}

/// One row of a recalculation batch, applied to the membership record and
/// the application's cache columns together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreUpdate {
    pub application_id: ApplicationId,
    pub score: u8,
    pub passed: bool,
    pub breakdown: MatchBreakdown,
    pub calculated_at: DateTime<Utc>,
}

/// Storage abstraction over whatever persistence the surrounding system
/// uses, so the orchestration layer can be exercised in isolation.
///
/// Contract notes for implementers:
/// - An application holds at most one membership at a time.
///   [`MatchStore::insert_membership`] may assume the caller removed prior
///   memberships; backends with a uniqueness constraint may also enforce it
///   and answer [`StoreError::Conflict`].
/// - [`MatchStore::persist_scores`] applies the whole batch to membership
///   rows and application cache columns, in one transaction where the
///   backend allows. A batch whose `revision` no longer matches the stored
///   configuration revision is stale and may be discarded outright.
pub trait MatchStore: Send + Sync {
    fn requirements(&self, board: &BoardId) -> Result<Option<BoardRequirements>, StoreError>;
    fn weights(&self, board: &BoardId) -> Result<Option<BoardWeights>, StoreError>;
    /// Monotonic counter bumped on every requirements or weights edit.
    fn config_revision(&self, board: &BoardId) -> Result<u64, StoreError>;
    fn memberships(&self, board: &BoardId) -> Result<Vec<BoardMembership>, StoreError>;
    fn application(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError>;
    fn profile(&self, id: &ProfileId) -> Result<Option<ProfileSnapshot>, StoreError>;
    fn remove_memberships(&self, application: &ApplicationId) -> Result<(), StoreError>;
    fn insert_membership(&self, membership: BoardMembership) -> Result<(), StoreError>;
    fn update_application_cache(
        &self,
        application: &ApplicationId,
        cache: Option<CachedMatch>,
    ) -> Result<(), StoreError>;
    fn persist_scores(
        &self,
        board: &BoardId,
        revision: u64,
        updates: &[ScoreUpdate],
    ) -> Result<(), StoreError>;
}

/// Error enumeration for storage failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
