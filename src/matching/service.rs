use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{AgencyId, ApplicationId, BoardId};
use super::engine::{BoardConfig, MatchEngine, MatchOutcome};
use super::repository::{
    ApplicationRecord, BoardMembership, CachedMatch, MatchStore, ScoreUpdate, StoreError,
};

/// Orchestrates score recalculation and board assignment against a store.
///
/// The service owns no state of its own; every run reads current
/// configuration and candidate rows through the store and writes scores
/// back. Races between assignment and recalculation on the same
/// application resolve last-writer-wins, which is sound because both paths
/// recompute from current configuration.
pub struct MatchService<S> {
    store: Arc<S>,
}

impl<S> MatchService<S>
where
    S: MatchStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Re-score every application currently attached to a board.
    ///
    /// Invoked after any requirements or weights edit and by the manual
    /// recalculation action. A board missing either configuration record is
    /// never auto-scored: the run reports `skipped` and writes nothing.
    ///
    /// All candidates are read and computed in memory, then persisted as a
    /// single batch keyed by the configuration revision the run observed,
    /// so a store can apply it transactionally and discard a batch that a
    /// concurrent edit has superseded. One candidate's missing or broken
    /// rows never abort the batch; the failure is recorded in that row's
    /// breakdown and the run continues.
    pub fn recalculate_board_scores(
        &self,
        board_id: &BoardId,
        agency_id: &AgencyId,
    ) -> Result<RecalculationSummary, ServiceError> {
        let Some(requirements) = self.store.requirements(board_id)? else {
            debug!(board = %board_id.0, "recalculation skipped: no requirements record");
            return Ok(RecalculationSummary::skipped());
        };
        let Some(weights) = self.store.weights(board_id)? else {
            debug!(board = %board_id.0, "recalculation skipped: no weights record");
            return Ok(RecalculationSummary::skipped());
        };

        let revision = self.store.config_revision(board_id)?;
        let engine = MatchEngine::new(BoardConfig {
            requirements,
            weights,
        });

        let memberships = self.store.memberships(board_id)?;
        let calculated_at = Utc::now();
        let mut updates = Vec::with_capacity(memberships.len());
        let mut failed = 0usize;

        for membership in &memberships {
            let outcome = self.candidate_outcome(&membership.application_id, &engine);
            if let Some(error) = &outcome.breakdown.error {
                failed += 1;
                warn!(
                    board = %board_id.0,
                    application = %membership.application_id.0,
                    error = %error,
                    "candidate skipped during recalculation"
                );
            }
            updates.push(ScoreUpdate {
                application_id: membership.application_id.clone(),
                score: outcome.score,
                passed: outcome.passed,
                breakdown: outcome.breakdown,
                calculated_at,
            });
        }

        self.store.persist_scores(board_id, revision, &updates)?;
        info!(
            board = %board_id.0,
            agency = %agency_id.0,
            scored = updates.len() - failed,
            failed,
            "board scores recalculated"
        );

        Ok(RecalculationSummary {
            scored: updates.len() - failed,
            failed,
            skipped: false,
        })
    }

    /// Compute one candidate's outcome, converting row-level faults into a
    /// failure marker instead of an error.
    fn candidate_outcome(&self, application_id: &ApplicationId, engine: &MatchEngine) -> MatchOutcome {
        let application = match self.store.application(application_id) {
            Ok(Some(application)) => application,
            Ok(None) => return MatchOutcome::failed("application record missing"),
            Err(err) => return MatchOutcome::failed(format!("application load failed: {err}")),
        };
        let profile = match self.store.profile(&application.profile_id) {
            Ok(Some(profile)) => profile,
            Ok(None) => return MatchOutcome::failed("profile record missing"),
            Err(err) => return MatchOutcome::failed(format!("profile load failed: {err}")),
        };
        engine.score(&profile)
    }

    /// Move an application onto a board, or off every board with `None`.
    ///
    /// Existing memberships are always removed first; an application holds
    /// at most one membership regardless of what the join table would
    /// allow. When the target board already has both configuration records
    /// an initial score is computed immediately, otherwise the membership
    /// starts at score 0 with no breakdown. The application's cache columns
    /// follow in the same pass.
    pub fn assign(
        &self,
        application_id: &ApplicationId,
        board_id: Option<&BoardId>,
    ) -> Result<ApplicationRecord, ServiceError> {
        let mut application = self
            .store
            .application(application_id)?
            .ok_or(StoreError::NotFound)?;

        self.store.remove_memberships(application_id)?;

        match board_id {
            Some(board_id) => {
                let requirements = self.store.requirements(board_id)?;
                let weights = self.store.weights(board_id)?;
                let calculated_at = Utc::now();

                let (score, breakdown) = match (requirements, weights) {
                    (Some(requirements), Some(weights)) => {
                        let profile = self
                            .store
                            .profile(&application.profile_id)?
                            .ok_or(StoreError::NotFound)?;
                        let outcome = MatchEngine::new(BoardConfig {
                            requirements,
                            weights,
                        })
                        .score(&profile);
                        (outcome.score, Some(outcome.breakdown))
                    }
                    _ => (0, None),
                };

                self.store.insert_membership(BoardMembership {
                    board_id: board_id.clone(),
                    application_id: application_id.clone(),
                    score: Some(score),
                    breakdown,
                    is_primary: true,
                })?;
                self.store.update_application_cache(
                    application_id,
                    Some(CachedMatch {
                        board_id: board_id.clone(),
                        match_score: score,
                        match_calculated_at: calculated_at,
                    }),
                )?;

                application.board_id = Some(board_id.clone());
                application.match_score = Some(score);
                application.match_calculated_at = Some(calculated_at);
                debug!(
                    application = %application_id.0,
                    board = %board_id.0,
                    score,
                    "application assigned to board"
                );
            }
            None => {
                self.store.update_application_cache(application_id, None)?;
                application.board_id = None;
                application.match_score = None;
                application.match_calculated_at = None;
                debug!(application = %application_id.0, "application unassigned");
            }
        }

        Ok(application)
    }
}

/// Counts reported by one recalculation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecalculationSummary {
    pub scored: usize,
    pub failed: usize,
    /// True when the board had no requirements or weights record and the
    /// run wrote nothing.
    pub skipped: bool,
}

impl RecalculationSummary {
    fn skipped() -> Self {
        Self {
            scored: 0,
            failed: 0,
            skipped: true,
        }
    }
}

/// Error raised by the orchestration layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
}
