use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::matching::domain::{AgencyId, ApplicationId, BoardId, ProfileId, ProfileSnapshot};
use crate::matching::repository::{
    ApplicationRecord, BoardMembership, CachedMatch, MatchStore, ScoreUpdate, StoreError,
};
use crate::matching::requirements::{BoardRequirements, RangeRequirement};
use crate::matching::service::MatchService;
use crate::matching::weights::BoardWeights;

pub(super) fn board(id: &str) -> BoardId {
    BoardId(id.to_string())
}

pub(super) fn application(id: &str) -> ApplicationId {
    ApplicationId(id.to_string())
}

pub(super) fn agency() -> AgencyId {
    AgencyId("agency-1".to_string())
}

/// A complete candidate that satisfies [`requirements`].
pub(super) fn profile(id: &str) -> ProfileSnapshot {
    ProfileSnapshot {
        profile_id: ProfileId(id.to_string()),
        age_years: Some(24),
        birth_date: None,
        height_cm: Some(176.0),
        bust_cm: Some(86.0),
        waist_cm: Some(62.0),
        hips_cm: Some(90.0),
        gender: Some("female".to_string()),
        body_type: Some("athletic".to_string()),
        experience_level: Some("professional".to_string()),
        ethnicity: None,
        comfort_tags: vec!["swimwear".to_string(), "editorial".to_string()],
        skills: vec!["runway".to_string(), "posing".to_string(), "acting".to_string()],
        specialties: vec!["fit".to_string()],
        languages: vec!["en".to_string(), "de".to_string()],
        primary_city: Some("Berlin".to_string()),
        secondary_city: Some("Hamburg".to_string()),
        social_reach: Some(50_000),
    }
}

/// A board configuration the [`profile`] candidate fully satisfies.
pub(super) fn requirements() -> BoardRequirements {
    BoardRequirements {
        age: RangeRequirement::between(18.0, 30.0),
        height_cm: RangeRequirement::between(170.0, 185.0),
        genders: vec!["female".to_string()],
        comfort_tags: vec!["swimwear".to_string(), "editorial".to_string()],
        skills: vec!["runway".to_string(), "posing".to_string()],
        locations: vec!["berlin".to_string()],
        min_social_reach: Some(10_000),
        ..BoardRequirements::default()
    }
}

pub(super) fn build_service() -> (MatchService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (MatchService::new(store.clone()), store)
}

/// Seed a profile plus its application row, unassigned.
pub(super) fn seed_candidate(store: &MemoryStore, application_id: &str, profile_id: &str) {
    store.put_profile(profile(profile_id));
    store.put_application(ApplicationRecord {
        id: application(application_id),
        agency_id: agency(),
        profile_id: ProfileId(profile_id.to_string()),
        board_id: None,
        match_score: None,
        match_calculated_at: None,
    });
}

/// Attach an application to a board with an unscored membership row.
pub(super) fn attach(store: &MemoryStore, board_id: &BoardId, application_id: &str) {
    store.put_membership(BoardMembership {
        board_id: board_id.clone(),
        application_id: application(application_id),
        score: None,
        breakdown: None,
        is_primary: true,
    });
}

/// In-memory store mirroring the persistence contract, including the
/// stale-revision discard rule for score batches.
#[derive(Default)]
pub(super) struct MemoryStore {
    requirements: Mutex<HashMap<BoardId, BoardRequirements>>,
    weights: Mutex<HashMap<BoardId, BoardWeights>>,
    revisions: Mutex<HashMap<BoardId, u64>>,
    memberships: Mutex<Vec<BoardMembership>>,
    applications: Mutex<HashMap<ApplicationId, ApplicationRecord>>,
    profiles: Mutex<HashMap<ProfileId, ProfileSnapshot>>,
}

impl MemoryStore {
    pub(super) fn put_requirements(&self, board: &BoardId, requirements: BoardRequirements) {
        self.requirements
            .lock()
            .expect("store mutex poisoned")
            .insert(board.clone(), requirements);
        self.bump_revision(board);
    }

    pub(super) fn put_weights(&self, board: &BoardId, weights: BoardWeights) {
        self.weights
            .lock()
            .expect("store mutex poisoned")
            .insert(board.clone(), weights.clamped());
        self.bump_revision(board);
    }

    fn bump_revision(&self, board: &BoardId) {
        *self
            .revisions
            .lock()
            .expect("store mutex poisoned")
            .entry(board.clone())
            .or_insert(0) += 1;
    }

    pub(super) fn put_application(&self, application: ApplicationRecord) {
        self.applications
            .lock()
            .expect("store mutex poisoned")
            .insert(application.id.clone(), application);
    }

    pub(super) fn put_profile(&self, profile: ProfileSnapshot) {
        self.profiles
            .lock()
            .expect("store mutex poisoned")
            .insert(profile.profile_id.clone(), profile);
    }

    pub(super) fn put_membership(&self, membership: BoardMembership) {
        self.memberships
            .lock()
            .expect("store mutex poisoned")
            .push(membership);
    }

    pub(super) fn membership_of(&self, application_id: &ApplicationId) -> Option<BoardMembership> {
        self.memberships
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|membership| membership.application_id == *application_id)
            .cloned()
    }

    pub(super) fn stored_application(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        self.applications
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl MatchStore for MemoryStore {
    fn requirements(&self, board: &BoardId) -> Result<Option<BoardRequirements>, StoreError> {
        Ok(self
            .requirements
            .lock()
            .expect("store mutex poisoned")
            .get(board)
            .cloned())
    }

    fn weights(&self, board: &BoardId) -> Result<Option<BoardWeights>, StoreError> {
        Ok(self
            .weights
            .lock()
            .expect("store mutex poisoned")
            .get(board)
            .copied())
    }

    fn config_revision(&self, board: &BoardId) -> Result<u64, StoreError> {
        Ok(self
            .revisions
            .lock()
            .expect("store mutex poisoned")
            .get(board)
            .copied()
            .unwrap_or(0))
    }

    fn memberships(&self, board: &BoardId) -> Result<Vec<BoardMembership>, StoreError> {
        Ok(self
            .memberships
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .filter(|membership| membership.board_id == *board)
            .cloned()
            .collect())
    }

    fn application(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        Ok(self
            .applications
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn profile(&self, id: &ProfileId) -> Result<Option<ProfileSnapshot>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned())
    }

    fn remove_memberships(&self, application: &ApplicationId) -> Result<(), StoreError> {
        self.memberships
            .lock()
            .expect("store mutex poisoned")
            .retain(|membership| membership.application_id != *application);
        Ok(())
    }

    fn insert_membership(&self, membership: BoardMembership) -> Result<(), StoreError> {
        let mut memberships = self.memberships.lock().expect("store mutex poisoned");
        if memberships
            .iter()
            .any(|existing| existing.application_id == membership.application_id)
        {
            return Err(StoreError::Conflict);
        }
        memberships.push(membership);
        Ok(())
    }

    fn update_application_cache(
        &self,
        application: &ApplicationId,
        cache: Option<CachedMatch>,
    ) -> Result<(), StoreError> {
        let mut applications = self.applications.lock().expect("store mutex poisoned");
        let record = applications.get_mut(application).ok_or(StoreError::NotFound)?;
        match cache {
            Some(cache) => {
                record.board_id = Some(cache.board_id);
                record.match_score = Some(cache.match_score);
                record.match_calculated_at = Some(cache.match_calculated_at);
            }
            None => {
                record.board_id = None;
                record.match_score = None;
                record.match_calculated_at = None;
            }
        }
        Ok(())
    }

    fn persist_scores(
        &self,
        board: &BoardId,
        revision: u64,
        updates: &[ScoreUpdate],
    ) -> Result<(), StoreError> {
        let current = self
            .revisions
            .lock()
            .expect("store mutex poisoned")
            .get(board)
            .copied()
            .unwrap_or(0);
        if revision != current {
            // Stale batch computed against superseded configuration.
            return Ok(());
        }

        let mut memberships = self.memberships.lock().expect("store mutex poisoned");
        let mut applications = self.applications.lock().expect("store mutex poisoned");
        for update in updates {
            for membership in memberships.iter_mut() {
                if membership.board_id == *board
                    && membership.application_id == update.application_id
                {
                    membership.score = Some(update.score);
                    membership.breakdown = Some(update.breakdown.clone());
                }
            }
            if let Some(record) = applications.get_mut(&update.application_id) {
                record.match_score = Some(update.score);
                record.match_calculated_at = Some(update.calculated_at);
            }
        }
        Ok(())
    }
}
