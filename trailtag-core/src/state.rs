//! Application-root state: the catalog, persisted progress, and session.
use crate::catalog::{Stop, StopCatalog};
use crate::checkin::{
    self, CheckInError, CheckInOutcome, LocationFailure, Started,
};
use crate::geo::GeoPoint;
use crate::progress::{ProgressError, ProgressStorage, ProgressStore};
use crate::session::SessionState;

/// Unlock state of one badge, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub id: String,
    pub unlocked: bool,
    /// A location request for this stop is outstanding.
    pub pending: bool,
}

/// One coherent view of everything the presentation renders: progress
/// figures, the current stop, and the badge list. Recomputed in full
/// after every mutation; the core never hands out partial updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub unlocked: usize,
    pub total: usize,
    pub percent: u8,
    pub current_stop_id: Option<String>,
    pub badges: Vec<BadgeView>,
}

/// Everything the application mutates, owned by the root and handed to
/// the engine operations by reference. The catalog is immutable after
/// load; the progress store is the sole source of unlock truth; the
/// session is rebuilt on every load.
#[derive(Debug, Clone)]
pub struct TrailState<S: ProgressStorage> {
    catalog: StopCatalog,
    progress: ProgressStore<S>,
    session: SessionState,
}

impl<S: ProgressStorage> TrailState<S> {
    #[must_use]
    pub fn new(catalog: StopCatalog, progress: ProgressStore<S>) -> Self {
        Self {
            catalog,
            progress,
            session: SessionState::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &StopCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    #[must_use]
    pub fn demo_mode(&self) -> bool {
        self.session.demo_mode
    }

    pub fn set_demo_mode(&mut self, enabled: bool) {
        self.session.demo_mode = enabled;
    }

    /// The stop presented in the detail panel and highlighted on the map.
    pub fn current_stop(&mut self) -> Option<&Stop> {
        self.session.resolve_current(&self.catalog, &self.progress)
    }

    /// Explicit selection from a map marker or badge click.
    pub fn select_stop(&mut self, stop_id: &str) {
        self.session.select_stop(stop_id);
    }

    /// Start a check-in attempt for a stop by id.
    ///
    /// # Errors
    ///
    /// See [`checkin::begin_check_in`]; additionally fails for an id
    /// that is not in the catalog.
    pub fn begin_check_in(
        &mut self,
        stop_id: &str,
        capability_available: bool,
    ) -> Result<Started, CheckInError<S::Error>> {
        let Some(stop) = self.catalog.get(stop_id) else {
            return Err(CheckInError::UnknownStop(stop_id.to_string()));
        };
        checkin::begin_check_in(stop, &mut self.progress, &mut self.session, capability_available)
    }

    /// Finish a check-in attempt with the acquired fix (or its failure).
    ///
    /// # Errors
    ///
    /// See [`checkin::complete_check_in`]; additionally fails for an id
    /// that is not in the catalog.
    pub fn complete_check_in(
        &mut self,
        stop_id: &str,
        fix: Result<GeoPoint, LocationFailure>,
    ) -> Result<CheckInOutcome, CheckInError<S::Error>> {
        let Some(stop) = self.catalog.get(stop_id) else {
            return Err(CheckInError::UnknownStop(stop_id.to_string()));
        };
        checkin::complete_check_in(stop, fix, &mut self.progress, &mut self.session)
    }

    /// Unlock a stop without a location check (one-shot user override).
    ///
    /// # Errors
    ///
    /// Returns an error if the unlock cannot be persisted.
    pub fn skip(&mut self, stop_id: &str) -> Result<(), CheckInError<S::Error>> {
        let Some(stop) = self.catalog.get(stop_id) else {
            return Err(CheckInError::UnknownStop(stop_id.to_string()));
        };
        checkin::skip_stop(stop, &mut self.progress)?;
        Ok(())
    }

    /// Relock one stop, dropping the selection if it was presented.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn clear_badge(&mut self, stop_id: &str) -> Result<(), ProgressError<S::Error>> {
        checkin::clear_badge(stop_id, &mut self.progress, &mut self.session)
    }

    /// Drop all progress and return to auto-progression.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset cannot be persisted.
    pub fn reset(&mut self) -> Result<(), ProgressError<S::Error>> {
        checkin::reset_progress(&mut self.progress, &mut self.session)
    }

    /// Build the full render view. Resolves the current stop as a side
    /// effect, so the selection is stable on subsequent calls.
    pub fn snapshot(&mut self) -> Snapshot {
        let total = self.catalog.len();
        let unlocked = self.progress.count_unlocked();
        let percent = self.progress.percent_unlocked(total);
        let current_stop_id = self
            .session
            .resolve_current(&self.catalog, &self.progress)
            .map(|stop| stop.id.clone());
        let badges = self
            .catalog
            .iter()
            .map(|stop| BadgeView {
                id: stop.id.clone(),
                unlocked: self.progress.is_unlocked(&stop.id),
                pending: self.session.is_pending(&stop.id),
            })
            .collect();
        Snapshot {
            unlocked,
            total,
            percent,
            current_stop_id,
            badges,
        }
    }
}
