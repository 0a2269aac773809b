//! Check-in state machine: proximity unlock, demo bypass, manual skip.
//!
//! Each stop moves `Locked -> Unlocked` exactly one way; there is no
//! automatic relock. Because the location fix arrives asynchronously, a
//! located check-in runs in two phases: [`begin_check_in`] decides whether
//! a fix is needed and guards against duplicate requests, and
//! [`complete_check_in`] applies the fix once it arrives. The store is
//! only mutated on an unlock, so every failure path leaves state intact.

use crate::catalog::Stop;
use crate::constants::{CHECK_IN_RADIUS_M, LOCATION_MAX_AGE_MS, LOCATION_TIMEOUT_MS};
use crate::geo::{self, GeoPoint};
use crate::progress::{ProgressError, ProgressStorage, ProgressStore};
use crate::session::SessionState;

/// Constraints for a single location fix request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    /// Maximum acceptable age of a cached fix. Zero forces a fresh read.
    pub max_age_ms: u32,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_ms: LOCATION_TIMEOUT_MS,
            max_age_ms: LOCATION_MAX_AGE_MS,
        }
    }
}

/// Why a location fix could not be acquired (permission denied, timeout,
/// position unavailable), carrying the capability's reason text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFailure {
    pub reason: String,
}

impl LocationFailure {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// First phase of a check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Started {
    /// Demo mode unlocked the stop without consulting location.
    Unlocked { stop_name: String },
    /// A fix must be acquired under these constraints and handed to
    /// [`complete_check_in`].
    AwaitingFix(LocationRequest),
}

/// Terminal result of a located check-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    Unlocked { stop_name: String },
    /// Valid fix outside the radius; distance rounded to whole metres.
    TooFar { distance_m: u32 },
}

#[derive(Debug, thiserror::Error)]
pub enum CheckInError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    #[error("stop `{0}` is not in the catalog")]
    UnknownStop(String),
    #[error("no location capability is available on this device")]
    CapabilityUnavailable,
    #[error("a location fix is already pending for stop `{0}`")]
    RequestPending(String),
    #[error("location error: {reason}")]
    Location { reason: String },
    #[error(transparent)]
    Progress(#[from] ProgressError<E>),
}

/// Start a check-in attempt for `stop`.
///
/// The attempt pins the stop as the presented one. With demo mode on the
/// stop unlocks immediately; otherwise the caller must acquire one
/// location fix and pass it to [`complete_check_in`]. Checking in on an
/// already-unlocked stop is permitted and simply re-confirms it.
///
/// # Errors
///
/// Fails when no location capability exists, when a fix is already in
/// flight for this stop, or when the unlock cannot be persisted.
pub fn begin_check_in<S: ProgressStorage>(
    stop: &Stop,
    store: &mut ProgressStore<S>,
    session: &mut SessionState,
    capability_available: bool,
) -> Result<Started, CheckInError<S::Error>> {
    session.pin_selection(&stop.id);

    if session.demo_mode {
        store.unlock(&stop.id)?;
        return Ok(Started::Unlocked {
            stop_name: stop.name.clone(),
        });
    }
    if !capability_available {
        return Err(CheckInError::CapabilityUnavailable);
    }
    if !session.mark_pending(&stop.id) {
        return Err(CheckInError::RequestPending(stop.id.clone()));
    }
    Ok(Started::AwaitingFix(LocationRequest::default()))
}

/// Apply the result of the location fix requested by [`begin_check_in`].
///
/// # Errors
///
/// Fails when the fix could not be acquired (the stop stays locked) or
/// when the unlock cannot be persisted.
pub fn complete_check_in<S: ProgressStorage>(
    stop: &Stop,
    fix: Result<GeoPoint, LocationFailure>,
    store: &mut ProgressStore<S>,
    session: &mut SessionState,
) -> Result<CheckInOutcome, CheckInError<S::Error>> {
    session.clear_pending(&stop.id);

    let point = fix.map_err(|failure| CheckInError::Location {
        reason: failure.reason,
    })?;
    let distance = geo::distance_between(point, stop.point());
    if within_radius(distance) {
        store.unlock(&stop.id)?;
        Ok(CheckInOutcome::Unlocked {
            stop_name: stop.name.clone(),
        })
    } else {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let distance_m = distance.round() as u32;
        Ok(CheckInOutcome::TooFar { distance_m })
    }
}

/// One-shot manual bypass: unlock the stop without consulting location.
/// Distinct from demo mode, which is a standing toggle with the same
/// state effect. The selection is left alone; skipping the presented
/// stop lets auto-progression move on to the next locked one.
///
/// # Errors
///
/// Returns an error if the unlock cannot be persisted.
pub fn skip_stop<S: ProgressStorage>(
    stop: &Stop,
    store: &mut ProgressStore<S>,
) -> Result<(), ProgressError<S::Error>> {
    store.unlock(&stop.id)
}

/// Relock one stop. Clearing the currently presented stop's badge also
/// drops the selection, returning the panel to auto-progression.
///
/// # Errors
///
/// Returns an error if the change cannot be persisted.
pub fn clear_badge<S: ProgressStorage>(
    stop_id: &str,
    store: &mut ProgressStore<S>,
    session: &mut SessionState,
) -> Result<(), ProgressError<S::Error>> {
    store.clear(stop_id)?;
    if session.selected_stop_id() == Some(stop_id) {
        session.clear_selection();
    }
    Ok(())
}

/// Drop all progress and the selection, forcing re-resolution from the
/// first locked stop.
///
/// # Errors
///
/// Returns an error if the reset cannot be persisted.
pub fn reset_progress<S: ProgressStorage>(
    store: &mut ProgressStore<S>,
    session: &mut SessionState,
) -> Result<(), ProgressError<S::Error>> {
    store.reset_all()?;
    session.clear_selection();
    Ok(())
}

const fn within_radius(distance_m: f64) -> bool {
    distance_m <= CHECK_IN_RADIUS_M
}
