//! Trailtag Check-In Engine
//!
//! Platform-agnostic core logic for the Trailtag location badge trail.
//! This crate provides the proximity rules, progress persistence, and
//! stop selection without UI or platform-specific dependencies.

pub mod catalog;
pub mod checkin;
pub mod constants;
pub mod geo;
pub mod progress;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use catalog::{CatalogError, Stop, StopCatalog, StopRecord};
pub use checkin::{
    CheckInError, CheckInOutcome, LocationFailure, LocationRequest, Started, begin_check_in,
    clear_badge, complete_check_in, reset_progress, skip_stop,
};
pub use constants::CHECK_IN_RADIUS_M;
pub use geo::{GeoPoint, distance_between, distance_meters};
pub use progress::{ProgressError, ProgressStorage, ProgressStore};
pub use session::SessionState;
pub use state::{BadgeView, Snapshot, TrailState};

/// Trait for abstracting the stops dataset source.
/// Platform-specific implementations should provide this.
pub trait CatalogLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the ordered stop catalog from the platform-specific source.
    ///
    /// # Errors
    ///
    /// Returns an error if the stops data cannot be loaded or parsed.
    fn load_stops(&self) -> Result<StopCatalog, Self::Error>;
}

/// Wires a catalog source and a progress backend into ready application
/// state: the catalog is loaded once, the progress store is hydrated
/// from the backend, and a fresh session is attached.
pub struct TrailEngine<L, S>
where
    L: CatalogLoader,
    S: ProgressStorage,
{
    loader: L,
    storage: S,
}

impl<L, S> TrailEngine<L, S>
where
    L: CatalogLoader,
    S: ProgressStorage,
{
    pub const fn new(loader: L, storage: S) -> Self {
        Self { loader, storage }
    }

    /// Load the catalog and hydrate progress.
    ///
    /// An empty catalog is not an error here; the presentation layer is
    /// responsible for surfacing it as "catalog unavailable".
    ///
    /// # Errors
    ///
    /// Returns an error if the stops data cannot be loaded or the
    /// progress backend cannot be read.
    pub fn load(self) -> Result<TrailState<S>, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
        S::Error: Into<anyhow::Error>,
    {
        let catalog = self.loader.load_stops().map_err(Into::into)?;
        let progress = ProgressStore::load(self.storage)?;
        Ok(TrailState::new(catalog, progress))
    }
}
