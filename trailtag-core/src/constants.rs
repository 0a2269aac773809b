//! Fixed tuning values for the check-in rules.
//!
//! Keeping them together ensures the unlock rules can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Proximity tuning ----------------------------------------------------------
/// Maximum distance in metres between the device and a stop for an
/// automatic unlock. The boundary is inclusive.
pub const CHECK_IN_RADIUS_M: f64 = 20.0;
pub(crate) const EARTH_RADIUS_M: f64 = 6_371_000.0;

// Location request constraints ----------------------------------------------
pub(crate) const LOCATION_TIMEOUT_MS: u32 = 8_000;
pub(crate) const LOCATION_MAX_AGE_MS: u32 = 0;

// Persistence ---------------------------------------------------------------
pub(crate) const PROGRESS_STORAGE_KEY: &str = "trailtag.progress";

// Display fallbacks ---------------------------------------------------------
pub(crate) const FALLBACK_EMBLEM: &str = "\u{1F333}";
