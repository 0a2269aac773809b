//! The ordered, immutable list of physical stops on the trail.
use serde::{Deserialize, Serialize};

use crate::constants::FALLBACK_EMBLEM;
use crate::geo::GeoPoint;

/// Raw stop record as it appears in the stops dataset.
///
/// `short` and `emblem` are optional in the data; the catalog derives
/// display fallbacks for them at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(default)]
    pub short: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub desc: String,
    pub hint: String,
    #[serde(default)]
    pub emblem: Option<String>,
}

/// A stop with its load-time position in the trail order.
///
/// Everything besides `id`, `ordinal` and the coordinates is display
/// metadata the check-in logic never inspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    /// Zero-based position in catalog order; dense 0..N-1.
    pub ordinal: usize,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    pub short_label: String,
    pub kind: String,
    pub description: String,
    pub hint: String,
    pub emblem: String,
}

impl Stop {
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    fn from_record(record: StopRecord, ordinal: usize) -> Self {
        let short_label = record.short.unwrap_or_else(|| record.name.clone());
        let emblem = record
            .emblem
            .unwrap_or_else(|| FALLBACK_EMBLEM.to_string());
        Self {
            id: record.id,
            ordinal,
            lat: record.lat,
            lng: record.lng,
            name: record.name,
            short_label,
            kind: record.kind,
            description: record.desc,
            hint: record.hint,
            emblem,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("stops data could not be parsed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate stop id `{0}` in stops data")]
    DuplicateId(String),
}

/// Ordered stop list, built once at startup and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopCatalog {
    stops: Vec<Stop>,
}

impl StopCatalog {
    /// Create an empty catalog (useful for tests and the load-failure path).
    #[must_use]
    pub fn empty() -> Self {
        Self { stops: Vec::new() }
    }

    /// Build a catalog from raw records, assigning each stop its ordinal
    /// by sequence position.
    ///
    /// # Errors
    ///
    /// Returns an error if two records share an id.
    pub fn from_records(records: Vec<StopRecord>) -> Result<Self, CatalogError> {
        let stops: Vec<Stop> = records
            .into_iter()
            .enumerate()
            .map(|(ordinal, record)| Stop::from_record(record, ordinal))
            .collect();
        for (idx, stop) in stops.iter().enumerate() {
            if stops[..idx].iter().any(|other| other.id == stop.id) {
                return Err(CatalogError::DuplicateId(stop.id.clone()));
            }
        }
        Ok(Self { stops })
    }

    /// Load a catalog from a JSON array of stop records.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or contains
    /// duplicate ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<StopRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    #[must_use]
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }
}
