//! Web-specific trail engine implementation
//!
//! This module provides web-specific implementations of the trailtag-core
//! traits and re-exports the core check-in logic types.

use wasm_bindgen::JsValue;

// Re-export all types from trailtag-core
pub use trailtag_core::*;

/// Web-specific catalog loader backed by the embedded stops dataset.
pub struct WebCatalogLoader;

#[derive(Debug, thiserror::Error)]
pub enum WebDataError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stops data error: {0}")]
    Catalog(#[from] trailtag_core::CatalogError),
}

impl CatalogLoader for WebCatalogLoader {
    type Error = WebDataError;

    fn load_stops(&self) -> Result<StopCatalog, Self::Error> {
        let json = include_str!("../static/assets/data/stops.json");
        let records: Vec<StopRecord> = serde_json::from_str(json)?;
        Ok(StopCatalog::from_records(records)?)
    }
}

/// Web-specific progress backend using `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebProgressStorage;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("storage error: {0}")]
    Storage(String),
}

fn storage_error(value: JsValue) -> WebStorageError {
    WebStorageError::Storage(crate::dom::js_error_message(&value))
}

impl ProgressStorage for WebProgressStorage {
    type Error = WebStorageError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let storage = crate::dom::local_storage().map_err(storage_error)?;
        storage.get_item(key).map_err(storage_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let storage = crate::dom::local_storage().map_err(storage_error)?;
        storage.set_item(key, value).map_err(storage_error)
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        let storage = crate::dom::local_storage().map_err(storage_error)?;
        storage.remove_item(key).map_err(storage_error)
    }
}

/// Create a web-compatible trail engine with `WebCatalogLoader` and
/// `WebProgressStorage`.
#[must_use]
pub fn create_web_engine() -> TrailEngine<WebCatalogLoader, WebProgressStorage> {
    TrailEngine::new(WebCatalogLoader, WebProgressStorage)
}
