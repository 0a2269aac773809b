//! Ephemeral per-visit state: demo switch, stop selection, in-flight guard.
use std::collections::BTreeSet;

use crate::catalog::{Stop, StopCatalog};
use crate::progress::{ProgressStorage, ProgressStore};

/// How the presented stop was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selection {
    /// Chosen by auto-progression; yields to the next locked stop once
    /// this one is unlocked.
    Auto(String),
    /// Chosen by the user (map or badge click); persists regardless of
    /// unlock state until reset or the badge is cleared.
    Manual(String),
}

impl Selection {
    fn id(&self) -> &str {
        match self {
            Self::Auto(id) | Self::Manual(id) => id,
        }
    }
}

/// Session-scoped state, rebuilt on every load and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Standing toggle that bypasses location verification entirely.
    pub demo_mode: bool,
    selection: Option<Selection>,
    pending_fixes: BTreeSet<String>,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the stop currently presented, if one has been resolved.
    #[must_use]
    pub fn selected_stop_id(&self) -> Option<&str> {
        self.selection.as_ref().map(Selection::id)
    }

    /// Explicit user selection. Applies regardless of unlock state.
    pub fn select_stop(&mut self, id: &str) {
        self.selection = Some(Selection::Manual(id.to_string()));
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Keep the attempted stop as the presented one without demoting an
    /// existing selection of the same stop.
    pub(crate) fn pin_selection(&mut self, id: &str) {
        if self.selected_stop_id() != Some(id) {
            self.select_stop(id);
        }
    }

    /// Record an outstanding location request for a stop. Returns false
    /// if one is already in flight.
    pub(crate) fn mark_pending(&mut self, id: &str) -> bool {
        self.pending_fixes.insert(id.to_string())
    }

    pub(crate) fn clear_pending(&mut self, id: &str) {
        self.pending_fixes.remove(id);
    }

    /// Whether a location request is outstanding for this stop.
    #[must_use]
    pub fn is_pending(&self, id: &str) -> bool {
        self.pending_fixes.contains(id)
    }

    /// Decide which single stop is presented as active.
    ///
    /// Priority order: a user selection that still resolves in the
    /// catalog wins; otherwise the first stop in catalog order that is
    /// not unlocked; otherwise the last stop (everything done). The
    /// resolved id is written back so subsequent calls are stable until
    /// progress or the selection changes. A selection referring to a
    /// stop no longer in the catalog falls back to auto-progression.
    pub fn resolve_current<'a, S: ProgressStorage>(
        &mut self,
        catalog: &'a StopCatalog,
        progress: &ProgressStore<S>,
    ) -> Option<&'a Stop> {
        match &self.selection {
            Some(Selection::Manual(id)) => {
                if let Some(stop) = catalog.get(id) {
                    return Some(stop);
                }
            }
            Some(Selection::Auto(id)) => {
                if let Some(stop) = catalog.get(id)
                    && !progress.is_unlocked(id)
                {
                    return Some(stop);
                }
            }
            None => {}
        }

        let resolved = catalog
            .iter()
            .find(|stop| !progress.is_unlocked(&stop.id))
            .or_else(|| catalog.last());
        self.selection = resolved.map(|stop| Selection::Auto(stop.id.clone()));
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StopRecord;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::convert::Infallible;
    use std::rc::Rc;

    #[derive(Clone, Debug, Default)]
    struct MemoryStorage {
        entries: Rc<RefCell<BTreeMap<String, String>>>,
    }

    impl ProgressStorage for MemoryStorage {
        type Error = Infallible;

        fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
            Ok(self.entries.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), Self::Error> {
            self.entries.borrow_mut().remove(key);
            Ok(())
        }
    }

    fn catalog(ids: &[&str]) -> StopCatalog {
        let records = ids
            .iter()
            .map(|id| StopRecord {
                id: (*id).to_string(),
                lat: 0.0,
                lng: 0.0,
                name: format!("Stop {id}"),
                short: None,
                kind: "oak".to_string(),
                desc: String::new(),
                hint: String::new(),
                emblem: None,
            })
            .collect();
        StopCatalog::from_records(records).unwrap()
    }

    #[test]
    fn auto_progression_walks_the_catalog_in_order() {
        let catalog = catalog(&["a", "b", "c"]);
        let mut progress = ProgressStore::load(MemoryStorage::default()).unwrap();
        let mut session = SessionState::new();

        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "a"
        );
        progress.unlock("a").unwrap();
        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "b"
        );
    }

    #[test]
    fn all_unlocked_lands_on_the_last_stop() {
        let catalog = catalog(&["a", "b", "c"]);
        let mut progress = ProgressStore::load(MemoryStorage::default()).unwrap();
        for id in ["a", "b", "c"] {
            progress.unlock(id).unwrap();
        }
        let mut session = SessionState::new();
        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "c"
        );
        // Stable across renders.
        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "c"
        );
    }

    #[test]
    fn manual_selection_overrides_auto_progression() {
        let catalog = catalog(&["a", "b", "c"]);
        let mut progress = ProgressStore::load(MemoryStorage::default()).unwrap();
        progress.unlock("c").unwrap();
        let mut session = SessionState::new();

        session.select_stop("c");
        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "c"
        );
        // Persists even though "a" is still locked and "c" is unlocked.
        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "c"
        );

        session.clear_selection();
        assert_eq!(
            session.resolve_current(&catalog, &progress).unwrap().id,
            "a"
        );
    }

    #[test]
    fn stale_selection_falls_back_to_auto_progression() {
        let catalog = catalog(&["a", "b"]);
        let progress = ProgressStore::load(MemoryStorage::default()).unwrap();
        let mut session = SessionState::new();

        session.select_stop("removed");
        let current = session.resolve_current(&catalog, &progress).unwrap();
        assert_eq!(current.id, "a");
        assert_eq!(session.selected_stop_id(), Some("a"));
    }

    #[test]
    fn empty_catalog_resolves_to_nothing() {
        let catalog = StopCatalog::empty();
        let progress = ProgressStore::load(MemoryStorage::default()).unwrap();
        let mut session = SessionState::new();
        assert!(session.resolve_current(&catalog, &progress).is_none());
        assert_eq!(session.selected_stop_id(), None);
    }

    #[test]
    fn pending_guard_tracks_per_stop() {
        let mut session = SessionState::new();
        assert!(session.mark_pending("a"));
        assert!(!session.mark_pending("a"));
        assert!(session.mark_pending("b"));
        session.clear_pending("a");
        assert!(!session.is_pending("a"));
        assert!(session.is_pending("b"));
    }
}
