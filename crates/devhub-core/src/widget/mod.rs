//! Widget layout store.
//!
//! Holds the ordered list of dashboard widgets and writes it back to
//! storage after every mutation.
//!
//! Loading is two-phase: `new` yields the default layout synchronously and
//! `hydrate` replaces it with the persisted layout once storage answers. A
//! missing, unreadable or invalid blob keeps the default layout.
//!
//! Invariants after every operation:
//! - exactly one setting per `WidgetKind`
//! - `widgets()[i].order == i`

pub mod model;

use crate::error::{DevhubError, DevhubResult};
use devhub_db::Storage;
use model::{default_widgets, WidgetKind, WidgetSetting};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key of the persisted layout.
pub const STORAGE_KEY: &str = "widgetSettings";

/// Where the current layout came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutOrigin {
    Default,
    Persisted,
}

pub struct WidgetLayoutStore {
    storage: Arc<dyn Storage>,
    widgets: Vec<WidgetSetting>,
    origin: LayoutOrigin,
}

impl WidgetLayoutStore {
    /// Create a store holding the default layout. Nothing is read yet.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            widgets: default_widgets(),
            origin: LayoutOrigin::Default,
        }
    }

    /// Create a store and immediately hydrate it from storage.
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let mut store = Self::new(storage);
        store.hydrate().await;
        store
    }

    /// Replace the in-memory layout with the persisted one, if any.
    pub async fn hydrate(&mut self) -> LayoutOrigin {
        let blob = match self.storage.get(STORAGE_KEY).await {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(backend = self.storage.backend(), "No persisted layout, using default");
                return self.origin;
            }
            Err(e) => {
                warn!(error = %e, backend = self.storage.backend(), "Failed to read persisted layout, using default");
                return self.origin;
            }
        };

        match parse_layout(&blob) {
            Some(widgets) => {
                self.widgets = widgets;
                self.origin = LayoutOrigin::Persisted;
                debug!(backend = self.storage.backend(), "Layout hydrated from storage");
            }
            None => warn!(backend = self.storage.backend(), "Persisted layout is invalid, using default"),
        }
        self.origin
    }

    /// Flip the visibility of a widget.
    ///
    /// Returns `false` without touching storage when the widget is not in
    /// the layout.
    pub async fn toggle_visibility(&mut self, id: WidgetKind) -> DevhubResult<bool> {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            debug!(widget = id.as_str(), "toggle_visibility ignored: unknown widget");
            return Ok(false);
        };
        widget.visible = !widget.visible;
        info!(widget = id.as_str(), visible = widget.visible, "Widget visibility toggled");
        self.persist().await?;
        Ok(true)
    }

    /// Move the widget at `from` to position `to`, shifting the ones in
    /// between, then renumber `order` to match positions.
    ///
    /// Either index outside `0..len` is rejected with `IndexOutOfRange`;
    /// the layout is left as it was and nothing is written.
    pub async fn reorder(&mut self, from: usize, to: usize) -> DevhubResult<()> {
        let len = self.widgets.len();
        for index in [from, to] {
            if index >= len {
                return Err(DevhubError::IndexOutOfRange { index, len });
            }
        }

        let moved = self.widgets.remove(from);
        info!(widget = moved.id.as_str(), from, to, "Widget moved");
        self.widgets.insert(to, moved);
        renumber(&mut self.widgets);
        self.persist().await
    }

    /// Restore the default layout and overwrite the persisted one.
    pub async fn reset(&mut self) -> DevhubResult<()> {
        self.widgets = default_widgets();
        self.origin = LayoutOrigin::Default;
        info!("Widget layout reset");
        self.persist().await
    }

    /// All widgets in layout order.
    pub fn widgets(&self) -> &[WidgetSetting] {
        &self.widgets
    }

    /// Visible widgets in layout order.
    pub fn visible_widgets(&self) -> impl Iterator<Item = &WidgetSetting> {
        self.widgets.iter().filter(|w| w.visible)
    }

    pub fn get(&self, id: WidgetKind) -> Option<&WidgetSetting> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn origin(&self) -> LayoutOrigin {
        self.origin
    }

    async fn persist(&self) -> DevhubResult<()> {
        let blob = serde_json::to_string(&self.widgets)?;
        self.storage.set(STORAGE_KEY, &blob).await?;
        debug!(backend = self.storage.backend(), "Layout persisted");
        Ok(())
    }
}

fn renumber(widgets: &mut [WidgetSetting]) {
    for (index, widget) in widgets.iter_mut().enumerate() {
        widget.order = index;
    }
}

/// Parse a persisted layout, accepting it only if it holds every widget
/// exactly once and its `order` values are a permutation of `0..len`.
fn parse_layout(blob: &str) -> Option<Vec<WidgetSetting>> {
    let mut widgets: Vec<WidgetSetting> = serde_json::from_str(blob).ok()?;
    if widgets.len() != WidgetKind::ALL.len() {
        return None;
    }

    let kinds: HashSet<WidgetKind> = widgets.iter().map(|w| w.id).collect();
    if kinds.len() != WidgetKind::ALL.len() {
        return None;
    }

    widgets.sort_by_key(|w| w.order);
    let dense = widgets.iter().enumerate().all(|(i, w)| w.order == i);
    dense.then_some(widgets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devhub_db::{DbResult, MemoryStorage};

    fn memory() -> Arc<MemoryStorage> {
        Arc::new(MemoryStorage::new())
    }

    fn ids(store: &WidgetLayoutStore) -> Vec<WidgetKind> {
        store.widgets().iter().map(|w| w.id).collect()
    }

    fn assert_dense(store: &WidgetLayoutStore) {
        let orders: Vec<usize> = store.widgets().iter().map(|w| w.order).collect();
        let expected: Vec<usize> = (0..store.widgets().len()).collect();
        assert_eq!(orders, expected);
    }

    async fn persisted(storage: &MemoryStorage) -> Vec<WidgetSetting> {
        let blob = storage.get(STORAGE_KEY).await.unwrap().unwrap();
        serde_json::from_str(&blob).unwrap()
    }

    #[tokio::test]
    async fn test_new_uses_default_layout() {
        let store = WidgetLayoutStore::new(memory());
        assert_eq!(store.widgets(), default_widgets().as_slice());
        assert_eq!(store.origin(), LayoutOrigin::Default);
        assert_eq!(store.widgets()[4].title, "Tech News");
        assert_dense(&store);
    }

    #[tokio::test]
    async fn test_hydrate_without_blob_keeps_default() {
        let store = WidgetLayoutStore::load(memory()).await;
        assert_eq!(store.origin(), LayoutOrigin::Default);
        assert_eq!(store.widgets(), default_widgets().as_slice());
    }

    #[tokio::test]
    async fn test_mutations_persist_and_reload() {
        let storage = memory();
        let mut store = WidgetLayoutStore::load(storage.clone()).await;
        assert!(store.toggle_visibility(WidgetKind::Jobs).await.unwrap());
        store.reorder(6, 0).await.unwrap();

        assert_eq!(persisted(&storage).await, store.widgets());

        let reloaded = WidgetLayoutStore::load(storage).await;
        assert_eq!(reloaded.origin(), LayoutOrigin::Persisted);
        assert_eq!(reloaded.widgets(), store.widgets());
        assert!(!reloaded.get(WidgetKind::Jobs).unwrap().visible);
        assert_eq!(reloaded.widgets()[0].id, WidgetKind::Challenges);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_visibility() {
        let mut store = WidgetLayoutStore::new(memory());
        store.toggle_visibility(WidgetKind::News).await.unwrap();
        assert!(!store.get(WidgetKind::News).unwrap().visible);
        assert_eq!(store.visible_widgets().count(), 6);

        store.toggle_visibility(WidgetKind::News).await.unwrap();
        assert!(store.get(WidgetKind::News).unwrap().visible);
    }

    #[tokio::test]
    async fn test_reorder_is_a_move_not_a_swap() {
        let mut store = WidgetLayoutStore::new(memory());
        store.reorder(1, 4).await.unwrap();
        assert_eq!(
            ids(&store),
            vec![
                WidgetKind::Activity,
                WidgetKind::Stackoverflow,
                WidgetKind::Projects,
                WidgetKind::News,
                WidgetKind::Github,
                WidgetKind::Jobs,
                WidgetKind::Challenges,
            ]
        );
        assert_dense(&store);

        store.reorder(5, 0).await.unwrap();
        assert_eq!(ids(&store)[0], WidgetKind::Jobs);
        assert_eq!(ids(&store)[1], WidgetKind::Activity);
        assert_dense(&store);
    }

    #[tokio::test]
    async fn test_reorder_keeps_orders_dense_for_all_moves() {
        let mut store = WidgetLayoutStore::new(memory());
        let len = store.widgets().len();
        for from in 0..len {
            for to in 0..len {
                store.reorder(from, to).await.unwrap();
                assert_dense(&store);
                let kinds: HashSet<WidgetKind> = ids(&store).into_iter().collect();
                assert_eq!(kinds.len(), len);
            }
        }
    }

    #[tokio::test]
    async fn test_reorder_same_index_is_stable() {
        let mut store = WidgetLayoutStore::new(memory());
        store.reorder(3, 3).await.unwrap();
        assert_eq!(store.widgets(), default_widgets().as_slice());
    }

    #[tokio::test]
    async fn test_reorder_out_of_range_is_rejected() {
        let storage = memory();
        let mut store = WidgetLayoutStore::new(storage.clone());

        let err = store.reorder(7, 0).await.unwrap_err();
        assert!(matches!(err, DevhubError::IndexOutOfRange { index: 7, len: 7 }));
        let err = store.reorder(0, 99).await.unwrap_err();
        assert!(matches!(err, DevhubError::IndexOutOfRange { index: 99, len: 7 }));

        assert_eq!(store.widgets(), default_widgets().as_slice());
        assert_eq!(storage.get(STORAGE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reset_restores_default_and_overwrites_storage() {
        let storage = memory();
        let mut store = WidgetLayoutStore::load(storage.clone()).await;
        store.toggle_visibility(WidgetKind::Github).await.unwrap();
        store.toggle_visibility(WidgetKind::Projects).await.unwrap();
        store.reorder(0, 6).await.unwrap();
        store.reorder(2, 3).await.unwrap();

        store.reset().await.unwrap();
        assert_eq!(store.widgets(), default_widgets().as_slice());
        assert_eq!(store.origin(), LayoutOrigin::Default);
        assert_eq!(persisted(&storage).await, default_widgets());
    }

    #[tokio::test]
    async fn test_corrupt_blob_falls_back_to_default() {
        for blob in ["{not json", "[]", "42"] {
            let storage = Arc::new(MemoryStorage::with_blob(STORAGE_KEY, blob));
            let store = WidgetLayoutStore::load(storage).await;
            assert_eq!(store.origin(), LayoutOrigin::Default);
            assert_eq!(store.widgets(), default_widgets().as_slice());
        }
    }

    #[tokio::test]
    async fn test_duplicate_or_gapped_layout_is_rejected() {
        let mut duplicated = default_widgets();
        duplicated[1].id = WidgetKind::Activity;
        let mut gapped = default_widgets();
        gapped[6].order = 9;

        for widgets in [duplicated, gapped] {
            let blob = serde_json::to_string(&widgets).unwrap();
            let storage = Arc::new(MemoryStorage::with_blob(STORAGE_KEY, &blob));
            let store = WidgetLayoutStore::load(storage).await;
            assert_eq!(store.origin(), LayoutOrigin::Default);
        }
    }

    #[tokio::test]
    async fn test_persisted_layout_is_sorted_by_order() {
        let mut widgets = default_widgets();
        widgets.swap(0, 6);
        widgets[0].order = 0;
        widgets[6].order = 6;
        widgets.reverse();
        let blob = serde_json::to_string(&widgets).unwrap();

        let storage = Arc::new(MemoryStorage::with_blob(STORAGE_KEY, &blob));
        let store = WidgetLayoutStore::load(storage).await;
        assert_eq!(store.origin(), LayoutOrigin::Persisted);
        assert_dense(&store);
        assert_eq!(store.widgets()[0].id, WidgetKind::Challenges);
        assert_eq!(store.widgets()[6].id, WidgetKind::Activity);
    }

    struct FailingStorage;

    #[async_trait::async_trait]
    impl Storage for FailingStorage {
        async fn get(&self, _key: &str) -> DbResult<Option<String>> {
            Err(std::io::Error::other("disk unavailable").into())
        }

        async fn set(&self, _key: &str, _value: &str) -> DbResult<()> {
            Err(std::io::Error::other("disk unavailable").into())
        }

        async fn remove(&self, _key: &str) -> DbResult<()> {
            Ok(())
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_panic() {
        let mut store = WidgetLayoutStore::load(Arc::new(FailingStorage)).await;
        assert_eq!(store.origin(), LayoutOrigin::Default);

        let err = store.toggle_visibility(WidgetKind::News).await.unwrap_err();
        assert!(matches!(err, DevhubError::Storage(_)));
        assert!(!store.get(WidgetKind::News).unwrap().visible);

        let err = store.reorder(0, 6).await.unwrap_err();
        assert!(matches!(err, DevhubError::Storage(_)));
        assert_eq!(store.widgets()[6].id, WidgetKind::Activity);
        assert_dense(&store);

        let err = store.reset().await.unwrap_err();
        assert!(matches!(err, DevhubError::Storage(_)));
        assert_eq!(store.widgets(), default_widgets().as_slice());
    }

    #[test]
    fn test_widget_kind_serde_matches_ids() {
        for kind in WidgetKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            assert_eq!(WidgetKind::from_str(kind.as_str()), Some(kind));
        }
    }
}
