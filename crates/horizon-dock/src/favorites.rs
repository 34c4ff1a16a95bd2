//! The favorites list the dock mirrors.
//!
//! `FavoritesModel` is the source of truth: an ordered list of applications
//! with no duplicates. Every effective mutation emits [`FavoritesModel::changed`],
//! which the dock answers with a reconciliation pass.

use std::fmt;
use std::sync::Arc;

use horizon_dock_core::logging::targets;
use horizon_dock_core::{dock_warn, Signal};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Stable identity of an application, such as its desktop file name.
///
/// Cloning is cheap; two ids are the same entity when their strings match.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AppId(Arc<str>);

impl AppId {
    /// Create an id from a string.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AppId({})", self.0)
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AppId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AppId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<AppId> for String {
    fn from(id: AppId) -> Self {
        id.0.to_string()
    }
}

/// A favorited application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteApp {
    /// The application's identity.
    pub id: AppId,
    /// Display name, used for the item label.
    pub name: String,
}

impl FavoriteApp {
    /// Create a favorite.
    pub fn new(id: impl Into<AppId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An ordered, duplicate-free list of favorite applications.
pub struct FavoritesModel {
    apps: RwLock<Vec<FavoriteApp>>,
    changed: Arc<Signal<()>>,
}

impl Default for FavoritesModel {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesModel {
    /// Create an empty model.
    pub fn new() -> Self {
        Self {
            apps: RwLock::new(Vec::new()),
            changed: Arc::new(Signal::new()),
        }
    }

    /// Create a model from a list, dropping repeated ids.
    pub fn from_apps(apps: impl IntoIterator<Item = FavoriteApp>) -> Self {
        let mut unique: Vec<FavoriteApp> = Vec::new();
        for app in apps {
            if unique.iter().any(|a| a.id == app.id) {
                dock_warn!(targets::DOCK, id = %app.id, "ignoring duplicate favorite");
                continue;
            }
            unique.push(app);
        }
        Self {
            apps: RwLock::new(unique),
            changed: Arc::new(Signal::new()),
        }
    }

    /// Signal emitted after the list changes.
    pub fn changed(&self) -> &Arc<Signal<()>> {
        &self.changed
    }

    /// Number of favorites.
    pub fn len(&self) -> usize {
        self.apps.read().len()
    }

    /// Returns `true` if there are no favorites.
    pub fn is_empty(&self) -> bool {
        self.apps.read().is_empty()
    }

    /// Whether `id` is a favorite.
    pub fn contains(&self, id: &AppId) -> bool {
        self.apps.read().iter().any(|a| &a.id == id)
    }

    /// Position of `id` in the list.
    pub fn position(&self, id: &AppId) -> Option<usize> {
        self.apps.read().iter().position(|a| &a.id == id)
    }

    /// Snapshot of the favorites in order.
    pub fn apps(&self) -> Vec<FavoriteApp> {
        self.apps.read().clone()
    }

    /// Snapshot of the favorite ids in order.
    pub fn ids(&self) -> Vec<AppId> {
        self.apps.read().iter().map(|a| a.id.clone()).collect()
    }

    /// Append a favorite. Returns `false` if it is already present.
    pub fn add(&self, app: FavoriteApp) -> bool {
        let len = self.len();
        self.add_at(len, app)
    }

    /// Insert a favorite at `index` (clamped to the end).
    ///
    /// Returns `false` if it is already present.
    pub fn add_at(&self, index: usize, app: FavoriteApp) -> bool {
        {
            let mut apps = self.apps.write();
            if apps.iter().any(|a| a.id == app.id) {
                return false;
            }
            let index = index.min(apps.len());
            apps.insert(index, app);
        }
        self.changed.emit(());
        true
    }

    /// Remove a favorite, returning it if it was present.
    pub fn remove(&self, id: &AppId) -> Option<FavoriteApp> {
        let removed = {
            let mut apps = self.apps.write();
            let index = apps.iter().position(|a| &a.id == id)?;
            apps.remove(index)
        };
        self.changed.emit(());
        Some(removed)
    }

    /// Move a favorite to `index` (clamped to the end).
    ///
    /// Returns `false` if `id` is not a favorite. Moving to the current
    /// position succeeds without emitting.
    pub fn move_to(&self, id: &AppId, index: usize) -> bool {
        {
            let mut apps = self.apps.write();
            let Some(from) = apps.iter().position(|a| &a.id == id) else {
                return false;
            };
            let to = index.min(apps.len() - 1);
            if from == to {
                return true;
            }
            let app = apps.remove(from);
            apps.insert(to, app);
        }
        self.changed.emit(());
        true
    }
}

impl fmt::Debug for FavoritesModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FavoritesModel")
            .field("apps", &*self.apps.read())
            .field("connections", &self.changed.connection_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn model(ids: &[&str]) -> FavoritesModel {
        FavoritesModel::from_apps(ids.iter().map(|id| FavoriteApp::new(*id, id.to_uppercase())))
    }

    fn ids(model: &FavoritesModel) -> Vec<String> {
        model.ids().into_iter().map(String::from).collect()
    }

    fn counter(model: &FavoritesModel) -> Arc<AtomicUsize> {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        model.changed().connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        count
    }

    #[test]
    fn test_from_apps_drops_duplicates() {
        let m = model(&["files", "term", "files"]);
        assert_eq!(ids(&m), vec!["files", "term"]);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let m = model(&["files"]);
        let changes = counter(&m);

        assert!(m.add(FavoriteApp::new("term", "Terminal")));
        assert!(!m.add(FavoriteApp::new("files", "Files")));
        assert_eq!(ids(&m), vec!["files", "term"]);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_add_at_clamps() {
        let m = model(&["a", "b"]);
        assert!(m.add_at(0, FavoriteApp::new("z", "Z")));
        assert!(m.add_at(99, FavoriteApp::new("y", "Y")));
        assert_eq!(ids(&m), vec!["z", "a", "b", "y"]);
    }

    #[test]
    fn test_remove() {
        let m = model(&["a", "b", "c"]);
        let changes = counter(&m);

        let removed = m.remove(&AppId::new("b")).unwrap();
        assert_eq!(removed.name, "B");
        assert!(m.remove(&AppId::new("b")).is_none());
        assert_eq!(ids(&m), vec!["a", "c"]);
        assert_eq!(changes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_move_to() {
        let m = model(&["a", "b", "c"]);
        let changes = counter(&m);

        assert!(m.move_to(&AppId::new("a"), 2));
        assert_eq!(ids(&m), vec!["b", "c", "a"]);
        assert!(m.move_to(&AppId::new("a"), 10));
        assert!(!m.move_to(&AppId::new("missing"), 0));
        assert_eq!(changes.load(Ordering::SeqCst), 1);
        assert_eq!(m.position(&AppId::new("c")), Some(1));
    }

    #[test]
    fn test_app_id_serde_as_string() {
        let app = FavoriteApp::new("org.gnome.Nautilus.desktop", "Files");
        let text = toml::to_string(&app).unwrap();
        assert!(text.contains("id = \"org.gnome.Nautilus.desktop\""));
        let back: FavoriteApp = toml::from_str(&text).unwrap();
        assert_eq!(back, app);
    }
}
