//! Snapshot of installed extension versions.

use super::VersionRegistry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Extension id -> installed version, captured once and never mutated.
///
/// Cloning shares the underlying map, so concurrent readers are fine.
#[derive(Debug, Clone, Default)]
pub struct InstalledVersions {
    versions: Arc<HashMap<String, String>>,
}

impl InstalledVersions {
    /// Capture the current extension versions from `registry`.
    pub fn capture(registry: &dyn VersionRegistry) -> Self {
        let versions = registry.app_versions();
        debug!("Captured installed versions of {} apps", versions.len());
        Self::from_map(versions)
    }

    pub fn from_map(versions: HashMap<String, String>) -> Self {
        Self {
            versions: Arc::new(versions),
        }
    }

    /// Installed version of `app_id`, if it is installed.
    pub fn get(&self, app_id: &str) -> Option<&str> {
        self.versions.get(app_id).map(String::as_str)
    }

    pub fn contains(&self, app_id: &str) -> bool {
        self.versions.contains_key(app_id)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::AppInfo;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRegistry {
        calls: AtomicUsize,
    }

    impl VersionRegistry for CountingRegistry {
        fn core_version(&self) -> Vec<u32> {
            vec![20, 0, 0]
        }

        fn app_versions(&self) -> HashMap<String, String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            HashMap::from([("files".to_string(), format!("1.{}.0", n))])
        }

        fn app_info(&self, _app_id: &str) -> Option<AppInfo> {
            None
        }
    }

    #[test]
    fn test_snapshot_get() {
        let registry = CountingRegistry {
            calls: AtomicUsize::new(0),
        };
        let snapshot = InstalledVersions::capture(&registry);

        assert_eq!(snapshot.get("files"), Some("1.0.0"));
        assert!(snapshot.contains("files"));
        assert!(!snapshot.contains("calendar"));
        assert_eq!(snapshot.len(), 1);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let registry = CountingRegistry {
            calls: AtomicUsize::new(0),
        };
        let snapshot = InstalledVersions::capture(&registry);

        // Later registry changes are not visible.
        let _ = registry.app_versions();
        assert_eq!(snapshot.get("files"), Some("1.0.0"));
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = InstalledVersions::default();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.get("files"), None);
    }
}
