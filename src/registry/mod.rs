//! Installed version lookups.
//!
//! Provides the registry seam the notifier reads installed versions from,
//! the per-notifier snapshot of extension versions, and a registry backed
//! by a JSON host state file.

mod snapshot;
pub mod state;

pub use snapshot::InstalledVersions;
pub use state::{HostState, StaticRegistry};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata of an installed extension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppInfo {
    pub id: String,
    pub name: String,
    pub version: String,
}

/// Source of truth for what is currently installed.
pub trait VersionRegistry: Send + Sync {
    /// Current core version as numeric components, e.g. `[20, 0, 1]`.
    fn core_version(&self) -> Vec<u32>;

    /// Installed version of every extension, keyed by extension id.
    fn app_versions(&self) -> HashMap<String, String>;

    /// Metadata for one extension, if it is known.
    fn app_info(&self, app_id: &str) -> Option<AppInfo>;
}
