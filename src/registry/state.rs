//! Host state file and the registry backed by it.

use super::{AppInfo, VersionRegistry};
use crate::l10n::TranslationTable;
use crate::types::{Notification, Result, UpdateNotifyError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// An installed extension as listed in the state file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstalledApp {
    pub name: String,
    pub version: String,
}

/// Snapshot of a host instance: what is installed and what is pending.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostState {
    /// Core version components, e.g. `[20, 0, 1]`.
    pub core_version: Vec<u32>,
    #[serde(default)]
    pub apps: BTreeMap<String, InstalledApp>,
    #[serde(default)]
    pub pending: Vec<Notification>,
    #[serde(default)]
    pub translations: TranslationTable,
}

impl HostState {
    /// Load a state file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let state = Self::from_json(&content)?;
        debug!(
            "Loaded host state from {:?}: {} apps, {} pending",
            path,
            state.apps.len(),
            state.pending.len()
        );
        Ok(state)
    }

    /// Parse and validate a state document.
    pub fn from_json(content: &str) -> Result<Self> {
        let state: HostState = serde_json::from_str(content)?;
        state.validate()?;
        Ok(state)
    }

    fn validate(&self) -> Result<()> {
        if self.core_version.is_empty() {
            return Err(UpdateNotifyError::ConfigError(
                "coreVersion must list at least one component".to_string(),
            ));
        }
        if let Some((id, _)) = self.apps.iter().find(|(_, app)| app.version.trim().is_empty()) {
            return Err(UpdateNotifyError::ConfigError(format!(
                "app '{}' has an empty version",
                id
            )));
        }
        Ok(())
    }
}

/// Registry that answers from a fixed host state.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    core_version: Vec<u32>,
    apps: BTreeMap<String, InstalledApp>,
}

impl StaticRegistry {
    pub fn new(core_version: Vec<u32>) -> Self {
        Self {
            core_version,
            apps: BTreeMap::new(),
        }
    }

    pub fn from_state(state: &HostState) -> Self {
        Self {
            core_version: state.core_version.clone(),
            apps: state.apps.clone(),
        }
    }

    /// Register an installed extension.
    pub fn with_app(mut self, id: &str, name: &str, version: &str) -> Self {
        self.apps.insert(
            id.to_string(),
            InstalledApp {
                name: name.to_string(),
                version: version.to_string(),
            },
        );
        self
    }

    /// Installed extensions ordered by id.
    pub fn installed(&self) -> Vec<AppInfo> {
        self.apps
            .keys()
            .filter_map(|id| self.app_info(id))
            .collect()
    }
}

impl VersionRegistry for StaticRegistry {
    fn core_version(&self) -> Vec<u32> {
        self.core_version.clone()
    }

    fn app_versions(&self) -> HashMap<String, String> {
        self.apps
            .iter()
            .map(|(id, app)| (id.clone(), app.version.clone()))
            .collect()
    }

    fn app_info(&self, app_id: &str) -> Option<AppInfo> {
        self.apps.get(app_id).map(|app| AppInfo {
            id: app_id.to_string(),
            name: app.name.clone(),
            version: app.version.clone(),
        })
    }
}
