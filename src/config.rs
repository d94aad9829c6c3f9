//! Command line configuration.

use crate::types::{Notification, Result, UpdateNotifyError, APP_ID};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Format and filter update-available notifications.
#[derive(Parser, Debug, Clone)]
#[command(name = "updatenotify")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Host state file (installed versions, pending notifications)
    #[arg(long, env = "UPDATENOTIFY_STATE", global = true)]
    pub state: Option<PathBuf>,

    /// Base URL of the instance, used for icon URLs
    #[arg(long, env = "UPDATENOTIFY_BASE_URL", default_value = "http://localhost", global = true)]
    pub base_url: String,

    /// Language code for subjects
    #[arg(short, long, default_value = "en", global = true)]
    pub lang: String,

    /// Output results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Prepare a single notification
    Prepare(PrepareConfig),
    /// Prepare every pending notification from the state file
    Sweep,
}

/// Configuration for the prepare command.
#[derive(Parser, Debug, Clone)]
pub struct PrepareConfig {
    /// "core" or an app id
    #[arg(long)]
    pub object_type: String,

    /// Version the update brings
    #[arg(long)]
    pub object_id: String,

    /// App that raised the notification
    #[arg(long, default_value = APP_ID)]
    pub app: String,

    /// Recipient
    #[arg(long, default_value = "admin")]
    pub user: String,

    /// Version shown in the core subject (defaults to the object id)
    #[arg(long)]
    pub version: Option<String>,
}

impl PrepareConfig {
    /// Build the notification described on the command line.
    pub fn notification(&self) -> Notification {
        let version = self.version.clone().unwrap_or_else(|| self.object_id.clone());
        Notification::new(&self.app, &self.user)
            .with_object(&self.object_type, &self.object_id)
            .with_subject("update_available", [("version", version)])
    }
}

impl Config {
    /// State file to read: `--state`, or the default under the config directory.
    pub fn state_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.state {
            return Ok(path.clone());
        }
        default_state_path().ok_or_else(|| {
            UpdateNotifyError::ConfigError(
                "no --state given and no config directory available".to_string(),
            )
        })
    }
}

/// `<config dir>/updatenotify/state.json`.
pub fn default_state_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("updatenotify").join("state.json"))
}
