//! Core types and errors for update notifications.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Identifier of the app that owns update notifications.
pub const APP_ID: &str = "updatenotification";

/// Object type used for notifications about the platform core.
pub const CORE_OBJECT_TYPE: &str = "core";

/// Reasons `prepare` refuses a notification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrepareError {
    /// The notification belongs to another app; the host should try the next notifier.
    #[error("notification for app '{app}' is not handled by this notifier")]
    Unsupported { app: String },

    /// The referenced version is already installed. The notification was
    /// marked processed before this error was returned.
    #[error("{object_type} {object_id} is already installed (installed: {installed})")]
    AlreadyInstalled {
        object_type: String,
        object_id: String,
        installed: String,
    },
}

impl PrepareError {
    /// Whether the host should hand the notification to another notifier.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, PrepareError::Unsupported { .. })
    }

    /// Whether the notification was dropped from the queue.
    pub fn is_suppressed(&self) -> bool {
        matches!(self, PrepareError::AlreadyInstalled { .. })
    }
}

/// Errors surfaced by the CLI and host-side plumbing.
#[derive(Error, Debug)]
pub enum UpdateNotifyError {
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Notification suppressed: {0}")]
    Suppressed(PrepareError),

    #[error("No notifier claimed notification for app '{0}'")]
    NoNotifier(String),
}

pub type Result<T> = std::result::Result<T, UpdateNotifyError>;

/// Structured entity referenced from a rich subject placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RichParameter {
    /// Entity kind, e.g. "app".
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
}

/// Identity of a notification inside a store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationKey {
    pub app: String,
    pub user: String,
    pub object_type: String,
    pub object_id: String,
}

/// A notification event owned by the host.
///
/// The input fields describe the event; the output fields are filled in by
/// the notifier that claims it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub app: String,
    #[serde(default)]
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    pub object_type: String,
    pub object_id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub subject_parameters: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rich_subject: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rich_subject_parameters: BTreeMap<String, RichParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Notification {
    /// Create an empty notification for `app` addressed to `user`.
    pub fn new(app: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            user: user.into(),
            ..Default::default()
        }
    }

    pub fn with_object(
        mut self,
        object_type: impl Into<String>,
        object_id: impl Into<String>,
    ) -> Self {
        self.object_type = object_type.into();
        self.object_id = object_id.into();
        self
    }

    pub fn with_subject<I, K, V>(mut self, subject: impl Into<String>, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.subject = subject.into();
        self.subject_parameters = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = Some(date_time.into());
        self
    }

    /// Store identity: app, user, object type and object id.
    pub fn key(&self) -> NotificationKey {
        NotificationKey {
            app: self.app.clone(),
            user: self.user.clone(),
            object_type: self.object_type.clone(),
            object_id: self.object_id.clone(),
        }
    }

    /// Whether a notifier has filled in a non-empty parsed subject.
    pub fn is_prepared(&self) -> bool {
        self.parsed_subject.as_deref().is_some_and(|s| !s.is_empty())
    }
}
