//! updatenotify - "update available" notification formatter.
//!
//! This library turns raw update notifications raised by the
//! `updatenotification` app into displayable messages:
//! - Localized subjects for core and app updates
//! - Rich subjects with structured app parameters
//! - Absolute icon URLs
//! - Dropping notifications whose version is already installed
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use updatenotify::l10n::CatalogFactory;
//! use updatenotify::notify::{InMemoryStore, UpdateNotifier};
//! use updatenotify::registry::StaticRegistry;
//! use updatenotify::urls::BaseUrlResolver;
//! use updatenotify::Notification;
//!
//! let notifier = UpdateNotifier::new(
//!     Arc::new(BaseUrlResolver::new("https://cloud.example.com").unwrap()),
//!     Arc::new(InMemoryStore::new()),
//!     Arc::new(CatalogFactory::with_builtin()),
//!     Arc::new(StaticRegistry::new(vec![20, 0, 0])),
//! );
//!
//! let mut notification = Notification::new("updatenotification", "admin")
//!     .with_object("core", "20.0.1")
//!     .with_subject("update_available", [("version", "20.0.1")]);
//! notifier.prepare(&mut notification, "en").unwrap();
//! println!("{}", notification.parsed_subject.unwrap());
//! ```

pub mod config;
pub mod l10n;
pub mod notify;
pub mod registry;
pub mod types;
pub mod urls;
pub mod version;

pub use config::{Commands, Config, PrepareConfig};
pub use notify::{NotificationManager, Notifier, UpdateNotifier};
pub use types::{
    Notification, NotificationKey, PrepareError, Result, RichParameter, UpdateNotifyError, APP_ID,
    CORE_OBJECT_TYPE,
};
