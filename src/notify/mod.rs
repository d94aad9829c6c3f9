//! Update notification handling.
//!
//! This module handles:
//! - Formatting "update available" notifications
//! - Routing notifications through registered notifiers
//! - The pending notification queue
//! - Colored console and JSON output

pub mod console;
pub mod dispatch;
pub mod notifier;
pub mod store;

pub use console::ConsoleOutput;
pub use dispatch::{NotificationManager, Notifier, SweepReport};
pub use notifier::UpdateNotifier;
pub use store::{InMemoryStore, NotificationStore};
