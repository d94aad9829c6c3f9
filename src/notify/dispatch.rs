//! Routing notifications to the notifier that owns them.

use super::store::InMemoryStore;
use crate::types::{Notification, PrepareError, Result, UpdateNotifyError};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// A component that claims and formats notifications for one app.
pub trait Notifier: Send + Sync {
    /// Identifier of the app this notifier serves.
    fn id(&self) -> &str;

    /// Human readable notifier name in `language_code`.
    fn name(&self, language_code: &str) -> String;

    /// Fill in the displayable fields of `notification`.
    ///
    /// On error the notification is left untouched.
    fn prepare(
        &self,
        notification: &mut Notification,
        language_code: &str,
    ) -> std::result::Result<(), PrepareError>;
}

/// Outcome of preparing every pending notification.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Notifications ready to display.
    pub prepared: Vec<Notification>,
    /// Notifications dropped because the update is already installed.
    pub suppressed: Vec<Notification>,
    /// Notifications no registered notifier claimed.
    pub unclaimed: Vec<Notification>,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.prepared.len() + self.suppressed.len() + self.unclaimed.len()
    }
}

/// Ordered set of notifiers, tried one after another.
#[derive(Default, Clone)]
pub struct NotificationManager {
    notifiers: Vec<Arc<dyn Notifier>>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notifier. Earlier registrations are asked first.
    pub fn register(&mut self, notifier: Arc<dyn Notifier>) {
        debug!("Registered notifier {}", notifier.id());
        self.notifiers.push(notifier);
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.register(notifier);
        self
    }

    /// Registered notifier ids with their localized names.
    pub fn notifiers(&self, language_code: &str) -> Vec<(String, String)> {
        self.notifiers
            .iter()
            .map(|n| (n.id().to_string(), n.name(language_code)))
            .collect()
    }

    /// Hand `notification` to the first notifier that claims it.
    ///
    /// A notifier answering `Unsupported` passes the notification on, and so
    /// does one that reports success without a parsed subject. A suppressed
    /// notification stops the search since it is gone from the queue.
    pub fn prepare(&self, notification: &mut Notification, language_code: &str) -> Result<()> {
        for notifier in &self.notifiers {
            match notifier.prepare(notification, language_code) {
                Ok(()) if notification.is_prepared() => {
                    trace!(
                        "{} prepared {}/{}",
                        notifier.id(),
                        notification.app,
                        notification.object_id
                    );
                    return Ok(());
                }
                Ok(()) => {
                    warn!("{} left notification without a subject", notifier.id());
                    continue;
                }
                Err(e) if e.is_unsupported() => continue,
                Err(e) => {
                    debug!("{} suppressed notification: {}", notifier.id(), e);
                    return Err(UpdateNotifyError::Suppressed(e));
                }
            }
        }

        Err(UpdateNotifyError::NoNotifier(notification.app.clone()))
    }

    /// Prepare every notification pending in `store`.
    pub fn sweep(&self, store: &InMemoryStore, language_code: &str) -> SweepReport {
        let mut report = SweepReport::default();

        for original in store.pending() {
            let mut notification = original.clone();
            match self.prepare(&mut notification, language_code) {
                Ok(()) => report.prepared.push(notification),
                Err(UpdateNotifyError::Suppressed(_)) => report.suppressed.push(original),
                Err(_) => report.unclaimed.push(original),
            }
        }

        debug!(
            "Sweep done: {} prepared, {} suppressed, {} unclaimed",
            report.prepared.len(),
            report.suppressed.len(),
            report.unclaimed.len()
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::store::NotificationStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Claims notifications of one app; suppresses object id "old".
    struct FakeNotifier {
        app: &'static str,
        store: Option<InMemoryStore>,
        calls: AtomicUsize,
    }

    impl FakeNotifier {
        fn new(app: &'static str) -> Self {
            Self {
                app,
                store: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Notifier for FakeNotifier {
        fn id(&self) -> &str {
            self.app
        }

        fn name(&self, _language_code: &str) -> String {
            self.app.to_uppercase()
        }

        fn prepare(
            &self,
            notification: &mut Notification,
            _language_code: &str,
        ) -> std::result::Result<(), PrepareError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if notification.app != self.app {
                return Err(PrepareError::Unsupported {
                    app: notification.app.clone(),
                });
            }
            if notification.object_id == "old" {
                if let Some(store) = &self.store {
                    store.mark_processed(notification);
                }
                return Err(PrepareError::AlreadyInstalled {
                    object_type: notification.object_type.clone(),
                    object_id: notification.object_id.clone(),
                    installed: "old".to_string(),
                });
            }
            notification.parsed_subject = Some(format!("{} says hi", self.app));
            Ok(())
        }
    }

    /// Claims every notification but never fills it in.
    struct SilentNotifier;

    impl Notifier for SilentNotifier {
        fn id(&self) -> &str {
            "silent"
        }

        fn name(&self, _language_code: &str) -> String {
            "Silent".to_string()
        }

        fn prepare(
            &self,
            _notification: &mut Notification,
            _language_code: &str,
        ) -> std::result::Result<(), PrepareError> {
            Ok(())
        }
    }

    #[test]
    fn test_unsupported_falls_through() {
        let mail = Arc::new(FakeNotifier::new("mail"));
        let talk = Arc::new(FakeNotifier::new("talk"));
        let manager = NotificationManager::new()
            .with_notifier(mail.clone())
            .with_notifier(talk.clone());

        let mut n = Notification::new("talk", "admin").with_object("call", "1");
        manager.prepare(&mut n, "en").unwrap();

        assert_eq!(n.parsed_subject.as_deref(), Some("talk says hi"));
        assert_eq!(mail.calls.load(Ordering::SeqCst), 1);
        assert_eq!(talk.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_suppressed_stops_search() {
        let first = Arc::new(FakeNotifier::new("mail"));
        let second = Arc::new(FakeNotifier::new("mail"));
        let manager = NotificationManager::new()
            .with_notifier(first.clone())
            .with_notifier(second.clone());

        let mut n = Notification::new("mail", "admin").with_object("message", "old");
        let err = manager.prepare(&mut n, "en").unwrap_err();

        assert!(matches!(err, UpdateNotifyError::Suppressed(ref e) if e.is_suppressed()));
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_no_notifier() {
        let manager =
            NotificationManager::new().with_notifier(Arc::new(FakeNotifier::new("mail")));
        let mut n = Notification::new("files", "admin");
        let err = manager.prepare(&mut n, "en").unwrap_err();
        assert!(matches!(err, UpdateNotifyError::NoNotifier(ref app) if app == "files"));
        assert!(n.parsed_subject.is_none());
    }

    #[test]
    fn test_sweep_sorts_outcomes() {
        let store = InMemoryStore::with_pending([
            Notification::new("mail", "admin").with_object("message", "new"),
            Notification::new("mail", "admin").with_object("message", "old"),
            Notification::new("files", "admin").with_object("file", "1"),
        ]);
        let notifier = FakeNotifier {
            app: "mail",
            store: Some(store.clone()),
            calls: AtomicUsize::new(0),
        };
        let manager = NotificationManager::new().with_notifier(Arc::new(notifier));

        let report = manager.sweep(&store, "en");

        assert_eq!(report.total(), 3);
        assert_eq!(report.prepared.len(), 1);
        assert_eq!(report.suppressed.len(), 1);
        assert_eq!(report.unclaimed.len(), 1);
        // Only the suppressed one left the queue.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_notifier_names() {
        let manager =
            NotificationManager::new().with_notifier(Arc::new(FakeNotifier::new("mail")));
        assert_eq!(
            manager.notifiers("en"),
            vec![("mail".to_string(), "MAIL".to_string())]
        );
    }

    #[test]
    fn test_unparsed_success_is_not_handled() {
        let manager = NotificationManager::new().with_notifier(Arc::new(SilentNotifier));
        let mut n = Notification::new("mail", "admin").with_object("message", "new");

        let err = manager.prepare(&mut n, "en").unwrap_err();

        assert!(matches!(err, UpdateNotifyError::NoNotifier(ref app) if app == "mail"));
    }

    #[test]
    fn test_unparsed_success_falls_through() {
        let mail = Arc::new(FakeNotifier::new("mail"));
        let manager = NotificationManager::new()
            .with_notifier(Arc::new(SilentNotifier))
            .with_notifier(mail.clone());
        let mut n = Notification::new("mail", "admin").with_object("message", "new");

        manager.prepare(&mut n, "en").unwrap();

        assert_eq!(n.parsed_subject.as_deref(), Some("mail says hi"));
        assert_eq!(mail.calls.load(Ordering::SeqCst), 1);
    }
}
