//! Formatter for "update available" notifications.

use super::dispatch::Notifier;
use super::store::NotificationStore;
use crate::l10n::L10nFactory;
use crate::registry::{InstalledVersions, VersionRegistry};
use crate::types::{Notification, PrepareError, RichParameter, APP_ID, CORE_OBJECT_TYPE};
use crate::urls::UrlResolver;
use crate::version::{is_at_or_below, join_version};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, trace};

const CORE_SUBJECT: &str = "Update to %1$s is available.";
const APP_SUBJECT: &str = "Update for %1$s to version %2$s is available.";
const APP_RICH_SUBJECT: &str = "Update for {app} to version %s is available.";
const NOTIFIER_NAME: &str = "Update notifications";
const ICON: &str = "notification.svg";

/// Output fields computed before anything is written to the notification.
struct Prepared {
    parsed_subject: String,
    rich_subject: Option<(String, BTreeMap<String, RichParameter>)>,
    icon: String,
}

/// Formats update notifications for the core and for installed apps, and
/// drops the ones whose version is already installed.
pub struct UpdateNotifier {
    url: Arc<dyn UrlResolver>,
    store: Arc<dyn NotificationStore>,
    l10n: Arc<dyn L10nFactory>,
    registry: Arc<dyn VersionRegistry>,
    app_versions: InstalledVersions,
}

impl UpdateNotifier {
    /// Create a notifier. Installed app versions are read from `registry`
    /// once, here; the core version is looked up on every call.
    pub fn new(
        url: Arc<dyn UrlResolver>,
        store: Arc<dyn NotificationStore>,
        l10n: Arc<dyn L10nFactory>,
        registry: Arc<dyn VersionRegistry>,
    ) -> Self {
        let app_versions = InstalledVersions::capture(registry.as_ref());
        Self {
            url,
            store,
            l10n,
            registry,
            app_versions,
        }
    }

    /// The installed-version snapshot taken at construction.
    pub fn app_versions(&self) -> &InstalledVersions {
        &self.app_versions
    }

    /// Fill in subject, rich subject and icon of an update notification.
    ///
    /// Returns `Unsupported` for notifications of other apps and
    /// `AlreadyInstalled` (after marking the notification processed) when
    /// the announced version is not newer than the installed one. The
    /// notification is only modified on success.
    pub fn prepare(
        &self,
        notification: &mut Notification,
        language_code: &str,
    ) -> Result<(), PrepareError> {
        if notification.app != APP_ID {
            return Err(PrepareError::Unsupported {
                app: notification.app.clone(),
            });
        }

        let prepared = self.build(notification, language_code)?;

        notification.parsed_subject = Some(prepared.parsed_subject);
        if let Some((rich_subject, parameters)) = prepared.rich_subject {
            notification.rich_subject = Some(rich_subject);
            notification.rich_subject_parameters = parameters;
        }
        notification.icon = Some(prepared.icon);

        trace!(
            "Prepared {} update notification {} for {}",
            notification.object_type,
            notification.object_id,
            notification.user
        );
        Ok(())
    }

    fn build(
        &self,
        notification: &Notification,
        language_code: &str,
    ) -> Result<Prepared, PrepareError> {
        let l = self.l10n.get(APP_ID, language_code);
        let object_type = notification.object_type.as_str();
        let object_id = notification.object_id.as_str();

        let (parsed_subject, rich_subject) = if object_type == CORE_OBJECT_TYPE {
            self.update_already_installed_check(notification, &self.core_version())?;

            let version = notification
                .subject_parameters
                .get("version")
                .map(String::as_str)
                .unwrap_or_default();
            (l.t(CORE_SUBJECT, &[version]), None)
        } else {
            let app_name = self
                .registry
                .app_info(object_type)
                .map(|info| info.name)
                .unwrap_or_else(|| object_type.to_string());

            if let Some(installed) = self.app_versions.get(object_type) {
                self.update_already_installed_check(notification, installed)?;
            }

            let parameters = BTreeMap::from([(
                "app".to_string(),
                RichParameter {
                    kind: "app".to_string(),
                    id: object_type.to_string(),
                    name: app_name.clone(),
                },
            )]);
            (
                l.t(APP_SUBJECT, &[app_name.as_str(), object_id]),
                Some((l.t(APP_RICH_SUBJECT, &[object_id]), parameters)),
            )
        };

        let icon = self.url.absolute_url(&self.url.image_path(APP_ID, ICON));

        Ok(Prepared {
            parsed_subject,
            rich_subject,
            icon,
        })
    }

    /// Drop the notification from the queue when its version is installed.
    fn update_already_installed_check(
        &self,
        notification: &Notification,
        installed_version: &str,
    ) -> Result<(), PrepareError> {
        if is_at_or_below(&notification.object_id, installed_version) {
            debug!(
                "{} {} already installed ({}), removing notification",
                notification.object_type, notification.object_id, installed_version
            );
            self.store.mark_processed(notification);
            return Err(PrepareError::AlreadyInstalled {
                object_type: notification.object_type.clone(),
                object_id: notification.object_id.clone(),
                installed: installed_version.to_string(),
            });
        }
        Ok(())
    }

    fn core_version(&self) -> String {
        join_version(&self.registry.core_version())
    }
}

impl Notifier for UpdateNotifier {
    fn id(&self) -> &str {
        APP_ID
    }

    fn name(&self, language_code: &str) -> String {
        self.l10n.get(APP_ID, language_code).t(NOTIFIER_NAME, &[])
    }

    fn prepare(
        &self,
        notification: &mut Notification,
        language_code: &str,
    ) -> Result<(), PrepareError> {
        UpdateNotifier::prepare(self, notification, language_code)
    }
}
