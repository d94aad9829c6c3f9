//! In-memory translation catalogs.

use super::{format_template, L10nFactory, Translator};
use crate::types::APP_ID;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::trace;

/// Extra translations: domain -> language -> source text -> translation.
pub type TranslationTable = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Built-in German strings for the update notification domain.
const DE: &[(&str, &str)] = &[
    ("Update to %1$s is available.", "Aktualisierung auf %1$s ist verfügbar."),
    (
        "Update for %1$s to version %2$s is available.",
        "Eine Aktualisierung für %1$s auf Version %2$s ist verfügbar.",
    ),
    (
        "Update for {app} to version %s is available.",
        "Eine Aktualisierung für {app} auf Version %s ist verfügbar.",
    ),
    ("Update notifications", "Update-Benachrichtigungen"),
];

/// Built-in French strings for the update notification domain.
const FR: &[(&str, &str)] = &[
    ("Update to %1$s is available.", "La mise à jour vers %1$s est disponible."),
    (
        "Update for %1$s to version %2$s is available.",
        "Une mise à jour de %1$s vers la version %2$s est disponible.",
    ),
    (
        "Update for {app} to version %s is available.",
        "Une mise à jour de {app} vers la version %s est disponible.",
    ),
    ("Update notifications", "Notifications de mise à jour"),
];

/// Translator backed by a single catalog.
#[derive(Debug, Clone, Default)]
struct Catalog {
    language: String,
    entries: Arc<HashMap<String, String>>,
}

impl Translator for Catalog {
    fn t(&self, text: &str, params: &[&str]) -> String {
        let source = self.entries.get(text).map(String::as_str).unwrap_or(text);
        format_template(source, params)
    }

    fn language(&self) -> &str {
        &self.language
    }
}

/// Catalog-backed localization factory.
#[derive(Debug, Clone, Default)]
pub struct CatalogFactory {
    catalogs: HashMap<(String, String), Arc<HashMap<String, String>>>,
}

impl CatalogFactory {
    /// Create a factory without any catalogs; every lookup returns source text.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory preloaded with the bundled German and French strings.
    pub fn with_builtin() -> Self {
        let mut factory = Self::new();
        factory.insert(APP_ID, "de", DE.iter().copied());
        factory.insert(APP_ID, "fr", FR.iter().copied());
        factory
    }

    /// Add entries to the catalog for `domain` and `language`, replacing
    /// existing translations of the same source text.
    pub fn insert<I, K, V>(&mut self, domain: &str, language: &str, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let key = (domain.to_string(), normalize_language(language));
        let catalog = self.catalogs.entry(key).or_default();
        let catalog = Arc::make_mut(catalog);
        for (source, translation) in entries {
            catalog.insert(source.into(), translation.into());
        }
    }

    /// Merge a whole translation table, e.g. one loaded from the host state.
    pub fn merge(&mut self, table: &TranslationTable) {
        for (domain, languages) in table {
            for (language, entries) in languages {
                let entries = entries.iter().map(|(k, v)| (k.as_str(), v.as_str()));
                self.insert(domain, language, entries);
            }
        }
    }

    fn lookup(
        &self,
        domain: &str,
        language: &str,
    ) -> Option<(String, Arc<HashMap<String, String>>)> {
        let language = normalize_language(language);
        if let Some(entries) = self.catalogs.get(&(domain.to_string(), language.clone())) {
            return Some((language, entries.clone()));
        }

        let base = language.split('_').next().unwrap_or_default().to_string();
        self.catalogs
            .get(&(domain.to_string(), base.clone()))
            .map(|entries| (base, entries.clone()))
    }
}

impl L10nFactory for CatalogFactory {
    fn get(&self, domain: &str, language_code: &str) -> Arc<dyn Translator> {
        match self.lookup(domain, language_code) {
            Some((language, entries)) => {
                trace!("Using {} catalog for {}", language, domain);
                Arc::new(Catalog { language, entries })
            }
            None => {
                trace!(
                    "No catalog for {}/{}, using source text",
                    domain, language_code
                );
                Arc::new(Catalog::default())
            }
        }
    }
}

/// "de-DE" and "de_DE" both become "de_DE".
fn normalize_language(language: &str) -> String {
    language.trim().replace('-', "_")
}
