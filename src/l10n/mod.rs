//! Localization for notification subjects.
//!
//! This module handles:
//! - Looking up translated source strings per domain and language
//! - Substituting `%s` / `%1$s` style placeholders
//! - Falling back from regional to base languages

pub mod catalog;

pub use catalog::{CatalogFactory, TranslationTable};

use regex::{Captures, Regex};
use std::sync::{Arc, LazyLock};

/// `%%`, `%s` and `%N$s`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%%|%(?:(\d+)\$)?s").expect("placeholder pattern is valid")
});

/// Translates source strings for one domain and language.
pub trait Translator: Send + Sync {
    /// Translate `text` and substitute `params` into its placeholders.
    fn t(&self, text: &str, params: &[&str]) -> String;

    /// Language this translator resolved to ("" when untranslated).
    fn language(&self) -> &str;
}

/// Hands out translators per domain and language code.
pub trait L10nFactory: Send + Sync {
    fn get(&self, domain: &str, language_code: &str) -> Arc<dyn Translator>;
}

/// Substitute printf-style placeholders.
///
/// `%1$s` picks a parameter by position, a bare `%s` takes the next one in
/// order and `%%` is a literal percent sign. Missing parameters render as an
/// empty string. Named placeholders like `{app}` are left alone.
pub fn format_template(text: &str, params: &[&str]) -> String {
    let mut next = 0usize;
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| {
            if &caps[0] == "%%" {
                return "%".to_string();
            }
            let index = match caps.get(1) {
                Some(position) => position
                    .as_str()
                    .parse::<usize>()
                    .ok()
                    .and_then(|p| p.checked_sub(1)),
                None => {
                    let i = next;
                    next += 1;
                    Some(i)
                }
            };
            index
                .and_then(|i| params.get(i))
                .map(|p| p.to_string())
                .unwrap_or_default()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_placeholders() {
        assert_eq!(
            format_template(
                "Update for %1$s to version %2$s is available.",
                &["Calendar", "2.1.0"]
            ),
            "Update for Calendar to version 2.1.0 is available."
        );
        assert_eq!(
            format_template("%2$s before %1$s", &["a", "b"]),
            "b before a"
        );
    }

    #[test]
    fn test_sequential_placeholders() {
        assert_eq!(format_template("%s and %s", &["x", "y"]), "x and y");
    }

    #[test]
    fn test_named_placeholders_untouched() {
        assert_eq!(
            format_template("Update for {app} to version %s is available.", &["3.0.0"]),
            "Update for {app} to version 3.0.0 is available."
        );
    }

    #[test]
    fn test_missing_params_and_escapes() {
        assert_eq!(
            format_template("Update to %1$s is available.", &[]),
            "Update to  is available."
        );
        assert_eq!(format_template("100%% of %s", &["it"]), "100% of it");
        assert_eq!(format_template("%0$s", &["x"]), "");
    }
}
