//! Version string comparison.
//!
//! Versions are compared part by part, numerically where both parts are
//! numbers, so "2.10.0" sorts after "2.9.0". Pre-release words are ranked
//! `dev < alpha < beta < rc < number < pl`, which matches how the platform
//! orders its own release tags.

use std::cmp::Ordering;

/// One component of a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part<'a> {
    Number(u64),
    Word(&'a str),
}

/// Rank a bare number takes against pre-release words.
const NUMBER_RANK: i8 = 4;

/// Word prefixes and their ranks, checked in order. Matching is
/// case-sensitive: "Beta" is an unknown word.
const WORD_RANKS: &[(&str, i8)] = &[
    ("dev", 0),
    ("alpha", 1),
    ("a", 1),
    ("beta", 2),
    ("b", 2),
    ("RC", 3),
    ("rc", 3),
    ("pl", 5),
    ("p", 5),
];

/// Unknown words sort below every known one.
const UNKNOWN_RANK: i8 = -1;

/// Anything that is not an ASCII letter or digit splits parts.
fn is_separator(c: char) -> bool {
    !c.is_ascii_alphanumeric()
}

/// Split a version into numeric and word runs.
fn split_parts(version: &str) -> Vec<Part<'_>> {
    let mut parts = Vec::new();
    let mut start: Option<(usize, bool)> = None;

    for (idx, c) in version.char_indices() {
        let digit = c.is_ascii_digit();
        match start {
            Some((s, was_digit)) if is_separator(c) || was_digit != digit => {
                parts.push(make_part(&version[s..idx], was_digit));
                start = if is_separator(c) { None } else { Some((idx, digit)) };
            }
            None if !is_separator(c) => start = Some((idx, digit)),
            _ => {}
        }
    }

    if let Some((s, was_digit)) = start {
        parts.push(make_part(&version[s..], was_digit));
    }

    parts
}

fn make_part(run: &str, digit: bool) -> Part<'_> {
    if digit {
        // Saturate absurdly long runs instead of failing.
        Part::Number(run.parse().unwrap_or(u64::MAX))
    } else {
        Part::Word(run)
    }
}

fn rank(part: Part<'_>) -> i8 {
    match part {
        Part::Number(_) => NUMBER_RANK,
        Part::Word(word) => WORD_RANKS
            .iter()
            .find(|(prefix, _)| word.starts_with(prefix))
            .map(|(_, r)| *r)
            .unwrap_or(UNKNOWN_RANK),
    }
}

fn compare_parts(a: Part<'_>, b: Part<'_>) -> Ordering {
    match (a, b) {
        (Part::Number(x), Part::Number(y)) => x.cmp(&y),
        _ => rank(a).cmp(&rank(b)),
    }
}

/// Compare two version strings.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.trim(), b.trim());
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let left = split_parts(a);
    let right = split_parts(b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = compare_parts(*l, *r);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    // The first extra part of the longer version decides.
    match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => rank(left[right.len()]).cmp(&NUMBER_RANK).then(Ordering::Greater),
        Ordering::Less => NUMBER_RANK.cmp(&rank(right[left.len()])).then(Ordering::Less),
    }
}

/// Whether `candidate` is the same as or older than `installed`.
pub fn is_at_or_below(candidate: &str, installed: &str) -> bool {
    compare_versions(candidate, installed) != Ordering::Greater
}

/// Join version components with dots, e.g. `[20, 0, 1]` -> "20.0.1".
pub fn join_version(components: &[u32]) -> String {
    components
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_not_lexical() {
        assert_eq!(compare_versions("2.10.0", "2.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("2.9.0", "2.10.0"), Ordering::Less);
        assert_eq!(compare_versions("10.0.0", "9.99.99"), Ordering::Greater);
    }

    #[test]
    fn test_equal_versions() {
        assert_eq!(compare_versions("20.0.0", "20.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1-0_0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("", ""), Ordering::Equal);
    }

    #[test]
    fn test_extra_components() {
        assert_eq!(compare_versions("20.0.0.1", "20.0.0"), Ordering::Greater);
        assert_eq!(compare_versions("20.0", "20.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0rc1", "1.0"), Ordering::Less);
        assert_eq!(compare_versions("1.0", "1.0rc1"), Ordering::Greater);
        assert_eq!(compare_versions("1.0pl1", "1.0"), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_ordering() {
        assert_eq!(compare_versions("1.0.0-dev", "1.0.0-alpha"), Ordering::Less);
        assert_eq!(
            compare_versions("1.0.0-alpha", "1.0.0-beta"),
            Ordering::Less
        );
        assert_eq!(compare_versions("1.0.0-beta2", "1.0.0-RC1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-rc1", "1.0.0-rc2"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-rc1", "1.0.0.1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-foo", "1.0.0-dev"), Ordering::Less);
    }

    #[test]
    fn test_any_punctuation_separates() {
        assert_eq!(compare_versions("1.0~1", "1.0.1"), Ordering::Equal);
        assert_eq!(
            compare_versions("1.0.0 beta", "1.0.0-alpha"),
            Ordering::Greater
        );
        assert_eq!(compare_versions("2.0.0/1", "2.0.0.1"), Ordering::Equal);
    }

    #[test]
    fn test_prerelease_words_are_case_sensitive() {
        assert_eq!(compare_versions("1.0.0-Beta1", "1.0.0-dev"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-ALPHA", "1.0.0-dev"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-Dev", "1.0.0-dev"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0-RC1", "1.0.0-rc1"), Ordering::Equal);
    }

    #[test]
    fn test_cased_suffix_changes_installed_check() {
        // An unknown word sorts below every release.
        assert!(is_at_or_below("2.0.0", "2.0.0"));
        assert!(!is_at_or_below("2.0.0", "2.0.0-Beta"));
    }

    #[test]
    fn test_is_at_or_below() {
        assert!(is_at_or_below("19.5.0", "20.0.0"));
        assert!(is_at_or_below("20.0.0", "20.0.0"));
        assert!(!is_at_or_below("20.1.0", "20.0.0"));
        assert!(!is_at_or_below("2.10.0", "2.9.0"));
    }

    #[test]
    fn test_join_version() {
        assert_eq!(join_version(&[20, 0, 1]), "20.0.1");
        assert_eq!(join_version(&[20, 0, 0, 4]), "20.0.0.4");
        assert_eq!(join_version(&[]), "");
    }

    #[test]
    fn test_split_parts() {
        assert_eq!(
            split_parts("12.0.3beta1"),
            vec![
                Part::Number(12),
                Part::Number(0),
                Part::Number(3),
                Part::Word("beta"),
                Part::Number(1)
            ]
        );
        assert!(split_parts("..").is_empty());
        assert_eq!(split_parts("1~2"), vec![Part::Number(1), Part::Number(2)]);
    }
}
