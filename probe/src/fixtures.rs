//! Per-test fixture values.
//!
//! Everything here is built fresh on each call; nothing is shared between
//! tests.

use probe_definitions::Issue;
use rand::Rng;

/// Body text used for generated issues.
pub const ISSUE_DESCRIPTION: &str = "Description of new issue";

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Returns `len` random ASCII letters.
///
/// ```
/// let word = probe::fixtures::random_alphabetic(8);
/// assert_eq!(word.len(), 8);
/// assert!(word.chars().all(|c| c.is_ascii_alphabetic()));
/// ```
pub fn random_alphabetic(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}

/// A fresh issue title: `"issue "` followed by five random letters.
pub fn issue_title() -> String {
    format!("issue {}", random_alphabetic(5))
}

/// An issue with a fresh title and [`ISSUE_DESCRIPTION`] as its body.
pub fn issue_fixture() -> Issue {
    Issue::new(issue_title(), ISSUE_DESCRIPTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_alphabetic_respects_length() {
        assert!(random_alphabetic(0).is_empty());
        let word = random_alphabetic(32);
        assert_eq!(word.len(), 32);
        assert!(word.bytes().all(|b| b.is_ascii_alphabetic()));
    }

    #[test]
    fn issue_title_format() {
        let title = issue_title();
        let suffix = title.strip_prefix("issue ").unwrap();
        assert_eq!(suffix.len(), 5);
        assert!(suffix.chars().all(|c| c.is_ascii_alphabetic()));
    }

    #[test]
    fn fixtures_are_not_shared() {
        let titles: std::collections::HashSet<_> = (0..8).map(|_| issue_title()).collect();
        assert!(titles.len() > 1);
    }

    #[test]
    fn issue_fixture_uses_description() {
        let issue = issue_fixture();
        assert!(issue.title.starts_with("issue "));
        assert_eq!(issue.body, ISSUE_DESCRIPTION);
    }
}
