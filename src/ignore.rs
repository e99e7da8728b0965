//! ignore — compiled ignore patterns for the digest engine.
//!
//! A pattern is a literal path fragment with optional `*` wildcards, matched
//! against the POSIX-style relative path of a candidate file (always starting
//! with `/`). Matching is an unanchored regex search: "/backups" matches any
//! path containing that fragment.
//!
//! Translation: literal dots are escaped, then each `*` becomes `.*`
//! (conventional glob "zero or more characters"). The translation lives here,
//! and only here, so the wildcard semantics can be changed in one place.

use regex::Regex;

use crate::error::{Result, VaultError};

/// One compiled ignore pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    re: Regex,
}

impl Pattern {
    pub fn compile(raw: &str) -> Result<Self> {
        let expr = raw.replace('.', "\\.").replace('*', ".*");
        let re = Regex::new(&expr).map_err(|source| VaultError::BadPattern {
            pattern: raw.to_string(),
            source,
        })?;
        Ok(Self { re })
    }

    /// Unanchored search against a `/`-rooted relative path.
    pub fn matches(&self, rel_path: &str) -> bool {
        self.re.is_match(rel_path)
    }
}

/// A set of patterns; a path is ignored when any pattern matches.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
}

impl IgnoreSet {
    pub fn compile<S: AsRef<str>>(raws: &[S]) -> Result<Self> {
        let mut patterns = Vec::with_capacity(raws.len());
        for raw in raws {
            patterns.push(Pattern::compile(raw.as_ref())?);
        }
        Ok(Self { patterns })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn matches(&self, rel_path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(rel_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_match_is_substring_search() {
        let p = Pattern::compile("/backup.meta").unwrap();
        assert!(p.matches("/backup.meta"));
        // Unanchored: a deeper file containing the fragment also matches.
        assert!(p.matches("/sub/backup.meta"));
        assert!(!p.matches("/backup_meta"), "dot must stay literal");
    }

    #[test]
    fn star_matches_any_length_run() {
        let p = Pattern::compile("*.tmp").unwrap();
        assert!(p.matches("/a.tmp"));
        assert!(p.matches("/deep/dir/scratch.tmp"));
        let p = Pattern::compile("/cache/*").unwrap();
        assert!(p.matches("/cache/blob"));
        assert!(p.matches("/cache/a/b/c"));
        assert!(!p.matches("/cachier/blob"));
    }

    #[test]
    fn empty_set_matches_nothing() {
        let set = IgnoreSet::empty();
        assert!(!set.matches("/anything"));
    }

    #[test]
    fn bad_pattern_reports_raw_form() {
        let err = Pattern::compile("(unclosed").unwrap_err();
        match err {
            crate::error::VaultError::BadPattern { pattern, .. } => {
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("expected BadPattern, got {other:?}"),
        }
    }
}
