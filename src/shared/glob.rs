//! Glob pattern utilities
//!
//! Translates the small glob dialect used by commit-shield rules into anchored
//! regular expressions that are matched against repository-relative paths.
//!
//! Supported syntax:
//! - `**` matches any sequence of characters, including `/`
//! - `*` matches any sequence of characters except `/`
//! - `?` matches exactly one character
//!
//! Everything else is literal. Matching is case-sensitive and always covers the
//! whole path, never a substring.

use anyhow::{Context, Result};
use regex::Regex;

/// A compiled glob that remembers the pattern it was built from
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    glob: String,
    regex: Regex,
}

impl GlobMatcher {
    /// Compile a glob into a matcher
    pub fn new(glob: &str) -> Result<Self> {
        let source = glob_to_regex(glob);
        let regex = Regex::new(&source)
            .with_context(|| format!("Invalid glob pattern: {}", glob))?;

        Ok(Self {
            glob: glob.to_string(),
            regex,
        })
    }

    /// Test a repository-relative path against this glob
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// The glob this matcher was compiled from
    pub fn glob(&self) -> &str {
        &self.glob
    }
}

/// Compile a list of globs, preserving their order
pub fn build_matchers(globs: &[String]) -> Result<Vec<GlobMatcher>> {
    globs.iter().map(|glob| GlobMatcher::new(glob)).collect()
}

/// Translate a glob into an anchored regular expression source
pub fn glob_to_regex(glob: &str) -> String {
    let mut re = String::with_capacity(glob.len() * 2 + 2);
    re.push('^');

    let mut chars = glob.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => {
                if chars.peek() == Some(&'*') {
                    chars.next();
                    re.push_str(".*");
                } else {
                    re.push_str("[^/]*");
                }
            }
            '?' => re.push('.'),
            '/' => re.push('/'),
            other => {
                let mut buf = [0u8; 4];
                re.push_str(&regex::escape(other.encode_utf8(&mut buf)));
            }
        }
    }

    re.push('$');
    re
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(glob: &str) -> GlobMatcher {
        GlobMatcher::new(glob).expect("glob should compile")
    }

    #[test]
    fn test_literal_glob_matches_only_itself() {
        let m = matcher(".env");
        assert!(m.is_match(".env"));
        assert!(!m.is_match("xenv"));
        assert!(!m.is_match(".env.local"));
        assert!(!m.is_match("config/.env"));
        assert!(!m.is_match(""));

        let m = matcher("src/main.rs");
        assert!(m.is_match("src/main.rs"));
        assert!(!m.is_match("src/main_rs"));
        assert!(!m.is_match("other/src/main.rs"));
    }

    #[test]
    fn test_double_star_crosses_directories() {
        let m = matcher("dist/**");
        assert!(m.is_match("dist/a/b.js"));
        assert!(m.is_match("dist/a.js"));
        assert!(!m.is_match("src/dist/a.js"));
        assert!(!m.is_match("distribution/a.js"));
    }

    #[test]
    fn test_single_star_stays_in_segment() {
        let m = matcher("dist/*");
        assert!(m.is_match("dist/a.js"));
        assert!(!m.is_match("dist/a/b.js"));

        let m = matcher("*serviceAccount*.json");
        assert!(m.is_match("prod-serviceAccount-key.json"));
        assert!(!m.is_match("keys/prod-serviceAccount-key.json"));
    }

    #[test]
    fn test_question_mark_matches_one_character() {
        let m = matcher("file?.txt");
        assert!(m.is_match("file1.txt"));
        assert!(m.is_match("fileA.txt"));
        assert!(!m.is_match("file.txt"));
        assert!(!m.is_match("file12.txt"));
    }

    #[test]
    fn test_metacharacters_are_literal() {
        let m = matcher("a+b(c)[d]{e}|f^g$.txt");
        assert!(m.is_match("a+b(c)[d]{e}|f^g$.txt"));
        assert!(!m.is_match("aab(c)[d]{e}|f^g$.txt"));

        let m = matcher(".env.*");
        assert!(m.is_match(".env.production"));
        assert!(!m.is_match("xenvxproduction"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let m = matcher("*.PEM");
        assert!(m.is_match("key.PEM"));
        assert!(!m.is_match("key.pem"));
    }

    #[test]
    fn test_translation_output() {
        assert_eq!(glob_to_regex("dist/**"), "^dist/.*$");
        assert_eq!(glob_to_regex("*.js"), r"^[^/]*\.js$");
        assert_eq!(glob_to_regex("a?"), "^a.$");
        assert_eq!(matcher("node_modules/**").glob(), "node_modules/**");
    }

    #[test]
    fn test_build_matchers_preserves_order() -> Result<()> {
        let globs = vec!["b/**".to_string(), "a/**".to_string()];
        let matchers = build_matchers(&globs)?;
        assert_eq!(matchers.len(), 2);
        assert_eq!(matchers[0].glob(), "b/**");
        assert_eq!(matchers[1].glob(), "a/**");
        Ok(())
    }
}
