//! Compiled rule set
//!
//! Built once per run from a [`ShieldConfig`] and shared by reference with the
//! evaluator. Nothing here is mutated after construction.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

use crate::config::ShieldConfig;
use crate::shared::glob::{GlobMatcher, build_matchers};

/// What part of the path a disallow rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// The full repository-relative path
    Path,
    /// The full path or just the file name
    Filename,
}

/// A glob that blocks matching paths
#[derive(Debug, Clone)]
pub struct DisallowRule {
    pub matcher: GlobMatcher,
    pub scope: RuleScope,
}

impl DisallowRule {
    pub fn is_match(&self, path: &str) -> bool {
        match self.scope {
            RuleScope::Path => self.matcher.is_match(path),
            RuleScope::Filename => {
                self.matcher.is_match(path) || self.matcher.is_match(file_name(path))
            }
        }
    }

    /// The glob source, for reporting
    pub fn glob(&self) -> &str {
        self.matcher.glob()
    }
}

/// A multiline regular expression searched for in file contents
#[derive(Debug, Clone)]
pub struct ContentPattern {
    source: String,
    regex: Regex,
}

impl ContentPattern {
    pub fn new(source: &str) -> Result<Self> {
        let regex = RegexBuilder::new(source)
            .multi_line(true)
            .build()
            .with_context(|| format!("Invalid content pattern: {}", source))?;

        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[derive(Debug, Clone)]
pub struct CompiledRuleSet {
    ignore: Vec<GlobMatcher>,
    disallow: Vec<DisallowRule>,
    content: Vec<ContentPattern>,
    max_file_size_bytes: u64,
}

impl CompiledRuleSet {
    /// Compile every rule in `config`.
    ///
    /// Fails on the first invalid content pattern rather than dropping it.
    pub fn build(config: &ShieldConfig) -> Result<Self> {
        let ignore = build_matchers(&config.ignore_globs)?;

        let path_rules = build_matchers(&config.disallow_path_globs)?
            .into_iter()
            .map(|matcher| DisallowRule {
                matcher,
                scope: RuleScope::Path,
            });
        let filename_rules = build_matchers(&config.disallow_filename_globs)?
            .into_iter()
            .map(|matcher| DisallowRule {
                matcher,
                scope: RuleScope::Filename,
            });
        let disallow = path_rules.chain(filename_rules).collect();

        let content = config
            .disallow_content_patterns
            .iter()
            .map(|p| ContentPattern::new(p))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Compiled {} ignore, {} disallow and {} content rules",
            config.ignore_globs.len(),
            config.disallow_path_globs.len() + config.disallow_filename_globs.len(),
            content.len()
        );

        Ok(Self {
            ignore,
            disallow,
            content,
            max_file_size_bytes: config.max_file_size_bytes,
        })
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        self.ignore.iter().any(|m| m.is_match(path))
    }

    /// The first disallow rule matching `path`, in configuration order
    pub fn first_disallowed(&self, path: &str) -> Option<&DisallowRule> {
        self.disallow.iter().find(|rule| rule.is_match(path))
    }

    pub fn disallow_rules(&self) -> &[DisallowRule] {
        &self.disallow
    }

    pub fn content_patterns(&self) -> &[ContentPattern] {
        &self.content
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
