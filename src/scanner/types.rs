use std::fmt;

/// Which stage of the pipeline produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Path,
    Size,
    Content,
}

/// A rule hit on a single changed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub file: String,
    pub rule: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(file: impl Into<String>, kind: ViolationKind, rule: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            rule: rule.into(),
            kind,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} — {}", self.file, self.rule)
    }
}

/// Statistics from a scanning operation
#[derive(Debug, Default, Clone)]
pub struct ScanStats {
    pub files_considered: usize,
    pub files_ignored: usize,
    pub files_content_scanned: usize,
    pub scan_duration_ms: u64,
}

/// Result of checking a change set
#[derive(Debug, Default)]
pub struct ScanResult {
    pub violations: Vec<Violation>,
    pub stats: ScanStats,
}

impl ScanResult {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
