use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::rules::CompiledRuleSet;
use super::text::looks_like_text;
use super::types::{ScanResult, ScanStats, Violation, ViolationKind};
use crate::config::{BYTES_PER_MB, bytes_to_mb};

/// Files above this size are never read for content matching, whatever the
/// configured size limit is.
pub const CONTENT_SCAN_LIMIT_BYTES: u64 = BYTES_PER_MB * 3 / 2;

/// Evaluates changed files against a compiled rule set.
///
/// Only reads the filesystem; evaluations of different files are independent
/// and run in parallel.
pub struct Scanner<'a> {
    rules: &'a CompiledRuleSet,
    root: PathBuf,
}

/// Outcome of evaluating one file
#[derive(Debug, Default)]
struct FileReport {
    violations: Vec<Violation>,
    ignored: bool,
    content_scanned: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(rules: &'a CompiledRuleSet, root: impl Into<PathBuf>) -> Self {
        Self {
            rules,
            root: root.into(),
        }
    }

    /// Evaluate every path, keeping violations in input order
    pub fn scan_paths(&self, paths: &[String]) -> ScanResult {
        let start_time = Instant::now();

        let reports: Vec<FileReport> = paths.par_iter().map(|p| self.evaluate_file(p)).collect();

        let mut stats = ScanStats {
            files_considered: paths.len(),
            ..ScanStats::default()
        };
        let mut violations = Vec::new();
        for report in reports {
            stats.files_ignored += usize::from(report.ignored);
            stats.files_content_scanned += usize::from(report.content_scanned);
            violations.extend(report.violations);
        }
        stats.scan_duration_ms = start_time.elapsed().as_millis() as u64;

        tracing::debug!(
            "Checked {} files ({} ignored, {} content-scanned) in {}ms, {} violations",
            stats.files_considered,
            stats.files_ignored,
            stats.files_content_scanned,
            stats.scan_duration_ms,
            violations.len()
        );

        ScanResult { violations, stats }
    }

    /// Evaluate a single repository-relative path
    pub fn evaluate(&self, path: &str) -> Vec<Violation> {
        self.evaluate_file(path).violations
    }

    fn evaluate_file(&self, path: &str) -> FileReport {
        let mut report = FileReport::default();

        if self.rules.is_ignored(path) {
            tracing::trace!("{}: ignored", path);
            report.ignored = true;
            return report;
        }

        if let Some(rule) = self.rules.first_disallowed(path) {
            report.violations.push(Violation::new(
                path,
                ViolationKind::Path,
                format!("Path matches disallowed pattern: {}", rule.glob()),
            ));
        }

        let full_path = self.root.join(path);

        let size = match fs::metadata(&full_path) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                // Vanished or unreadable files cannot leak anything
                tracing::trace!("{}: skipping size and content checks: {}", path, e);
                return report;
            }
        };

        if let Some(violation) = self.check_size(path, size) {
            report.violations.push(violation);
        }

        if size <= CONTENT_SCAN_LIMIT_BYTES {
            match self.check_content(path, &full_path) {
                Some(mut violations) => {
                    report.content_scanned = true;
                    report.violations.append(&mut violations);
                }
                None => tracing::trace!("{}: content not scanned", path),
            }
        } else {
            tracing::trace!("{}: {} bytes, too large for content scan", path, size);
        }

        report
    }

    fn check_size(&self, path: &str, size: u64) -> Option<Violation> {
        let limit = self.rules.max_file_size_bytes();
        if size <= limit {
            return None;
        }

        Some(Violation::new(
            path,
            ViolationKind::Size,
            format!(
                "File too large ({} MB > {} MB)",
                format_size_mb(size),
                format_limit_mb(limit)
            ),
        ))
    }

    /// Returns `None` when the file could not be read or is not text
    fn check_content(&self, path: &str, full_path: &Path) -> Option<Vec<Violation>> {
        let bytes = fs::read(full_path).ok()?;
        if !looks_like_text(&bytes) {
            return None;
        }

        let text = String::from_utf8_lossy(&bytes);
        let violations = self
            .rules
            .content_patterns()
            .iter()
            .filter(|pattern| pattern.is_match(&text))
            .map(|pattern| {
                Violation::new(
                    path,
                    ViolationKind::Content,
                    format!("Suspicious content: /{}/", pattern.source()),
                )
            })
            .collect();

        Some(violations)
    }
}

/// Size in MB with two decimals, halves rounded up ("5.13" for 5.125 MB)
fn format_size_mb(bytes: u64) -> String {
    let mb = u128::from(BYTES_PER_MB);
    let hundredths = (u128::from(bytes) * 200 + mb) / (2 * mb);
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Limit in MB, trimmed to at most two decimals ("5", "0.5", "1.25")
fn format_limit_mb(bytes: u64) -> String {
    let formatted = format!("{:.2}", bytes_to_mb(bytes));
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
