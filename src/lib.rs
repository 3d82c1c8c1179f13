//! # commit-shield
//!
//! A small pre-commit / pre-push guard. Before a commit or push completes it
//! checks the changed files against path, filename, size and content rules and
//! blocks the operation when any of them match. The default rules catch
//! private keys, service-account credentials, common vendor tokens, `.env`
//! files, build output and oversized artifacts.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a starter config and install the git hooks
//! commit-shield init
//!
//! # Run the checks by hand
//! commit-shield check pre-commit
//! ```
//!
//! Rules are customised per repository in `commit-shield.config.json`.

pub mod cli;
pub mod config;
pub mod git;
pub mod hooks;
pub mod scanner;
pub mod shared;

pub use cli::{Cli, Output};
pub use config::ShieldConfig;
pub use hooks::{HookContext, HookKind};
pub use scanner::{CompiledRuleSet, ScanResult, Scanner, Violation};

/// Result type alias for commit-shield operations
pub type Result<T> = anyhow::Result<T>;

/// Run every check for `context`.
///
/// Loads the repository configuration, compiles the rules, resolves the
/// change set for the hook and evaluates each file. Violations are returned as
/// data; only environment problems (no repository, invalid content pattern)
/// are errors.
pub fn run_check(context: &HookContext) -> Result<ScanResult> {
    let repo = git::GitRepo::discover(&context.root)?;
    let root = repo.workdir()?.to_path_buf();

    let config = ShieldConfig::load(&root);
    let rules = CompiledRuleSet::build(&config)?;

    let files = repo.changed_files(context.kind)?;
    tracing::info!("Checking {} files for {}", files.len(), context.kind);

    Ok(Scanner::new(&rules, root).scan_paths(&files))
}
