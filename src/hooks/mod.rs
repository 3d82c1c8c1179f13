//! Git hook kinds and installation
//!
//! A check always runs on behalf of one hook. The hook decides how the change
//! set is resolved (see [`crate::git::GitRepo::changed_files`]) and how the
//! report is worded.

use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;

pub mod installer;

pub use installer::{FsHookWriter, HookInstaller, HookWriter, InstallOutcome, render_hook_script};

/// Git lifecycle event that triggered a check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum HookKind {
    PreCommit,
    PrePush,
}

impl HookKind {
    pub const ALL: [HookKind; 2] = [HookKind::PreCommit, HookKind::PrePush];

    /// File name of the hook script, also the CLI spelling
    pub fn name(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "pre-commit",
            HookKind::PrePush => "pre-push",
        }
    }

    /// The git command that can skip this hook
    pub fn bypass_command(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "git commit --no-verify",
            HookKind::PrePush => "git push --no-verify",
        }
    }

    /// What the hook blocks, for report headers
    pub fn blocked_action(&self) -> &'static str {
        match self {
            HookKind::PreCommit => "Commit",
            HookKind::PrePush => "Push",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which hook is running, and in which working tree
#[derive(Debug, Clone)]
pub struct HookContext {
    pub kind: HookKind,
    pub root: PathBuf,
}

impl HookContext {
    pub fn new(kind: HookKind, root: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            root: root.into(),
        }
    }
}
