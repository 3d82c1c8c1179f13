use anyhow::{Context, Result, bail};
use git2::{Delta, Diff, DiffFindOptions, Index, Oid, Tree};
use std::collections::HashSet;
use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::{DiffBase, GitRepo};
use crate::hooks::HookKind;

/// Environment variable git uses to name the index a commit is built from
pub const INDEX_FILE_ENV: &str = "GIT_INDEX_FILE";

impl GitRepo {
    /// Repository-relative paths to check for the given hook.
    ///
    /// Staged files come first. When nothing is staged and the hook is
    /// `pre-push`, the files changed by the latest commit are used instead.
    pub fn changed_files(&self, kind: HookKind) -> Result<Vec<String>> {
        let staged = self.staged_files()?;
        if !staged.is_empty() {
            tracing::debug!("{} staged files", staged.len());
            return Ok(staged);
        }

        if kind != HookKind::PrePush {
            tracing::debug!("Nothing staged");
            return Ok(Vec::new());
        }

        let head = self
            .head_commit_id()?
            .context("Nothing staged and HEAD has no commits yet")?;
        let base = self.parent_of_head()?;
        tracing::debug!("Nothing staged, falling back to {}..{}", base, head);

        self.files_changed_between(base, head)
    }

    /// Files staged for the next commit (added, modified, copied or renamed)
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let index = self.commit_index()?;
        self.staged_files_in(&index)
    }

    /// Files that differ between HEAD and `index`
    pub fn staged_files_in(&self, index: &Index) -> Result<Vec<String>> {
        let head_tree = match self.head_commit_id()? {
            Some(oid) => Some(self.commit_tree(oid)?),
            None => None,
        };

        let diff = self
            .repo
            .diff_tree_to_index(head_tree.as_ref(), Some(index), None)
            .context("Failed to diff HEAD against the index")?;

        collect_changed_paths(diff)
    }

    /// The index the next commit is built from.
    ///
    /// `git commit -a` and `git commit <paths>` run hooks against a temporary
    /// index named by `GIT_INDEX_FILE`; libgit2 only reads `.git/index` on its
    /// own.
    fn commit_index(&self) -> Result<Index> {
        let Some(value) = env::var_os(INDEX_FILE_ENV).filter(|v| !v.is_empty()) else {
            return self.repo.index().context("Failed to read the index");
        };

        let cwd = env::current_dir().context("Failed to get current directory")?;
        let path = resolve_index_file(&value, &cwd);
        if !path.is_file() {
            bail!("{} points at a missing index: {}", INDEX_FILE_ENV, path.display());
        }

        tracing::debug!("Reading index from {}", path.display());
        Index::open(&path)
            .with_context(|| format!("Failed to read the index at {}", path.display()))
    }

    /// Files changed between `base` and the commit `head`
    pub fn files_changed_between(&self, base: DiffBase, head: Oid) -> Result<Vec<String>> {
        let base_tree = match base {
            DiffBase::Commit(oid) => Some(self.commit_tree(oid)?),
            DiffBase::EmptyTree => None,
        };
        let head_tree = self.commit_tree(head)?;

        let diff = self
            .repo
            .diff_tree_to_tree(base_tree.as_ref(), Some(&head_tree), None)
            .with_context(|| format!("Failed to diff {}..{}", base, head))?;

        collect_changed_paths(diff)
    }

    fn commit_tree(&self, oid: Oid) -> Result<Tree<'_>> {
        self.repo
            .find_commit(oid)
            .and_then(|commit| commit.tree())
            .with_context(|| format!("Failed to read tree of commit {}", oid))
    }
}

/// `GIT_INDEX_FILE` value as a path, relative values taken from `cwd`
fn resolve_index_file(value: &OsStr, cwd: &Path) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// New-side paths of every non-deletion delta, deduplicated in diff order
fn collect_changed_paths(mut diff: Diff<'_>) -> Result<Vec<String>> {
    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true).copies(true);
    diff.find_similar(Some(&mut find_opts))
        .context("Failed to detect renames")?;

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for delta in diff.deltas() {
        if !matches!(
            delta.status(),
            Delta::Added | Delta::Modified | Delta::Copied | Delta::Renamed
        ) {
            continue;
        }

        if let Some(path) = delta.new_file().path() {
            let path = path.to_string_lossy().into_owned();
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    Ok(files)
}
