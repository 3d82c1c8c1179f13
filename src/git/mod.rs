//! Git integration layer for commit-shield
//!
//! Read-only access to the repository through git2: locating the working
//! tree, listing staged files and diffing the latest commit. Nothing here
//! writes to the index or the object database.

use anyhow::{Context, Result};
use git2::{ErrorCode, Oid, Repository, RepositoryOpenFlags};
use std::env;
use std::fmt;
use std::path::{Path, PathBuf};

pub mod operations;

/// Object id of the tree with no entries
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbef4904";

/// Base revision for a diff ending at HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffBase {
    Commit(Oid),
    /// HEAD is a root commit; everything in it counts as changed
    EmptyTree,
}

impl fmt::Display for DiffBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffBase::Commit(oid) => write!(f, "{}", oid),
            DiffBase::EmptyTree => write!(f, "{} (empty tree)", EMPTY_TREE_SHA),
        }
    }
}

pub struct GitRepo {
    pub repo: Repository,
}

impl GitRepo {
    /// Find the repository containing `path`.
    ///
    /// The upward search stops at the directories listed in
    /// `GIT_CEILING_DIRECTORIES`, as it does for git itself.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ceilings: Vec<PathBuf> = env::var_os("GIT_CEILING_DIRECTORIES")
            .map(|dirs| env::split_paths(&dirs).collect())
            .unwrap_or_default();
        Self::discover_within(path, &ceilings)
    }

    /// Find the repository containing `path` without searching into or
    /// above any of `ceilings`
    pub fn discover_within<P: AsRef<Path>>(path: P, ceilings: &[PathBuf]) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open_ext(path, RepositoryOpenFlags::empty(), ceilings)
            .with_context(|| format!("No Git repository found at {}", path.display()))?;
        Ok(GitRepo { repo })
    }

    /// Open the repository rooted exactly at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let repo = Repository::open(path)
            .with_context(|| format!("Failed to open Git repository at {}", path.display()))?;
        Ok(GitRepo { repo })
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .context("Repository has no working directory (bare repository)")
    }

    /// The `.git` directory
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Directory hook scripts are read from, honouring `core.hooksPath`
    pub fn hooks_dir(&self) -> Result<PathBuf> {
        let configured = self
            .repo
            .config()
            .ok()
            .and_then(|config| config.get_path("core.hooksPath").ok());

        match configured {
            Some(path) if path.is_absolute() => Ok(path),
            Some(path) => Ok(self.workdir()?.join(path)),
            None => Ok(self.git_dir().join("hooks")),
        }
    }

    /// Commit HEAD points at, or `None` on an unborn branch
    pub fn head_commit_id(&self) -> Result<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => {
                let commit = head
                    .peel_to_commit()
                    .context("Failed to resolve HEAD to a commit")?;
                Ok(Some(commit.id()))
            }
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e).context("Failed to get HEAD reference"),
        }
    }

    /// First parent of HEAD, or the empty tree for a root commit
    pub fn parent_of_head(&self) -> Result<DiffBase> {
        let head = self
            .repo
            .head()
            .and_then(|head| head.peel_to_commit())
            .context("Failed to resolve HEAD to a commit")?;

        if head.parent_count() == 0 {
            return Ok(DiffBase::EmptyTree);
        }
        let parent = head.parent_id(0).context("Failed to resolve HEAD^")?;
        Ok(DiffBase::Commit(parent))
    }
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}
