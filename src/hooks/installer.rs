//! Hook script installation
//!
//! Script text comes from [`render_hook_script`]; every filesystem write goes
//! through a [`HookWriter`] so installs can be exercised without touching a
//! real `.git/hooks` directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::HookKind;

/// Marker line identifying scripts written by commit-shield
pub const HOOK_MARKER: &str = "# installed by commit-shield";

/// Render the POSIX shell script for `kind`
pub fn render_hook_script(kind: HookKind) -> String {
    format!(
        r#"#!/bin/sh
{marker}
# Remove this file or run `{bypass}` to skip the check.
exec commit-shield check {hook} "$@"
"#,
        marker = HOOK_MARKER,
        bypass = kind.bypass_command(),
        hook = kind.name(),
    )
}

/// Filesystem access needed by the installer
pub trait HookWriter {
    /// Current contents of the hook at `path`, if any
    fn read_hook(&self, path: &Path) -> Option<String>;

    /// Write an executable hook script
    fn write_hook(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Writes hooks to disk and marks them executable
pub struct FsHookWriter;

impl HookWriter for FsHookWriter {
    fn read_hook(&self, path: &Path) -> Option<String> {
        fs::read_to_string(path).ok()
    }

    fn write_hook(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(hooks_dir) = path.parent() {
            fs::create_dir_all(hooks_dir).context("Failed to create hooks directory")?;
        }

        fs::write(path, contents)
            .with_context(|| format!("Failed to write hook file {}", path.display()))?;

        // Make hook executable on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)
                .context("Failed to get hook file metadata")?
                .permissions();
            perms.set_mode(0o755);
            fs::set_permissions(path, perms).context("Failed to set hook file permissions")?;
        }

        Ok(())
    }
}

/// What happened to one hook during install
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed(PathBuf),
    /// A previous commit-shield hook, or a foreign one with `force`
    Replaced(PathBuf),
    /// A hook we did not write is in the way
    SkippedForeign(PathBuf),
}

pub struct HookInstaller<W: HookWriter> {
    hooks_dir: PathBuf,
    writer: W,
}

impl<W: HookWriter> HookInstaller<W> {
    pub fn new(hooks_dir: impl Into<PathBuf>, writer: W) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
            writer,
        }
    }

    /// Install a script for each hook kind, one outcome per kind
    pub fn install(&self, kinds: &[HookKind], force: bool) -> Result<Vec<InstallOutcome>> {
        kinds
            .iter()
            .map(|&kind| self.install_one(kind, force))
            .collect()
    }

    fn install_one(&self, kind: HookKind, force: bool) -> Result<InstallOutcome> {
        let path = self.hooks_dir.join(kind.name());

        let outcome = match self.writer.read_hook(&path) {
            None => InstallOutcome::Installed(path.clone()),
            Some(existing) if existing.contains(HOOK_MARKER) || force => {
                InstallOutcome::Replaced(path.clone())
            }
            Some(_) => {
                tracing::debug!("Leaving existing {} hook untouched", kind);
                return Ok(InstallOutcome::SkippedForeign(path));
            }
        };

        self.writer.write_hook(&path, &render_hook_script(kind))?;
        tracing::debug!("Wrote {} hook to {}", kind, path.display());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory hooks directory
    #[derive(Default)]
    struct MemoryWriter {
        files: RefCell<HashMap<PathBuf, String>>,
    }

    impl HookWriter for &MemoryWriter {
        fn read_hook(&self, path: &Path) -> Option<String> {
            self.files.borrow().get(path).cloned()
        }

        fn write_hook(&self, path: &Path, contents: &str) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_render_hook_script() {
        let script = render_hook_script(HookKind::PrePush);
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(HOOK_MARKER));
        assert!(script.contains("exec commit-shield check pre-push \"$@\""));
        assert!(!script.contains("pre-commit"));

        let script = render_hook_script(HookKind::PreCommit);
        assert!(script.contains("check pre-commit"));
    }

    #[test]
    fn test_install_into_empty_dir() {
        let writer = MemoryWriter::default();
        let installer = HookInstaller::new("/repo/.git/hooks", &writer);

        let outcomes = installer.install(&HookKind::ALL, false).unwrap();
        assert_eq!(
            outcomes,
            vec![
                InstallOutcome::Installed(PathBuf::from("/repo/.git/hooks/pre-commit")),
                InstallOutcome::Installed(PathBuf::from("/repo/.git/hooks/pre-push")),
            ]
        );

        let files = writer.files.borrow();
        assert_eq!(
            files[Path::new("/repo/.git/hooks/pre-push")],
            render_hook_script(HookKind::PrePush)
        );
    }

    #[test]
    fn test_reinstall_replaces_own_hook() {
        let writer = MemoryWriter::default();
        let installer = HookInstaller::new("/hooks", &writer);
        installer.install(&[HookKind::PreCommit], false).unwrap();

        let outcomes = installer.install(&[HookKind::PreCommit], false).unwrap();
        assert_eq!(
            outcomes,
            vec![InstallOutcome::Replaced(PathBuf::from("/hooks/pre-commit"))]
        );
    }

    #[test]
    fn test_foreign_hook_needs_force() {
        let writer = MemoryWriter::default();
        let foreign = "#!/bin/sh\nnpx lint-staged\n";
        writer
            .files
            .borrow_mut()
            .insert(PathBuf::from("/hooks/pre-commit"), foreign.to_string());
        let installer = HookInstaller::new("/hooks", &writer);

        let outcomes = installer.install(&[HookKind::PreCommit], false).unwrap();
        assert_eq!(
            outcomes,
            vec![InstallOutcome::SkippedForeign(PathBuf::from("/hooks/pre-commit"))]
        );
        assert_eq!(writer.files.borrow()[Path::new("/hooks/pre-commit")], foreign);

        let outcomes = installer.install(&[HookKind::PreCommit], true).unwrap();
        assert_eq!(
            outcomes,
            vec![InstallOutcome::Replaced(PathBuf::from("/hooks/pre-commit"))]
        );
        assert!(writer.files.borrow()[Path::new("/hooks/pre-commit")].contains(HOOK_MARKER));
    }

    #[cfg(unix)]
    #[test]
    fn test_fs_writer_makes_hook_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("hooks").join("pre-commit");
        FsHookWriter
            .write_hook(&path, &render_hook_script(HookKind::PreCommit))
            .unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
        assert_eq!(FsHookWriter.read_hook(&path), Some(render_hook_script(HookKind::PreCommit)));
    }
}
