//! Initialize commit-shield in a repository
//!
//! Writes a starter `commit-shield.config.json` holding the default rules and
//! installs the `pre-commit` and `pre-push` hooks.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::Output;
use crate::config::{CONFIG_FILE_NAME, ConfigOverrides, ShieldConfig};
use crate::git::GitRepo;
use crate::hooks::{FsHookWriter, HookInstaller, HookKind, InstallOutcome};

#[derive(Args)]
pub struct InitArgs {
    /// Only write the config file, do not install git hooks
    #[arg(long)]
    pub no_hooks: bool,

    /// Replace existing hooks that were not written by commit-shield
    #[arg(short, long)]
    pub force: bool,
}

pub fn execute(args: InitArgs, dir: &Path, output: &Output) -> Result<ExitCode> {
    let repo = match GitRepo::discover(dir) {
        Ok(repo) => Some(repo),
        // The config file alone does not need a repository
        Err(e) if args.no_hooks => {
            tracing::debug!("{:#}", e);
            None
        }
        Err(e) => return Err(e.context("commit-shield init must run inside a Git repository")),
    };

    let root = match &repo {
        Some(repo) => repo.workdir()?.to_path_buf(),
        None => dir.to_path_buf(),
    };

    write_starter_config(&root, output)?;

    match repo {
        Some(repo) if !args.no_hooks => install_hooks(&repo, args.force, output)?,
        _ => output.info("Skipping hook installation (--no-hooks)"),
    }

    output.success("commit-shield initialized.");
    Ok(ExitCode::SUCCESS)
}

fn write_starter_config(root: &Path, output: &Output) -> Result<()> {
    let path = root.join(CONFIG_FILE_NAME);
    if path.exists() {
        output.info(&format!("{} already exists, leaving it untouched", CONFIG_FILE_NAME));
        return Ok(());
    }

    let mut contents = ConfigOverrides::from(&ShieldConfig::default()).to_json_pretty()?;
    contents.push('\n');
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    output.success(&format!("Wrote {}", path.display()));
    Ok(())
}

fn install_hooks(repo: &GitRepo, force: bool, output: &Output) -> Result<()> {
    let installer = HookInstaller::new(repo.hooks_dir()?, FsHookWriter);

    for outcome in installer.install(&HookKind::ALL, force)? {
        match outcome {
            InstallOutcome::Installed(path) => {
                output.success(&format!("Installed hook → {}", path.display()))
            }
            InstallOutcome::Replaced(path) => {
                output.success(&format!("Updated hook → {}", path.display()))
            }
            InstallOutcome::SkippedForeign(path) => output.warning(&format!(
                "{} exists and was not written by commit-shield; rerun with --force to replace it",
                path.display()
            )),
        }
    }

    Ok(())
}
