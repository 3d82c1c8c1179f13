use anyhow::Result;
use clap::Args;
use std::path::Path;
use std::process::ExitCode;

use crate::cli::Output;
use crate::config::CONFIG_FILE_NAME;
use crate::hooks::{HookContext, HookKind};

#[derive(Args)]
pub struct CheckArgs {
    /// Hook the check runs for
    #[arg(value_enum, default_value_t = HookKind::PreCommit)]
    pub hook: HookKind,
}

pub fn execute(args: CheckArgs, dir: &Path, output: &Output) -> Result<ExitCode> {
    let context = HookContext::new(args.hook, dir);
    let result = crate::run_check(&context)?;

    output.verbose(&format!(
        "{} files considered, {} ignored, {} content-scanned in {}ms",
        result.stats.files_considered,
        result.stats.files_ignored,
        result.stats.files_content_scanned,
        result.stats.scan_duration_ms
    ));

    if result.is_clean() {
        output.success("commit-shield checks passed");
        return Ok(ExitCode::SUCCESS);
    }

    output.violations(context.kind, &result.violations, CONFIG_FILE_NAME);
    Ok(ExitCode::FAILURE)
}
