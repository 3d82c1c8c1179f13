use clap::Parser;
use std::process::ExitCode;

use commit_shield::{Cli, Output};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.run() {
        Ok(code) => code,
        Err(e) => {
            Output::new(false, quiet).error(&format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}
