//! Console output for commit-shield
//!
//! Status lines go to stdout, anything describing a blocked operation goes to
//! stderr so it shows up in git's hook output.

use console::style;

use crate::hooks::HookKind;
use crate::scanner::Violation;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), style(message).green());
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red(), message);
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    /// Print every violation with a header and the bypass/config hints
    pub fn violations(&self, kind: HookKind, violations: &[Violation], config_file: &str) {
        let count = violations.len();
        eprintln!(
            "\n{} {}",
            style("✖").red().bold(),
            style(format!(
                "{} blocked by commit-shield ({} issue{})",
                kind.blocked_action(),
                count,
                if count == 1 { "" } else { "s" }
            ))
            .red()
            .bold()
        );

        for violation in violations {
            eprintln!(
                "  {} {} — {}",
                style("•").red(),
                style(&violation.file).bold(),
                violation.rule
            );
        }

        eprintln!(
            "\n{} {}",
            style("Fix the issues, or bypass with").yellow(),
            kind.bypass_command()
        );
        eprintln!("{} {}", style("Customize rules in").cyan(), config_file);
    }
}
