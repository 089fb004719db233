//! Operator-facing trace output
//!
//! Purely presentational. Nothing here feeds back into a verdict.

use colored::Colorize;

/// Prints the step trace to stdout unless silenced
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn banner(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!("{}", title.blue().bold());
        println!("{}", "=".repeat(60));
    }

    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{} {}...", "Testing".cyan(), title.white().bold());
        }
    }

    pub fn detail(&self, label: &str, value: &str) {
        if !self.quiet {
            println!("   {}: {}", label, value.dimmed());
        }
    }

    pub fn pass(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    pub fn fail(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✗".red(), message);
        }
    }

    pub fn warn(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "!".yellow(), message);
        }
    }

    pub fn note(&self, message: &str) {
        if !self.quiet {
            println!("   {}", message);
        }
    }

    pub fn rule(&self) {
        if !self.quiet {
            println!("\n{}", "=".repeat(60));
        }
    }
}
