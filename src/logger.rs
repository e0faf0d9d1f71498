use colored::Colorize;

/// Log sink injected into the orchestrator.
///
/// Replaces any process-global logging state: whoever constructs the
/// orchestrator decides where messages go.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Colored stderr logger; `verbose` gates debug output.
pub struct TerminalLogger {
    pub verbose: bool,
}

impl Logger for TerminalLogger {
    fn info(&self, message: &str) {
        eprintln!("  {} {}", "→".cyan(), message);
    }

    fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("  {} {}", "·".dimmed(), message.dimmed());
        }
    }

    fn error(&self, message: &str) {
        eprintln!("  {} {}", "✗".red().bold(), message);
    }
}

/// Discards everything; used under `--quiet`.
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn info(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
