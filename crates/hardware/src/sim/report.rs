//! Diagnostic reporting.
//!
//! Three severities exist. `Error` and `RunError` are recoverable: the message
//! is printed and control returns to the caller. `Fatal` terminates the host
//! process through [`fatal_error`]; the library never raises it itself.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{error, warn};

/// Severity of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Recoverable; printed and execution continues or pauses at the host's discretion.
    Error,
    /// Raised while stepping (illegal instruction, address error, unhandled exception).
    RunError,
    /// Unrecoverable; the process exits.
    Fatal,
}

/// A recorded diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity the message was raised with.
    pub severity: Severity,
    /// Formatted message text.
    pub message: String,
}

/// Sink for recoverable diagnostics.
pub trait Reporter: Send {
    /// Reports a recoverable error.
    fn error(&mut self, args: fmt::Arguments<'_>);

    /// Reports an error raised while executing the program.
    fn run_error(&mut self, args: fmt::Arguments<'_>);
}

/// Reports a recoverable error through a [`Reporter`], formatting the message once.
#[macro_export]
macro_rules! report_error {
    ($reporter:expr, $($arg:tt)*) => {
        $crate::sim::report::Reporter::error(&mut *$reporter, format_args!($($arg)*))
    };
}

/// Reports a run-time error through a [`Reporter`], formatting the message once.
#[macro_export]
macro_rules! report_run_error {
    ($reporter:expr, $($arg:tt)*) => {
        $crate::sim::report::Reporter::run_error(&mut *$reporter, format_args!($($arg)*))
    };
}

/// Writes diagnostics to stderr and mirrors them as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct StderrReporter {
    quiet: bool,
}

impl StderrReporter {
    /// Creates a reporter. With `quiet` set, `Error` diagnostics are traced but not printed.
    pub const fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

fn print_stderr(message: impl fmt::Display) {
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{message}");
    let _ = stderr.flush();
}

impl Reporter for StderrReporter {
    fn error(&mut self, args: fmt::Arguments<'_>) {
        warn!(diagnostic = %args, "error");
        if !self.quiet {
            print_stderr(args);
        }
    }

    fn run_error(&mut self, args: fmt::Arguments<'_>) {
        warn!(diagnostic = %args, "run error");
        print_stderr(args);
    }
}

/// Records diagnostics in memory.
///
/// Clones share one log, so a host can drain it while the simulator holds another handle.
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    log: Arc<Mutex<Vec<Diagnostic>>>,
}

impl CollectingReporter {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, severity: Severity, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        warn!(?severity, diagnostic = %message, "recorded");
        if let Ok(mut log) = self.log.lock() {
            log.push(Diagnostic { severity, message });
        }
    }

    /// Returns a copy of every diagnostic recorded so far.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Removes and returns every diagnostic recorded so far.
    pub fn drain(&self) -> Vec<Diagnostic> {
        self.log
            .lock()
            .map(|mut log| std::mem::take(&mut *log))
            .unwrap_or_default()
    }
}

impl Reporter for CollectingReporter {
    fn error(&mut self, args: fmt::Arguments<'_>) {
        self.push(Severity::Error, args);
    }

    fn run_error(&mut self, args: fmt::Arguments<'_>) {
        self.push(Severity::RunError, args);
    }
}

/// Prints an unrecoverable error to stderr and exits with status 1.
///
/// The arguments are formatted exactly once.
pub fn fatal_error(args: fmt::Arguments<'_>) -> ! {
    let message = args.to_string();
    error!(diagnostic = %message, "fatal error");
    print_stderr(&message);
    std::process::exit(1)
}
