/// Breakpoint set.
pub mod breakpoints;


/// Program images and ELF loading.
pub mod loader;

/// Diagnostic reporters.
pub mod report;
