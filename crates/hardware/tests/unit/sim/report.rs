use spim_core::sim::report::Severity;
use spim_core::sim::{CollectingReporter, Diagnostic, Reporter, StderrReporter};
use spim_core::{report_error, report_run_error};

#[test]
fn collecting_reporter_records_severity() {
    let mut reporter = CollectingReporter::new();
    let reporter_ref = &mut reporter;

    report_error!(reporter_ref, "bad value {}", 7);
    report_run_error!(reporter_ref, "at 0x{:08x}", 0x40_0000);

    assert_eq!(
        reporter.diagnostics(),
        vec![
            Diagnostic {
                severity: Severity::Error,
                message: "bad value 7".to_string(),
            },
            Diagnostic {
                severity: Severity::RunError,
                message: "at 0x00400000".to_string(),
            },
        ]
    );
}

#[test]
fn clones_share_one_log() {
    let handle = CollectingReporter::new();
    let mut boxed: Box<dyn Reporter> = Box::new(handle.clone());

    report_run_error!(boxed, "shared");

    assert_eq!(handle.diagnostics().len(), 1);
    assert_eq!(handle.drain().len(), 1);
    assert!(handle.diagnostics().is_empty());
}

#[test]
fn stderr_reporter_accepts_both_severities() {
    let mut reporter = StderrReporter::new(true);
    let reporter_ref = &mut reporter;

    report_error!(reporter_ref, "suppressed when quiet");
    report_run_error!(reporter_ref, "always printed");
}
