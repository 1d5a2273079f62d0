//! Custom panic hook for structured crash reports.
//!
//! A panic inside the checker is a bug, never a template problem. The report
//! says which phase and file were being handled so the crash can be
//! reproduced.

use super::context::{get_current_context, get_progress, CheckContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the crash report hook. Call once, early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("{}", crash_report(info, &get_current_context(), get_progress()));
    }));
}

fn crash_report(
    info: &PanicHookInfo<'_>,
    context: &CheckContext,
    progress: (usize, usize),
) -> String {
    let message = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    let location = info
        .location()
        .map(|l| format!("{}:{}", l.file(), l.line()))
        .unwrap_or_else(|| "unknown".to_string());

    let mut report = String::new();
    report.push_str("\n=== TPLCHECK CRASH REPORT ===\n");
    report.push_str(&format!("Version:  {}\n", VERSION));
    report.push_str(&format!("Platform: {}\n", std::env::consts::OS));
    report.push_str(&format!("Panic:    {}\n", message));
    report.push_str(&format!("Location: {}\n", location));
    report.push_str(&describe_context(context, progress));
    report.push_str("Set RUST_BACKTRACE=1 for a backtrace.\n");
    report
}

fn describe_context(context: &CheckContext, (processed, total): (usize, usize)) -> String {
    let mut out = String::new();
    if let Some(phase) = context.phase {
        out.push_str(&format!("Phase:    {}\n", phase));
    }
    if let Some(file) = &context.current_file {
        out.push_str(&format!("File:     {}\n", file.display()));
    }
    if total > 0 {
        out.push_str(&format!("Progress: {}/{} files\n", processed, total));
    }
    out
}
