//! Thread-local context tracking for crash reports.
//!
//! Records which pipeline phase is running and which file is being handled,
//! so a panic can be reported with enough context to reproduce it. Context
//! guards use RAII to restore the previous state on drop.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static FILES_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static FILES_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<CheckContext> = const { RefCell::new(CheckContext::new()) };
}

/// Snapshot of what the checker was doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckContext {
    pub phase: Option<CheckPhase>,
    pub current_file: Option<PathBuf>,
}

impl CheckContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
        }
    }
}

/// Stages of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckPhase {
    /// Resolving input directories and enumerating templates
    Discovery,
    /// Compiling templates to artifacts
    Compile,
    /// Running the linter over compiled artifacts
    Lint,
    /// Rendering the error report
    Report,
}

impl std::fmt::Display for CheckPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovery => write!(f, "discovery"),
            Self::Compile => write!(f, "compile"),
            Self::Lint => write!(f, "lint"),
            Self::Report => write!(f, "report"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: CheckContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase until the returned guard drops.
#[must_use]
pub fn set_phase(phase: CheckPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the file being processed until the returned guard drops.
#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_file = Some(path.into());
        ContextGuard { previous }
    })
}

pub fn set_progress(processed: usize, total: usize) {
    FILES_PROCESSED.store(processed, Ordering::Relaxed);
    FILES_TOTAL.store(total, Ordering::Relaxed);
}

pub fn increment_processed() {
    FILES_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> CheckContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// (processed, total) file counters.
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        FILES_PROCESSED.load(Ordering::Relaxed),
        FILES_TOTAL.load(Ordering::Relaxed),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_restore_previous_context() {
        {
            let _phase = set_phase(CheckPhase::Compile);
            {
                let _file = set_current_file("/app/a.latte");
                let ctx = get_current_context();
                assert_eq!(ctx.phase, Some(CheckPhase::Compile));
                assert_eq!(ctx.current_file, Some(PathBuf::from("/app/a.latte")));
            }
            let ctx = get_current_context();
            assert_eq!(ctx.phase, Some(CheckPhase::Compile));
            assert_eq!(ctx.current_file, None);
        }
        assert_eq!(get_current_context(), CheckContext::new());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(CheckPhase::Discovery.to_string(), "discovery");
        assert_eq!(CheckPhase::Lint.to_string(), "lint");
    }
}
