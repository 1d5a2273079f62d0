//! Crash-report context tracking.
//!
//! Each pipeline stage marks its phase and the file it is working on:
//!
//! ```ignore
//! use tplcheck::observability::{set_phase, set_current_file, CheckPhase};
//!
//! let _phase = set_phase(CheckPhase::Compile);
//! for file in files {
//!     let _file_guard = set_current_file(&file);
//!     compile(&file)?;
//! }
//! ```
//!
//! If anything panics, the hook installed by [`install_panic_hook`] reports
//! that context.

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, get_progress, increment_processed, set_current_file, set_phase,
    set_progress, CheckContext, CheckPhase, ContextGuard,
};
pub use panic_hook::install_panic_hook;
