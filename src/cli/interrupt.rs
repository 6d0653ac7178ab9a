//! Ctrl-C handling
//!
//! The first interrupt asks running walks to stop after the current folder;
//! the second one exits immediately.

use crate::scanner::CancelFlag;

/// Exit status used when the process is killed by a second interrupt
const INTERRUPTED_EXIT_CODE: i32 = 130;

/// Spawn the signal listener and return the flag it sets
///
/// Must be called from within a tokio runtime.
pub fn install() -> CancelFlag {
    let cancel = CancelFlag::new();
    let flag = cancel.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Cannot listen for Ctrl-C: {}", e);
            return;
        }
        flag.cancel();
        eprintln!("\nInterrupted by user, stopping after the current folder (Ctrl-C again to abort)");

        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    });

    cancel
}
