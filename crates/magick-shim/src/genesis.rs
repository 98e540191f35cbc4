use std::ptr;
use std::sync::Once;

use crate::sys;

static GENESIS: Once = Once::new();

/// Initialize MagickCore once per process.
///
/// Every constructor in this crate calls this; the pixel accessors do not need it.
pub fn genesis() {
    GENESIS.call_once(|| {
        // SAFETY: a null client path is accepted; runs exactly once.
        unsafe { sys::MagickCoreGenesis(ptr::null(), sys::MagickFalse) };
        tracing::info!(
            "MagickCore initialized (Q{}{})",
            crate::quantum::QUANTUM_DEPTH,
            if crate::quantum::HDRI { " HDRI" } else { "" }
        );
    });
}
