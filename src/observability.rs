//! Logging setup for binaries and tests.
//!
//! The library itself only logs through the `log` facade; hosts that want
//! output call [`init_logging`] once at startup. Respects `RUST_LOG`.

/// Initializes `env_logger`. Safe to call more than once; later calls are
/// ignored, which keeps test binaries from panicking on double init.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .try_init();
}
