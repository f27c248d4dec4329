//! Opt-in `tracing` subscriber setup.
//!
//! The engine itself only emits events: swaps and catalog changes at
//! `debug`, tick enumeration at `trace`, and clamped fits at `warn`. Hosts
//! that already install a subscriber can ignore this module.

/// Filter used when `RUST_LOG` is unset: engine swaps, everything else warn.
pub const DEFAULT_FILTER: &str = "warn,time_ruler=debug";

/// Installs a compact fmt subscriber filtered by `RUST_LOG` or [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller supplied fallback filter.
#[must_use]
pub fn init_tracing_with(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(fallback_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
