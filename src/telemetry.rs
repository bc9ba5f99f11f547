//! Telemetry helpers for the CLI and for applications embedding `shot-chart`.
//!
//! Library code only emits `tracing` events. Installing a subscriber stays
//! explicit: call `init_default_tracing`/`init_tracing` or wire your own.

/// Initializes a default `tracing` subscriber at `info` level when the
/// `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing("info")
}

/// Same as `init_default_tracing` with a caller-chosen fallback directive.
///
/// `RUST_LOG` still wins when it is set.
#[must_use]
pub fn init_tracing(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}

/// Maps a `-v` repetition count to a filter directive.
#[must_use]
pub fn directive_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
