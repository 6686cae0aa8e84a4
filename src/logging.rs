//! Logging setup for the `envi` binary.
//!
//! Logs go to stderr so `get` output on stdout stays pipeable. `RUST_LOG`
//! takes precedence; otherwise the level comes from `-v`/`-q`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Map `-v` count and `-q` to a default filter directive.
pub fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbosity: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(7, false), "trace");
    }

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(3, true), "error");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(0, false);
        init(2, false);
    }
}
