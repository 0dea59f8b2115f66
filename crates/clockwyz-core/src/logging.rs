//! Subscriber setup for the `tracing` events the core emits.
//!
//! The core only emits events; binaries pick where they go by calling
//! [`init_subscriber`] once at startup.

use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor a flag says otherwise.
pub const DEFAULT_LEVEL: &str = "warn";

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` wins over `level` when set. Calling this twice is a no-op.
pub fn init_subscriber(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_harmless() {
        init_subscriber(DEFAULT_LEVEL);
        init_subscriber("debug");
        tracing::warn!("still logging");
    }
}
