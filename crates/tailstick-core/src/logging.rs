//! Tracing subscriber setup for hosts.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber.
///
/// `debug` widens the default filter so the engine's decision-level events
/// show up; an explicit `RUST_LOG` always wins.
pub fn init(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
