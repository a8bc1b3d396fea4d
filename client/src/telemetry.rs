//! Tracing setup for native hosts
//!
//! In the browser the WASM bindings log to the console instead.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Calling twice is harmless.
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hazard_report_client=debug,reqwest=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
