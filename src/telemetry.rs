//! Logging initialization for the binary.
//!
//! Filtering follows `RUST_LOG` (default `info`). Output goes to stderr so
//! stdout stays free for `--print-save`.

use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; JSON lines when `json` is set.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("warning: logging already initialized: {e}");
    }
}
