//! Tracing subscriber setup for the binary.

use tracing_subscriber::filter::EnvFilter;

/// Install a stderr subscriber.
///
/// `RUST_LOG` wins when set. Otherwise the crate logs at `warn`, or `debug`
/// with `verbose`; HTTP internals stay at `warn`.
pub fn init(verbose: bool) {
    let crate_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,headshot={crate_level},reqwest=warn,hyper=warn"))
    });

    // A second init (tests, embedding) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
