//! Logging setup for the command line tool.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install a global tracing subscriber that writes to stderr.
///
/// The filter is read from the `RUST_LOG` environment variable when it is
/// set. Otherwise `info` and above are logged, or `debug` and above when
/// `verbose` is set. Logs go to stderr so that reports written to stdout can
/// be piped elsewhere.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    if let Err(error) = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .try_init()
    {
        eprintln!("Could not set up logging: {error}");
    }
}
