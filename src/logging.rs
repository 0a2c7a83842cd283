use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Install the global subscriber for the `todo` binary.
///
/// `RUST_LOG` wins when set; otherwise only warnings are shown, or this
/// crate's debug events with `verbose`. Events go to stderr so stdout stays
/// machine-readable in JSON mode.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "todo_store=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(true)
            .without_time(),
    );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
