use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber, `RUST_LOG` overrides the default `warn` level
///
/// Later calls leave the first subscriber in place
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
