use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing on stderr.
///
/// `RUST_LOG` wins over `level`, which comes from flags or the config file.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}
