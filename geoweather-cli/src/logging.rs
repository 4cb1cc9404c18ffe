use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Diagnostics go to stderr so stdout stays clean for the view or JSON.
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
