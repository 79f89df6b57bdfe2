use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `debug` and
/// `warn` for the PyPack crates. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let fallback = if verbose {
        "pp_core=debug,pp_factory=debug,pypack=debug,pypack_gui=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
