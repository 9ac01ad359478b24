//! Process setup shared by the binary and integration tests.

/// Initialize logging with tracing_subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` switches the crate to debug.
pub fn init_logging(verbose: bool) {
    let crate_level = if verbose { "web_analyzer=debug" } else { "web_analyzer=info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("warn,reqwest=warn,{crate_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
