use tracing_subscriber::EnvFilter;

/// Route `log` records from the core library into a stderr fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks debug over info.
pub fn init(verbose: bool) -> Result<(), String> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to install tracing subscriber: {}", e))?;
    tracing_log::LogTracer::init().map_err(|e| format!("Failed to bridge log records: {}", e))?;
    Ok(())
}
