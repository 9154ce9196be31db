use crate::config::LoggingConfig;

/// Route the `log` facade to stderr and, if configured, a log file
pub fn init_logging(config: &LoggingConfig) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(config.level_filter())
        .chain(std::io::stderr());

    if let Some(path) = &config.log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}
