use crate::config::LoggingConfig;
use anyhow::Context;
use log::LevelFilter;

/// Level from config, raised one step per `-v`.
pub fn effective_level(config: &LoggingConfig, verbose: u8) -> anyhow::Result<LevelFilter> {
    let base: LevelFilter = config
        .level()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", config.level()))?;

    let raised = (0..verbose).fold(base, |level, _| match level {
        LevelFilter::Off => LevelFilter::Error,
        LevelFilter::Error => LevelFilter::Warn,
        LevelFilter::Warn => LevelFilter::Info,
        LevelFilter::Info => LevelFilter::Debug,
        LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
    });
    Ok(raised)
}

pub fn setup_logging(config: &LoggingConfig, verbose: u8) -> anyhow::Result<()> {
    let level = effective_level(config, verbose)?;
    let log_file = std::env::var(common::LOG_ENV_VAR)
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| config.output.clone());

    // stdout carries rendered results only
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d][%H:%M:%S"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr());

    if let Some(path) = log_file {
        let file = fern::log_file(&path)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;
        dispatch = dispatch.chain(file);
    }

    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_raises_level() {
        let config = LoggingConfig::default();
        assert_eq!(effective_level(&config, 0).unwrap(), LevelFilter::Warn);
        assert_eq!(effective_level(&config, 1).unwrap(), LevelFilter::Info);
        assert_eq!(effective_level(&config, 5).unwrap(), LevelFilter::Trace);
    }

    #[test]
    fn test_invalid_level() {
        let config = LoggingConfig { level: Some("loud".to_string()), output: None };
        assert!(effective_level(&config, 0).is_err());
    }
}
