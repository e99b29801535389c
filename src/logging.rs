use tracing::{debug, Level};

use crate::config::{LogFormat, LoggingConfig};

/// Install the global tracing subscriber. Output goes to stderr.
///
/// Returns false when another subscriber was already installed.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let level = config.level.parse::<Level>().unwrap_or(Level::WARN);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr);

    let installed = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    match installed {
        Ok(()) => true,
        Err(err) => {
            debug!(error = %err, "keeping the existing tracing subscriber");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        let config = LoggingConfig::default();
        init_logging(&config);
        assert!(!init_logging(&config));
    }
}
