use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level '{level}'")]
    InvalidLevel {
        level: String,
        #[source]
        source: ParseError,
    },

    #[error("logging setup failed: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Install the stderr log subscriber. A valid `RUST_LOG` overrides `log_level`.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(log_level, env_directive.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

fn build_filter(log_level: &str, env_directive: Option<&str>) -> Result<EnvFilter, TelemetryError> {
    let from_env = env_directive
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok());
    if let Some(filter) = from_env {
        return Ok(filter);
    }

    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::InvalidLevel {
        level: log_level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn max_level(log_level: &str, env_directive: Option<&str>) -> Option<LevelFilter> {
        build_filter(log_level, env_directive).unwrap().max_level_hint()
    }

    #[test]
    fn test_env_directive_wins() {
        assert_eq!(max_level("warn", Some("debug")), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_falls_back_to_flag() {
        assert_eq!(max_level("info", None), Some(LevelFilter::INFO));
        assert_eq!(max_level("info", Some("  ")), Some(LevelFilter::INFO));
        assert_eq!(max_level("info", Some("markscan=loud")), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        let err = build_filter("markscan=loud", None).unwrap_err();
        assert!(matches!(err, TelemetryError::InvalidLevel { .. }));
        assert!(err.to_string().contains("markscan=loud"));
    }
}
