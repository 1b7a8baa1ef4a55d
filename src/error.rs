use thiserror::Error;

use crate::simulation::sink::SinkError;

/// Interaction simulator error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Sink rejected event #{index}: {source}")]
    Sink {
        index: usize,
        #[source]
        source: SinkError,
    },

    #[error("Sink flush failed: {0}")]
    SinkFlush(#[source] SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn sink(index: usize, source: SinkError) -> Self {
        Self::Sink { index, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_the_field() {
        let error = Error::invalid_input("simulation.day_count", "must be at least 1");
        assert_eq!(
            error.to_string(),
            "Invalid input for simulation.day_count: must be at least 1"
        );
    }

    #[test]
    fn test_sink_error_keeps_its_source() {
        let error = Error::sink(3, SinkError::rejected("quota exceeded"));
        assert!(error.to_string().contains("#3"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
