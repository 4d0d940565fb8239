use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Malformed {encoding} payload: {message}")]
    MalformedEncoding {
        encoding: &'static str,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure taxonomy the pipeline recovers from locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    MalformedEncoding,
    Configuration,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SourceUnavailable => "source_unavailable",
            ErrorKind::MalformedEncoding => "malformed_encoding",
            ErrorKind::Configuration => "configuration",
        }
    }
}

impl ScheduleError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        ScheduleError::SourceUnavailable {
            message: message.into(),
        }
    }

    pub fn malformed(encoding: &'static str, message: impl Into<String>) -> Self {
        ScheduleError::MalformedEncoding {
            encoding,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ScheduleError::SourceUnavailable { .. } | ScheduleError::Http(_) => {
                ErrorKind::SourceUnavailable
            }
            ScheduleError::MalformedEncoding { .. }
            | ScheduleError::Json(_)
            | ScheduleError::Csv(_) => ErrorKind::MalformedEncoding,
            ScheduleError::Toml(_) | ScheduleError::Config(_) => ErrorKind::Configuration,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_maps_transport_and_decode_failures() {
        assert_eq!(
            ScheduleError::unavailable("login page").kind(),
            ErrorKind::SourceUnavailable
        );
        assert_eq!(
            ScheduleError::malformed("gviz", "no envelope").kind(),
            ErrorKind::MalformedEncoding
        );
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(ScheduleError::from(json_err).kind(), ErrorKind::MalformedEncoding);
        assert_eq!(
            ScheduleError::Config("bad".into()).kind(),
            ErrorKind::Configuration
        );
    }
}
