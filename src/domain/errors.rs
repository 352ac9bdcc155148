use thiserror::Error;

/// Errors that end a prediction submission and move the view to its error state.
///
/// None of these are retried. The user recovers by submitting again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewError {
    /// The service ran but reported a failure. The message is shown verbatim.
    #[error("{0}")]
    Service(String),

    /// The call never produced a usable payload (unreachable host, non-2xx status, bad JSON).
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Malformed response: {dates} dates but {prices} historical prices")]
    DataIntegrity { dates: usize, prices: usize },

    /// A success body without one of the figures the view renders.
    #[error("Malformed response: missing {0}")]
    MissingField(&'static str),

    #[error("Invalid date '{value}': {reason}")]
    Format { value: String, reason: String },
}

impl ViewError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ViewError::Transport(err.to_string())
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewError::Service(_) => "service",
            ViewError::Transport(_) => "transport",
            ViewError::DataIntegrity { .. } | ViewError::MissingField(_) => "data_integrity",
            ViewError::Format { .. } => "format",
        }
    }
}

/// Rejected before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("Stock symbol is required")]
    MissingStock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_has_fixed_prefix() {
        let err = ViewError::transport("Failed to fetch");
        assert_eq!(err.to_string(), "Network error: Failed to fetch");
    }

    #[test]
    fn test_service_message_is_verbatim() {
        let err = ViewError::Service("Invalid stock symbol".to_string());
        assert_eq!(err.to_string(), "Invalid stock symbol");
    }

    #[test]
    fn test_data_integrity_formatting() {
        let err = ViewError::DataIntegrity { dates: 3, prices: 2 };
        let msg = err.to_string();
        assert!(msg.contains("3 dates"));
        assert!(msg.contains("2 historical prices"));
        assert_eq!(err.kind(), "data_integrity");
    }
}
