/// Result alias that carries the custom [`ShowcaseError`] type.
pub type Result<T> = std::result::Result<T, ShowcaseError>;

/// Common error type for the core crate.
///
/// Only configuration loading produces these. Faults that happen while the
/// strip is animating degrade locally instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    /// Free-form message, mostly used by the command line harness.
    #[error("{0}")]
    Message(String),
    /// A configuration value failed validation.
    #[error("invalid configuration `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON configuration or item list.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl ShowcaseError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<&str> for ShowcaseError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for ShowcaseError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_names_the_field() {
        let err = ShowcaseError::invalid("layout.gap", "must not be negative");
        let text = format!("{err}");
        assert!(text.contains("layout.gap"));
        assert!(text.contains("must not be negative"));
    }

    #[test]
    fn converts_from_strings() {
        let err: ShowcaseError = "boom".into();
        assert!(matches!(err, ShowcaseError::Message(ref m) if m == "boom"));
    }
}
