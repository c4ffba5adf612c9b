//! Error types for settings input.
//!
//! The simulation itself is total; only the optional JSON settings seed can
//! be rejected.

use std::fmt;

/// Reasons a settings document is refused.
#[derive(Debug)]
pub enum SettingsError {
    /// The document is not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),

    /// A numeric field lies outside the range its slider allows.
    OutOfRange {
        /// Name of the field (for logging).
        field: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Inclusive lower bound.
        min: f32,
        /// Inclusive upper bound.
        max: f32,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(err) => write!(f, "malformed settings: {}", err),
            SettingsError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "setting '{}' = {} is outside {}..={}",
                field, value, min, max
            ),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(err) => Some(err),
            SettingsError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        SettingsError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = SettingsError::OutOfRange {
            field: "speed",
            value: 42.0,
            min: 1.0,
            max: 20.0,
        };
        assert_eq!(err.to_string(), "setting 'speed' = 42 is outside 1..=20");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SettingsError::from(json_err);
        assert!(err.to_string().starts_with("malformed settings"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
