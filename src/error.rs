//! Error types for query validation and response handling.

/// A caller-supplied value that is not among the known fixed values.
///
/// Raised before any network or file I/O takes place.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Route name outside the known set (e.g. `"brown"`, `"green"`).
    #[error("unknown route name: {0}")]
    UnknownRouteName(String),

    /// Route wire code outside the known set (e.g. `"brn"`, `"g"`).
    #[error("unknown route code: {0}")]
    UnknownRouteCode(String),

    /// A route token that is neither a known wire code nor a known name.
    #[error("incorrect route format: {0}")]
    UnknownRouteToken(String),

    /// A `&rt=` fragment with nothing after the marker.
    #[error("incorrect route format: empty route")]
    EmptyRouteToken,

    /// Direction selector other than the two canonical codes.
    #[error("unknown direction: {0} (expected 1 or 5)")]
    UnknownDirection(String),

    /// Write-mode flag other than write or append.
    #[error("write mode must be either 'w' or 'a', got '{0}'")]
    UnknownWriteMode(String),

    #[error("error code not found: {0}")]
    UnknownErrorCode(u16),

    #[error("parameter not found: {0}")]
    UnknownParameter(String),

    #[error("unknown stop ID or stop name: {0}")]
    UnknownStop(String),

    /// A request lacks one of its required parameters.
    #[error("required parameter is missing: {0}")]
    MissingParameter(&'static str),

    /// A request parameter has an out-of-range or malformed value.
    #[error("invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// A configured endpoint is not an absolute URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),
}

/// A decoded response body that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    /// The root object has no envelope key (e.g. `ctatt`).
    #[error("response has no '{0}' envelope")]
    MissingEnvelope(&'static str),

    /// A required field is absent. `scope` names where it was looked up.
    #[error("missing field '{field}' in {scope}")]
    MissingField { scope: String, field: &'static str },

    /// A member holds a value of an unexpected JSON type.
    #[error("expected {expected} in {scope}")]
    UnexpectedShape { scope: String, expected: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::UnknownRouteToken("purple".into());
        assert_eq!(err.to_string(), "incorrect route format: purple");

        let err = ValidationError::UnknownWriteMode("x".into());
        assert_eq!(err.to_string(), "write mode must be either 'w' or 'a', got 'x'");

        let err = ValidationError::InvalidParameter {
            name: "max",
            value: "0".into(),
        };
        assert_eq!(err.to_string(), "invalid value for parameter 'max': 0");

        let err = ResponseError::MissingField {
            scope: "train entry 0 of route 'red'".into(),
            field: "rn",
        };
        assert_eq!(
            err.to_string(),
            "missing field 'rn' in train entry 0 of route 'red'"
        );
    }
}
