use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};

/// Failures raised by the security layer, from startup through request handling.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum SecurityError {
    /// A required property is absent. Fatal at startup.
    #[display("missing required property '{key}'")]
    MissingConfiguration { key: String },
    /// A property is present but cannot be used. Fatal at startup.
    #[display("invalid value '{value}' for property '{key}'")]
    InvalidConfiguration { key: String, value: String },
    #[display("invalid credentials")]
    InvalidCredentials,
    #[display("access denied")]
    AccessDenied,
    #[display("authentication required")]
    UnauthenticatedAccess,
}

impl SecurityError {
    pub fn missing(key: &str) -> Self {
        SecurityError::MissingConfiguration {
            key: key.to_string(),
        }
    }

    pub fn invalid(key: &str, value: &str) -> Self {
        SecurityError::InvalidConfiguration {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

impl error::ResponseError for SecurityError {
    fn status_code(&self) -> StatusCode {
        match *self {
            SecurityError::MissingConfiguration { .. }
            | SecurityError::InvalidConfiguration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SecurityError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SecurityError::AccessDenied => StatusCode::FORBIDDEN,
            SecurityError::UnauthenticatedAccess => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponseBuilder::new(self.status_code()).body(self.to_string())
    }
}
