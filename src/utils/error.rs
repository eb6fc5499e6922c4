use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathApiError {
    #[error("Missing required parameter: {name}")]
    MissingParameter { name: String },

    #[error("Parameter '{name}' is not a finite number: {value:?}")]
    InvalidNumber { name: String, value: String },

    #[error("Invalid parameter set: {message}")]
    InvalidParameterSet { message: String },

    #[error("Result is undefined: {reason}")]
    UndefinedResult { reason: String },

    #[error("No formula is registered for path: {path}")]
    RouteNotFound { path: String },

    #[error("Method {method} is not allowed for {path}; formula routes only accept GET")]
    MethodNotAllowed { method: String, path: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field}: {value:?} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MathApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Computation,
    Routing,
    Configuration,
    System,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Computation => "computation",
            ErrorCategory::Routing => "routing",
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::System => "system",
        }
    }
}

impl MathApiError {
    pub fn missing(name: &str) -> Self {
        MathApiError::MissingParameter {
            name: name.to_string(),
        }
    }

    pub fn invalid_number(name: &str, value: &str) -> Self {
        MathApiError::InvalidNumber {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn undefined(reason: impl Into<String>) -> Self {
        MathApiError::UndefinedResult {
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            MathApiError::MissingParameter { .. }
            | MathApiError::InvalidNumber { .. }
            | MathApiError::InvalidParameterSet { .. } => ErrorCategory::Input,
            MathApiError::UndefinedResult { .. } => ErrorCategory::Computation,
            MathApiError::RouteNotFound { .. } | MathApiError::MethodNotAllowed { .. } => {
                ErrorCategory::Routing
            }
            MathApiError::ConfigValidationError { .. }
            | MathApiError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MathApiError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        if let MathApiError::MethodNotAllowed { .. } = self {
            return StatusCode::METHOD_NOT_ALLOWED;
        }
        match self.category() {
            ErrorCategory::Input => StatusCode::BAD_REQUEST,
            ErrorCategory::Computation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCategory::Routing => StatusCode::NOT_FOUND,
            ErrorCategory::Configuration | ErrorCategory::System => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The query parameter at fault, when a single one is.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            MathApiError::MissingParameter { name } | MathApiError::InvalidNumber { name, .. } => {
                Some(name)
            }
            _ => None,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MathApiError::MissingParameter { name } => {
                format!("The query parameter '{}' is required", name)
            }
            MathApiError::InvalidNumber { name, value } => {
                format!("The query parameter '{}' must be a number, got '{}'", name, value)
            }
            MathApiError::InvalidParameterSet { message } => message.clone(),
            MathApiError::UndefinedResult { reason } => {
                format!("The result cannot be computed: {}", reason)
            }
            MathApiError::RouteNotFound { path } => format!("Unknown route '{}'", path),
            MathApiError::MethodNotAllowed { method, path } => {
                format!("'{}' only answers GET requests, got {}", path, method)
            }
            MathApiError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            MathApiError::InvalidConfigValueError { field, value, reason } => {
                format!("Configuration value '{}' for '{}' is invalid: {}", value, field, reason)
            }
            MathApiError::IoError(e) => format!("I/O failure: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the query string; every declared parameter must be a finite number",
            ErrorCategory::Computation => "Choose inputs for which the formula is defined",
            ErrorCategory::Routing => "Request GET / for the list of available routes",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags and restart",
            ErrorCategory::System => "Check that the bind address is free and the process has permission to use it",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
            _ => 2,
        }
    }
}

impl IntoResponse for MathApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.category().as_str(), "Request failed");
        } else {
            tracing::warn!(error = %self, kind = self.category().as_str(), "Rejected request");
        }

        let mut body = json!({
            "error": self.to_string(),
            "kind": self.category().as_str(),
        });
        if let Some(parameter) = self.parameter() {
            body["parameter"] = json!(parameter);
        }

        (status, Json(body)).into_response()
    }
}
