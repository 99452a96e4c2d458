//! Error types for the navigation controller

use thiserror::Error;

/// Main error type for navigation chrome operations
#[derive(Error, Debug)]
pub enum NavError {
    #[error("Required element '#{0}' not found in document")]
    MissingElement(String),

    #[error("Dropdown menu '#{0}' not found in document")]
    MissingDropdown(String),

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid location '{location}': {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    #[error("No global window available")]
    NoWindow,

    #[error("Window has no document")]
    NoDocument,

    #[error("Navigation controller is not mounted - call mount() first")]
    NotMounted,

    #[error("Navigation controller is already handling an event")]
    Busy,

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for navigation operations
pub type NavResult<T> = Result<T, NavError>;

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for NavError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let message = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        NavError::Js(message)
    }
}
