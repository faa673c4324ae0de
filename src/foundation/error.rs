/// Convenience result type used across qrfield.
pub type QrFieldResult<T> = Result<T, QrFieldError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Skippable conditions (missing fields, empty per-language values,
/// duplicate-routing languages, unrecognized source names) never surface
/// here; they are absorbed during resolution as "no entry".
#[derive(thiserror::Error, Debug)]
pub enum QrFieldError {
    /// Invalid field configuration values.
    #[error("config error: {0}")]
    Config(String),

    /// The symbol encoder could not represent the payload.
    #[error("encoding error: {0}")]
    Encode(String),

    /// Errors while producing image output.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl QrFieldError {
    /// Build a [`QrFieldError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`QrFieldError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`QrFieldError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`QrFieldError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<qrcode::types::QrError> for QrFieldError {
    fn from(err: qrcode::types::QrError) -> Self {
        Self::Encode(err.to_string())
    }
}
