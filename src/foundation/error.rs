/// Crate-wide result alias.
pub type CircleFxResult<T> = Result<T, CircleFxError>;

/// Errors surfaced by the composite, pipeline, encoding and media layers.
///
/// The border renderer itself never fails: unknown patterns are skipped and degenerate geometry
/// simply draws nothing.
#[derive(thiserror::Error, Debug)]
pub enum CircleFxError {
    /// Invalid caller input (sizes, settings, frame ordering).
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster surface allocation or conversion failure.
    #[error("render error: {0}")]
    Render(String),

    /// Source image or video could not be read.
    #[error("media error: {0}")]
    Media(String),

    /// Output encoding failure.
    #[error("encode error: {0}")]
    Encode(String),

    /// Settings or catalog (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// The operation was abandoned through a cancel token.
    #[error("operation cancelled")]
    Cancelled,

    /// Anything else, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CircleFxError {
    /// Build a [`CircleFxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CircleFxError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CircleFxError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`CircleFxError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`CircleFxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for [`CircleFxError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
