/// Convenience result type used across fxcanvas.
pub type SketchResult<T> = Result<T, SketchError>;

/// Top-level error taxonomy used by the sketch APIs.
#[derive(thiserror::Error, Debug)]
pub enum SketchError {
    /// Invalid user-provided configuration, hash or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// The drawing surface could not be created or painted.
    #[error("render error: {0}")]
    Render(String),

    /// PNG encoding or the download hand-off failed.
    #[error("export error: {0}")]
    Export(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error, preserving its source chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SketchError {
    /// Build a [`SketchError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SketchError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SketchError::Export`].
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`SketchError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
