/// Convenience result type used across svgmotion.
pub type SvgMotionResult<T> = Result<T, SvgMotionError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Document parsing itself never fails: malformed attributes, dangling references and
/// instantiation failures degrade to documented defaults. These variants surface only at
/// API edges (XML import, starting an animation with incompatible values, serialization).
#[derive(thiserror::Error, Debug)]
pub enum SvgMotionError {
    /// Invalid caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The input could not be turned into a document tree.
    #[error("parse error: {0}")]
    Parse(String),

    /// An animation could not be started for the requested property/value pair.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SvgMotionError {
    /// Build a [`SvgMotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SvgMotionError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`SvgMotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`SvgMotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<roxmltree::Error> for SvgMotionError {
    fn from(err: roxmltree::Error) -> Self {
        Self::parse(err.to_string())
    }
}

impl From<serde_json::Error> for SvgMotionError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
