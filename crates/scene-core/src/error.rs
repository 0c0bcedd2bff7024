use crate::params::ParamKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParamError {
    #[error("unknown parameter id {0}")]
    UnknownParameter(usize),
    #[error("unknown control handle {0}")]
    UnknownControl(usize),
    #[error("parameter `{name}` holds a {expected:?} value")]
    KindMismatch { name: String, expected: ParamKind },
}

#[derive(Debug, Error)]
pub enum FontError {
    #[error("font json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("font has no glyph for {0:?}")]
    MissingGlyph(char),
    #[error("malformed outline command `{0}`")]
    Outline(String),
    #[error("tessellation failed: {0:?}")]
    Tessellation(lyon::lyon_tessellation::TessellationError),
}
