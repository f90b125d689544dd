use crate::registry::{ResultKind, ShapeDescriptor};

#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("no type {0}")]
    UnknownKind(String),

    #[error("no output data")]
    NoData,

    #[error("payload does not match {expected}: {reason}")]
    ShapeMismatch { expected: &'static str, reason: String },

    #[error("internal error: {kind:?} result carries a {found} shape")]
    InternalShape { kind: ResultKind, found: ShapeDescriptor },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResultError>;
