use opengl_bindings::types::{GLenum, GLuint};

use crate::context::ContextKey;
use crate::handle::ObjectKind;
use crate::strategy::OperationKind;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Failed to allocate {0} object")]
    Allocation(ObjectKind),

    #[error("{0} handle is not allocated")]
    InvalidHandle(ObjectKind),

    #[error("{kind} {id} was used after it was released")]
    UseAfterRelease { kind: ObjectKind, id: GLuint },

    #[error("Expected a {expected} handle, got {actual}")]
    KindMismatch {
        expected: ObjectKind,
        actual: ObjectKind,
    },

    #[error("No active context to query")]
    NoActiveContext,

    #[error("Strategies {existing} and {rejected} share priority {priority} for {operation}")]
    AmbiguousStrategy {
        operation: OperationKind,
        priority: i32,
        existing: &'static str,
        rejected: &'static str,
    },

    #[error("No strategy for {operation} is supported by {context}")]
    UnsupportedOperation {
        operation: OperationKind,
        context: ContextKey,
    },

    #[error("Texture unit {0} is out of range")]
    InvalidTextureUnit(GLuint),

    #[error("Failed to map buffer {0}")]
    MapFailed(GLuint),

    #[error("Framebuffer {id} is incomplete (status {status:#x})")]
    IncompleteFramebuffer { id: GLuint, status: GLenum },

    #[error("Failed to compile {stage} shader: {log}")]
    CompileError { stage: &'static str, log: String },

    #[error("Failed to link program: {0}")]
    LinkError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
