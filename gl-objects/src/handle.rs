use std::fmt;

use log::{trace, warn};
use opengl_bindings::types::{GLenum, GLuint};
use opengl_bindings::{
    COMPUTE_SHADER, FRAGMENT_SHADER, GEOMETRY_SHADER, TESS_CONTROL_SHADER,
    TESS_EVALUATION_SHADER, VERTEX_SHADER,
};

use crate::driver::Driver;
use crate::error::{Error, Result};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEvaluation,
    Geometry,
    Fragment,
    Compute,
}

impl ShaderStage {
    pub const fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => VERTEX_SHADER,
            ShaderStage::TessControl => TESS_CONTROL_SHADER,
            ShaderStage::TessEvaluation => TESS_EVALUATION_SHADER,
            ShaderStage::Geometry => GEOMETRY_SHADER,
            ShaderStage::Fragment => FRAGMENT_SHADER,
            ShaderStage::Compute => COMPUTE_SHADER,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::TessControl => "tessellation control",
            ShaderStage::TessEvaluation => "tessellation evaluation",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
            ShaderStage::Compute => "compute",
        }
    }
}

/// The category of native object a [`Handle`] names.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Texture,
    Buffer,
    Framebuffer,
    Renderbuffer,
    VertexArray,
    Program,
    Shader(ShaderStage),
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Texture => f.write_str("texture"),
            ObjectKind::Buffer => f.write_str("buffer"),
            ObjectKind::Framebuffer => f.write_str("framebuffer"),
            ObjectKind::Renderbuffer => f.write_str("renderbuffer"),
            ObjectKind::VertexArray => f.write_str("vertex array"),
            ObjectKind::Program => f.write_str("program"),
            ObjectKind::Shader(stage) => write!(f, "{} shader", stage.name()),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ownership {
    /// Created by [`Handle::allocate`] and destroyed on release.
    Owned,
    /// Created elsewhere; releasing only detaches the handle.
    External,
}

/// A native object name plus who is responsible for destroying it.
///
/// A handle is deliberately neither `Copy` nor `Clone`: whoever holds it is the
/// only party that may release it. Every operation that forwards the name to the
/// driver goes through [`Handle::id`], which refuses the unallocated name 0 and
/// names that have already been released.
#[derive(Debug, PartialEq, Eq)]
pub struct Handle {
    id: GLuint,
    kind: ObjectKind,
    ownership: Ownership,
    released: bool,
}

impl Handle {
    pub fn allocate(gl: &dyn Driver, kind: ObjectKind) -> Result<Handle> {
        let id = gl.create_object(kind);
        if id == 0 {
            warn!("driver failed to create a {} object", kind);
            return Err(Error::Allocation(kind));
        }
        trace!("allocated {} {}", kind, id);
        Ok(Handle {
            id,
            kind,
            ownership: Ownership::Owned,
            released: false,
        })
    }

    /// Wraps a name created outside this crate. The name is never deleted.
    pub fn wrap(id: GLuint, kind: ObjectKind) -> Handle {
        Handle {
            id,
            kind,
            ownership: Ownership::External,
            released: false,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn is_valid(&self) -> bool {
        self.id != 0
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// The native name, the only way a handle reaches the driver.
    pub fn id(&self) -> Result<GLuint> {
        if self.released {
            warn!("{} {} used after release", self.kind, self.id);
            return Err(Error::UseAfterRelease {
                kind: self.kind,
                id: self.id,
            });
        }
        if self.id == 0 {
            warn!("unallocated {} handle passed to a driver call", self.kind);
            return Err(Error::InvalidHandle(self.kind));
        }
        Ok(self.id)
    }

    /// Like [`Handle::id`], but also checks the handle names the expected kind.
    pub fn id_of(&self, expected: ObjectKind) -> Result<GLuint> {
        if self.kind != expected {
            return Err(Error::KindMismatch {
                expected,
                actual: self.kind,
            });
        }
        self.id()
    }

    /// Destroys an owned object exactly once. Later calls are no-ops.
    pub fn release(&mut self, gl: &dyn Driver) {
        if self.released {
            return;
        }
        self.released = true;
        if self.ownership == Ownership::Owned && self.id != 0 {
            trace!("releasing {} {}", self.kind, self.id);
            gl.delete_object(self.kind, self.id);
        }
    }
}
