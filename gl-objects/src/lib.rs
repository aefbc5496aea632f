//! Typed OpenGL object wrappers whose capability-dependent operations are
//! routed through a per-context strategy registry.

mod buffer;
mod capability;
mod config;
mod context;
mod driver;
mod error;
mod framebuffer;
mod gl;
mod handle;
mod renderbuffer;
mod shader;
pub mod strategy;
mod texture;

#[cfg(test)]
mod testing;

pub use buffer::Buffer;
pub use capability::{Capabilities, CapabilityProbe, GlVersion};
pub use config::{RegistryConfig, DISABLE_VAR};
pub use context::{Context, ContextKey};
pub use driver::{Driver, EntryPoint, Extent, PixelFormat};
pub use error::{Error, Result};
pub use framebuffer::Framebuffer;
pub use handle::{Handle, ObjectKind, Ownership, ShaderStage};
pub use renderbuffer::Renderbuffer;
pub use shader::{Program, Shader};
pub use strategy::{OperationKind, SelectionState, StrategyRegistry};
pub use texture::Texture;

pub use opengl_bindings as bindings;
