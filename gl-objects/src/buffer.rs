use std::os::raw::c_void;
use std::ptr::NonNull;

use opengl_bindings::types::{GLbitfield, GLenum, GLint, GLintptr, GLsizeiptr, GLuint};
use opengl_bindings::Gl;

use crate::context::Context;
use crate::driver::{Driver, PixelFormat};
use crate::error::Result;
use crate::handle::{Handle, ObjectKind};
use crate::strategy::{BufferAccess, BufferClear, BufferStorage};

/// A buffer object. Data calls are routed through the context's buffer access
/// strategy, so they may or may not disturb the current bindings.
pub struct Buffer<'ctx, D: Driver = Gl> {
    context: &'ctx Context<D>,
    handle: Handle,
}

impl<'ctx, D: Driver> Buffer<'ctx, D> {
    pub fn new(context: &'ctx Context<D>) -> Result<Self> {
        let handle = Handle::allocate(context.driver(), ObjectKind::Buffer)?;
        Ok(Buffer { context, handle })
    }

    pub fn from_id(context: &'ctx Context<D>, id: GLuint) -> Self {
        Buffer {
            context,
            handle: Handle::wrap(id, ObjectKind::Buffer),
        }
    }

    pub fn id(&self) -> Result<GLuint> {
        self.handle.id()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn bind(&self, target: GLenum) -> Result<()> {
        let id = self.handle.id()?;
        self.context.driver().bind_buffer(target, id);
        Ok(())
    }

    pub fn unbind(&self, target: GLenum) {
        self.context.driver().bind_buffer(target, 0);
    }

    pub fn bind_base(&self, target: GLenum, index: GLuint) -> Result<()> {
        let id = self.handle.id()?;
        self.context.driver().bind_buffer_base(target, index, id);
        Ok(())
    }

    /// Replaces the data store with a copy of `data`.
    pub fn set_data(&self, data: &[u8], usage: GLenum) -> Result<()> {
        let size = data.len() as GLsizeiptr;
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.set_data(gl, id, size, Some(data), usage)
            })
    }

    /// Replaces the data store with `size` uninitialized bytes.
    pub fn allocate(&self, size: GLsizeiptr, usage: GLenum) -> Result<()> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.set_data(gl, id, size, None, usage)
            })
    }

    pub fn set_sub_data(&self, offset: GLintptr, data: &[u8]) -> Result<()> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.set_sub_data(gl, id, offset, data)
            })
    }

    /// Creates an immutable data store initialized from `data`. Fails with
    /// `UnsupportedOperation` on contexts without buffer storage.
    pub fn set_storage(&self, data: &[u8], flags: GLbitfield) -> Result<()> {
        let size = data.len() as GLsizeiptr;
        self.context
            .dispatch::<BufferStorage, _>(&self.handle, |strategy, gl, id| {
                strategy.set_storage(gl, id, size, Some(data), flags)
            })
    }

    pub fn allocate_storage(&self, size: GLsizeiptr, flags: GLbitfield) -> Result<()> {
        self.context
            .dispatch::<BufferStorage, _>(&self.handle, |strategy, gl, id| {
                strategy.set_storage(gl, id, size, None, flags)
            })
    }

    pub fn map(&self, access: GLenum) -> Result<NonNull<c_void>> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.map(gl, id, access)
            })
    }

    pub fn map_range(
        &self,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> Result<NonNull<c_void>> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.map_range(gl, id, offset, length, access)
            })
    }

    pub fn unmap(&self) -> Result<bool> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| strategy.unmap(gl, id))
    }

    pub fn flush_mapped_range(&self, offset: GLintptr, length: GLsizeiptr) -> Result<()> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.flush_mapped_range(gl, id, offset, length)
            })
    }

    /// Copies `size` bytes from this buffer into `destination`.
    pub fn copy_sub_data(
        &self,
        destination: &Buffer<'_, D>,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) -> Result<()> {
        let write = destination.handle.id()?;
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, read| {
                strategy.copy_sub_data(gl, read, write, read_offset, write_offset, size)
            })
    }

    /// Fills the whole store with `data`, one element in `pixels` layout
    /// converted to `internal_format`; `None` fills with zeros.
    pub fn clear_data(
        &self,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        self.context
            .dispatch::<BufferClear, _>(&self.handle, |strategy, gl, id| {
                strategy.clear_data(gl, id, internal_format, pixels, data)
            })
    }

    pub fn clear_sub_data(
        &self,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        self.context
            .dispatch::<BufferClear, _>(&self.handle, |strategy, gl, id| {
                strategy.clear_sub_data(gl, id, internal_format, offset, size, pixels, data)
            })
    }

    pub fn parameter(&self, pname: GLenum) -> Result<GLint> {
        self.context
            .dispatch::<BufferAccess, _>(&self.handle, |strategy, gl, id| {
                strategy.parameter(gl, id, pname)
            })
    }
}

impl<D: Driver> Drop for Buffer<'_, D> {
    fn drop(&mut self) {
        self.handle.release(self.context.driver());
    }
}
