use std::os::raw::c_void;
use std::ptr::NonNull;
use std::sync::Arc;

use opengl_bindings::types::{GLbitfield, GLenum, GLint, GLintptr, GLsizeiptr, GLuint};
use opengl_bindings::{COPY_READ_BUFFER, COPY_WRITE_BUFFER};

use super::{private, Operation, OperationKind, StrategyRegistry, StrategyTable};
use crate::config::RegistryConfig;
use crate::driver::{Driver, PixelFormat};
use crate::error::{Error, Result};

/// Data transfer, mapping and queries on an existing buffer object.
pub struct BufferAccess;

impl private::Sealed for BufferAccess {}

impl Operation for BufferAccess {
    const KIND: OperationKind = OperationKind::BufferAccess;
    type Strategy = dyn BufferAccessStrategy;

    fn table(registry: &StrategyRegistry) -> &StrategyTable<Self> {
        &registry.buffer_access
    }
}

/// Immutable buffer storage (`glBufferStorage`). Has no unconditional fallback.
pub struct BufferStorage;

impl private::Sealed for BufferStorage {}

impl Operation for BufferStorage {
    const KIND: OperationKind = OperationKind::BufferStorage;
    type Strategy = dyn BufferStorageStrategy;

    fn table(registry: &StrategyRegistry) -> &StrategyTable<Self> {
        &registry.buffer_storage
    }
}

/// Filling a buffer (or a range of it) with a repeated value. Needs GL 4.3 or
/// `GL_ARB_clear_buffer_object`.
pub struct BufferClear;

impl private::Sealed for BufferClear {}

impl Operation for BufferClear {
    const KIND: OperationKind = OperationKind::BufferClear;
    type Strategy = dyn BufferClearStrategy;

    fn table(registry: &StrategyRegistry) -> &StrategyTable<Self> {
        &registry.buffer_clear
    }
}

pub trait BufferAccessStrategy: Send + Sync {
    fn set_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    ) -> Result<()>;

    fn set_sub_data(&self, gl: &dyn Driver, buffer: GLuint, offset: GLintptr, data: &[u8]) -> Result<()>;

    fn map(&self, gl: &dyn Driver, buffer: GLuint, access: GLenum) -> Result<NonNull<c_void>>;

    fn map_range(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> Result<NonNull<c_void>>;

    /// Returns `false` if the store's contents became corrupt while mapped.
    fn unmap(&self, gl: &dyn Driver, buffer: GLuint) -> Result<bool>;

    fn flush_mapped_range(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
    ) -> Result<()>;

    fn copy_sub_data(
        &self,
        gl: &dyn Driver,
        read: GLuint,
        write: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) -> Result<()>;

    fn parameter(&self, gl: &dyn Driver, buffer: GLuint, pname: GLenum) -> Result<GLint>;
}

pub trait BufferStorageStrategy: Send + Sync {
    fn set_storage(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) -> Result<()>;
}

/// `data` is one element in `pixels` layout, converted to `internal_format`
/// and repeated; `None` clears to zero.
pub trait BufferClearStrategy: Send + Sync {
    fn clear_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()>;

    fn clear_sub_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()>;
}

fn mapped(buffer: GLuint, ptr: *mut c_void) -> Result<NonNull<c_void>> {
    NonNull::new(ptr).ok_or(Error::MapFailed(buffer))
}

/// Binds the buffer to a scratch target before every call, leaving it bound.
#[derive(Debug)]
pub struct LegacyBufferAccess {
    working_target: GLenum,
}

impl LegacyBufferAccess {
    pub fn new(working_target: GLenum) -> Self {
        LegacyBufferAccess { working_target }
    }

    pub fn working_target(&self) -> GLenum {
        self.working_target
    }

    fn bind(&self, gl: &dyn Driver, buffer: GLuint) -> GLenum {
        gl.bind_buffer(self.working_target, buffer);
        self.working_target
    }
}

impl Default for LegacyBufferAccess {
    fn default() -> Self {
        LegacyBufferAccess::new(COPY_WRITE_BUFFER)
    }
}

impl BufferAccessStrategy for LegacyBufferAccess {
    fn set_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    ) -> Result<()> {
        let target = self.bind(gl, buffer);
        gl.buffer_data(target, size, data, usage);
        Ok(())
    }

    fn set_sub_data(&self, gl: &dyn Driver, buffer: GLuint, offset: GLintptr, data: &[u8]) -> Result<()> {
        let target = self.bind(gl, buffer);
        gl.buffer_sub_data(target, offset, data);
        Ok(())
    }

    fn map(&self, gl: &dyn Driver, buffer: GLuint, access: GLenum) -> Result<NonNull<c_void>> {
        let target = self.bind(gl, buffer);
        mapped(buffer, gl.map_buffer(target, access))
    }

    fn map_range(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> Result<NonNull<c_void>> {
        let target = self.bind(gl, buffer);
        mapped(buffer, gl.map_buffer_range(target, offset, length, access))
    }

    fn unmap(&self, gl: &dyn Driver, buffer: GLuint) -> Result<bool> {
        let target = self.bind(gl, buffer);
        Ok(gl.unmap_buffer(target))
    }

    fn flush_mapped_range(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
    ) -> Result<()> {
        let target = self.bind(gl, buffer);
        gl.flush_mapped_buffer_range(target, offset, length);
        Ok(())
    }

    fn copy_sub_data(
        &self,
        gl: &dyn Driver,
        read: GLuint,
        write: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) -> Result<()> {
        gl.bind_buffer(COPY_READ_BUFFER, read);
        gl.bind_buffer(COPY_WRITE_BUFFER, write);
        gl.copy_buffer_sub_data(COPY_READ_BUFFER, COPY_WRITE_BUFFER, read_offset, write_offset, size);
        Ok(())
    }

    fn parameter(&self, gl: &dyn Driver, buffer: GLuint, pname: GLenum) -> Result<GLint> {
        let target = self.bind(gl, buffer);
        Ok(gl.get_buffer_parameter_i(target, pname))
    }
}

/// Direct state access; never touches binding points.
#[derive(Debug, Default)]
pub struct NamedBufferAccess;

impl BufferAccessStrategy for NamedBufferAccess {
    fn set_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        usage: GLenum,
    ) -> Result<()> {
        gl.named_buffer_data(buffer, size, data, usage);
        Ok(())
    }

    fn set_sub_data(&self, gl: &dyn Driver, buffer: GLuint, offset: GLintptr, data: &[u8]) -> Result<()> {
        gl.named_buffer_sub_data(buffer, offset, data);
        Ok(())
    }

    fn map(&self, gl: &dyn Driver, buffer: GLuint, access: GLenum) -> Result<NonNull<c_void>> {
        mapped(buffer, gl.map_named_buffer(buffer, access))
    }

    fn map_range(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> Result<NonNull<c_void>> {
        mapped(buffer, gl.map_named_buffer_range(buffer, offset, length, access))
    }

    fn unmap(&self, gl: &dyn Driver, buffer: GLuint) -> Result<bool> {
        Ok(gl.unmap_named_buffer(buffer))
    }

    fn flush_mapped_range(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
    ) -> Result<()> {
        gl.flush_mapped_named_buffer_range(buffer, offset, length);
        Ok(())
    }

    fn copy_sub_data(
        &self,
        gl: &dyn Driver,
        read: GLuint,
        write: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) -> Result<()> {
        gl.copy_named_buffer_sub_data(read, write, read_offset, write_offset, size);
        Ok(())
    }

    fn parameter(&self, gl: &dyn Driver, buffer: GLuint, pname: GLenum) -> Result<GLint> {
        Ok(gl.get_named_buffer_parameter_i(buffer, pname))
    }
}

#[derive(Debug, Default)]
pub struct NamedBufferStorage;

impl BufferStorageStrategy for NamedBufferStorage {
    fn set_storage(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) -> Result<()> {
        gl.named_buffer_storage(buffer, size, data, flags);
        Ok(())
    }
}

#[derive(Debug)]
pub struct TargetBufferStorage {
    working_target: GLenum,
}

impl TargetBufferStorage {
    pub fn new(working_target: GLenum) -> Self {
        TargetBufferStorage { working_target }
    }
}

impl Default for TargetBufferStorage {
    fn default() -> Self {
        TargetBufferStorage::new(COPY_WRITE_BUFFER)
    }
}

impl BufferStorageStrategy for TargetBufferStorage {
    fn set_storage(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) -> Result<()> {
        gl.bind_buffer(self.working_target, buffer);
        gl.buffer_storage(self.working_target, size, data, flags);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct NamedBufferClear;

impl BufferClearStrategy for NamedBufferClear {
    fn clear_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        gl.clear_named_buffer_data(buffer, internal_format, pixels, data);
        Ok(())
    }

    fn clear_sub_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        gl.clear_named_buffer_sub_data(buffer, internal_format, offset, size, pixels, data);
        Ok(())
    }
}

/// `glClearBuffer*Data` on the working target.
#[derive(Debug)]
pub struct TargetBufferClear {
    working_target: GLenum,
}

impl TargetBufferClear {
    pub fn new(working_target: GLenum) -> Self {
        TargetBufferClear { working_target }
    }
}

impl Default for TargetBufferClear {
    fn default() -> Self {
        TargetBufferClear::new(COPY_WRITE_BUFFER)
    }
}

impl BufferClearStrategy for TargetBufferClear {
    fn clear_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        gl.bind_buffer(self.working_target, buffer);
        gl.clear_buffer_data(self.working_target, internal_format, pixels, data);
        Ok(())
    }

    fn clear_sub_data(
        &self,
        gl: &dyn Driver,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        gl.bind_buffer(self.working_target, buffer);
        gl.clear_buffer_sub_data(
            self.working_target,
            internal_format,
            offset,
            size,
            pixels,
            data,
        );
        Ok(())
    }
}

pub(super) fn register_defaults(registry: &StrategyRegistry, config: &RegistryConfig) -> Result<()> {
    if config.is_enabled("named_buffer") {
        registry.register::<BufferAccess, _>(
            "named_buffer",
            10,
            |caps| caps.direct_state_access,
            Arc::new(NamedBufferAccess),
        )?;
    }
    // The default working target and copies need ARB_copy_buffer, range
    // mapping needs ARB_map_buffer_range
    if config.is_enabled("bind_to_working_target") {
        registry.register::<BufferAccess, _>(
            "bind_to_working_target",
            0,
            |caps| caps.copy_buffer && caps.map_buffer_range,
            Arc::new(LegacyBufferAccess::new(config.working_target())),
        )?;
    }
    if config.is_enabled("named_buffer_storage") {
        registry.register::<BufferStorage, _>(
            "named_buffer_storage",
            10,
            |caps| caps.named_buffer_storage,
            Arc::new(NamedBufferStorage),
        )?;
    }
    if config.is_enabled("buffer_storage") {
        registry.register::<BufferStorage, _>(
            "buffer_storage",
            0,
            |caps| caps.buffer_storage,
            Arc::new(TargetBufferStorage::new(config.working_target())),
        )?;
    }
    if config.is_enabled("named_buffer_clear") {
        registry.register::<BufferClear, _>(
            "named_buffer_clear",
            10,
            |caps| caps.direct_state_access && caps.clear_buffer,
            Arc::new(NamedBufferClear),
        )?;
    }
    if config.is_enabled("clear_buffer") {
        registry.register::<BufferClear, _>(
            "clear_buffer",
            0,
            |caps| caps.clear_buffer && caps.copy_buffer,
            Arc::new(TargetBufferClear::new(config.working_target())),
        )?;
    }
    Ok(())
}
