//! A recording stand-in for a live GL context.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::os::raw::c_void;
use std::ptr;
use std::sync::Arc;

use opengl_bindings::types::{
    GLbitfield, GLenum, GLfloat, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint,
};
use opengl_bindings::{
    COMPILE_STATUS, EXTENSIONS, FRAMEBUFFER_COMPLETE, LINK_STATUS, MAJOR_VERSION, MINOR_VERSION,
    NUM_EXTENSIONS, VERSION,
};

use crate::config::RegistryConfig;
use crate::context::{Context, ContextKey};
use crate::driver::{Driver, EntryPoint, Extent, PixelFormat};
use crate::handle::ObjectKind;
use crate::strategy::StrategyRegistry;

/// A context over a fake `major.minor` driver with the built-in strategies.
pub(crate) fn context(major: GLint, minor: GLint) -> Context<FakeDriver> {
    let registry = StrategyRegistry::with_defaults(&RegistryConfig::default())
        .expect("built-in strategies have distinct priorities");
    Context::new(
        FakeDriver::with_version(major, minor),
        ContextKey::new(1),
        Arc::new(registry),
    )
}

pub(crate) struct FakeDriver {
    version: Cell<(GLint, GLint)>,
    version_string: RefCell<Option<String>>,
    extensions: RefCell<Vec<String>>,
    legacy_extensions: RefCell<Option<String>>,
    unloaded: RefCell<HashSet<EntryPoint>>,
    context_active: Cell<bool>,
    next_id: Cell<GLuint>,
    fail_allocation: Cell<bool>,
    fail_mapping: Cell<bool>,
    compile_log: RefCell<Option<String>>,
    link_log: RefCell<Option<String>>,
    framebuffer_status: Cell<GLenum>,
    parameters: RefCell<HashMap<GLenum, GLint>>,
    locations: RefCell<HashMap<String, GLint>>,
    sources: RefCell<HashMap<GLuint, String>>,
    scratch: RefCell<Vec<u8>>,
    queries: Cell<usize>,
    calls: RefCell<Vec<String>>,
}

fn extent_2d(extent: Extent) -> String {
    format!("{}x{}", extent.width, extent.height)
}

fn extent_3d(extent: Extent) -> String {
    format!("{}x{}x{}", extent.width, extent.height, extent.depth)
}

fn bytes(data: Option<&[u8]>) -> String {
    match data {
        Some(data) => format!("{:?}", data),
        None => "null".to_string(),
    }
}

impl FakeDriver {
    /// A fully featured 4.6 context.
    pub fn new() -> Self {
        Self::with_version(4, 6)
    }

    pub fn with_version(major: GLint, minor: GLint) -> Self {
        FakeDriver {
            version: Cell::new((major, minor)),
            version_string: RefCell::new(None),
            extensions: RefCell::new(Vec::new()),
            legacy_extensions: RefCell::new(None),
            unloaded: RefCell::new(HashSet::new()),
            context_active: Cell::new(true),
            next_id: Cell::new(1),
            fail_allocation: Cell::new(false),
            fail_mapping: Cell::new(false),
            compile_log: RefCell::new(None),
            link_log: RefCell::new(None),
            framebuffer_status: Cell::new(FRAMEBUFFER_COMPLETE),
            parameters: RefCell::new(HashMap::new()),
            locations: RefCell::new(HashMap::new()),
            sources: RefCell::new(HashMap::new()),
            scratch: RefCell::new(vec![0; 256]),
            queries: Cell::new(0),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn set_version(&self, major: GLint, minor: GLint) {
        self.version.set((major, minor));
    }

    pub fn set_version_string(&self, version: Option<&str>) {
        *self.version_string.borrow_mut() = version.map(str::to_owned);
    }

    pub fn add_extension(&self, name: &str) {
        self.extensions.borrow_mut().push(name.to_owned());
    }

    pub fn set_legacy_extensions(&self, list: &str) {
        *self.legacy_extensions.borrow_mut() = Some(list.to_owned());
    }

    pub fn unload(&self, entry: EntryPoint) {
        self.unloaded.borrow_mut().insert(entry);
    }

    pub fn set_context_active(&self, active: bool) {
        self.context_active.set(active);
    }

    pub fn fail_allocation(&self, fail: bool) {
        self.fail_allocation.set(fail);
    }

    pub fn fail_mapping(&self, fail: bool) {
        self.fail_mapping.set(fail);
    }

    pub fn fail_compile(&self, log: &str) {
        *self.compile_log.borrow_mut() = Some(log.to_owned());
    }

    pub fn fail_link(&self, log: &str) {
        *self.link_log.borrow_mut() = Some(log.to_owned());
    }

    pub fn set_framebuffer_status(&self, status: GLenum) {
        self.framebuffer_status.set(status);
    }

    /// Value returned by every `Get*Parameteriv` query for `pname`.
    pub fn set_parameter(&self, pname: GLenum, value: GLint) {
        self.parameters.borrow_mut().insert(pname, value);
    }

    pub fn set_location(&self, name: &str, location: GLint) {
        self.locations.borrow_mut().insert(name.to_owned(), location);
    }

    pub fn source(&self, shader: GLuint) -> Option<String> {
        self.sources.borrow().get(&shader).cloned()
    }

    /// Capability queries issued so far.
    pub fn queries(&self) -> usize {
        self.queries.get()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn query(&self) {
        self.queries.set(self.queries.get() + 1);
    }

    fn parameter(&self, pname: GLenum) -> GLint {
        self.parameters.borrow().get(&pname).copied().unwrap_or(0)
    }

    fn mapping(&self) -> *mut c_void {
        if self.fail_mapping.get() {
            ptr::null_mut()
        } else {
            self.scratch.borrow_mut().as_mut_ptr() as *mut c_void
        }
    }
}

impl Driver for FakeDriver {
    fn get_integer(&self, pname: GLenum) -> GLint {
        self.query();
        if !self.context_active.get() {
            return 0;
        }
        match pname {
            MAJOR_VERSION => self.version.get().0,
            MINOR_VERSION => self.version.get().1,
            NUM_EXTENSIONS => self.extensions.borrow().len() as GLint,
            _ => 0,
        }
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        self.query();
        if !self.context_active.get() {
            return None;
        }
        match name {
            VERSION => self.version_string.borrow().clone().or_else(|| {
                let (major, minor) = self.version.get();
                (major > 0).then(|| format!("{}.{}.0 Fake", major, minor))
            }),
            EXTENSIONS => self.legacy_extensions.borrow().clone(),
            _ => None,
        }
    }

    fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String> {
        self.query();
        if !self.context_active.get() || name != EXTENSIONS {
            return None;
        }
        self.extensions.borrow().get(index as usize).cloned()
    }

    fn is_loaded(&self, entry: EntryPoint) -> bool {
        self.query();
        !self.unloaded.borrow().contains(&entry)
    }

    fn create_object(&self, kind: ObjectKind) -> GLuint {
        self.record(format!("CreateObject({})", kind));
        if self.fail_allocation.get() {
            return 0;
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    fn delete_object(&self, kind: ObjectKind, id: GLuint) {
        self.record(format!("DeleteObject({}, {})", kind, id));
    }

    fn active_texture(&self, unit: GLenum) {
        self.record(format!("ActiveTexture({:#x})", unit));
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        self.record(format!("BindTexture({:#x}, {})", target, texture));
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, value: GLint) {
        self.record(format!("TexParameteri({:#x}, {:#x}, {})", target, pname, value));
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, value: GLfloat) {
        self.record(format!("TexParameterf({:#x}, {:#x}, {})", target, pname, value));
    }

    fn get_tex_parameter_i(&self, target: GLenum, pname: GLenum) -> GLint {
        self.record(format!("GetTexParameteriv({:#x}, {:#x})", target, pname));
        self.parameter(pname)
    }

    fn get_tex_level_parameter_i(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint {
        self.record(format!(
            "GetTexLevelParameteriv({:#x}, {}, {:#x})",
            target, level, pname
        ));
        self.parameter(pname)
    }

    fn tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        extent: Extent,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "TexImage2D({:#x}, {}, {:#x}, {}, {:#x}, {:#x}, {})",
            target,
            level,
            internal_format,
            extent_2d(extent),
            pixels.format,
            pixels.ty,
            bytes(data)
        ));
    }

    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        offset: (GLint, GLint),
        extent: Extent,
        pixels: PixelFormat,
        data: &[u8],
    ) {
        self.record(format!(
            "TexSubImage2D({:#x}, {}, {}, {}, {}, {:#x}, {:#x}, {})",
            target,
            level,
            offset.0,
            offset.1,
            extent_2d(extent),
            pixels.format,
            pixels.ty,
            bytes(Some(data))
        ));
    }

    fn tex_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        extent: Extent,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "TexImage3D({:#x}, {}, {:#x}, {}, {:#x}, {:#x}, {})",
            target,
            level,
            internal_format,
            extent_3d(extent),
            pixels.format,
            pixels.ty,
            bytes(data)
        ));
    }

    fn tex_storage_3d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, extent: Extent) {
        self.record(format!(
            "TexStorage3D({:#x}, {}, {:#x}, {})",
            target,
            levels,
            internal_format,
            extent_3d(extent)
        ));
    }

    fn texture_storage_3d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) {
        self.record(format!(
            "TextureStorage3D({}, {}, {:#x}, {})",
            texture,
            levels,
            internal_format,
            extent_3d(extent)
        ));
    }

    fn tex_storage_2d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, extent: Extent) {
        self.record(format!(
            "TexStorage2D({:#x}, {}, {:#x}, {})",
            target,
            levels,
            internal_format,
            extent_2d(extent)
        ));
    }

    fn texture_storage_2d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) {
        self.record(format!(
            "TextureStorage2D({}, {}, {:#x}, {})",
            texture,
            levels,
            internal_format,
            extent_2d(extent)
        ));
    }

    fn tex_image_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        self.record(format!(
            "TexImage2DMultisample({:#x}, {}, {:#x}, {}, {})",
            target,
            samples,
            internal_format,
            extent_2d(extent),
            fixed_sample_locations
        ));
    }

    fn tex_image_3d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        self.record(format!(
            "TexImage3DMultisample({:#x}, {}, {:#x}, {}, {})",
            target,
            samples,
            internal_format,
            extent_3d(extent),
            fixed_sample_locations
        ));
    }

    fn tex_storage_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        self.record(format!(
            "TexStorage2DMultisample({:#x}, {}, {:#x}, {}, {})",
            target,
            samples,
            internal_format,
            extent_2d(extent),
            fixed_sample_locations
        ));
    }

    fn tex_storage_3d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        self.record(format!(
            "TexStorage3DMultisample({:#x}, {}, {:#x}, {}, {})",
            target,
            samples,
            internal_format,
            extent_3d(extent),
            fixed_sample_locations
        ));
    }

    fn texture_storage_2d_multisample(
        &self,
        texture: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        self.record(format!(
            "TextureStorage2DMultisample({}, {}, {:#x}, {}, {})",
            texture,
            samples,
            internal_format,
            extent_2d(extent),
            fixed_sample_locations
        ));
    }

    fn texture_storage_3d_multisample(
        &self,
        texture: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        self.record(format!(
            "TextureStorage3DMultisample({}, {}, {:#x}, {}, {})",
            texture,
            samples,
            internal_format,
            extent_3d(extent),
            fixed_sample_locations
        ));
    }

    fn generate_mipmap(&self, target: GLenum) {
        self.record(format!("GenerateMipmap({:#x})", target));
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        self.record(format!("BindBuffer({:#x}, {})", target, buffer));
    }

    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        self.record(format!("BindBufferBase({:#x}, {}, {})", target, index, buffer));
    }

    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        self.record(format!(
            "BufferData({:#x}, {}, {}, {:#x})",
            target,
            size,
            bytes(data),
            usage
        ));
    }

    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]) {
        self.record(format!(
            "BufferSubData({:#x}, {}, {})",
            target,
            offset,
            bytes(Some(data))
        ));
    }

    fn buffer_storage(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, flags: GLbitfield) {
        self.record(format!(
            "BufferStorage({:#x}, {}, {}, {:#x})",
            target,
            size,
            bytes(data),
            flags
        ));
    }

    fn map_buffer(&self, target: GLenum, access: GLenum) -> *mut c_void {
        self.record(format!("MapBuffer({:#x}, {:#x})", target, access));
        self.mapping()
    }

    fn map_buffer_range(
        &self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        self.record(format!(
            "MapBufferRange({:#x}, {}, {}, {:#x})",
            target, offset, length, access
        ));
        self.mapping()
    }

    fn unmap_buffer(&self, target: GLenum) -> bool {
        self.record(format!("UnmapBuffer({:#x})", target));
        true
    }

    fn flush_mapped_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr) {
        self.record(format!(
            "FlushMappedBufferRange({:#x}, {}, {})",
            target, offset, length
        ));
    }

    fn copy_buffer_sub_data(
        &self,
        read_target: GLenum,
        write_target: GLenum,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        self.record(format!(
            "CopyBufferSubData({:#x}, {:#x}, {}, {}, {})",
            read_target, write_target, read_offset, write_offset, size
        ));
    }

    fn get_buffer_parameter_i(&self, target: GLenum, pname: GLenum) -> GLint {
        self.record(format!("GetBufferParameteriv({:#x}, {:#x})", target, pname));
        self.parameter(pname)
    }

    fn clear_buffer_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "ClearBufferData({:#x}, {:#x}, {:#x}, {:#x}, {})",
            target,
            internal_format,
            pixels.format,
            pixels.ty,
            bytes(data)
        ));
    }

    fn clear_buffer_sub_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "ClearBufferSubData({:#x}, {:#x}, {}, {}, {:#x}, {:#x}, {})",
            target,
            internal_format,
            offset,
            size,
            pixels.format,
            pixels.ty,
            bytes(data)
        ));
    }

    fn named_buffer_data(&self, buffer: GLuint, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        self.record(format!(
            "NamedBufferData({}, {}, {}, {:#x})",
            buffer,
            size,
            bytes(data),
            usage
        ));
    }

    fn named_buffer_sub_data(&self, buffer: GLuint, offset: GLintptr, data: &[u8]) {
        self.record(format!(
            "NamedBufferSubData({}, {}, {})",
            buffer,
            offset,
            bytes(Some(data))
        ));
    }

    fn named_buffer_storage(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) {
        self.record(format!(
            "NamedBufferStorage({}, {}, {}, {:#x})",
            buffer,
            size,
            bytes(data),
            flags
        ));
    }

    fn map_named_buffer(&self, buffer: GLuint, access: GLenum) -> *mut c_void {
        self.record(format!("MapNamedBuffer({}, {:#x})", buffer, access));
        self.mapping()
    }

    fn map_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        self.record(format!(
            "MapNamedBufferRange({}, {}, {}, {:#x})",
            buffer, offset, length, access
        ));
        self.mapping()
    }

    fn unmap_named_buffer(&self, buffer: GLuint) -> bool {
        self.record(format!("UnmapNamedBuffer({})", buffer));
        true
    }

    fn flush_mapped_named_buffer_range(&self, buffer: GLuint, offset: GLintptr, length: GLsizeiptr) {
        self.record(format!(
            "FlushMappedNamedBufferRange({}, {}, {})",
            buffer, offset, length
        ));
    }

    fn copy_named_buffer_sub_data(
        &self,
        read_buffer: GLuint,
        write_buffer: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        self.record(format!(
            "CopyNamedBufferSubData({}, {}, {}, {}, {})",
            read_buffer, write_buffer, read_offset, write_offset, size
        ));
    }

    fn get_named_buffer_parameter_i(&self, buffer: GLuint, pname: GLenum) -> GLint {
        self.record(format!("GetNamedBufferParameteriv({}, {:#x})", buffer, pname));
        self.parameter(pname)
    }

    fn clear_named_buffer_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "ClearNamedBufferData({}, {:#x}, {:#x}, {:#x}, {})",
            buffer,
            internal_format,
            pixels.format,
            pixels.ty,
            bytes(data)
        ));
    }

    fn clear_named_buffer_sub_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "ClearNamedBufferSubData({}, {:#x}, {}, {}, {:#x}, {:#x}, {})",
            buffer,
            internal_format,
            offset,
            size,
            pixels.format,
            pixels.ty,
            bytes(data)
        ));
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        self.record(format!("BindFramebuffer({:#x}, {})", target, framebuffer));
    }

    fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        tex_target: GLenum,
        texture: GLuint,
        level: GLint,
    ) {
        self.record(format!(
            "FramebufferTexture2D({:#x}, {:#x}, {:#x}, {}, {})",
            target, attachment, tex_target, texture, level
        ));
    }

    fn framebuffer_renderbuffer(
        &self,
        target: GLenum,
        attachment: GLenum,
        renderbuffer_target: GLenum,
        renderbuffer: GLuint,
    ) {
        self.record(format!(
            "FramebufferRenderbuffer({:#x}, {:#x}, {:#x}, {})",
            target, attachment, renderbuffer_target, renderbuffer
        ));
    }

    fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        self.record(format!("CheckFramebufferStatus({:#x})", target));
        self.framebuffer_status.get()
    }

    fn draw_buffers(&self, buffers: &[GLenum]) {
        let list = buffers
            .iter()
            .map(|buffer| format!("{:#x}", buffer))
            .collect::<Vec<_>>()
            .join(", ");
        self.record(format!("DrawBuffers({})", list));
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        self.record(format!("BindRenderbuffer({:#x}, {})", target, renderbuffer));
    }

    fn renderbuffer_storage(&self, target: GLenum, internal_format: GLenum, extent: Extent) {
        self.record(format!(
            "RenderbufferStorage({:#x}, {:#x}, {})",
            target,
            internal_format,
            extent_2d(extent)
        ));
    }

    fn renderbuffer_storage_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) {
        self.record(format!(
            "RenderbufferStorageMultisample({:#x}, {}, {:#x}, {})",
            target,
            samples,
            internal_format,
            extent_2d(extent)
        ));
    }

    fn shader_source(&self, shader: GLuint, sources: &[&[u8]]) {
        let source: String = sources
            .iter()
            .map(|part| String::from_utf8_lossy(part))
            .collect();
        self.record(format!("ShaderSource({}, {} parts)", shader, sources.len()));
        self.sources.borrow_mut().insert(shader, source);
    }

    fn compile_shader(&self, shader: GLuint) {
        self.record(format!("CompileShader({})", shader));
    }

    fn get_shader_i(&self, shader: GLuint, pname: GLenum) -> GLint {
        self.record(format!("GetShaderiv({}, {:#x})", shader, pname));
        match pname {
            COMPILE_STATUS => self.compile_log.borrow().is_none() as GLint,
            _ => self.parameter(pname),
        }
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        self.record(format!("GetShaderInfoLog({})", shader));
        self.compile_log.borrow().clone().unwrap_or_default()
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(format!("AttachShader({}, {})", program, shader));
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        self.record(format!("DetachShader({}, {})", program, shader));
    }

    fn link_program(&self, program: GLuint) {
        self.record(format!("LinkProgram({})", program));
    }

    fn get_program_i(&self, program: GLuint, pname: GLenum) -> GLint {
        self.record(format!("GetProgramiv({}, {:#x})", program, pname));
        match pname {
            LINK_STATUS => self.link_log.borrow().is_none() as GLint,
            _ => self.parameter(pname),
        }
    }

    fn program_info_log(&self, program: GLuint) -> String {
        self.record(format!("GetProgramInfoLog({})", program));
        self.link_log.borrow().clone().unwrap_or_default()
    }

    fn use_program(&self, program: GLuint) {
        self.record(format!("UseProgram({})", program));
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        self.record(format!("GetUniformLocation({}, {})", program, name));
        self.locations.borrow().get(name).copied().unwrap_or(-1)
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        self.record(format!("GetAttribLocation({}, {})", program, name));
        self.locations.borrow().get(name).copied().unwrap_or(-1)
    }
}
