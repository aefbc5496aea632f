use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};
use std::ptr;

use opengl_bindings::types::{
    GLbitfield, GLchar, GLenum, GLfloat, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint,
};
use opengl_bindings::{Gl, INFO_LOG_LENGTH, TRUE};

use crate::driver::{gl_bool, Driver, EntryPoint, Extent, PixelFormat};
use crate::handle::ObjectKind;

fn data_ptr(data: Option<&[u8]>) -> *const c_void {
    data.map_or(ptr::null(), |data| data.as_ptr() as *const c_void)
}

unsafe fn gl_string(raw: *const u8) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    Some(
        CStr::from_ptr(raw as *const c_char)
            .to_string_lossy()
            .into_owned(),
    )
}

fn info_log(length: GLint, fetch: impl FnOnce(GLsizei, *mut GLsizei, *mut GLchar)) -> String {
    if length <= 0 {
        return String::new();
    }
    let mut buf = vec![0u8; length as usize];
    let mut written = 0;
    fetch(length, &mut written, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buf).into_owned()
}

impl Driver for Gl {
    fn get_integer(&self, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetIntegerv(pname, &mut value) };
        value
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        unsafe { gl_string(self.GetString(name)) }
    }

    fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String> {
        if !self.GetStringi.is_loaded() {
            return None;
        }
        unsafe { gl_string(self.GetStringi(name, index)) }
    }

    fn is_loaded(&self, entry: EntryPoint) -> bool {
        match entry {
            EntryPoint::TexImage2DMultisample => self.TexImage2DMultisample.is_loaded(),
            EntryPoint::TexStorage2D => self.TexStorage2D.is_loaded(),
            EntryPoint::TexStorage3D => self.TexStorage3D.is_loaded(),
            EntryPoint::TexStorage2DMultisample => self.TexStorage2DMultisample.is_loaded(),
            EntryPoint::TextureStorage2D => self.TextureStorage2D.is_loaded(),
            EntryPoint::TextureStorage3D => self.TextureStorage3D.is_loaded(),
            EntryPoint::TextureStorage2DMultisample => {
                self.TextureStorage2DMultisample.is_loaded()
            }
            EntryPoint::BufferStorage => self.BufferStorage.is_loaded(),
            EntryPoint::NamedBufferData => self.NamedBufferData.is_loaded(),
            EntryPoint::NamedBufferStorage => self.NamedBufferStorage.is_loaded(),
            EntryPoint::MapBufferRange => self.MapBufferRange.is_loaded(),
            EntryPoint::CopyBufferSubData => self.CopyBufferSubData.is_loaded(),
            EntryPoint::ClearBufferData => self.ClearBufferData.is_loaded(),
        }
    }

    fn create_object(&self, kind: ObjectKind) -> GLuint {
        let mut id = 0;
        unsafe {
            match kind {
                ObjectKind::Texture => self.GenTextures(1, &mut id),
                ObjectKind::Buffer => self.GenBuffers(1, &mut id),
                ObjectKind::Framebuffer => self.GenFramebuffers(1, &mut id),
                ObjectKind::Renderbuffer => self.GenRenderbuffers(1, &mut id),
                ObjectKind::VertexArray => self.GenVertexArrays(1, &mut id),
                ObjectKind::Program => id = self.CreateProgram(),
                ObjectKind::Shader(stage) => id = self.CreateShader(stage.gl_enum()),
            }
        }
        id
    }

    fn delete_object(&self, kind: ObjectKind, id: GLuint) {
        unsafe {
            match kind {
                ObjectKind::Texture => self.DeleteTextures(1, &id),
                ObjectKind::Buffer => self.DeleteBuffers(1, &id),
                ObjectKind::Framebuffer => self.DeleteFramebuffers(1, &id),
                ObjectKind::Renderbuffer => self.DeleteRenderbuffers(1, &id),
                ObjectKind::VertexArray => self.DeleteVertexArrays(1, &id),
                ObjectKind::Program => self.DeleteProgram(id),
                ObjectKind::Shader(_) => self.DeleteShader(id),
            }
        }
    }

    fn active_texture(&self, unit: GLenum) {
        unsafe { self.ActiveTexture(unit) }
    }

    fn bind_texture(&self, target: GLenum, texture: GLuint) {
        unsafe { self.BindTexture(target, texture) }
    }

    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, value: GLint) {
        unsafe { self.TexParameteri(target, pname, value) }
    }

    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, value: GLfloat) {
        unsafe { self.TexParameterf(target, pname, value) }
    }

    fn get_tex_parameter_i(&self, target: GLenum, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetTexParameteriv(target, pname, &mut value) };
        value
    }

    fn get_tex_level_parameter_i(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetTexLevelParameteriv(target, level, pname, &mut value) };
        value
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
        unsafe {
            self.TexImage2D(
                target,
                level,
                internal_format as GLint,
                extent.width,
                extent.height,
                0,
                pixels.format,
                pixels.ty,
                data_ptr(data),
            )
        }
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
        unsafe {
            self.TexSubImage2D(
                target,
                level,
                offset.0,
                offset.1,
                extent.width,
                extent.height,
                pixels.format,
                pixels.ty,
                data.as_ptr() as *const c_void,
            )
        }
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
        unsafe {
            self.TexImage3D(
                target,
                level,
                internal_format as GLint,
                extent.width,
                extent.height,
                extent.depth,
                0,
                pixels.format,
                pixels.ty,
                data_ptr(data),
            )
        }
    }

    fn tex_storage_2d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, extent: Extent) {
        unsafe { self.TexStorage2D(target, levels, internal_format, extent.width, extent.height) }
    }

    fn tex_storage_3d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, extent: Extent) {
        unsafe {
            self.TexStorage3D(
                target,
                levels,
                internal_format,
                extent.width,
                extent.height,
                extent.depth,
            )
        }
    }

    fn texture_storage_2d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) {
        unsafe {
            self.TextureStorage2D(texture, levels, internal_format, extent.width, extent.height)
        }
    }

    fn texture_storage_3d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) {
        unsafe {
            self.TextureStorage3D(
                texture,
                levels,
                internal_format,
                extent.width,
                extent.height,
                extent.depth,
            )
        }
    }

    fn tex_image_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        unsafe {
            self.TexImage2DMultisample(
                target,
                samples,
                internal_format,
                extent.width,
                extent.height,
                gl_bool(fixed_sample_locations),
            )
        }
    }

    fn tex_image_3d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        unsafe {
            self.TexImage3DMultisample(
                target,
                samples,
                internal_format,
                extent.width,
                extent.height,
                extent.depth,
                gl_bool(fixed_sample_locations),
            )
        }
    }

    fn tex_storage_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        unsafe {
            self.TexStorage2DMultisample(
                target,
                samples,
                internal_format,
                extent.width,
                extent.height,
                gl_bool(fixed_sample_locations),
            )
        }
    }

    fn tex_storage_3d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        unsafe {
            self.TexStorage3DMultisample(
                target,
                samples,
                internal_format,
                extent.width,
                extent.height,
                extent.depth,
                gl_bool(fixed_sample_locations),
            )
        }
    }

    fn texture_storage_2d_multisample(
        &self,
        texture: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        unsafe {
            self.TextureStorage2DMultisample(
                texture,
                samples,
                internal_format,
                extent.width,
                extent.height,
                gl_bool(fixed_sample_locations),
            )
        }
    }

    fn texture_storage_3d_multisample(
        &self,
        texture: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) {
        unsafe {
            self.TextureStorage3DMultisample(
                texture,
                samples,
                internal_format,
                extent.width,
                extent.height,
                extent.depth,
                gl_bool(fixed_sample_locations),
            )
        }
    }

    fn generate_mipmap(&self, target: GLenum) {
        unsafe { self.GenerateMipmap(target) }
    }

    fn bind_buffer(&self, target: GLenum, buffer: GLuint) {
        unsafe { self.BindBuffer(target, buffer) }
    }

    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint) {
        unsafe { self.BindBufferBase(target, index, buffer) }
    }

    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        unsafe { self.BufferData(target, size, data_ptr(data), usage) }
    }

    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]) {
        unsafe {
            self.BufferSubData(
                target,
                offset,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        }
    }

    fn buffer_storage(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, flags: GLbitfield) {
        unsafe { self.BufferStorage(target, size, data_ptr(data), flags) }
    }

    fn map_buffer(&self, target: GLenum, access: GLenum) -> *mut c_void {
        unsafe { self.MapBuffer(target, access) }
    }

    fn map_buffer_range(
        &self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        unsafe { self.MapBufferRange(target, offset, length, access) }
    }

    fn unmap_buffer(&self, target: GLenum) -> bool {
        unsafe { self.UnmapBuffer(target) == TRUE }
    }

    fn flush_mapped_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr) {
        unsafe { self.FlushMappedBufferRange(target, offset, length) }
    }

    fn copy_buffer_sub_data(
        &self,
        read_target: GLenum,
        write_target: GLenum,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        unsafe {
            self.CopyBufferSubData(read_target, write_target, read_offset, write_offset, size)
        }
    }

    fn get_buffer_parameter_i(&self, target: GLenum, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetBufferParameteriv(target, pname, &mut value) };
        value
    }

    fn clear_buffer_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        unsafe {
            self.ClearBufferData(target, internal_format, pixels.format, pixels.ty, data_ptr(data))
        }
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
        unsafe {
            self.ClearBufferSubData(
                target,
                internal_format,
                offset,
                size,
                pixels.format,
                pixels.ty,
                data_ptr(data),
            )
        }
    }

    fn named_buffer_data(&self, buffer: GLuint, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum) {
        unsafe { self.NamedBufferData(buffer, size, data_ptr(data), usage) }
    }

    fn named_buffer_sub_data(&self, buffer: GLuint, offset: GLintptr, data: &[u8]) {
        unsafe {
            self.NamedBufferSubData(
                buffer,
                offset,
                data.len() as GLsizeiptr,
                data.as_ptr() as *const c_void,
            )
        }
    }

    fn named_buffer_storage(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    ) {
        unsafe { self.NamedBufferStorage(buffer, size, data_ptr(data), flags) }
    }

    fn map_named_buffer(&self, buffer: GLuint, access: GLenum) -> *mut c_void {
        unsafe { self.MapNamedBuffer(buffer, access) }
    }

    fn map_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void {
        unsafe { self.MapNamedBufferRange(buffer, offset, length, access) }
    }

    fn unmap_named_buffer(&self, buffer: GLuint) -> bool {
        unsafe { self.UnmapNamedBuffer(buffer) == TRUE }
    }

    fn flush_mapped_named_buffer_range(&self, buffer: GLuint, offset: GLintptr, length: GLsizeiptr) {
        unsafe { self.FlushMappedNamedBufferRange(buffer, offset, length) }
    }

    fn copy_named_buffer_sub_data(
        &self,
        read_buffer: GLuint,
        write_buffer: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    ) {
        unsafe {
            self.CopyNamedBufferSubData(read_buffer, write_buffer, read_offset, write_offset, size)
        }
    }

    fn get_named_buffer_parameter_i(&self, buffer: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetNamedBufferParameteriv(buffer, pname, &mut value) };
        value
    }

    fn clear_named_buffer_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) {
        unsafe {
            self.ClearNamedBufferData(buffer, internal_format, pixels.format, pixels.ty, data_ptr(data))
        }
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
        unsafe {
            self.ClearNamedBufferSubData(
                buffer,
                internal_format,
                offset,
                size,
                pixels.format,
                pixels.ty,
                data_ptr(data),
            )
        }
    }

    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint) {
        unsafe { self.BindFramebuffer(target, framebuffer) }
    }

    fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        tex_target: GLenum,
        texture: GLuint,
        level: GLint,
    ) {
        unsafe { self.FramebufferTexture2D(target, attachment, tex_target, texture, level) }
    }

    fn framebuffer_renderbuffer(
        &self,
        target: GLenum,
        attachment: GLenum,
        renderbuffer_target: GLenum,
        renderbuffer: GLuint,
    ) {
        unsafe {
            self.FramebufferRenderbuffer(target, attachment, renderbuffer_target, renderbuffer)
        }
    }

    fn check_framebuffer_status(&self, target: GLenum) -> GLenum {
        unsafe { self.CheckFramebufferStatus(target) }
    }

    fn draw_buffers(&self, buffers: &[GLenum]) {
        unsafe { self.DrawBuffers(buffers.len() as GLsizei, buffers.as_ptr()) }
    }

    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint) {
        unsafe { self.BindRenderbuffer(target, renderbuffer) }
    }

    fn renderbuffer_storage(&self, target: GLenum, internal_format: GLenum, extent: Extent) {
        unsafe { self.RenderbufferStorage(target, internal_format, extent.width, extent.height) }
    }

    fn renderbuffer_storage_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) {
        unsafe {
            self.RenderbufferStorageMultisample(
                target,
                samples,
                internal_format,
                extent.width,
                extent.height,
            )
        }
    }

    fn shader_source(&self, shader: GLuint, sources: &[&[u8]]) {
        let strings: Vec<*const GLchar> = sources
            .iter()
            .map(|source| source.as_ptr() as *const GLchar)
            .collect();
        let lengths: Vec<GLint> = sources.iter().map(|source| source.len() as GLint).collect();
        unsafe {
            self.ShaderSource(
                shader,
                sources.len() as GLsizei,
                strings.as_ptr(),
                lengths.as_ptr(),
            )
        }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { self.CompileShader(shader) }
    }

    fn get_shader_i(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetShaderiv(shader, pname, &mut value) };
        value
    }

    fn shader_info_log(&self, shader: GLuint) -> String {
        let length = self.get_shader_i(shader, INFO_LOG_LENGTH);
        info_log(length, |size, written, buf| unsafe {
            self.GetShaderInfoLog(shader, size, written, buf)
        })
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { self.AttachShader(program, shader) }
    }

    fn detach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { self.DetachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { self.LinkProgram(program) }
    }

    fn get_program_i(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { self.GetProgramiv(program, pname, &mut value) };
        value
    }

    fn program_info_log(&self, program: GLuint) -> String {
        let length = self.get_program_i(program, INFO_LOG_LENGTH);
        info_log(length, |size, written, buf| unsafe {
            self.GetProgramInfoLog(program, size, written, buf)
        })
    }

    fn use_program(&self, program: GLuint) {
        unsafe { self.UseProgram(program) }
    }

    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => unsafe { self.GetUniformLocation(program, name.as_ptr() as *const GLchar) },
            Err(_) => -1,
        }
    }

    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint {
        match CString::new(name) {
            Ok(name) => unsafe { self.GetAttribLocation(program, name.as_ptr() as *const GLchar) },
            Err(_) => -1,
        }
    }
}
