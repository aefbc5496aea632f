//! The native entry points every wrapper and strategy goes through.
//!
//! [`Driver`] is implemented for the generated [`opengl_bindings::Gl`] table in
//! `gl.rs`. Keeping the table behind a trait lets the capability matrix be
//! exercised against a recording fake instead of a live context.

use std::os::raw::c_void;

use opengl_bindings::types::{
    GLbitfield, GLboolean, GLenum, GLfloat, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint,
};

use crate::handle::ObjectKind;

/// Entry points whose presence the capability probe checks with `is_loaded`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    TexImage2DMultisample,
    TexStorage2D,
    TexStorage3D,
    TexStorage2DMultisample,
    TextureStorage2D,
    TextureStorage3D,
    TextureStorage2DMultisample,
    BufferStorage,
    NamedBufferData,
    NamedBufferStorage,
    MapBufferRange,
    CopyBufferSubData,
    ClearBufferData,
}

/// Image dimensions and layout shared by the texture storage calls.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Extent {
    pub width: GLsizei,
    pub height: GLsizei,
    pub depth: GLsizei,
}

impl Extent {
    pub const fn new_2d(width: GLsizei, height: GLsizei) -> Extent {
        Extent {
            width,
            height,
            depth: 1,
        }
    }

    pub const fn new_3d(width: GLsizei, height: GLsizei, depth: GLsizei) -> Extent {
        Extent {
            width,
            height,
            depth,
        }
    }
}

/// Pixel transfer description for image uploads.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PixelFormat {
    pub format: GLenum,
    pub ty: GLenum,
}

pub trait Driver {
    // Queries. A `None` string means the driver could not answer.
    fn get_integer(&self, pname: GLenum) -> GLint;
    fn get_string(&self, name: GLenum) -> Option<String>;
    fn get_string_i(&self, name: GLenum, index: GLuint) -> Option<String>;
    fn is_loaded(&self, entry: EntryPoint) -> bool;

    // Object lifetime. Returns 0 if the driver could not create the object.
    fn create_object(&self, kind: ObjectKind) -> GLuint;
    fn delete_object(&self, kind: ObjectKind, id: GLuint);

    // Textures
    fn active_texture(&self, unit: GLenum);
    fn bind_texture(&self, target: GLenum, texture: GLuint);
    fn tex_parameter_i(&self, target: GLenum, pname: GLenum, value: GLint);
    fn tex_parameter_f(&self, target: GLenum, pname: GLenum, value: GLfloat);
    fn get_tex_parameter_i(&self, target: GLenum, pname: GLenum) -> GLint;
    fn get_tex_level_parameter_i(&self, target: GLenum, level: GLint, pname: GLenum) -> GLint;
    fn tex_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        extent: Extent,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    );
    fn tex_sub_image_2d(
        &self,
        target: GLenum,
        level: GLint,
        offset: (GLint, GLint),
        extent: Extent,
        pixels: PixelFormat,
        data: &[u8],
    );
    fn tex_image_3d(
        &self,
        target: GLenum,
        level: GLint,
        internal_format: GLenum,
        extent: Extent,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    );
    fn tex_storage_2d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, extent: Extent);
    fn tex_storage_3d(&self, target: GLenum, levels: GLsizei, internal_format: GLenum, extent: Extent);
    fn texture_storage_2d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    );
    fn texture_storage_3d(
        &self,
        texture: GLuint,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    );
    fn tex_image_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    );
    fn tex_image_3d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    );
    fn tex_storage_2d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    );
    fn tex_storage_3d_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    );
    fn texture_storage_2d_multisample(
        &self,
        texture: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    );
    fn texture_storage_3d_multisample(
        &self,
        texture: GLuint,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    );
    fn generate_mipmap(&self, target: GLenum);

    // Buffers, bound to a target
    fn bind_buffer(&self, target: GLenum, buffer: GLuint);
    fn bind_buffer_base(&self, target: GLenum, index: GLuint, buffer: GLuint);
    fn buffer_data(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum);
    fn buffer_sub_data(&self, target: GLenum, offset: GLintptr, data: &[u8]);
    fn buffer_storage(&self, target: GLenum, size: GLsizeiptr, data: Option<&[u8]>, flags: GLbitfield);
    fn map_buffer(&self, target: GLenum, access: GLenum) -> *mut c_void;
    fn map_buffer_range(
        &self,
        target: GLenum,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void;
    fn unmap_buffer(&self, target: GLenum) -> bool;
    fn flush_mapped_buffer_range(&self, target: GLenum, offset: GLintptr, length: GLsizeiptr);
    fn copy_buffer_sub_data(
        &self,
        read_target: GLenum,
        write_target: GLenum,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    );
    fn get_buffer_parameter_i(&self, target: GLenum, pname: GLenum) -> GLint;
    fn clear_buffer_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    );
    fn clear_buffer_sub_data(
        &self,
        target: GLenum,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    );

    // Buffers, direct state access
    fn named_buffer_data(&self, buffer: GLuint, size: GLsizeiptr, data: Option<&[u8]>, usage: GLenum);
    fn named_buffer_sub_data(&self, buffer: GLuint, offset: GLintptr, data: &[u8]);
    fn named_buffer_storage(
        &self,
        buffer: GLuint,
        size: GLsizeiptr,
        data: Option<&[u8]>,
        flags: GLbitfield,
    );
    fn map_named_buffer(&self, buffer: GLuint, access: GLenum) -> *mut c_void;
    fn map_named_buffer_range(
        &self,
        buffer: GLuint,
        offset: GLintptr,
        length: GLsizeiptr,
        access: GLbitfield,
    ) -> *mut c_void;
    fn unmap_named_buffer(&self, buffer: GLuint) -> bool;
    fn flush_mapped_named_buffer_range(&self, buffer: GLuint, offset: GLintptr, length: GLsizeiptr);
    fn copy_named_buffer_sub_data(
        &self,
        read_buffer: GLuint,
        write_buffer: GLuint,
        read_offset: GLintptr,
        write_offset: GLintptr,
        size: GLsizeiptr,
    );
    fn get_named_buffer_parameter_i(&self, buffer: GLuint, pname: GLenum) -> GLint;
    fn clear_named_buffer_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    );
    fn clear_named_buffer_sub_data(
        &self,
        buffer: GLuint,
        internal_format: GLenum,
        offset: GLintptr,
        size: GLsizeiptr,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    );

    // Framebuffers and renderbuffers
    fn bind_framebuffer(&self, target: GLenum, framebuffer: GLuint);
    fn framebuffer_texture_2d(
        &self,
        target: GLenum,
        attachment: GLenum,
        tex_target: GLenum,
        texture: GLuint,
        level: GLint,
    );
    fn framebuffer_renderbuffer(
        &self,
        target: GLenum,
        attachment: GLenum,
        renderbuffer_target: GLenum,
        renderbuffer: GLuint,
    );
    fn check_framebuffer_status(&self, target: GLenum) -> GLenum;
    fn draw_buffers(&self, buffers: &[GLenum]);
    fn bind_renderbuffer(&self, target: GLenum, renderbuffer: GLuint);
    fn renderbuffer_storage(&self, target: GLenum, internal_format: GLenum, extent: Extent);
    fn renderbuffer_storage_multisample(
        &self,
        target: GLenum,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    );

    // Shaders and programs
    fn shader_source(&self, shader: GLuint, sources: &[&[u8]]);
    fn compile_shader(&self, shader: GLuint);
    fn get_shader_i(&self, shader: GLuint, pname: GLenum) -> GLint;
    fn shader_info_log(&self, shader: GLuint) -> String;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn detach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn get_program_i(&self, program: GLuint, pname: GLenum) -> GLint;
    fn program_info_log(&self, program: GLuint) -> String;
    fn use_program(&self, program: GLuint);
    fn get_uniform_location(&self, program: GLuint, name: &str) -> GLint;
    fn get_attrib_location(&self, program: GLuint, name: &str) -> GLint;
}

pub(crate) const fn gl_bool(value: bool) -> GLboolean {
    if value {
        opengl_bindings::TRUE
    } else {
        opengl_bindings::FALSE
    }
}
