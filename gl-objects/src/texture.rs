use opengl_bindings::types::{GLenum, GLfloat, GLint, GLsizei, GLuint};
use opengl_bindings::{
    Gl, CLAMP_TO_EDGE, LINEAR, TEXTURE0, TEXTURE_MAG_FILTER, TEXTURE_MIN_FILTER, TEXTURE_WRAP_R,
    TEXTURE_WRAP_S, TEXTURE_WRAP_T,
};

use crate::context::Context;
use crate::driver::{Driver, Extent, PixelFormat};
use crate::error::{Error, Result};
use crate::handle::{Handle, ObjectKind};
use crate::strategy::{Multisample, MultisampleStorage, TextureStorage};

/// A texture object bound to a fixed target.
///
/// Every call binds the texture to its target first and leaves it bound.
pub struct Texture<'ctx, D: Driver = Gl> {
    context: &'ctx Context<D>,
    handle: Handle,
    target: GLenum,
}

impl<'ctx, D: Driver> Texture<'ctx, D> {
    pub fn new(context: &'ctx Context<D>, target: GLenum) -> Result<Self> {
        let handle = Handle::allocate(context.driver(), ObjectKind::Texture)?;
        Ok(Texture {
            context,
            handle,
            target,
        })
    }

    /// Wraps a texture created elsewhere; it is not deleted on drop.
    pub fn from_id(context: &'ctx Context<D>, id: GLuint, target: GLenum) -> Self {
        Texture {
            context,
            handle: Handle::wrap(id, ObjectKind::Texture),
            target,
        }
    }

    /// A texture with linear filtering and edge clamping on every axis.
    pub fn create_default(context: &'ctx Context<D>, target: GLenum) -> Result<Self> {
        let texture = Texture::new(context, target)?;
        texture.set_parameter_i(TEXTURE_MIN_FILTER, LINEAR as GLint)?;
        texture.set_parameter_i(TEXTURE_MAG_FILTER, LINEAR as GLint)?;
        texture.set_parameter_i(TEXTURE_WRAP_S, CLAMP_TO_EDGE as GLint)?;
        texture.set_parameter_i(TEXTURE_WRAP_T, CLAMP_TO_EDGE as GLint)?;
        texture.set_parameter_i(TEXTURE_WRAP_R, CLAMP_TO_EDGE as GLint)?;
        Ok(texture)
    }

    pub fn id(&self) -> Result<GLuint> {
        self.handle.id()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn target(&self) -> GLenum {
        self.target
    }

    fn gl(&self) -> &D {
        self.context.driver()
    }

    pub fn bind(&self) -> Result<()> {
        let id = self.handle.id()?;
        self.gl().bind_texture(self.target, id);
        Ok(())
    }

    pub fn unbind(&self) {
        self.gl().bind_texture(self.target, 0);
    }

    fn texture_unit(unit: GLuint) -> Result<GLenum> {
        TEXTURE0
            .checked_add(unit)
            .ok_or(Error::InvalidTextureUnit(unit))
    }

    /// Binds to texture unit `unit` (an index, not a `TEXTUREi` enum).
    pub fn bind_active(&self, unit: GLuint) -> Result<()> {
        let id = self.handle.id()?;
        let unit = Self::texture_unit(unit)?;
        self.gl().active_texture(unit);
        self.gl().bind_texture(self.target, id);
        Ok(())
    }

    /// Clears this texture's target on texture unit `unit`.
    pub fn unbind_active(&self, unit: GLuint) -> Result<()> {
        let unit = Self::texture_unit(unit)?;
        self.gl().active_texture(unit);
        self.gl().bind_texture(self.target, 0);
        Ok(())
    }

    pub fn set_parameter_i(&self, pname: GLenum, value: GLint) -> Result<()> {
        self.bind()?;
        self.gl().tex_parameter_i(self.target, pname, value);
        Ok(())
    }

    pub fn set_parameter_f(&self, pname: GLenum, value: GLfloat) -> Result<()> {
        self.bind()?;
        self.gl().tex_parameter_f(self.target, pname, value);
        Ok(())
    }

    pub fn parameter(&self, pname: GLenum) -> Result<GLint> {
        self.bind()?;
        Ok(self.gl().get_tex_parameter_i(self.target, pname))
    }

    pub fn level_parameter(&self, level: GLint, pname: GLenum) -> Result<GLint> {
        self.bind()?;
        Ok(self.gl().get_tex_level_parameter_i(self.target, level, pname))
    }

    pub fn image_2d(
        &self,
        level: GLint,
        internal_format: GLenum,
        extent: Extent,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        self.bind()?;
        self.gl()
            .tex_image_2d(self.target, level, internal_format, extent, pixels, data);
        Ok(())
    }

    pub fn image_3d(
        &self,
        level: GLint,
        internal_format: GLenum,
        extent: Extent,
        pixels: PixelFormat,
        data: Option<&[u8]>,
    ) -> Result<()> {
        self.bind()?;
        self.gl()
            .tex_image_3d(self.target, level, internal_format, extent, pixels, data);
        Ok(())
    }

    pub fn sub_image_2d(
        &self,
        level: GLint,
        offset: (GLint, GLint),
        extent: Extent,
        pixels: PixelFormat,
        data: &[u8],
    ) -> Result<()> {
        self.bind()?;
        self.gl()
            .tex_sub_image_2d(self.target, level, offset, extent, pixels, data);
        Ok(())
    }

    pub fn generate_mipmap(&self) -> Result<()> {
        self.bind()?;
        self.gl().generate_mipmap(self.target);
        Ok(())
    }

    /// Immutable storage for `levels` mip levels, through whichever
    /// implementation this context supports.
    pub fn storage_2d(&self, levels: GLsizei, internal_format: GLenum, extent: Extent) -> Result<()> {
        let target = self.target;
        self.context
            .dispatch::<TextureStorage, _>(&self.handle, |strategy, gl, id| {
                strategy.storage_2d(gl, id, target, levels, internal_format, extent)
            })
    }

    /// Like [`storage_2d`](Self::storage_2d) for 3D, 2D array and cube map
    /// array targets.
    pub fn storage_3d(&self, levels: GLsizei, internal_format: GLenum, extent: Extent) -> Result<()> {
        let target = self.target;
        self.context
            .dispatch::<TextureStorage, _>(&self.handle, |strategy, gl, id| {
                strategy.storage_3d(gl, id, target, levels, internal_format, extent)
            })
    }

    pub fn storage_2d_multisample(
        &self,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) -> Result<()> {
        let target = self.target;
        let desc = Multisample {
            samples,
            internal_format,
            extent,
            fixed_sample_locations,
        };
        self.context
            .dispatch::<MultisampleStorage, _>(&self.handle, |strategy, gl, id| {
                strategy.storage_2d(gl, id, target, &desc)
            })
    }

    pub fn storage_3d_multisample(
        &self,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
        fixed_sample_locations: bool,
    ) -> Result<()> {
        let target = self.target;
        let desc = Multisample {
            samples,
            internal_format,
            extent,
            fixed_sample_locations,
        };
        self.context
            .dispatch::<MultisampleStorage, _>(&self.handle, |strategy, gl, id| {
                strategy.storage_3d(gl, id, target, &desc)
            })
    }
}

impl<D: Driver> Drop for Texture<'_, D> {
    fn drop(&mut self) {
        self.handle.release(self.context.driver());
    }
}
