use std::ops::Range;
use std::sync::Arc;

use opengl_bindings::types::{GLenum, GLint, GLsizei, GLuint};
use opengl_bindings::{
    DEPTH24_STENCIL8, DEPTH32F_STENCIL8, DEPTH_COMPONENT, DEPTH_COMPONENT16, DEPTH_COMPONENT24,
    DEPTH_COMPONENT32F, DEPTH_STENCIL, FLOAT, FLOAT_32_UNSIGNED_INT_24_8_REV, INT, R16I, R16UI,
    R32I, R32UI, R8I, R8UI, RG16I, RG16UI, RG32I, RG32UI, RG8I, RG8UI, RGB10_A2UI, RGB16I,
    RGB16UI, RGB32I, RGB32UI, RGB8I, RGB8UI, RGBA, RGBA16I, RGBA16UI, RGBA32I, RGBA32UI, RGBA8I,
    RGBA8UI, RGBA_INTEGER, TEXTURE_1D_ARRAY, TEXTURE_3D, TEXTURE_CUBE_MAP,
    TEXTURE_CUBE_MAP_POSITIVE_X, TEXTURE_MAX_LEVEL, TEXTURE_RECTANGLE, UNSIGNED_BYTE,
    UNSIGNED_INT, UNSIGNED_INT_24_8,
};

use super::{private, Operation, OperationKind, StrategyRegistry, StrategyTable};
use crate::config::RegistryConfig;
use crate::driver::{Driver, Extent, PixelFormat};
use crate::error::Result;

/// Allocation of immutable-format texture storage with a fixed number of levels.
pub struct TextureStorage;

impl private::Sealed for TextureStorage {}

impl Operation for TextureStorage {
    const KIND: OperationKind = OperationKind::TextureStorage;
    type Strategy = dyn TextureStorageStrategy;

    fn table(registry: &StrategyRegistry) -> &StrategyTable<Self> {
        &registry.texture_storage
    }
}

pub trait TextureStorageStrategy: Send + Sync {
    fn storage_2d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()>;

    /// 3D, 2D array and cube map array storage; `extent.depth` counts layers
    /// (layer-faces for cube map arrays) where the target has them.
    fn storage_3d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct TextureStorageDsa;

impl TextureStorageStrategy for TextureStorageDsa {
    fn storage_2d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        _target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        gl.texture_storage_2d(texture, levels, internal_format, extent);
        Ok(())
    }

    fn storage_3d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        _target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        gl.texture_storage_3d(texture, levels, internal_format, extent);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct TexStorage;

impl TextureStorageStrategy for TexStorage {
    fn storage_2d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        gl.bind_texture(target, texture);
        gl.tex_storage_2d(target, levels, internal_format, extent);
        Ok(())
    }

    fn storage_3d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        gl.bind_texture(target, texture);
        gl.tex_storage_3d(target, levels, internal_format, extent);
        Ok(())
    }
}

/// Emulates `glTexStorage*` by specifying every mip level with `glTexImage*`
/// and clamping `TEXTURE_MAX_LEVEL` so the texture is complete.
#[derive(Debug, Default)]
pub struct TexImageLevels;

impl TexImageLevels {
    /// Any client format/type pair compatible with `internal_format`; no data is uploaded.
    fn transfer_format(internal_format: GLenum) -> PixelFormat {
        match internal_format {
            DEPTH_COMPONENT16 | DEPTH_COMPONENT24 | DEPTH_COMPONENT32F => PixelFormat {
                format: DEPTH_COMPONENT,
                ty: FLOAT,
            },
            DEPTH24_STENCIL8 => PixelFormat {
                format: DEPTH_STENCIL,
                ty: UNSIGNED_INT_24_8,
            },
            DEPTH32F_STENCIL8 => PixelFormat {
                format: DEPTH_STENCIL,
                ty: FLOAT_32_UNSIGNED_INT_24_8_REV,
            },
            // Integer formats reject non-integer transfers outright
            R8UI | R16UI | R32UI | RG8UI | RG16UI | RG32UI | RGB8UI | RGB16UI | RGB32UI
            | RGBA8UI | RGBA16UI | RGBA32UI | RGB10_A2UI => PixelFormat {
                format: RGBA_INTEGER,
                ty: UNSIGNED_INT,
            },
            R8I | R16I | R32I | RG8I | RG16I | RG32I | RGB8I | RGB16I | RGB32I | RGBA8I
            | RGBA16I | RGBA32I => PixelFormat {
                format: RGBA_INTEGER,
                ty: INT,
            },
            _ => PixelFormat {
                format: RGBA,
                ty: UNSIGNED_BYTE,
            },
        }
    }

    /// Image targets making up one level: the six faces of a cube map, or
    /// `target` itself.
    fn faces(target: GLenum) -> Range<GLenum> {
        if target == TEXTURE_CUBE_MAP {
            TEXTURE_CUBE_MAP_POSITIVE_X..TEXTURE_CUBE_MAP_POSITIVE_X + 6
        } else {
            target..target + 1
        }
    }
}

impl TextureStorageStrategy for TexImageLevels {
    fn storage_2d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        let pixels = Self::transfer_format(internal_format);
        // Array layers of a 1D array and rectangle textures don't shrink per level
        let keep_height = target == TEXTURE_1D_ARRAY || target == TEXTURE_RECTANGLE;

        gl.bind_texture(target, texture);
        let mut level_extent = extent;
        for level in 0..levels.max(1) {
            for face in Self::faces(target) {
                gl.tex_image_2d(face, level as GLint, internal_format, level_extent, pixels, None);
            }
            level_extent.width = (level_extent.width / 2).max(1);
            if !keep_height {
                level_extent.height = (level_extent.height / 2).max(1);
            }
        }
        gl.tex_parameter_i(target, TEXTURE_MAX_LEVEL, levels.max(1) - 1);
        Ok(())
    }

    fn storage_3d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        levels: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        let pixels = Self::transfer_format(internal_format);
        // Only a true 3D texture halves its depth; array layers stay put
        let shrink_depth = target == TEXTURE_3D;

        gl.bind_texture(target, texture);
        let mut level_extent = extent;
        for level in 0..levels.max(1) {
            gl.tex_image_3d(target, level as GLint, internal_format, level_extent, pixels, None);
            level_extent.width = (level_extent.width / 2).max(1);
            level_extent.height = (level_extent.height / 2).max(1);
            if shrink_depth {
                level_extent.depth = (level_extent.depth / 2).max(1);
            }
        }
        gl.tex_parameter_i(target, TEXTURE_MAX_LEVEL, levels.max(1) - 1);
        Ok(())
    }
}

pub(super) fn register_defaults(registry: &StrategyRegistry, config: &RegistryConfig) -> Result<()> {
    if config.is_enabled("texture_storage_dsa") {
        registry.register::<TextureStorage, _>(
            "texture_storage_dsa",
            20,
            |caps| caps.direct_state_access && caps.texture_storage,
            Arc::new(TextureStorageDsa),
        )?;
    }
    if config.is_enabled("texture_storage") {
        registry.register::<TextureStorage, _>(
            "texture_storage",
            10,
            |caps| caps.texture_storage,
            Arc::new(TexStorage),
        )?;
    }
    if config.is_enabled("texture_image_levels") {
        registry.register::<TextureStorage, _>(
            "texture_image_levels",
            0,
            |_| true,
            Arc::new(TexImageLevels),
        )?;
    }
    Ok(())
}
