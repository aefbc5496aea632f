use std::sync::Arc;

use opengl_bindings::types::{GLenum, GLsizei, GLuint};

use super::{private, Operation, OperationKind, StrategyRegistry, StrategyTable};
use crate::config::RegistryConfig;
use crate::driver::{Driver, Extent};
use crate::error::Result;

/// Allocation of multisampled texture storage.
pub struct MultisampleStorage;

impl private::Sealed for MultisampleStorage {}

impl Operation for MultisampleStorage {
    const KIND: OperationKind = OperationKind::MultisampleStorage;
    type Strategy = dyn MultisampleStorageStrategy;

    fn table(registry: &StrategyRegistry) -> &StrategyTable<Self> {
        &registry.multisample_storage
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Multisample {
    pub samples: GLsizei,
    pub internal_format: GLenum,
    pub extent: Extent,
    pub fixed_sample_locations: bool,
}

pub trait MultisampleStorageStrategy: Send + Sync {
    fn storage_2d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        desc: &Multisample,
    ) -> Result<()>;

    fn storage_3d(
        &self,
        gl: &dyn Driver,
        texture: GLuint,
        target: GLenum,
        desc: &Multisample,
    ) -> Result<()>;
}

/// `glTextureStorage*DMultisample`, no binding needed.
#[derive(Debug, Default)]
pub struct TextureStorageMultisampleDsa;

impl MultisampleStorageStrategy for TextureStorageMultisampleDsa {
    fn storage_2d(&self, gl: &dyn Driver, texture: GLuint, _target: GLenum, desc: &Multisample) -> Result<()> {
        gl.texture_storage_2d_multisample(
            texture,
            desc.samples,
            desc.internal_format,
            desc.extent,
            desc.fixed_sample_locations,
        );
        Ok(())
    }

    fn storage_3d(&self, gl: &dyn Driver, texture: GLuint, _target: GLenum, desc: &Multisample) -> Result<()> {
        gl.texture_storage_3d_multisample(
            texture,
            desc.samples,
            desc.internal_format,
            desc.extent,
            desc.fixed_sample_locations,
        );
        Ok(())
    }
}

/// Immutable storage through `glTexStorage*DMultisample` on the bound texture.
#[derive(Debug, Default)]
pub struct TexStorageMultisample;

impl MultisampleStorageStrategy for TexStorageMultisample {
    fn storage_2d(&self, gl: &dyn Driver, texture: GLuint, target: GLenum, desc: &Multisample) -> Result<()> {
        gl.bind_texture(target, texture);
        gl.tex_storage_2d_multisample(
            target,
            desc.samples,
            desc.internal_format,
            desc.extent,
            desc.fixed_sample_locations,
        );
        Ok(())
    }

    fn storage_3d(&self, gl: &dyn Driver, texture: GLuint, target: GLenum, desc: &Multisample) -> Result<()> {
        gl.bind_texture(target, texture);
        gl.tex_storage_3d_multisample(
            target,
            desc.samples,
            desc.internal_format,
            desc.extent,
            desc.fixed_sample_locations,
        );
        Ok(())
    }
}

/// Mutable storage through `glTexImage*DMultisample`, for drivers older than 4.3.
#[derive(Debug, Default)]
pub struct TexImageMultisample;

impl MultisampleStorageStrategy for TexImageMultisample {
    fn storage_2d(&self, gl: &dyn Driver, texture: GLuint, target: GLenum, desc: &Multisample) -> Result<()> {
        gl.bind_texture(target, texture);
        gl.tex_image_2d_multisample(
            target,
            desc.samples,
            desc.internal_format,
            desc.extent,
            desc.fixed_sample_locations,
        );
        Ok(())
    }

    fn storage_3d(&self, gl: &dyn Driver, texture: GLuint, target: GLenum, desc: &Multisample) -> Result<()> {
        gl.bind_texture(target, texture);
        gl.tex_image_3d_multisample(
            target,
            desc.samples,
            desc.internal_format,
            desc.extent,
            desc.fixed_sample_locations,
        );
        Ok(())
    }
}

pub(super) fn register_defaults(registry: &StrategyRegistry, config: &RegistryConfig) -> Result<()> {
    if config.is_enabled("texture_storage_multisample_dsa") {
        registry.register::<MultisampleStorage, _>(
            "texture_storage_multisample_dsa",
            20,
            |caps| caps.direct_state_access && caps.texture_storage_multisample,
            Arc::new(TextureStorageMultisampleDsa),
        )?;
    }
    if config.is_enabled("texture_storage_multisample") {
        registry.register::<MultisampleStorage, _>(
            "texture_storage_multisample",
            10,
            |caps| caps.texture_storage_multisample,
            Arc::new(TexStorageMultisample),
        )?;
    }
    if config.is_enabled("texture_image_multisample") {
        registry.register::<MultisampleStorage, _>(
            "texture_image_multisample",
            0,
            |caps| caps.texture_multisample,
            Arc::new(TexImageMultisample),
        )?;
    }
    Ok(())
}
