use log::warn;
use opengl_bindings::types::{GLenum, GLint, GLuint};
use opengl_bindings::{Gl, FRAMEBUFFER, FRAMEBUFFER_COMPLETE, RENDERBUFFER};

use crate::context::Context;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::handle::{Handle, ObjectKind};
use crate::renderbuffer::Renderbuffer;
use crate::texture::Texture;

/// A framebuffer object. Attachment and status calls bind it to
/// `GL_FRAMEBUFFER` first.
pub struct Framebuffer<'ctx, D: Driver = Gl> {
    context: &'ctx Context<D>,
    handle: Handle,
}

impl<'ctx, D: Driver> Framebuffer<'ctx, D> {
    pub fn new(context: &'ctx Context<D>) -> Result<Self> {
        let handle = Handle::allocate(context.driver(), ObjectKind::Framebuffer)?;
        Ok(Framebuffer { context, handle })
    }

    pub fn from_id(context: &'ctx Context<D>, id: GLuint) -> Self {
        Framebuffer {
            context,
            handle: Handle::wrap(id, ObjectKind::Framebuffer),
        }
    }

    /// Restores the window-system framebuffer on `target`.
    pub fn bind_default(context: &Context<D>, target: GLenum) {
        context.driver().bind_framebuffer(target, 0);
    }

    pub fn id(&self) -> Result<GLuint> {
        self.handle.id()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn bind(&self, target: GLenum) -> Result<()> {
        let id = self.handle.id()?;
        self.context.driver().bind_framebuffer(target, id);
        Ok(())
    }

    pub fn unbind(&self, target: GLenum) {
        Self::bind_default(self.context, target);
    }

    pub fn attach_texture(&self, attachment: GLenum, texture: &Texture<'_, D>, level: GLint) -> Result<()> {
        let texture_id = texture.id()?;
        self.bind(FRAMEBUFFER)?;
        self.context.driver().framebuffer_texture_2d(
            FRAMEBUFFER,
            attachment,
            texture.target(),
            texture_id,
            level,
        );
        Ok(())
    }

    pub fn attach_renderbuffer(&self, attachment: GLenum, renderbuffer: &Renderbuffer<'_, D>) -> Result<()> {
        let renderbuffer_id = renderbuffer.id()?;
        self.bind(FRAMEBUFFER)?;
        self.context.driver().framebuffer_renderbuffer(
            FRAMEBUFFER,
            attachment,
            RENDERBUFFER,
            renderbuffer_id,
        );
        Ok(())
    }

    pub fn set_draw_buffers(&self, buffers: &[GLenum]) -> Result<()> {
        self.bind(FRAMEBUFFER)?;
        self.context.driver().draw_buffers(buffers);
        Ok(())
    }

    pub fn status(&self) -> Result<GLenum> {
        self.bind(FRAMEBUFFER)?;
        Ok(self.context.driver().check_framebuffer_status(FRAMEBUFFER))
    }

    pub fn ensure_complete(&self) -> Result<()> {
        let status = self.status()?;
        if status != FRAMEBUFFER_COMPLETE {
            let id = self.handle.id()?;
            warn!("framebuffer {} is incomplete: {:#x}", id, status);
            return Err(Error::IncompleteFramebuffer { id, status });
        }
        Ok(())
    }
}

impl<D: Driver> Drop for Framebuffer<'_, D> {
    fn drop(&mut self) {
        self.handle.release(self.context.driver());
    }
}
