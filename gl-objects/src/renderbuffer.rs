use opengl_bindings::types::{GLenum, GLsizei, GLuint};
use opengl_bindings::{Gl, RENDERBUFFER};

use crate::context::Context;
use crate::driver::{Driver, Extent};
use crate::error::Result;
use crate::handle::{Handle, ObjectKind};

pub struct Renderbuffer<'ctx, D: Driver = Gl> {
    context: &'ctx Context<D>,
    handle: Handle,
}

impl<'ctx, D: Driver> Renderbuffer<'ctx, D> {
    pub fn new(context: &'ctx Context<D>) -> Result<Self> {
        let handle = Handle::allocate(context.driver(), ObjectKind::Renderbuffer)?;
        Ok(Renderbuffer { context, handle })
    }

    pub fn id(&self) -> Result<GLuint> {
        self.handle.id()
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn bind(&self) -> Result<()> {
        let id = self.handle.id()?;
        self.context.driver().bind_renderbuffer(RENDERBUFFER, id);
        Ok(())
    }

    pub fn storage(&self, internal_format: GLenum, extent: Extent) -> Result<()> {
        self.bind()?;
        self.context
            .driver()
            .renderbuffer_storage(RENDERBUFFER, internal_format, extent);
        Ok(())
    }

    pub fn storage_multisample(
        &self,
        samples: GLsizei,
        internal_format: GLenum,
        extent: Extent,
    ) -> Result<()> {
        self.bind()?;
        self.context.driver().renderbuffer_storage_multisample(
            RENDERBUFFER,
            samples,
            internal_format,
            extent,
        );
        Ok(())
    }
}

impl<D: Driver> Drop for Renderbuffer<'_, D> {
    fn drop(&mut self) {
        self.handle.release(self.context.driver());
    }
}
