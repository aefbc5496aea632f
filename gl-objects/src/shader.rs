use log::warn;
use opengl_bindings::types::{GLint, GLuint};
use opengl_bindings::{Gl, COMPILE_STATUS, FALSE, LINK_STATUS};

use crate::context::Context;
use crate::driver::Driver;
use crate::error::{Error, Result};
use crate::handle::{Handle, ObjectKind, ShaderStage};

/// A compiled shader. Construction fails if compilation does, with the
/// driver's info log in the error.
pub struct Shader<'ctx, D: Driver = Gl> {
    context: &'ctx Context<D>,
    handle: Handle,
    stage: ShaderStage,
}

impl<'ctx, D: Driver> Shader<'ctx, D> {
    pub fn from_source(context: &'ctx Context<D>, stage: ShaderStage, source: &str) -> Result<Self> {
        Self::compile(context, stage, &[source.as_bytes()])
    }

    /// Prepends the `#version` line matching the context's GL version.
    pub fn from_source_versioned(
        context: &'ctx Context<D>,
        stage: ShaderStage,
        source: &str,
    ) -> Result<Self> {
        let header = context.capabilities()?.version.glsl_header();
        Self::compile(context, stage, &[header.as_bytes(), source.as_bytes()])
    }

    fn compile(context: &'ctx Context<D>, stage: ShaderStage, sources: &[&[u8]]) -> Result<Self> {
        let handle = Handle::allocate(context.driver(), ObjectKind::Shader(stage))?;
        // Built before compiling so a failed shader is still deleted on return
        let shader = Shader {
            context,
            handle,
            stage,
        };
        let id = shader.handle.id()?;
        let gl = context.driver();
        gl.shader_source(id, sources);
        gl.compile_shader(id);
        shader.check(id)?;
        Ok(shader)
    }

    fn check(&self, id: GLuint) -> Result<()> {
        let gl = self.context.driver();
        if gl.get_shader_i(id, COMPILE_STATUS) == FALSE as GLint {
            let log = gl.shader_info_log(id);
            warn!("{} shader {} failed to compile: {}", self.stage.name(), id, log);
            return Err(Error::CompileError {
                stage: self.stage.name(),
                log,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> Result<GLuint> {
        self.handle.id()
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<D: Driver> Drop for Shader<'_, D> {
    fn drop(&mut self) {
        self.handle.release(self.context.driver());
    }
}

pub struct Program<'ctx, D: Driver = Gl> {
    context: &'ctx Context<D>,
    handle: Handle,
}

impl<'ctx, D: Driver> Program<'ctx, D> {
    pub fn new(context: &'ctx Context<D>) -> Result<Self> {
        let handle = Handle::allocate(context.driver(), ObjectKind::Program)?;
        Ok(Program { context, handle })
    }

    pub fn id(&self) -> Result<GLuint> {
        self.handle.id()
    }

    pub fn attach(&self, shader: &Shader<'_, D>) -> Result<()> {
        let shader = shader.id()?;
        self.context.driver().attach_shader(self.handle.id()?, shader);
        Ok(())
    }

    pub fn detach(&self, shader: &Shader<'_, D>) -> Result<()> {
        let shader = shader.id()?;
        self.context.driver().detach_shader(self.handle.id()?, shader);
        Ok(())
    }

    pub fn link(&self) -> Result<()> {
        let id = self.handle.id()?;
        let gl = self.context.driver();
        gl.link_program(id);
        if gl.get_program_i(id, LINK_STATUS) == FALSE as GLint {
            let log = gl.program_info_log(id);
            warn!("program {} failed to link: {}", id, log);
            return Err(Error::LinkError(log));
        }
        Ok(())
    }

    pub fn use_program(&self) -> Result<()> {
        self.context.driver().use_program(self.handle.id()?);
        Ok(())
    }

    /// `None` if `name` is not an active uniform.
    pub fn uniform_location(&self, name: &str) -> Result<Option<GLint>> {
        let location = self
            .context
            .driver()
            .get_uniform_location(self.handle.id()?, name);
        Ok((location >= 0).then(|| location))
    }

    pub fn attrib_location(&self, name: &str) -> Result<Option<GLuint>> {
        let location = self
            .context
            .driver()
            .get_attrib_location(self.handle.id()?, name);
        Ok((location >= 0).then(|| location as GLuint))
    }
}

impl<D: Driver> Drop for Program<'_, D> {
    fn drop(&mut self) {
        self.handle.release(self.context.driver());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::context;

    const VERTEX: &str = "void main() { gl_Position = vec4(0.0); }\n";

    #[test]
    fn versioned_source_gets_header() {
        let context = context(3, 3);
        let shader = Shader::from_source_versioned(&context, ShaderStage::Vertex, VERTEX).unwrap();
        let id = shader.id().unwrap();
        assert_eq!(
            context.driver().source(id).unwrap(),
            format!("#version 330 core\n{}", VERTEX)
        );
        assert_eq!(context.driver().count("ShaderSource(1, 2 parts)"), 1);
    }

    #[test]
    fn compile_failure_carries_log_and_deletes_shader() {
        let context = context(4, 6);
        context.driver().fail_compile("0:1: syntax error");
        let err = Shader::from_source(&context, ShaderStage::Fragment, "void main() {")
            .err()
            .unwrap();
        assert_eq!(
            err,
            Error::CompileError {
                stage: "fragment",
                log: "0:1: syntax error".to_string()
            }
        );
        assert_eq!(context.driver().count("DeleteObject(fragment shader, 1)"), 1);
    }

    #[test]
    fn link_and_locations() {
        let context = context(4, 6);
        let vertex = Shader::from_source(&context, ShaderStage::Vertex, VERTEX).unwrap();
        let program = Program::new(&context).unwrap();
        program.attach(&vertex).unwrap();
        program.link().unwrap();
        program.detach(&vertex).unwrap();
        program.use_program().unwrap();

        context.driver().set_location("Texture", 2);
        assert_eq!(program.uniform_location("Texture").unwrap(), Some(2));
        assert_eq!(program.attrib_location("Missing").unwrap(), None);

        let gl = context.driver();
        assert_eq!(gl.count("AttachShader(2, 1)"), 1);
        assert_eq!(gl.count("DetachShader(2, 1)"), 1);
        assert_eq!(gl.count("UseProgram(2)"), 1);
    }

    #[test]
    fn link_failure_carries_log() {
        let context = context(4, 6);
        context.driver().fail_link("missing main");
        let program = Program::new(&context).unwrap();
        assert_eq!(
            program.link(),
            Err(Error::LinkError("missing main".to_string()))
        );
    }
}
