use js_sys::Float32Array;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGlProgram, WebGlRenderingContext as GL, WebGlShader,
    WebGlUniformLocation,
};

use crate::error::{EffectError, ShaderStage};
use crate::surface::{Surface, QUAD_VERTEX_COUNT, QUAD_VERTICES};
use crate::uniforms::{Uniform, UniformRegistry};

const POSITION_ATTRIBUTE: &str = "a_position";

/// Gets a WebGL 1 context, falling back to the prefixed name older browsers
/// expose.
pub fn context(canvas: &HtmlCanvasElement) -> Result<GL, EffectError> {
    for name in ["webgl", "experimental-webgl"] {
        if let Some(ctx) = canvas.get_context(name)? {
            return ctx
                .dyn_into::<GL>()
                .map_err(|_| EffectError::ContextUnavailable);
        }
    }
    Err(EffectError::ContextUnavailable)
}

fn compile_shader(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, EffectError> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| EffectError::Js(format!("unable to create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(EffectError::ShaderCompile { stage, log })
    }
}

fn link_program(
    gl: &GL,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, EffectError> {
    let program = gl
        .create_program()
        .ok_or_else(|| EffectError::Js("unable to create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(EffectError::ProgramLink(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ))
    }
}

/// Logs a shader build failure and drops the resource.
fn report<T>(result: Result<T, EffectError>) -> Option<T> {
    result.map_err(|e| log::error!("{e}")).ok()
}

/// WebGL context with the effect's program, quad buffer and uniforms bound.
pub struct WebGlSurface {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: Option<WebGlProgram>,
    uniforms: UniformRegistry<WebGlUniformLocation>,
}

impl WebGlSurface {
    /// Compiles and links the shader pair, uploads the quad and resolves the
    /// uniforms.
    ///
    /// Shader build failures are logged and leave the program null; drawing
    /// then silently does nothing. Only a failure to allocate the vertex
    /// buffer is returned as an error.
    pub fn build(
        gl: GL,
        canvas: HtmlCanvasElement,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, EffectError> {
        let vertex = report(compile_shader(&gl, ShaderStage::Vertex, vertex_source));
        let fragment = report(compile_shader(&gl, ShaderStage::Fragment, fragment_source));
        let program = match (&vertex, &fragment) {
            (Some(v), Some(f)) => report(link_program(&gl, v, f)),
            _ => None,
        };

        let buffer = gl
            .create_buffer()
            .ok_or_else(|| EffectError::Js("unable to create vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let vertices = Float32Array::from(&QUAD_VERTICES[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        gl.use_program(program.as_ref());

        let uniforms = match &program {
            Some(program) => {
                let position = gl.get_attrib_location(program, POSITION_ATTRIBUTE);
                if position >= 0 {
                    gl.enable_vertex_attrib_array(position as u32);
                    gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
                } else {
                    log::warn!("vertex shader has no `{POSITION_ATTRIBUTE}` attribute");
                }

                let (uniforms, missing) =
                    UniformRegistry::resolve(|name| gl.get_uniform_location(program, name));
                for uniform in missing {
                    log::warn!("uniform `{}` not found in program", uniform.name());
                }
                uniforms
            }
            None => {
                log::warn!("no shader program; uniforms left unresolved");
                UniformRegistry::default()
            }
        };

        log::debug!("pipeline ready (linked: {})", program.is_some());
        Ok(Self {
            gl,
            canvas,
            program,
            uniforms,
        })
    }

    pub fn is_linked(&self) -> bool {
        self.program.is_some()
    }

    pub fn uniforms(&self) -> &UniformRegistry<WebGlUniformLocation> {
        &self.uniforms
    }
}

impl Surface for WebGlSurface {
    fn set_float(&self, uniform: Uniform, value: f32) {
        self.gl.uniform1f(self.uniforms.get(uniform), value);
    }

    fn set_vec2(&self, uniform: Uniform, x: f32, y: f32) {
        self.gl.uniform2f(self.uniforms.get(uniform), x, y);
    }

    fn set_canvas_size(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.gl.viewport(x, y, width, height);
    }

    fn clear(&self) {
        self.gl.clear_color(0.0, 0.0, 0.0, 1.0);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }

    fn draw_quad(&self) {
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, 0, QUAD_VERTEX_COUNT);
    }
}
