/// WebGL2 canvas surface
use pz3d_core::{
    shader::names, BufferKind, Error, FrameUniforms, RendererColor, Result, ShaderProgram,
    Surface, SurfaceProvider,
};
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram, WebGlShader,
};

/// Looks up a `<canvas>` by id and opens a WebGL2 context on it
pub struct CanvasProvider {
    pub canvas_id: String,
}

impl CanvasProvider {
    pub fn new(canvas_id: impl Into<String>) -> Self {
        Self {
            canvas_id: canvas_id.into(),
        }
    }
}

impl SurfaceProvider for CanvasProvider {
    type Surface = WebGlSurface;

    /// `None` outside a browser, or when the canvas or context is missing
    fn acquire(&self) -> Option<WebGlSurface> {
        // browser bindings only exist on wasm
        if !cfg!(target_arch = "wasm32") {
            return None;
        }
        let document = web_sys::window()?.document()?;
        let canvas = document
            .get_element_by_id(&self.canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        let gl = canvas.get_context("webgl2").ok()??.dyn_into::<Gl>().ok()?;
        Some(WebGlSurface::new(canvas, gl))
    }
}

struct Buffers {
    position: WebGlBuffer,
    color: WebGlBuffer,
    normal: WebGlBuffer,
}

pub struct WebGlSurface {
    canvas: HtmlCanvasElement,
    gl: Gl,
    program: Option<WebGlProgram>,
    buffers: Option<Buffers>,
}

impl WebGlSurface {
    pub fn new(canvas: HtmlCanvasElement, gl: Gl) -> Self {
        Self {
            canvas,
            gl,
            program: None,
            buffers: None,
        }
    }

    fn compile_shader(&self, kind: u32, source: &str) -> Result<WebGlShader> {
        let shader = self
            .gl
            .create_shader(kind)
            .ok_or_else(|| Error::Shader("unable to create shader object".to_string()))?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if compiled {
            Ok(shader)
        } else {
            let log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
            self.gl.delete_shader(Some(&shader));
            Err(Error::Shader(log))
        }
    }

    fn create_buffer(&self) -> Result<WebGlBuffer> {
        self.gl
            .create_buffer()
            .ok_or_else(|| Error::Surface("unable to create buffer".to_string()))
    }

    fn buffer(&self, kind: BufferKind) -> Result<&WebGlBuffer> {
        let buffers = self
            .buffers
            .as_ref()
            .ok_or_else(|| Error::Surface("program not compiled".to_string()))?;
        Ok(match kind {
            BufferKind::Position => &buffers.position,
            BufferKind::Color => &buffers.color,
            BufferKind::Normal => &buffers.normal,
        })
    }

    fn attribute_name(kind: BufferKind) -> &'static str {
        match kind {
            BufferKind::Position => names::POSITION,
            BufferKind::Color => names::COLOR,
            BufferKind::Normal => names::NORMAL,
        }
    }
}

impl Surface for WebGlSurface {
    /// Match the drawing buffer to the canvas' layout size
    fn size(&self) -> (u32, u32) {
        let width = self.canvas.client_width().max(1) as u32;
        let height = self.canvas.client_height().max(1) as u32;
        (width, height)
    }

    fn compile_program(&mut self, program: &ShaderProgram) -> Result<()> {
        let vertex = self.compile_shader(Gl::VERTEX_SHADER, program.vertex)?;
        let fragment = self.compile_shader(Gl::FRAGMENT_SHADER, program.fragment)?;

        let linked = self
            .gl
            .create_program()
            .ok_or_else(|| Error::Shader("unable to create program object".to_string()))?;
        self.gl.attach_shader(&linked, &vertex);
        self.gl.attach_shader(&linked, &fragment);
        self.gl.link_program(&linked);

        let ok = self
            .gl
            .get_program_parameter(&linked, Gl::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !ok {
            let log = self.gl.get_program_info_log(&linked).unwrap_or_default();
            return Err(Error::Shader(log));
        }

        self.buffers = Some(Buffers {
            position: self.create_buffer()?,
            color: self.create_buffer()?,
            normal: self.create_buffer()?,
        });
        self.gl.use_program(Some(&linked));
        self.gl.enable(Gl::DEPTH_TEST);
        self.program = Some(linked);
        debug!("WebGL2 program linked");
        Ok(())
    }

    fn viewport(&mut self, width: u32, height: u32) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    fn clear(&mut self, color: RendererColor) {
        self.gl.clear_color(color.red, color.green, color.blue, 1.0);
        self.gl.clear(Gl::COLOR_BUFFER_BIT | Gl::DEPTH_BUFFER_BIT);
    }

    fn set_uniforms(&mut self, uniforms: &FrameUniforms) {
        let Some(program) = &self.program else {
            return;
        };
        let location = |name: &str| self.gl.get_uniform_location(program, name);

        self.gl.uniform_matrix4fv_with_f32_array(
            location(names::PROJECTION).as_ref(),
            false,
            uniforms.projection.as_slice(),
        );
        self.gl.uniform_matrix4fv_with_f32_array(
            location(names::VIEW).as_ref(),
            false,
            uniforms.view.as_slice(),
        );

        let light = uniforms.light;
        let eye = uniforms.eye;
        self.gl.uniform3f(
            location(names::LIGHT).as_ref(),
            light.x as f32,
            light.y as f32,
            light.z as f32,
        );
        self.gl.uniform3f(
            location(names::EYE).as_ref(),
            eye.x as f32,
            eye.y as f32,
            eye.z as f32,
        );
    }

    fn upload(&mut self, kind: BufferKind, data: &[f32]) -> Result<()> {
        let program = self
            .program
            .as_ref()
            .ok_or_else(|| Error::Surface("program not compiled".to_string()))?;
        let buffer = self.buffer(kind)?;

        self.gl.bind_buffer(Gl::ARRAY_BUFFER, Some(buffer));
        let array = js_sys::Float32Array::from(data);
        self.gl
            .buffer_data_with_array_buffer_view(Gl::ARRAY_BUFFER, &array, Gl::STATIC_DRAW);

        let location = self.gl.get_attrib_location(program, Self::attribute_name(kind));
        if location < 0 {
            return Err(Error::Surface(format!(
                "attribute {} not found",
                Self::attribute_name(kind)
            )));
        }
        let location = location as u32;
        self.gl.enable_vertex_attrib_array(location);
        self.gl.vertex_attrib_pointer_with_i32(
            location,
            BufferKind::COMPONENTS as i32,
            Gl::FLOAT,
            false,
            0,
            0,
        );
        Ok(())
    }

    fn draw_triangles(&mut self, vertex_count: usize) -> Result<()> {
        if self.program.is_none() {
            return Err(Error::Surface("program not compiled".to_string()));
        }
        self.gl.draw_arrays(Gl::TRIANGLES, 0, vertex_count as i32);
        Ok(())
    }
}
