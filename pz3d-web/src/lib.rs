/// pz3d Web - WebGL2 host for the pz3d renderer
///
/// `WebRenderer` binds to a `<canvas>` by id. Without a browser, a canvas or
/// a WebGL2 context it stays inert: objects can be added and `render` is a
/// no-op.
use pz3d_core::{Error, Renderer, RendererColor, RendererConfig, RendererCuboid, Vector3D};
use wasm_bindgen::prelude::*;

pub mod surface;

pub use surface::{CanvasProvider, WebGlSurface};

fn to_js(error: Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
pub struct WebRenderer {
    renderer: Renderer<WebGlSurface>,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebRenderer, JsValue> {
        let provider = CanvasProvider::new(canvas_id);
        let renderer =
            Renderer::from_provider(&provider, RendererConfig::default()).map_err(to_js)?;
        Ok(WebRenderer { renderer })
    }

    /// True when no drawing surface could be acquired
    #[wasm_bindgen(getter)]
    pub fn inert(&self) -> bool {
        self.renderer.is_inert()
    }

    #[wasm_bindgen(getter = objectCount)]
    pub fn object_count(&self) -> usize {
        self.renderer.objects().len()
    }

    /// Add an axis-aligned box with its minimum corner at `(x, y, z)`
    #[wasm_bindgen(js_name = addCuboid)]
    #[allow(clippy::too_many_arguments)]
    pub fn add_cuboid(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        width: f64,
        height: f64,
        depth: f64,
        red: f32,
        green: f32,
        blue: f32,
    ) {
        let color = RendererColor::new(red, green, blue);
        let cuboid = RendererCuboid::new(width, height, depth, color).at(Vector3D::new(x, y, z));
        self.renderer.add_object(cuboid);
    }

    #[wasm_bindgen(js_name = setCamera)]
    pub fn set_camera(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        target_x: f64,
        target_y: f64,
        target_z: f64,
    ) {
        self.renderer.camera.position = Vector3D::new(x, y, z);
        self.renderer.camera.target = Vector3D::new(target_x, target_y, target_z);
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.renderer.render().map_err(to_js)
    }
}
