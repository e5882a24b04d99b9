use crate::uniforms::Uniform;

/// Full-screen quad in clip space, drawn as a 4-vertex triangle strip.
pub const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

/// Number of vertices in [`QUAD_VERTICES`].
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// GPU-side operations the effect issues.
///
/// The browser implementation wraps a WebGL context with the program already
/// bound; tests substitute a recorder.
pub trait Surface {
    fn set_float(&self, uniform: Uniform, value: f32);
    fn set_vec2(&self, uniform: Uniform, x: f32, y: f32);
    /// Resizes the canvas backing store.
    fn set_canvas_size(&self, width: u32, height: u32);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    /// Clears the color buffer to opaque black.
    fn clear(&self);
    fn draw_quad(&self);
}

/// Page presentation outside the canvas.
pub trait PageStyle {
    fn set_text_color(&self, color: &str);
}
