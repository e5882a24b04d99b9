//! Mouse-reactive full-screen shader effect rendered into a WebGL canvas.
//!
//! The platform-independent core (state, handlers, render loop) builds on every
//! target and is tested on the host; the browser adapter lives in `wasm` and
//! only compiles for `wasm32`.

pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod input;
pub mod render;
pub mod surface;
pub mod uniforms;

pub use config::EffectConfig;
pub use effect::{attach, DisplayMode, Effect};
pub use error::{ConfigError, EffectError};
pub use render::{LoopState, RenderLoop};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    pub mod dom;
    pub mod pipeline;
    pub mod render;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        render::start()?;
        Ok(())
    }
}
