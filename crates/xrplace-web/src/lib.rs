//! xrplace Web Client
//!
//! Browser-side layer for the AR demo: WebXR session bootstrap, the
//! Enter-AR button, and the per-frame bridge that pumps poses, hit-test
//! results, and taps into the core input queue.
//!
//! Everything is gated on `target_arch = "wasm32"`; on native targets this
//! crate compiles to an empty library so the workspace stays buildable.

#[cfg(target_arch = "wasm32")]
mod button;
#[cfg(target_arch = "wasm32")]
mod error;
#[cfg(target_arch = "wasm32")]
mod session;

#[cfg(target_arch = "wasm32")]
pub use error::XrError;

#[cfg(target_arch = "wasm32")]
mod entry {
    use std::sync::Once;

    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, Layer};
    use tracing_web::MakeWebConsoleWriter;
    use wasm_bindgen::prelude::*;

    use crate::button;

    static TRACING_INIT: Once = Once::new();

    fn init_tracing() {
        TRACING_INIT.call_once(|| {
            let filter = EnvFilter::new("info,wgpu=error,naga=warn");

            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .without_time()
                .with_writer(MakeWebConsoleWriter::new())
                .with_filter(filter);

            tracing_subscriber::registry().with(fmt_layer).init();
        });
    }

    /// Entry point for the hosting page.
    ///
    /// Installs the Enter-AR button, then starts the Bevy app rendering
    /// into the canvas with the given id. The canvas stays hidden until a
    /// session starts. Note: on wasm `App::run` hands control to the winit
    /// event loop, so this only returns early on setup errors.
    #[wasm_bindgen]
    pub fn start_ar(canvas_id: &str) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        init_tracing();

        tracing::info!("[xrplace] starting AR client for canvas #{canvas_id}");

        let input_queue = xrplace_core::wasm_entry::input_queue();
        button::install(canvas_id, input_queue)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        xrplace_core::wasm_entry::start_xr_app(canvas_id)
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::start_ar;
