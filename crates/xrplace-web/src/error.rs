//! Error types for WebXR setup and session handling.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum XrError {
    #[error("WebXR immersive-ar is not supported by this browser")]
    Unsupported,

    #[error("DOM setup failed: {0}")]
    Dom(String),

    #[error("XR session request failed: {0}")]
    Session(String),

    #[error("hit-test source acquisition failed: {0}")]
    Acquisition(String),
}

impl XrError {
    pub fn dom(value: JsValue) -> Self {
        Self::Dom(format!("{value:?}"))
    }

    pub fn session(value: JsValue) -> Self {
        Self::Session(format!("{value:?}"))
    }

    pub fn acquisition(value: JsValue) -> Self {
        Self::Acquisition(format!("{value:?}"))
    }
}
