//! Canvas 2D rendering
//!
//! `shapes` holds the pure animation math; `canvas` draws with it (web only).

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::{Assets, CanvasRenderer};
