//! Software renderer for the icon artwork
//!
//! `canvas` owns the pixel surface, `shapes` rasterizes primitives into it,
//! `scene` holds the ordered script that paints the face.

pub mod canvas;
pub mod scene;
pub mod shapes;

pub use canvas::{Canvas, Rgba};
pub use scene::{face_ops, render, DrawOp, Palette, Shape};
