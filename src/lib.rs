//! Iconforge
//!
//! Renders the application icon procedurally and packs it into the three
//! artifacts a desktop build needs: a PNG master image, a macOS `.icns`
//! container and a Windows `.ico` container.
//!
//! The renderer is a small software rasterizer (alpha-compositing canvas
//! plus circle/triangle/line/arc primitives) driving an ordered scene
//! script; the encoders write the binary formats from scratch. Scaling the
//! master to the container sizes is delegated to a [`resize::ResizeProvider`],
//! by default the external `sips` tool.
//!
//! # Example
//!
//! ```no_run
//! use iconforge::resize::BoxFilterResizer;
//! use iconforge::{pipeline, IconConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IconConfig::default();
//! let artifacts = pipeline::generate(&config, &BoxFilterResizer, "build".as_ref())?;
//! println!("master: {}", artifacts.master_png.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod codec;
pub mod pipeline;
pub mod render;
pub mod resize;

pub use render::canvas::Rgba;
pub use render::scene::Palette;

/// Edge length of the reference master render, in pixels
///
/// All scene geometry is authored against this size and scaled down for
/// smaller renders.
pub const MASTER_SIZE: u32 = 1024;

/// Configuration for one icon render
///
/// Immutable for the duration of a render; create a fresh value to vary
/// parameters between renders.
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// Edge length of the square master image in pixels
    pub size: u32,
    /// Colors used by the background and the face layers
    pub palette: Palette,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            size: MASTER_SIZE,
            palette: Palette::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IconConfig::default();
        assert_eq!(config.size, 1024);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn palette_deserializes_partial_overrides() {
        let palette: Palette =
            serde_json::from_str(r#"{"fur": {"r": 1, "g": 2, "b": 3, "a": 255}}"#).unwrap();
        assert_eq!(palette.fur, Rgba::new(1, 2, 3, 255));
        assert_eq!(palette.eye, Palette::default().eye);
    }
}
