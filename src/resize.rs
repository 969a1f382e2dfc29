//! Resize providers
//!
//! The container encoders need the master image at several smaller sizes.
//! That work sits behind `ResizeProvider` so the encoders never care how
//! the scaling happens: the default provider shells out to the external
//! `sips` tool, and `BoxFilterResizer` is an in-process alternative that
//! doubles as the test provider on machines without `sips`.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::codec::png;
use crate::error::{Error, Result};

/// Scales an encoded master image to a requested square size
///
/// Implementations return a well-formed PNG of exactly `size x size` or
/// fail loudly; callers do not re-validate the returned dimensions.
pub trait ResizeProvider {
    fn resize(&self, master_png: &[u8], size: u32) -> Result<Vec<u8>>;
}

fn which(tool: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(tool))
        .find(|candidate| candidate.is_file())
}

/// Provider backed by the external `sips` tool
///
/// Construction performs the one-time availability check; a missing tool is
/// reported before any rendering starts. Each resize goes through a scratch
/// directory because `sips` only speaks file paths.
pub struct SipsResizer {
    workdir: PathBuf,
}

impl SipsResizer {
    pub fn new() -> Result<Self> {
        if which("sips").is_none() {
            return Err(Error::MissingTool("sips".into()));
        }
        let workdir = std::env::temp_dir().join(format!("iconforge-{}", std::process::id()));
        fs::create_dir_all(&workdir)?;
        Ok(Self { workdir })
    }
}

impl Drop for SipsResizer {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.workdir);
    }
}

impl ResizeProvider for SipsResizer {
    fn resize(&self, master_png: &[u8], size: u32) -> Result<Vec<u8>> {
        let src = self.workdir.join("master.png");
        let dst = self.workdir.join(format!("{size}.png"));
        fs::write(&src, master_png)?;
        debug!("sips resize to {size}x{size}");
        let output = Command::new("sips")
            .args(["-s", "format", "png", "-z"])
            .arg(size.to_string())
            .arg(size.to_string())
            .arg(&src)
            .arg("--out")
            .arg(&dst)
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ResizeFailed(size, format!("sips: {stderr}")));
        }
        fs::read(&dst).map_err(|_| Error::ResizeFailed(size, "no output produced".into()))
    }
}

/// In-process provider: decode, area-average, re-encode
///
/// Only accepts images the built-in decoder understands (8-bit RGBA PNG),
/// which is exactly what the pipeline's own encoder produces.
pub struct BoxFilterResizer;

impl ResizeProvider for BoxFilterResizer {
    fn resize(&self, master_png: &[u8], size: u32) -> Result<Vec<u8>> {
        let image = png::decode(master_png)?;
        let scaled = downsample(&image, size);
        png::encode(size, size, &scaled)
    }
}

/// Area-average `image` to `size x size`
///
/// Each output pixel averages an axis-aligned block of source pixels with
/// integer accumulation and half-up rounding. Blocks are at least one pixel
/// wide, so requesting a size above the source degenerates to
/// nearest-neighbor.
fn downsample(image: &png::Image, size: u32) -> Vec<u8> {
    let iw = image.width as usize;
    let ih = image.height as usize;
    let edge = size as usize;
    let mut out = Vec::with_capacity(edge * edge * 4);
    for oy in 0..edge {
        let y0 = oy * ih / edge;
        let y1 = ((oy + 1) * ih / edge).max(y0 + 1).min(ih);
        for ox in 0..edge {
            let x0 = ox * iw / edge;
            let x1 = ((ox + 1) * iw / edge).max(x0 + 1).min(iw);
            let area = ((x1 - x0) * (y1 - y0)) as u64;
            let mut acc = [0u64; 4];
            for y in y0..y1 {
                for x in x0..x1 {
                    let i = (y * iw + x) * 4;
                    for ch in 0..4 {
                        acc[ch] += image.pixels[i + ch] as u64;
                    }
                }
            }
            for channel in acc {
                out.push(((channel + area / 2) / area) as u8);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_png(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();
        png::encode(width, height, &pixels).unwrap()
    }

    #[test]
    fn box_filter_returns_the_requested_size() {
        let master = solid_png(16, 16, [10, 20, 30, 255]);
        let resized = BoxFilterResizer.resize(&master, 4).unwrap();
        let image = png::decode(&resized).unwrap();
        assert_eq!((image.width, image.height), (4, 4));
        assert!(image.pixels.chunks(4).all(|px| px == [10, 20, 30, 255]));
    }

    #[test]
    fn box_filter_averages_blocks() {
        // 2x2 image: three black pixels and one white, averaged to 1x1
        let mut pixels = vec![0u8; 16];
        pixels[3] = 255;
        pixels[7] = 255;
        pixels[11] = 255;
        pixels[12] = 255;
        pixels[13] = 255;
        pixels[14] = 255;
        pixels[15] = 255;
        let master = png::encode(2, 2, &pixels).unwrap();
        let resized = BoxFilterResizer.resize(&master, 1).unwrap();
        let image = png::decode(&resized).unwrap();
        // each color channel: (0+0+0+255+2)/4 = 64; alpha: 255
        assert_eq!(image.pixels, vec![64, 64, 64, 255]);
    }

    #[test]
    fn box_filter_rejects_garbage_input() {
        let err = BoxFilterResizer.resize(b"not a png", 4).unwrap_err();
        assert!(matches!(err, Error::InvalidImage(_)));
    }

    #[test]
    fn upscale_degenerates_to_nearest_neighbor() {
        let master = solid_png(2, 2, [5, 6, 7, 255]);
        let resized = BoxFilterResizer.resize(&master, 8).unwrap();
        let image = png::decode(&resized).unwrap();
        assert_eq!((image.width, image.height), (8, 8));
        assert!(image.pixels.chunks(4).all(|px| px == [5, 6, 7, 255]));
    }
}
