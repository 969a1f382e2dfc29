//! End-to-end artifact generation
//!
//! Renders the master image, encodes it, then derives the two containers.
//! Container bytes are assembled fully in memory before anything reaches
//! disk, so a failed resize never leaves a truncated container behind. The
//! whole pipeline is single-threaded and synchronous; the first error
//! aborts the remaining steps.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::codec::{icns, ico, png};
use crate::error::Result;
use crate::render::scene;
use crate::resize::ResizeProvider;
use crate::IconConfig;

/// Paths of the generated artifacts
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub master_png: PathBuf,
    pub icns: PathBuf,
    pub ico: PathBuf,
}

/// Render the icon and write the three artifacts under `out_dir`
pub fn generate(
    config: &IconConfig,
    provider: &dyn ResizeProvider,
    out_dir: &Path,
) -> Result<Artifacts> {
    fs::create_dir_all(out_dir)?;

    let canvas = scene::render(config);
    let master = png::encode(canvas.width(), canvas.height(), canvas.pixels())?;

    let master_path = out_dir.join("icon.png");
    fs::write(&master_path, &master)?;
    info!("wrote {} ({} bytes)", master_path.display(), master.len());

    let icns_bytes = icns::encode(&master, provider)?;
    let icns_path = out_dir.join("icon.icns");
    fs::write(&icns_path, &icns_bytes)?;
    info!("wrote {} ({} bytes)", icns_path.display(), icns_bytes.len());

    let ico_bytes = ico::encode(&master, provider)?;
    let ico_path = out_dir.join("icon.ico");
    fs::write(&ico_path, &ico_bytes)?;
    info!("wrote {} ({} bytes)", ico_path.display(), ico_bytes.len());

    Ok(Artifacts {
        master_png: master_path,
        icns: icns_path,
        ico: ico_path,
    })
}
