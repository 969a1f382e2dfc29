use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::{error, LevelFilter};

use iconforge::resize::{BoxFilterResizer, ResizeProvider, SipsResizer};
use iconforge::{pipeline, IconConfig, Palette};

/// Render the app icon and pack the platform containers
#[derive(Parser, Debug)]
#[command(name = "iconforge", version, about)]
struct Cli {
    /// Directory the artifacts are written to
    #[arg(short, long, default_value = "build")]
    out_dir: PathBuf,

    /// Edge length of the master render in pixels
    #[arg(long, default_value_t = iconforge::MASTER_SIZE)]
    size: u32,

    /// JSON palette override file (fields as in `Palette`, all optional)
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Downsample in-process instead of shelling out to `sips`
    #[arg(long)]
    builtin_resize: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = IconConfig {
        size: cli.size,
        ..Default::default()
    };
    if let Some(path) = &cli.palette {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading palette file {}", path.display()))?;
        config.palette = serde_json::from_str::<Palette>(&text)
            .with_context(|| format!("parsing palette file {}", path.display()))?;
    }

    // Tool availability is checked here, before any rendering happens.
    let provider: Box<dyn ResizeProvider> = if cli.builtin_resize {
        Box::new(BoxFilterResizer)
    } else {
        Box::new(SipsResizer::new()?)
    };

    let artifacts = pipeline::generate(&config, provider.as_ref(), &cli.out_dir)?;
    println!("Generated: {}", artifacts.master_png.display());
    println!("Generated: {}", artifacts.icns.display());
    println!("Generated: {}", artifacts.ico.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let _ = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );

    if let Err(e) = run(cli) {
        error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
