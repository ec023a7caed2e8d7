mod audio;
mod cli;
mod color;
mod config;
mod device;

use anyhow::Result;
use clap::Parser;
use std::io::Write;

use audio::capture::Capture;
use audio::frame::BLOCK_BYTES;
use audio::spectrum::SpectrumAnalyzer;
use cli::Cli;
use color::ColorGate;
use device::Headset;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect papillon.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("papillon.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(home) = dirs::home_dir() {
            let xdg = home.join(".config").join("papillon").join("config.toml");
            if xdg.exists() {
                return Some(xdg);
            }
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("papillon").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });

    let mut cfg = config::Config::default();
    if let Some(ref path) = config_path {
        match config::load_config(path) {
            Some(loaded) => {
                log::info!("Loaded config from {}", path.display());
                cfg = loaded;
            }
            None => log::warn!("Failed to load config from {}", path.display()),
        }
    }

    // CLI arguments win over config values, config values over defaults
    let device_path = cli.device.unwrap_or(cfg.device.path);
    let source = cli.source.unwrap_or(cfg.audio.source);

    log::info!("papillon - sound-reactive headset lighting");
    log::info!("HID device: {}", device_path.display());
    log::info!("Capture source: {source}");

    let mut headset = Headset::open(&device_path)?;
    let mut capture = Capture::open(&source)?;
    let mut analyzer = SpectrumAnalyzer::new();

    run(&mut capture, &mut analyzer, &mut headset)?;

    log::info!("Capture source exhausted, shutting down");
    Ok(())
}

/// One cycle per captured block: analyze, map, and push the color when
/// it changed. A failed transmission is logged and the loop keeps going;
/// the gate already remembers the color, so it is not resent until the
/// audio moves it again.
fn run<W: Write>(
    capture: &mut Capture,
    analyzer: &mut SpectrumAnalyzer,
    headset: &mut Headset<W>,
) -> Result<()> {
    let mut gate = ColorGate::new();
    let mut block = [0u8; BLOCK_BYTES];

    while capture.read_block(&mut block)? {
        let peaks = analyzer.analyze(&block)?;
        let color = color::map_peaks(&peaks);
        if gate.update(color) {
            log::debug!("Color change: #{:06x}", color.packed() & 0x00FF_FFFF);
            if let Err(err) = headset.send(color) {
                log::warn!("Color transmission failed: {err}");
            }
        }
    }
    Ok(())
}
