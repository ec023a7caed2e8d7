use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "papillon", about = "Sound-reactive lighting for the Siberia Raw headset")]
pub struct Cli {
    /// HID device node of the headset (e.g. /dev/hidraw0)
    pub device: Option<PathBuf>,

    /// ALSA capture source (e.g. "default" or "hw:0,0")
    pub source: Option<String>,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
