use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct DeviceConfig {
    #[serde(default = "default_device_path")]
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_source")]
    pub source: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
        }
    }
}

fn default_device_path() -> PathBuf {
    "/dev/hidraw0".into()
}

fn default_source() -> String {
    "default".into()
}

pub fn load_config(path: &PathBuf) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}
