pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use discforge_av::HandBrake;
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./discforge.toml",
        "~/.config/discforge/config.toml",
        "/etc/discforge/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    if config.handbrake.bin_path.as_os_str().is_empty() {
        anyhow::bail!("handbrake.bin_path cannot be empty");
    }

    if config.output.temp_dir.is_some() && !config.output.atomic {
        tracing::warn!("output.temp_dir is set but output.atomic is false; it will be ignored");
    }

    for (i, arg) in config.defaults.iter().enumerate() {
        if arg.switch.trim().is_empty() {
            anyhow::bail!("defaults[{}] has an empty switch", i);
        }
        if arg.switch.starts_with('-') {
            anyhow::bail!(
                "defaults[{}] switch '{}' must not include leading dashes",
                i,
                arg.switch
            );
        }
    }

    Ok(())
}

impl Config {
    /// The base HandBrakeCLI invocation described by this config.
    pub fn handbrake(&self) -> HandBrake {
        let bin_path = PathBuf::from(
            shellexpand::tilde(&self.handbrake.bin_path.to_string_lossy()).as_ref(),
        );

        self.defaults.iter().fold(
            HandBrake::new()
                .with_bin_path(bin_path)
                .with_trace(self.handbrake.trace),
            |hb, arg| hb.with(&arg.switch, &arg.values),
        )
    }
}
