//! Writing configuration files.

use anyhow::{Context, Result};
use std::path::Path;

/// Save the entire config to a TOML file, creating parent directories.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn save_config(path: &Path, config: &super::Config, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("Config file already exists: {:?}", path);
    }

    let content = toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, Config, DefaultArg, OverwriteSetting};
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/discforge.toml");

        let mut config = Config::default();
        config.output.overwrite = OverwriteSetting::Reject;
        config.defaults.push(DefaultArg {
            switch: "native_language".to_string(),
            values: vec!["eng".to_string()],
        });

        save_config(&path, &config, false).unwrap();
        let reloaded = load_config(&path).unwrap();

        assert_eq!(reloaded.output.overwrite, OverwriteSetting::Reject);
        assert_eq!(reloaded.defaults, config.defaults);
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("discforge.toml");
        std::fs::write(&path, "").unwrap();

        assert!(save_config(&path, &Config::default(), false).is_err());
        save_config(&path, &Config::default(), true).unwrap();
    }
}
