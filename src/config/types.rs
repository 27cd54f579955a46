use discforge_av::{AtomicPolicy, OverwritePolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub handbrake: HandBrakeConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Arguments applied to every command, in order.
    #[serde(default)]
    pub defaults: Vec<DefaultArg>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandBrakeConfig {
    /// Path to HandBrakeCLI, or a bare name to look up on PATH
    #[serde(default = "default_bin_path")]
    pub bin_path: PathBuf,

    /// Stream HandBrakeCLI output to the log while it runs
    #[serde(default)]
    pub trace: bool,
}

fn default_bin_path() -> PathBuf {
    PathBuf::from(discforge_av::handbrake::DEFAULT_BIN)
}

impl Default for HandBrakeConfig {
    fn default() -> Self {
        Self {
            bin_path: default_bin_path(),
            trace: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// What to do when the output file already exists
    #[serde(default)]
    pub overwrite: OverwriteSetting,

    /// Write to a working file and move it into place when done
    #[serde(default)]
    pub atomic: bool,

    /// Directory for working files (defaults to the output's directory)
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
}

impl OutputConfig {
    pub fn overwrite_policy(&self) -> OverwritePolicy {
        self.overwrite.into()
    }

    pub fn atomic_policy(&self) -> AtomicPolicy {
        match (self.atomic, &self.temp_dir) {
            (false, _) => AtomicPolicy::Direct,
            (true, None) => AtomicPolicy::TempSameDir,
            (true, Some(dir)) => {
                let dir = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
                AtomicPolicy::TempAt(PathBuf::from(dir))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwriteSetting {
    #[default]
    Replace,
    Reject,
    Skip,
}

impl From<OverwriteSetting> for OverwritePolicy {
    fn from(setting: OverwriteSetting) -> Self {
        match setting {
            OverwriteSetting::Replace => OverwritePolicy::Replace,
            OverwriteSetting::Reject => OverwritePolicy::Reject,
            OverwriteSetting::Skip => OverwritePolicy::SkipIfExists,
        }
    }
}

impl From<OverwritePolicy> for OverwriteSetting {
    fn from(policy: OverwritePolicy) -> Self {
        match policy {
            OverwritePolicy::Replace => OverwriteSetting::Replace,
            OverwritePolicy::Reject => OverwriteSetting::Reject,
            OverwritePolicy::SkipIfExists => OverwriteSetting::Skip,
        }
    }
}

/// One `--switch values...` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DefaultArg {
    /// Switch name without the leading dashes, e.g. `native_language`
    pub switch: String,

    #[serde(default)]
    pub values: Vec<String>,
}
