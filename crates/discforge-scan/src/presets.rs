//! Parsing for `HandBrakeCLI --preset-list` output.
//!
//! The listing groups presets into `< Category ... >` blocks, one
//! `+ Name: arguments` line per preset. Arguments are kept as the raw string
//! HandBrake printed; nothing here maps them back onto a command.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static RE_CATEGORY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)< (.*?)\n(.*?)>").unwrap());
static RE_PRESET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+(.*?):(.*?)\n").unwrap());

/// A named group of presets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetCategory {
    pub name: String,
    pub presets: Vec<Preset>,
}

impl PresetCategory {
    /// Preset by name.
    pub fn preset(&self, name: &str) -> Option<&Preset> {
        self.presets.iter().find(|p| p.name == name)
    }
}

/// One built-in preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    /// The argument string HandBrake associates with the preset.
    pub args: String,
}

/// Parse a preset listing, keeping categories and presets in listing order.
///
/// # Example
///
/// ```
/// use discforge_scan::presets::parse_preset_list;
///
/// let text = "< Regular\n\n   + Normal:  -e x264 -q 20.0\n\n>\n";
/// let categories = parse_preset_list(text);
/// assert_eq!(categories[0].name, "Regular");
/// assert_eq!(categories[0].presets[0].args, "-e x264 -q 20.0");
/// ```
pub fn parse_preset_list(text: &str) -> Vec<PresetCategory> {
    RE_CATEGORY
        .captures_iter(text)
        .map(|caps| PresetCategory {
            name: caps[1].trim().to_string(),
            presets: RE_PRESET
                .captures_iter(&caps[2])
                .map(|p| Preset {
                    name: p[1].trim().to_string(),
                    args: p[2].trim().to_string(),
                })
                .collect(),
        })
        .collect()
}
