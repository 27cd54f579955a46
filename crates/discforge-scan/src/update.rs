//! Interpretation of `HandBrakeCLI --update` output.

use regex::Regex;
use std::sync::LazyLock;

static RE_UP_TO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Your version of HandBrake is up to date\.").unwrap());

/// Whether the update check reported the installed build as current.
///
/// HandBrakeCLI also reports "up to date" when it cannot reach the update
/// server, so a `true` here is only as reliable as the tool.
pub fn is_up_to_date(output: &str) -> bool {
    RE_UP_TO_DATE.is_match(output)
}
