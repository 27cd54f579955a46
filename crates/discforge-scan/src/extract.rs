//! Turn a scan tree into a [`Disc`].
//!
//! All knowledge of HandBrakeCLI's wording lives here. Every required field
//! is matched with a fixed pattern and a miss is reported as
//! [`ScanError::UnrecognizedFormat`] carrying the node text, since it almost
//! always means the tool's output has changed.

use crate::disc::{Chapter, Disc, Title};
use crate::tree::Node;
use crate::{Result, ScanError};
use regex::Regex;
use std::sync::LazyLock;

/// Substring identifying the log line that names the scanned source.
pub const SCAN_LINE_MARKER: &str = "hb_scan";

/// Label of the node holding a title's chapters.
pub const CHAPTERS_LABEL: &str = "chapters:";

/// Substring HandBrake prints under the title it picked as the main feature.
pub const MAIN_FEATURE_MARKER: &str = "Main Feature";

static RE_SCAN_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"path=([^,]*),").unwrap());
static RE_TITLE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"title (\d+)").unwrap());
static RE_TITLE_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"duration: (\d\d:\d\d:\d\d)").unwrap());
static RE_CHAPTER_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"duration (\d\d:\d\d:\d\d)").unwrap());
static RE_CHAPTER_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+): cells").unwrap());

/// Build a disc from the full scan text and the tree parsed from it.
///
/// The disc name comes from `text` (the `hb_scan` log line is not part of
/// the tree); titles come from the children of `root`.
pub fn extract(text: &str, root: &Node) -> Result<Disc> {
    let mut disc = Disc::new(disc_name(text)?);

    for title_node in root.children() {
        let title = title_from_node(title_node)?;
        let number = title.number;
        if disc.add_title(title).is_some() {
            tracing::warn!("Title {} listed more than once; keeping the last", number);
        }
    }

    tracing::debug!(
        "Extracted disc {:?} with {} title(s)",
        disc.name,
        disc.titles.len()
    );
    Ok(disc)
}

/// Basename of the path reported on the `hb_scan` line.
pub fn disc_name(text: &str) -> Result<String> {
    let line = text
        .lines()
        .find(|line| line.contains(SCAN_LINE_MARKER))
        .ok_or_else(|| ScanError::unrecognized("hb_scan line", ""))?;

    let path = RE_SCAN_PATH
        .captures(line)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ScanError::unrecognized("scan path", line))?;

    Ok(basename(&path))
}

/// Parse one `title N:` subtree.
pub fn title_from_node(node: &Node) -> Result<Title> {
    let number = capture_number(&RE_TITLE_NUMBER, node.name(), "title number")?;

    let duration_node = node
        .find_child(|name| name.contains("duration"))
        .ok_or_else(|| ScanError::unrecognized("title duration", node.name()))?;
    let duration = capture(&RE_TITLE_DURATION, duration_node.name(), "title duration")?;

    let chapters = node
        .find_child(|name| name.starts_with(CHAPTERS_LABEL))
        .ok_or_else(|| ScanError::unrecognized("chapter list", node.name()))?;

    let main_feature = node
        .find_child(|name| name.contains(MAIN_FEATURE_MARKER))
        .is_some();

    let mut title = Title::new(number, duration).with_main_feature(main_feature);
    for chapter_node in chapters.children() {
        title.add_chapter(chapter_from_node(chapter_node)?);
    }
    Ok(title)
}

/// Parse one chapter line such as `5: cells 4->4, 9747 blocks, duration 00:03:23`.
pub fn chapter_from_node(node: &Node) -> Result<Chapter> {
    let duration = capture(&RE_CHAPTER_DURATION, node.name(), "chapter duration")?;
    let number = capture_number(&RE_CHAPTER_NUMBER, node.name(), "chapter number")?;
    Ok(Chapter::new(number, duration))
}

fn capture(re: &Regex, text: &str, field: &'static str) -> Result<String> {
    re.captures(text)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ScanError::unrecognized(field, text))
}

fn capture_number(re: &Regex, text: &str, field: &'static str) -> Result<u32> {
    capture(re, text, field)?
        .parse()
        .map_err(|_| ScanError::unrecognized(field, text))
}

fn basename(path: &str) -> String {
    // Scan paths may come from another platform, so accept both separators.
    let trimmed = path.trim_end_matches(['/', '\\']);
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    if name.is_empty() {
        path.to_string()
    } else {
        name.to_string()
    }
}
