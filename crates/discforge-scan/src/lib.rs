//! # discforge-scan
//!
//! Parser for the text HandBrakeCLI prints while scanning a source.
//!
//! Parsing happens in two steps that are kept deliberately apart:
//!
//! - [`tree`] turns the `+`-marked, indentation-coded lines into a generic
//!   tree of [`Node`]s with no idea what the lines mean.
//! - [`extract`] walks that tree with field-specific patterns to build the
//!   [`Disc`] → [`Title`] → [`Chapter`] graph.
//!
//! When a new HandBrakeCLI release rewords its output, only [`extract`]
//! should need to change.
//!
//! ## Example
//!
//! ```
//! use discforge_scan::parse_scan;
//!
//! let output = "\
//! [10:38:12] hb_scan: path=/Volumes/ARTHUR/D2, title_index=0
//! + title 1:
//!   + Main Feature
//!   + duration: 00:42:10
//!   + chapters:
//!     + 1: cells 0->0, 19588 blocks, duration 00:42:10
//! ";
//!
//! let disc = parse_scan(output)?;
//! assert_eq!(disc.name, "D2");
//! assert_eq!(disc.titles[&1].seconds(), 2530);
//! # Ok::<(), discforge_scan::ScanError>(())
//! ```

pub mod disc;
mod error;
pub mod extract;
pub mod presets;
pub mod tree;
pub mod update;

// Re-exports
pub use disc::{duration_seconds, Chapter, Disc, Title};
pub use error::{Result, ScanError};
pub use presets::{parse_preset_list, Preset, PresetCategory};
pub use tree::Node;
pub use update::is_up_to_date;

/// Parse full scan output into a [`Disc`].
///
/// The returned disc keeps the original text and the parsed tree in
/// [`Disc::raw_output`] and [`Disc::raw_tree`] for debugging.
pub fn parse_scan(output: &str) -> Result<Disc> {
    let tree = tree::parse(output);
    let mut disc = extract::extract(output, &tree)?;
    disc.raw_output = Some(output.to_string());
    disc.raw_tree = Some(tree);
    Ok(disc)
}
