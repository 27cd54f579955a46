//! # discforge-av
//!
//! A programmatic front-end for HandBrakeCLI.
//!
//! This crate provides:
//! - [`CommandBuilder`], an immutable argument list that forks instead of
//!   mutating, so one base configuration can feed many commands
//! - [`HandBrake`], which runs the tool and turns scans into a
//!   [`Disc`](discforge_scan::Disc)
//! - [`output::finalize_output`], the overwrite and atomic-write handling for
//!   transcodes
//!
//! ## Example
//!
//! ```no_run
//! use discforge_av::HandBrake;
//!
//! let disc = HandBrake::new().with("input", ["/dev/sr0"]).scan()?;
//! for title in disc.titles.values() {
//!     println!("title {}: {} ({} chapters)", title.number, title.duration, title.chapters.len());
//! }
//! # Ok::<(), discforge_av::Error>(())
//! ```

pub mod command;
mod error;
pub mod handbrake;
pub mod output;
pub mod runner;
pub mod tools;

// Re-exports
pub use command::{render_switch, CommandArgument, CommandBuilder};
pub use discforge_scan as scan;
pub use error::{Error, ErrorKind, Result};
pub use handbrake::HandBrake;
pub use output::{finalize_output, AtomicPolicy, Finalized, OverwritePolicy};
pub use runner::{ProcessRunner, RunnerOutput, StaticRunner, SystemRunner};
pub use tools::{check_tool, require_tool, ToolInfo};
