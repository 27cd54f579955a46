//! Output path selection and finalization.
//!
//! HandBrakeCLI writes straight to whatever `--output` it is given. To keep a
//! half-written file from ever appearing at the final path, a transcode can
//! be pointed at a working path and moved into place only after the tool
//! exits cleanly. Because the tool cannot cooperate with any locking, the
//! final path is checked again after the run: something else may have created
//! it in the meantime, and the overwrite policy decides what happens then.

use crate::runner::RunnerOutput;
use crate::{Error, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Token inserted before the extension of a working file.
pub const WORKING_INFIX: &str = "handbrake";

/// What to do when the final path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Replace the existing file.
    #[default]
    Replace,
    /// Fail with [`Error::TargetExists`].
    Reject,
    /// Leave the existing file alone and do nothing.
    SkipIfExists,
}

impl std::str::FromStr for OverwritePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" | "true" => Ok(Self::Replace),
            "reject" | "false" => Ok(Self::Reject),
            "skip" | "ignore" | "skip-if-exists" => Ok(Self::SkipIfExists),
            _ => Err(format!("Unknown overwrite policy: {}", s)),
        }
    }
}

/// Where the tool writes before the file reaches its final path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AtomicPolicy {
    /// Write directly to the final path.
    #[default]
    Direct,
    /// Write to a sibling of the final path, then move it over.
    TempSameDir,
    /// Write inside the given directory, then move it over.
    TempAt(PathBuf),
}

/// How a call to [`finalize_output`] ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finalized {
    /// The final path holds the new output.
    Written(PathBuf),
    /// The final path existed beforehand; nothing was run.
    Skipped(PathBuf),
    /// The final path appeared during the run and was kept; the new output
    /// remains at `working` for manual recovery.
    LeftInPlace { working: PathBuf, target: PathBuf },
}

impl Finalized {
    /// Whether the tool actually ran.
    pub fn ran(&self) -> bool {
        !matches!(self, Finalized::Skipped(_))
    }
}

/// The path to hand to the tool for a given final path.
///
/// ```
/// use discforge_av::output::{working_path, AtomicPolicy};
/// use std::path::{Path, PathBuf};
///
/// let target = Path::new("/movies/film.mp4");
/// assert_eq!(working_path(target, &AtomicPolicy::Direct)?, target);
/// assert_eq!(
///     working_path(target, &AtomicPolicy::TempSameDir)?,
///     PathBuf::from("/movies/film.handbrake.mp4")
/// );
/// assert_eq!(
///     working_path(target, &AtomicPolicy::TempAt("/scratch".into()))?,
///     PathBuf::from("/scratch/film.handbrake.mp4")
/// );
/// # Ok::<(), discforge_av::Error>(())
/// ```
pub fn working_path(target: &Path, atomic: &AtomicPolicy) -> Result<PathBuf> {
    match atomic {
        AtomicPolicy::Direct => Ok(target.to_path_buf()),
        AtomicPolicy::TempSameDir => Ok(target.with_file_name(infixed_name(target)?)),
        AtomicPolicy::TempAt(dir) => Ok(dir.join(infixed_name(target)?)),
    }
}

/// `film.mp4` becomes `film.handbrake.mp4`; `film` becomes `film.handbrake`.
fn infixed_name(target: &Path) -> Result<OsString> {
    let stem = target.file_stem().ok_or_else(|| {
        Error::InvalidInput(format!("Output path has no file name: {:?}", target))
    })?;

    let mut name = stem.to_os_string();
    name.push(".");
    name.push(WORKING_INFIX);
    if let Some(ext) = target.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(name)
}

/// Run `invoke` so that its output ends up at `target` according to policy.
///
/// `invoke` receives the working path to write to. The steps are:
///
/// 1. If `target` exists, fail (`Reject`) or return [`Finalized::Skipped`]
///    (`SkipIfExists`) without invoking anything.
/// 2. Create the working path's parent directories.
/// 3. Invoke; a non-zero status fails with [`Error::ProcessFailed`].
/// 4. If the working path differs from `target` and `target` now exists,
///    fail (`Reject`), keep both files (`SkipIfExists`), or replace it.
///    The working file is never deleted in the first two cases.
/// 5. Move the working file to `target`.
pub fn finalize_output<F>(
    target: &Path,
    overwrite: OverwritePolicy,
    atomic: &AtomicPolicy,
    invoke: F,
) -> Result<Finalized>
where
    F: FnOnce(&Path) -> Result<RunnerOutput>,
{
    if target.exists() {
        match overwrite {
            OverwritePolicy::Reject => return Err(Error::target_exists(target)),
            OverwritePolicy::SkipIfExists => {
                tracing::info!(
                    "Ignoring transcode to {:?} because it already exists",
                    target
                );
                return Ok(Finalized::Skipped(target.to_path_buf()));
            }
            OverwritePolicy::Replace => {}
        }
    }

    let working = working_path(target, atomic)?;
    if let Some(parent) = working.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    tracing::debug!("Writing {:?} via {:?}", target, working);
    let result = invoke(&working)?;
    if !result.success() {
        return Err(Error::process_failed(result.status, result.output));
    }

    if working == target {
        return Ok(Finalized::Written(working));
    }

    if target.exists() {
        tracing::warn!("{:?} showed up during transcode", target);
        match overwrite {
            OverwritePolicy::Reject => return Err(Error::target_exists(target)),
            OverwritePolicy::SkipIfExists => {
                tracing::warn!(
                    "Leaving {:?} as is; copy {:?} manually to replace it",
                    target,
                    working
                );
                return Ok(Finalized::LeftInPlace {
                    working,
                    target: target.to_path_buf(),
                });
            }
            OverwritePolicy::Replace => {
                tracing::info!("Replacing {:?} with new transcode", target);
            }
        }
    }

    move_file(&working, target)?;
    Ok(Finalized::Written(target.to_path_buf()))
}

/// Move `from` over `to`, copying when the two are on different filesystems.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match std::fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if from.exists() => {
            tracing::debug!("rename {:?} -> {:?} failed ({}); copying", from, to, e);
            std::fs::copy(from, to)?;
            std::fs::remove_file(from)?;
            Ok(())
        }
        Err(e) => Err(Error::Io(e)),
    }
}
