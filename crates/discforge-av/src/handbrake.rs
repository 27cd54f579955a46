//! The HandBrakeCLI front-end.

use crate::command::CommandBuilder;
use crate::output::{finalize_output, AtomicPolicy, Finalized, OverwritePolicy};
use crate::runner::{ProcessRunner, RunnerOutput, SystemRunner};
use crate::{Error, Result};
use discforge_scan::{Disc, PresetCategory};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Default executable name, looked up on `PATH`.
pub const DEFAULT_BIN: &str = "HandBrakeCLI";

/// A configured HandBrakeCLI invocation.
///
/// Like [`CommandBuilder`], a `HandBrake` is immutable: [`with`](Self::with)
/// and [`flag`](Self::flag) return a new value, so a base configuration can be
/// shared and forked freely. Nothing runs until [`scan`](Self::scan),
/// [`output`](Self::output), [`update`](Self::update) or
/// [`preset_list`](Self::preset_list) is called.
///
/// # Example
///
/// ```no_run
/// use discforge_av::HandBrake;
/// use discforge_av::output::{AtomicPolicy, OverwritePolicy};
///
/// let hb = HandBrake::new().with("input", ["/dev/sr0"]);
/// let disc = hb.scan()?;
///
/// if let Some(main) = disc.main_feature() {
///     hb.with("title", [main.number])
///         .with("preset", ["Normal"])
///         .output(
///             format!("/movies/{}.m4v", disc.name),
///             OverwritePolicy::SkipIfExists,
///             &AtomicPolicy::TempSameDir,
///         )?;
/// }
/// # Ok::<(), discforge_av::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct HandBrake {
    bin_path: PathBuf,
    trace: bool,
    runner: Arc<dyn ProcessRunner>,
    command: CommandBuilder,
}

impl Default for HandBrake {
    fn default() -> Self {
        Self::new()
    }
}

impl HandBrake {
    /// Use `HandBrakeCLI` from `PATH` with the system runner.
    pub fn new() -> Self {
        Self {
            bin_path: PathBuf::from(DEFAULT_BIN),
            trace: false,
            runner: Arc::new(SystemRunner),
            command: CommandBuilder::new(),
        }
    }

    /// Resolve `HandBrakeCLI` on `PATH` up front.
    pub fn locate() -> Result<Self> {
        let path = crate::tools::require_tool(DEFAULT_BIN)?;
        Ok(Self::new().with_bin_path(path))
    }

    pub fn with_bin_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.bin_path = path.into();
        self
    }

    /// Stream tool output to the log at `info` level while it runs.
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn ProcessRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn bin_path(&self) -> &Path {
        &self.bin_path
    }

    pub fn trace(&self) -> bool {
        self.trace
    }

    pub fn command(&self) -> &CommandBuilder {
        &self.command
    }

    /// Fork with `--<identifier> values...` appended.
    ///
    /// Switch names are not validated; HandBrakeCLI rejects bad ones when run.
    pub fn with<I, V>(&self, identifier: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.fork(self.command.with(identifier, values))
    }

    /// Fork with a value-less `--<identifier>` appended.
    pub fn flag(&self, identifier: &str) -> Self {
        self.fork(self.command.flag(identifier))
    }

    fn fork(&self, command: CommandBuilder) -> Self {
        Self {
            bin_path: self.bin_path.clone(),
            trace: self.trace,
            runner: Arc::clone(&self.runner),
            command,
        }
    }

    /// The argument vector configured so far.
    pub fn arguments(&self) -> Vec<String> {
        self.command.to_argument_vector()
    }

    /// Run with the configured arguments followed by `extra`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProcessFailed`] carrying the captured output when
    /// HandBrakeCLI exits with a non-zero status.
    pub fn run<S: AsRef<str>>(&self, extra: &[S]) -> Result<RunnerOutput> {
        let mut args = self.arguments();
        args.extend(extra.iter().map(|s| s.as_ref().to_string()));

        let result = self.runner.run(&self.bin_path, &args, self.trace)?;
        if !result.success() {
            if !self.trace {
                tracing::error!("{}", result.output);
            }
            return Err(Error::process_failed(result.status, result.output));
        }
        Ok(result)
    }

    /// Scan the input and parse the result.
    ///
    /// HandBrakeCLI only scans title 1 unless told otherwise; when no
    /// `--title` has been configured this scans all titles (`--title 0`).
    pub fn scan(&self) -> Result<Disc> {
        if !self.command.contains_switch("title") {
            return self.with("title", [0]).scan();
        }

        let result = self.run(&["--scan"])?;
        Ok(discforge_scan::parse_scan(&result.output)?)
    }

    /// Transcode to `path`.
    ///
    /// Set every other option first; this starts the transcode immediately.
    /// See [`finalize_output`] for how the policies apply.
    pub fn output(
        &self,
        path: impl AsRef<Path>,
        overwrite: OverwritePolicy,
        atomic: &AtomicPolicy,
    ) -> Result<Finalized> {
        let path = path.as_ref();
        utf8_path(path)?;

        finalize_output(path, overwrite, atomic, |working| {
            self.with("output", [utf8_path(working)?]).run::<&str>(&[])
        })
    }

    /// Ask HandBrakeCLI whether it is the current release.
    ///
    /// HandBrakeCLI reports "up to date" when it cannot reach its update
    /// server, so this is only a hint.
    pub fn update(&self) -> Result<bool> {
        let result = self.run(&["--update"])?;
        Ok(discforge_scan::is_up_to_date(&result.output))
    }

    /// The built-in presets, grouped by category.
    pub fn preset_list(&self) -> Result<Vec<PresetCategory>> {
        let result = self.run(&["--preset-list"])?;
        Ok(discforge_scan::parse_preset_list(&result.output))
    }
}

/// HandBrakeCLI takes paths as strings; a lossy conversion would make it
/// write somewhere other than where the finalizer looks.
fn utf8_path(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        Error::InvalidInput(format!("path is not valid UTF-8: {}", path.display()))
    })
}
