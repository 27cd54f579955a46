//! Process execution for HandBrakeCLI.

use crate::{Error, Result};
use std::fmt;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::{mpsc, Mutex};
use std::thread;

/// Output captured from one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerOutput {
    /// Combined stdout and stderr, in the order lines arrived.
    pub output: String,
    /// Exit code, or -1 if the process was terminated by a signal.
    pub status: i32,
}

impl RunnerOutput {
    pub fn new(output: impl Into<String>, status: i32) -> Self {
        Self {
            output: output.into(),
            status,
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Something that can run HandBrakeCLI and wait for it.
pub trait ProcessRunner: Send + Sync + fmt::Debug {
    /// Run `program` with `args` to completion.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// [`RunnerOutput::status`]. With `trace` set, output lines are logged at
    /// `info` as they arrive.
    fn run(&self, program: &Path, args: &[String], trace: bool) -> Result<RunnerOutput>;
}

/// Runs HandBrakeCLI as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String], trace: bool) -> Result<RunnerOutput> {
        if trace {
            tracing::info!("Spawning {} {:?}", program.display(), args);
        } else {
            tracing::debug!("Spawning {} {:?}", program.display(), args);
        }

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(program.display().to_string())
                } else {
                    Error::Io(e)
                }
            })?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward_lines(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward_lines(stderr, tx.clone()));
        }
        drop(tx);

        let mut output = String::new();
        for line in rx {
            if trace {
                tracing::info!("{}", line);
            } else {
                tracing::trace!("{}", line);
            }
            output.push_str(&line);
            output.push('\n');
        }

        for reader in readers {
            // A reader only fails by panicking; the output it sent is kept.
            let _ = reader.join();
        }

        let status = child.wait()?;
        Ok(RunnerOutput {
            output,
            status: status.code().unwrap_or(-1),
        })
    }
}

/// Send every line read from `reader` down `tx` until EOF.
fn forward_lines<R>(reader: R, tx: mpsc::Sender<String>) -> thread::JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Err(e) => {
                    tracing::warn!("Failed to read HandBrakeCLI output: {}", e);
                    break;
                }
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// A runner that returns canned output and records what it was asked to run.
///
/// Useful for tests and for exercising scan parsing without HandBrakeCLI.
#[derive(Debug, Default)]
pub struct StaticRunner {
    output: String,
    status: i32,
    calls: Mutex<Vec<Vec<String>>>,
}

impl StaticRunner {
    /// A runner that always succeeds with `output`.
    pub fn new(output: impl Into<String>) -> Self {
        Self::with_status(output, 0)
    }

    pub fn with_status(output: impl Into<String>, status: i32) -> Self {
        Self {
            output: output.into(),
            status,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Arguments of the most recent run.
    pub fn last_arguments(&self) -> Option<Vec<String>> {
        self.calls().last().cloned()
    }

    /// Arguments of every run, oldest first.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ProcessRunner for StaticRunner {
    fn run(&self, program: &Path, args: &[String], _trace: bool) -> Result<RunnerOutput> {
        tracing::debug!("Static run of {} {:?}", program.display(), args);
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(args.to_vec());
        Ok(RunnerOutput::new(self.output.clone(), self.status))
    }
}
