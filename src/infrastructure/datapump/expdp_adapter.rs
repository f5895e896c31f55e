// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # expdp Subprocess Adapter
//!
//! Runs the Oracle Data Pump export utility as a child process.
//!
//! `expdp` writes progress to both stdout and stderr. Each pipe gets its own
//! reader thread that forwards complete lines into a single channel, so the
//! calling thread sees one merged stream in arrival order and neither pipe can
//! fill up and block the child.

use crate::domain::entities::ExportOutcome;
use crate::domain::errors::{ExportError, Result};
use crate::ports::datapump_port::{DataPumpPort, ExpdpCommand};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

/// Concrete implementation of `DataPumpPort` backed by `std::process::Command`.
#[derive(Debug, Default)]
pub struct ExpdpAdapter;

impl ExpdpAdapter {
    pub fn new() -> Self {
        Self
    }

    fn spawn(command: &ExpdpCommand) -> Result<Child> {
        Command::new(&command.program)
            .args(&command.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ExportError::ToolNotFound(command.program.clone()),
                _ => ExportError::IoError(e),
            })
    }
}

impl DataPumpPort for ExpdpAdapter {
    fn run_export(
        &self,
        command: &ExpdpCommand,
        log_path: &Path,
        on_line: &mut dyn FnMut(&str),
    ) -> Result<ExportOutcome> {
        info!("Launching {}", command.display);
        let mut child = Self::spawn(command)?;

        let log_file = match File::create(log_path) {
            Ok(f) => f,
            Err(e) => {
                stop_child(&mut child);
                return Err(ExportError::IoError(e));
            }
        };
        let mut log = BufWriter::new(log_file);

        let (tx, rx) = crossbeam_channel::unbounded::<String>();
        let mut readers = Vec::with_capacity(2);
        if let Some(out) = child.stdout.take() {
            readers.push(spawn_reader(out, tx.clone()));
        }
        if let Some(err) = child.stderr.take() {
            readers.push(spawn_reader(err, tx.clone()));
        }
        // Channel disconnects once both readers hit EOF.
        drop(tx);

        let pumped = pump_lines(&rx, &mut log, on_line);
        if pumped.is_err() {
            stop_child(&mut child);
        }
        for reader in readers {
            if reader.join().is_err() {
                warn!("expdp output reader thread panicked");
            }
        }
        let lines = pumped?;
        log.flush()?;

        let status = child.wait()?;
        debug!("expdp exited with {:?} after {} lines", status.code(), lines);
        Ok(ExportOutcome {
            exit_code: status.code(),
            lines,
        })
    }
}

/// Forwards every line from `rx` to the log and the callback, returning the line count.
fn pump_lines<W: Write>(
    rx: &Receiver<String>,
    log: &mut W,
    on_line: &mut dyn FnMut(&str),
) -> io::Result<u64> {
    let mut lines = 0;
    for line in rx.iter() {
        on_line(&line);
        writeln!(log, "{}", line)?;
        lines += 1;
    }
    Ok(lines)
}

fn spawn_reader<R: Read + Send + 'static>(source: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    // expdp output is usually ASCII but NLS settings can change that
                    let text = String::from_utf8_lossy(&buf);
                    let line = text.trim_end_matches(|c| c == '\n' || c == '\r');
                    if tx.send(line.to_string()).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("Failed to read expdp output: {}", e);
                    break;
                }
            }
        }
    })
}

fn stop_child(child: &mut Child) {
    if let Err(e) = child.kill() {
        warn!("Failed to stop expdp: {}", e);
    }
    if let Err(e) = child.wait() {
        warn!("Failed to reap expdp after stopping it: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell(script: &str) -> ExpdpCommand {
        ExpdpCommand {
            program: "sh".into(),
            args: vec!["-c".into(), script.into()],
            display: "sh -c ...".into(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_merges_stdout_and_stderr_into_log() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("run.log");
        let mut seen = Vec::new();

        let outcome = ExpdpAdapter::new()
            .run_export(
                &shell("echo 'Export: Release 19.0'; echo 'ORA-39002: invalid operation' >&2"),
                &log_path,
                &mut |line| seen.push(line.to_string()),
            )
            .unwrap();

        assert_eq!(outcome.exit_code, Some(0));
        assert_eq!(outcome.lines, 2);
        assert!(seen.contains(&"Export: Release 19.0".to_string()));
        assert!(seen.contains(&"ORA-39002: invalid operation".to_string()));

        let log = std::fs::read_to_string(&log_path).unwrap();
        assert!(log.contains("Export: Release 19.0\n"));
        assert!(log.contains("ORA-39002: invalid operation\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_reports_non_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("fail.log");

        let outcome = ExpdpAdapter::new()
            .run_export(&shell("echo failing; exit 5"), &log_path, &mut |_| {})
            .unwrap();

        assert_eq!(outcome.exit_code, Some(5));
        assert!(!outcome.is_success());
        assert_eq!(std::fs::read_to_string(&log_path).unwrap(), "failing\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_unterminated_last_line_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("tail.log");
        let mut seen = Vec::new();

        let outcome = ExpdpAdapter::new()
            .run_export(&shell("printf 'a\\r\\nb'"), &log_path, &mut |l| {
                seen.push(l.to_string())
            })
            .unwrap();

        assert_eq!(outcome.lines, 2);
        assert_eq!(seen, vec!["a".to_string(), "b".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unwritable_log_stops_the_child() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("no-such-dir").join("run.log");
        let started = std::time::Instant::now();

        let err = ExpdpAdapter::new()
            .run_export(&shell("sleep 30"), &log_path, &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, ExportError::IoError(_)));
        // the child was killed and reaped rather than waited out
        assert!(started.elapsed() < std::time::Duration::from_secs(20));
    }

    #[test]
    fn test_missing_binary_is_tool_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("never.log");
        let command = ExpdpCommand {
            program: "expdp-does-not-exist-on-this-host".into(),
            args: vec![],
            display: "expdp-does-not-exist-on-this-host".into(),
        };

        let err = ExpdpAdapter::new()
            .run_export(&command, &log_path, &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, ExportError::ToolNotFound(ref p) if p == "expdp-does-not-exist-on-this-host"));
        assert!(!log_path.exists());
    }
}
