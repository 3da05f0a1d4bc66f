/*
 * This file is part of udev-resource.
 *
 * Copyright (C) 2025 udev-resource contributors
 *
 * udev-resource is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License version 3,
 * as published by the Free Software Foundation.
 *
 * udev-resource is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with udev-resource. If not, see <https://www.gnu.org/licenses/>.
 */

//! External command execution
//!
//! Runs the two gathering commands one after the other and hands back their
//! raw standard output. A failing command aborts the snapshot.

use std::io;
use std::process::{Command, Stdio};

use tracing::{info, warn};
use ur_error::{Result, UdevResourceError};

use crate::udev::decode_lenient;

/// Exit status and captured streams of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CapturedOutput>;
}

/// Runs commands as child processes of this one
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<CapturedOutput> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(CapturedOutput {
            code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Tokenize `command_line` like a POSIX shell, run it and return stdout.
pub fn capture<R: CommandRunner + ?Sized>(runner: &R, command_line: &str) -> Result<Vec<u8>> {
    let argv = shlex::split(command_line).ok_or_else(|| UdevResourceError::InvalidCommand {
        command: command_line.to_string(),
    })?;
    let (program, args) = argv.split_first().ok_or(UdevResourceError::EmptyCommand)?;

    info!("Running {}", command_line);
    let output = runner
        .run(program, args)
        .map_err(|e| UdevResourceError::spawn(command_line, e))?;
    if !output.success() {
        warn!("{} exited with {:?}", command_line, output.code);
        return Err(UdevResourceError::command_failed(
            command_line,
            output.code,
            decode_lenient(&output.stderr),
        ));
    }
    Ok(output.stdout)
}

/// Raw output of both gathering commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub udevadm: Vec<u8>,
    pub lsblk: Vec<u8>,
}

/// Run the udevadm command, then the lsblk command. Stops at the first failure.
pub fn gather<R: CommandRunner + ?Sized>(runner: &R, udevadm_command: &str, lsblk_command: &str) -> Result<Snapshot> {
    let udevadm = capture(runner, udevadm_command)?;
    let lsblk = capture(runner, lsblk_command)?;
    Ok(Snapshot { udevadm, lsblk })
}
