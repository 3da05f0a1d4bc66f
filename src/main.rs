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

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use udev_resource::cli::{self, Cli};
use udev_resource::command::SystemRunner;
use udev_resource::logger;

fn main() -> anyhow::Result<ExitCode> {
    let cli_args = Cli::parse();
    logger::init_logging();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = cli::run_cli(&cli_args, &SystemRunner, &mut out);
    let code = u8::try_from(cli::exit_status(&result)).unwrap_or(1);

    match result {
        Ok(_) => Ok(ExitCode::from(code)),
        Err(e) if e.is_command_error() => {
            eprintln!("{}", e);
            Ok(ExitCode::from(code))
        }
        // Closed pipes and other output failures
        Err(e) => Err(e).context("Failed to write report"),
    }
}
