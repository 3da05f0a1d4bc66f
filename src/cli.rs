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

//! Command Line Interface
//!
//! Argument parsing, report mode selection and the run loop shared by the
//! binary and the integration tests.

use std::io::Write;

use clap::Parser;
use tracing::debug;
use ur_error::Result;

use crate::category::Category;
use crate::command::{gather, CommandRunner};
use crate::constants::commands;
use crate::parser::UdevadmParser;
use crate::report::{CategorizedLister, FilteredDump, FullDump, JsonDump, Outcome};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "udev_resource")]
#[command(version)]
#[command(about = "List hardware devices known to udev")]
#[command(long_about = "List hardware devices known to udev

Runs udevadm and lsblk, classifies every device and prints either a full
attribute dump, a per-category listing or a filtered dump.

EXAMPLES:
    udev_resource                          Dump every device
    udev_resource -l NETWORK WIRELESS      List network adapters
    udev_resource -l DISK PARTITION -s     Short listing including partitions
    udev_resource -f CAPTURE               Dump attributes of capture devices
    udev_resource --json                   Dump every device as JSON

ENVIRONMENT VARIABLES:
    RUST_LOG=debug         Enable debug logging on stderr")]
pub struct Cli {
    /// Command to execute to get udevadm information. Only change it if you know what you're doing.
    #[arg(short = 'c', long, value_name = "CMD", default_value = commands::UDEVADM_EXPORT_DB)]
    pub command: String,

    /// Command to execute to get lsblk information. Only change it if you know what you're doing.
    #[arg(short = 'd', long = "lsblkcommand", value_name = "CMD", default_value = commands::LSBLK_PARTITIONS)]
    pub lsblkcommand: String,

    /// List devices found under the requested categories
    #[arg(short = 'l', long, num_args = 0.., value_name = "CATEGORY")]
    pub list: Option<Vec<Category>>,

    /// Filter the full dump by the requested categories
    #[arg(short = 'f', long, num_args = 0.., value_name = "CATEGORY")]
    pub filter: Option<Vec<Category>>,

    /// Print listings without the category header and without unknown names
    #[arg(short = 's', long)]
    pub short: bool,

    /// Print the full dump as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Report selected on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    List { categories: Vec<Category>, short: bool },
    Filter(Vec<Category>),
    Json,
    Dump,
}

impl Cli {
    /// `--list` wins over `--filter`, which wins over `--json`.
    pub fn mode(&self) -> Mode {
        if let Some(categories) = &self.list {
            Mode::List {
                categories: categories.clone(),
                short: self.short,
            }
        } else if let Some(categories) = &self.filter {
            Mode::Filter(categories.clone())
        } else if self.json {
            Mode::Json
        } else {
            Mode::Dump
        }
    }

    /// Partitions are only synthesized when PARTITION was asked for.
    pub fn list_partitions(&self) -> bool {
        [&self.list, &self.filter]
            .into_iter()
            .flatten()
            .any(|categories| categories.contains(&Category::Partition))
    }
}

/// Gather, parse and print the report selected by `cli`.
pub fn run_cli<R, W>(cli: &Cli, runner: &R, out: &mut W) -> Result<Outcome>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    let snapshot = gather(runner, &cli.command, &cli.lsblkcommand)?;
    let parser = UdevadmParser::from_bytes(&snapshot.udevadm, &snapshot.lsblk, cli.list_partitions());

    let mode = cli.mode();
    debug!("Report mode: {:?}", mode);
    match mode {
        Mode::List { categories, short } => {
            let mut lister = CategorizedLister::new(categories);
            parser.run(&mut lister);
            lister.display(out, short)
        }
        Mode::Filter(categories) => {
            let mut dump = FilteredDump::new(categories);
            parser.run(&mut dump);
            dump.display(out)
        }
        Mode::Json => {
            let mut dump = JsonDump::new();
            parser.run(&mut dump);
            dump.display(out)
        }
        Mode::Dump => {
            let mut dump = FullDump::new(&mut *out);
            parser.run(&mut dump);
            dump.finish()?;
            Ok(Outcome::Displayed)
        }
    }
}

/// Process exit status for a finished run
pub fn exit_status(result: &Result<Outcome>) -> i32 {
    match result {
        Ok(Outcome::Displayed) => 0,
        Ok(Outcome::NoData) => ur_error::GENERIC_FAILURE,
        Err(e) => e.exit_code(),
    }
}
