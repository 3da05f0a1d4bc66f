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

//! udev-resource - hardware inventory for Linux built from udev data
//!
//! This library parses the `udevadm info --export-db` database and `lsblk`
//! output into device records, classifies them into hardware categories and
//! renders them as attribute dumps or category listings.

pub mod category;
pub mod classify;
pub mod cli;
pub mod command;
pub mod constants;
pub mod device;
pub mod logger;
pub mod lsblk;
pub mod modalias;
pub mod parser;
pub mod report;
pub mod udev;

#[cfg(test)]
pub mod test_utils;

pub use category::Category;
pub use device::DeviceRecord;
pub use parser::UdevadmParser;
pub use report::{CategorizedLister, DeviceSink, FilteredDump, FullDump, JsonDump, Outcome};
pub use ur_error::{Result, UdevResourceError};
