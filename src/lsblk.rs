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

//! lsblk pairs output
//!
//! `lsblk -P` prints one line per block device made of `KEY="VALUE"`
//! tuples. Only KNAME, TYPE and MOUNTPOINT are used.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::lsblk::TYPE_PARTITION;

lazy_static! {
    static ref PAIR: Regex = Regex::new(r#"([A-Z:_-]+)="([^"]*)""#).expect("valid lsblk pair regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockEntry {
    pub kname: String,
    pub kind: String,
    pub mountpoint: Option<String>,
}

impl BlockEntry {
    pub fn is_partition(&self) -> bool {
        self.kind == TYPE_PARTITION
    }
}

/// A partition together with the kernel name of the device it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEntry {
    pub entry: BlockEntry,
    pub owner: Option<String>,
}

/// Parse every line carrying at least KNAME and TYPE. Other lines are ignored.
pub fn parse_lsblk(text: &str) -> Vec<BlockEntry> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<BlockEntry> {
    let mut kname = None;
    let mut kind = None;
    let mut mountpoint = None;
    for caps in PAIR.captures_iter(line) {
        let value = caps[2].to_string();
        match &caps[1] {
            "KNAME" => kname = Some(value),
            "TYPE" => kind = Some(value),
            "MOUNTPOINT" => mountpoint = Some(value).filter(|v| !v.is_empty()),
            _ => {}
        }
    }
    let kname = kname.filter(|k| !k.is_empty())?;
    Some(BlockEntry {
        kname,
        kind: kind?,
        mountpoint,
    })
}

/// Partitions in listing order, each tied to the nearest preceding
/// non-partition entry.
pub fn partitions(entries: &[BlockEntry]) -> Vec<PartitionEntry> {
    let mut owner: Option<&str> = None;
    let mut out = Vec::new();
    for entry in entries {
        if entry.is_partition() {
            out.push(PartitionEntry {
                entry: entry.clone(),
                owner: owner.map(str::to_string),
            });
        } else {
            owner = Some(entry.kname.as_str());
        }
    }
    out
}
