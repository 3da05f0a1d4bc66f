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

//! udev database export parsing
//!
//! Splits `udevadm info --export-db` output into blocks and each block into
//! its tagged lines. No interpretation happens here beyond the line grammar;
//! see `parser` for how blocks become device records.

use std::collections::HashMap;

use tracing::trace;

use crate::constants::paths;

/// Decode captured command output, dropping invalid UTF-8 sequences.
///
/// Captures are decoded best-effort on purpose: a device with a garbled
/// property must not stop every other device in the snapshot from being
/// matched. Undecodable bytes are removed, not replaced, and nothing is
/// logged about them so the result is deterministic for consumers.
pub fn decode_lenient(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
    }
    out
}

/// One device block of the export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UdevBlock {
    /// `P:` device path, relative to /sys
    pub path: Option<String>,
    /// `N:` device node name, relative to /dev
    pub node: Option<String>,
    /// `M:` sysname
    pub sysname: Option<String>,
    /// `S:` symlinks, in order
    pub symlinks: Vec<String>,
    /// `E:` properties
    pub properties: HashMap<String, String>,
    /// `A:` sysfs attributes
    pub attributes: HashMap<String, String>,
}

impl UdevBlock {
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
    }

    /// `ID_INPUT_*` style boolean flags
    pub fn flag(&self, key: &str) -> bool {
        self.property(key) == Some("1")
    }

    pub fn subsystem(&self) -> Option<&str> {
        self.property("SUBSYSTEM")
    }

    pub fn devtype(&self) -> Option<&str> {
        self.property("DEVTYPE")
    }

    /// Device path, from `P:` or the `DEVPATH` property
    pub fn devpath(&self) -> Option<&str> {
        self.path
            .as_deref()
            .filter(|p| !p.is_empty())
            .or_else(|| self.property("DEVPATH"))
    }

    /// Kernel name of the device node (`sda1` for `/dev/sda1`)
    pub fn kernel_name(&self) -> Option<&str> {
        self.property("DEVNAME")
            .map(|n| n.strip_prefix(paths::DEV_PREFIX).unwrap_or(n))
            .or(self.node.as_deref())
    }

    pub fn is_virtual(&self) -> bool {
        self.devpath().is_some_and(|p| p.contains(paths::VIRTUAL_DEVICES))
    }

    /// Last component of the device path
    pub fn leaf(&self) -> Option<&str> {
        self.devpath().and_then(|p| p.rsplit('/').next()).filter(|s| !s.is_empty())
    }

    fn apply(&mut self, line: &str) {
        let Some((tag, value)) = line.split_once(':') else {
            trace!("Skipping untagged udev line: {}", line);
            return;
        };
        let value = value.trim_start();
        match tag.trim() {
            "P" => {
                if self.path.is_none() {
                    self.path = Some(value.to_string());
                }
            }
            "N" => self.node = Some(value.to_string()),
            "M" => self.sysname = Some(value.to_string()),
            "S" => self.symlinks.push(value.to_string()),
            "E" => insert_pair(&mut self.properties, value, line),
            "A" => insert_pair(&mut self.attributes, value, line),
            // Newer udevadm spells a few properties as their own tags
            "U" => fallback_property(&mut self.properties, "SUBSYSTEM", value),
            "T" => fallback_property(&mut self.properties, "DEVTYPE", value),
            "V" => fallback_property(&mut self.properties, "DRIVER", value),
            _ => {}
        }
    }
}

fn insert_pair(map: &mut HashMap<String, String>, pair: &str, line: &str) {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            map.entry(key.trim().to_string()).or_insert_with(|| value.to_string());
        }
        _ => trace!("Skipping malformed udev line: {}", line),
    }
}

fn fallback_property(map: &mut HashMap<String, String>, key: &str, value: &str) {
    if !value.is_empty() {
        map.entry(key.to_string()).or_insert_with(|| value.to_string());
    }
}

/// Split an export into blocks. Blocks without any recognized line are
/// skipped; blank-line runs count as one separator.
pub fn parse_blocks(text: &str) -> Vec<UdevBlock> {
    let mut blocks = Vec::new();
    let mut current = UdevBlock::default();
    let mut touched = false;

    for raw in text.lines() {
        let line = raw.trim_end_matches('\r');
        if line.trim().is_empty() {
            if touched {
                blocks.push(std::mem::take(&mut current));
                touched = false;
            }
            continue;
        }
        current.apply(line);
        touched = true;
    }
    if touched {
        blocks.push(current);
    }
    blocks
}
