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

//! udevadm + lsblk snapshot parser
//!
//! Turns the two captured texts into an ordered list of device records:
//!
//! 1. Each export block becomes a record, in export order. A repeated path
//!    merges into the record already holding it.
//! 2. Nodes that only describe a facet of a physical device (network
//!    interfaces, input devices, HID and USB interfaces, sound cards,
//!    video4linux nodes) fold into the nearest ancestor record. A facet
//!    whose category differs from a specific category the ancestor already
//!    holds (a touchpad next to a mouse, a webcam microphone next to its
//!    camera) stays a record of its own and inherits the ancestor's identity.
//! 3. Mirror nodes (input event nodes, sound PCM/control nodes) and udev
//!    partition blocks are never emitted on their own.
//! 4. When partitions are requested, every lsblk partition becomes a
//!    PARTITION record placed right after its owning disk.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::category::Category;
use crate::classify::Classifier;
use crate::constants::paths;
use crate::device::DeviceRecord;
use crate::lsblk::{self, PartitionEntry};
use crate::modalias;
use crate::report::DeviceSink;
use crate::udev::{self, UdevBlock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Emit,
    Fold,
    Skip,
}

fn disposition(block: &UdevBlock) -> Disposition {
    let has_node = block.property("DEVNAME").is_some() || block.node.is_some();
    match (block.subsystem().unwrap_or_default(), block.devtype()) {
        ("block", Some("partition")) => Disposition::Skip,
        ("input", _) if has_node => Disposition::Skip,
        ("sound", _) if !block.leaf().is_some_and(|l| l.starts_with("card")) => Disposition::Skip,
        ("net" | "input" | "hid" | "sound" | "video4linux" | "bluetooth" | "mmc_host", _) => Disposition::Fold,
        ("usb", Some("usb_interface")) => Disposition::Fold,
        _ => Disposition::Emit,
    }
}

/// Build the record for one block, without a category.
pub fn build_record(block: &UdevBlock, path: &str) -> DeviceRecord {
    let mut record = DeviceRecord::new(path);

    record.name = block
        .property("INTERFACE")
        .filter(|_| block.subsystem() == Some("net"))
        .or(block.node.as_deref())
        .or_else(|| block.kernel_name())
        .or(block.sysname.as_deref())
        .or_else(|| block.leaf())
        .map(str::to_string);

    let modalias = block.property("MODALIAS").unwrap_or_default();
    record.bus = block
        .property("ID_BUS")
        .map(str::to_string)
        .or_else(|| modalias::modalias_bus(modalias))
        .or_else(|| block.subsystem().map(str::to_string));

    record.driver = block
        .property("DRIVER")
        .or_else(|| block.property("ID_USB_DRIVER"))
        .or_else(|| block.property("ID_NET_DRIVER"))
        .map(str::to_string);

    let from_modalias = modalias::parse_modalias(modalias);
    let ids = match (block.property("ID_VENDOR_ID"), block.property("ID_MODEL_ID")) {
        (Some(v), Some(p)) => modalias::parse_hex_u16(v).zip(modalias::parse_hex_u16(p)),
        _ => None,
    };
    record.set_ids(
        ids.or_else(|| block.property("PCI_ID").and_then(modalias::parse_colon_pair))
            .or_else(|| block.property("PRODUCT").and_then(modalias::parse_product))
            .or(from_modalias.ids),
    );
    record.set_sub_ids(
        block
            .property("PCI_SUBSYS_ID")
            .and_then(modalias::parse_colon_pair)
            .or(from_modalias.sub_ids),
    );

    record.vendor = identity_string(block, "ID_VENDOR_FROM_DATABASE", "ID_VENDOR_ENC", "ID_VENDOR");
    record.product = identity_string(block, "ID_MODEL_FROM_DATABASE", "ID_MODEL_ENC", "ID_MODEL")
        .or_else(|| block.property("NAME").map(|n| n.trim_matches('"').to_string()))
        .or_else(|| block.property("ID_V4L_PRODUCT").map(str::to_string))
        .filter(|s| !s.is_empty());
    record.refresh_slugs();

    record.interface = block.property("INTERFACE").map(str::to_string);
    record.mac = block
        .attribute("address")
        .filter(|_| block.subsystem() == Some("net"))
        .map(str::to_string)
        .or_else(|| block.property("ID_NET_NAME_MAC").and_then(modalias::mac_from_net_name));

    record.symlink_uuid = block
        .symlinks
        .iter()
        .find_map(|link| link.strip_prefix(paths::BY_UUID))
        .and_then(|rest| rest.rsplit('/').next())
        .filter(|uuid| !uuid.is_empty())
        .map(str::to_string);

    record
}

/// Database name, then decoded `*_ENC`, then the raw property with
/// underscores turned back into spaces.
fn identity_string(block: &UdevBlock, database: &str, encoded: &str, raw: &str) -> Option<String> {
    block
        .property(database)
        .map(str::to_string)
        .or_else(|| block.property(encoded).map(|e| modalias::decode_udev_escapes(e).trim().to_string()))
        .or_else(|| block.property(raw).map(|r| r.replace('_', " ")))
        .filter(|s| !s.is_empty())
}

/// Fold a child facet into its parent record.
///
/// Returns false when the parent already holds a different specific
/// category; the facet then stays a record of its own.
fn fold_into(parent: &mut DeviceRecord, child: &DeviceRecord) -> bool {
    if let Some(category) = child.category.filter(|c| *c != Category::Other) {
        match parent.category {
            Some(held) if held == category => {}
            Some(held) if !held.is_generic() => return false,
            _ => parent.category = Some(category),
        }
    }
    parent.fill_missing_from(child);
    true
}

/// Parser over one captured snapshot
#[derive(Debug, Clone)]
pub struct UdevadmParser {
    udevadm: String,
    lsblk: String,
    list_partitions: bool,
}

impl UdevadmParser {
    pub fn new(udevadm: impl Into<String>, lsblk: impl Into<String>, list_partitions: bool) -> Self {
        Self {
            udevadm: udevadm.into(),
            lsblk: lsblk.into(),
            list_partitions,
        }
    }

    /// Build a parser straight from captured bytes, decoding leniently.
    pub fn from_bytes(udevadm: &[u8], lsblk: &[u8], list_partitions: bool) -> Self {
        Self::new(udev::decode_lenient(udevadm), udev::decode_lenient(lsblk), list_partitions)
    }

    /// Parse the snapshot. Pure: calling it twice gives the same records.
    pub fn parse(&self) -> Vec<DeviceRecord> {
        let blocks = udev::parse_blocks(&self.udevadm);
        let partitions: Vec<PartitionEntry> = if self.list_partitions {
            lsblk::partitions(&lsblk::parse_lsblk(&self.lsblk))
        } else {
            Vec::new()
        };
        let classifier = Classifier::new(
            self.list_partitions,
            partitions.iter().map(|p| p.entry.kname.clone()).collect(),
        );

        let mut records: Vec<DeviceRecord> = Vec::new();
        let mut by_path: HashMap<String, usize> = HashMap::new();

        for block in &blocks {
            let Some(path) = block.devpath() else {
                continue;
            };
            if let Some(&index) = by_path.get(path) {
                let duplicate = build_record(block, path);
                records[index].fill_missing_from(&duplicate);
                continue;
            }

            let disposition = disposition(block);
            if disposition == Disposition::Skip {
                continue;
            }
            let mut record = build_record(block, path);
            record.category = classifier.classify(block, &record);

            if disposition == Disposition::Fold {
                if let Some(index) = nearest_ancestor(&by_path, path) {
                    if fold_into(&mut records[index], &record) {
                        debug!("Folding {} into {}", path, records[index].path);
                        continue;
                    }
                    debug!("{} stays separate from {}", path, records[index].path);
                    record.inherit_identity(&records[index]);
                }
            }
            by_path.insert(path.to_string(), records.len());
            records.push(record);
        }

        if partitions.is_empty() {
            return records;
        }
        self.place_partitions(records, &blocks, &classifier, partitions)
    }

    fn place_partitions(
        &self,
        records: Vec<DeviceRecord>,
        blocks: &[UdevBlock],
        classifier: &Classifier,
        partitions: Vec<PartitionEntry>,
    ) -> Vec<DeviceRecord> {
        let by_kname: HashMap<&str, &UdevBlock> = blocks
            .iter()
            .filter_map(|b| b.property("DEVNAME").and_then(|n| n.strip_prefix(paths::DEV_PREFIX)).map(|k| (k, b)))
            .collect();

        let mut seen: HashSet<String> = records.iter().map(|r| r.path.clone()).collect();
        let mut owned: HashMap<String, Vec<DeviceRecord>> = HashMap::new();
        let mut orphans: Vec<DeviceRecord> = Vec::new();

        for part in partitions {
            let kname = part.entry.kname.as_str();
            let block = by_kname.get(kname).copied().or_else(|| {
                blocks
                    .iter()
                    .find(|b| b.devpath().is_some_and(|p| p.ends_with(&format!("/{}", kname))))
            });
            let record = match block.and_then(|b| b.devpath().map(|p| (b, p))) {
                Some((b, path)) => {
                    let mut record = build_record(b, path);
                    record.category = match classifier.classify(b, &record) {
                        Some(category) if category != Category::Other => Some(category),
                        _ => Some(Category::Partition),
                    };
                    record
                }
                None => {
                    let mut record = DeviceRecord::new(format!("{}{}", paths::DEV_PREFIX, kname));
                    record.name = Some(kname.to_string());
                    record.category = Some(Category::Partition);
                    record
                }
            };
            if !seen.insert(record.path.clone()) {
                continue;
            }
            debug!(
                "Partition {} ({}) mounted at {}",
                kname,
                record.path,
                part.entry.mountpoint.as_deref().unwrap_or("nothing")
            );
            match part.owner {
                Some(owner) => owned.entry(owner).or_default().push(record),
                None => orphans.push(record),
            }
        }

        let mut out = Vec::with_capacity(records.len() + owned.len() + orphans.len());
        for record in records {
            let children = record.name.as_deref().and_then(|name| owned.remove(name));
            out.push(record);
            if let Some(children) = children {
                out.extend(children);
            }
        }
        // Partitions of disks the export did not list
        let mut leftover: Vec<(String, Vec<DeviceRecord>)> = owned.into_iter().collect();
        leftover.sort_by(|a, b| a.0.cmp(&b.0));
        out.extend(leftover.into_iter().flat_map(|(_, parts)| parts));
        out.extend(orphans);
        out
    }

    /// Push every record into `sink`, in discovery order.
    pub fn run<S: DeviceSink + ?Sized>(&self, sink: &mut S) -> usize {
        let records = self.parse();
        let count = records.len();
        for record in &records {
            sink.add_device(record);
        }
        debug!("Parsed {} devices", count);
        count
    }
}

fn nearest_ancestor(by_path: &HashMap<String, usize>, path: &str) -> Option<usize> {
    let mut current = path;
    while let Some((parent, _)) = current.rsplit_once('/') {
        if parent.is_empty() {
            break;
        }
        if let Some(&index) = by_path.get(parent) {
            return Some(index);
        }
        current = parent;
    }
    None
}
