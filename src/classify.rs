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

//! Category classification
//!
//! Rules are tried most specific first and the first match wins. Card
//! readers are recognized before the generic USB rule and capture devices
//! before plain video outputs.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::category::Category;
use crate::constants::{classify as rules, pci_class};
use crate::device::DeviceRecord;
use crate::udev::UdevBlock;

lazy_static! {
    static ref CARD_READER: Regex = Regex::new(rules::CARD_READER_PATTERN).expect("valid card reader regex");
}

/// Bits per word of the kernel's capability bitmasks
const BITS_PER_WORD: usize = 64;

#[derive(Debug, Clone, Default)]
pub struct Classifier {
    list_partitions: bool,
    partitions: HashSet<String>,
}

impl Classifier {
    /// `partitions` holds kernel names lsblk reported as partitions; they are
    /// only consulted when `list_partitions` is set.
    pub fn new(list_partitions: bool, partitions: HashSet<String>) -> Self {
        Self {
            list_partitions,
            partitions,
        }
    }

    pub fn classify(&self, block: &UdevBlock, record: &DeviceRecord) -> Option<Category> {
        if let Some(category) = subsystem_category(block, record) {
            debug!("{}: {} by subsystem rules", record.path, category);
            return Some(category);
        }
        if self.list_partitions && block.kernel_name().is_some_and(|k| self.partitions.contains(k)) {
            return Some(Category::Partition);
        }
        record.has_identity().then_some(Category::Other)
    }
}

fn subsystem_category(block: &UdevBlock, record: &DeviceRecord) -> Option<Category> {
    let subsystem = block.subsystem().unwrap_or_default();
    // Software watchdogs are still watchdogs
    if subsystem == "watchdog" {
        return Some(Category::Watchdog);
    }
    if block.is_virtual() {
        return None;
    }
    match subsystem {
        "net" => Some(net_category(block, record)),
        "bluetooth" => Some(Category::Bluetooth),
        "infiniband" | "infiniband_verbs" => Some(Category::Infiniband),
        "video4linux" => Some(v4l_category(block, record)),
        "vchiq" => Some(Category::Mmal),
        "input" => input_category(block),
        "sound" => is_sound_card(block).then_some(Category::Audio),
        "mmc_host" => Some(Category::Cardreader),
        "mmc" => block
            .property("MMC_TYPE")
            .is_some_and(|t| rules::MMC_CARD_TYPES.contains(&t))
            .then_some(Category::Cardreader),
        "block" => block_category(block),
        "pci" => pci_category(block),
        "usb" => usb_category(block),
        _ => None,
    }
}

fn net_category(block: &UdevBlock, record: &DeviceRecord) -> Category {
    match block.devtype() {
        Some("wlan") => return Category::Wireless,
        Some("wwan") => return Category::Wwan,
        Some("bluetooth") => return Category::Bluetooth,
        _ => {}
    }
    if has_phy80211(block) {
        return Category::Wireless;
    }
    let driver = record
        .driver
        .as_deref()
        .or_else(|| block.property("ID_NET_DRIVER"))
        .unwrap_or_default();
    if rules::WWAN_DRIVERS.contains(&driver) || (driver == rules::NCM_DRIVER && is_mbim(block)) {
        return Category::Wwan;
    }
    // Older udev releases do not set DEVTYPE on wireless interfaces
    match block.property("INTERFACE") {
        Some(name) if name.starts_with("wl") => Category::Wireless,
        Some(name) if name.starts_with("ww") => Category::Wwan,
        _ => Category::Network,
    }
}

fn has_phy80211(block: &UdevBlock) -> bool {
    block.attributes.keys().any(|key| {
        key.strip_prefix(rules::PHY80211)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn is_mbim(block: &UdevBlock) -> bool {
    block
        .property("ID_USB_INTERFACES")
        .is_some_and(|ifs| ifs.to_ascii_lowercase().contains(rules::MBIM_INTERFACE))
}

fn v4l_category(block: &UdevBlock, record: &DeviceRecord) -> Category {
    let product = block
        .property("ID_V4L_PRODUCT")
        .or(record.product.as_deref())
        .unwrap_or_default();
    if product.to_ascii_lowercase().contains("mmal") {
        return Category::Mmal;
    }
    match block.property("ID_V4L_CAPABILITIES") {
        Some(caps) if caps.contains(":capture:") => Category::Capture,
        _ => Category::Video,
    }
}

fn input_category(block: &UdevBlock) -> Option<Category> {
    if block.flag("ID_INPUT_ACCELEROMETER") {
        Some(Category::Accelerometer)
    } else if block.flag("ID_INPUT_TOUCHSCREEN") {
        Some(Category::Touchscreen)
    } else if block.flag("ID_INPUT_TOUCHPAD") {
        Some(Category::Touchpad)
    } else if block.flag("ID_INPUT_MOUSE") {
        Some(Category::Mouse)
    } else if block.flag("ID_INPUT_KEYBOARD") || (block.flag("ID_INPUT_KEY") && has_letter_row(block)) {
        Some(Category::Keyboard)
    } else {
        None
    }
}

/// Whether the `KEY` capability bitmask covers Q through P
fn has_letter_row(block: &UdevBlock) -> bool {
    let Some(mask) = block.property("KEY") else {
        return false;
    };
    (rules::KEY_Q..=rules::KEY_P).all(|bit| bitmask_has(mask, bit))
}

/// Test a bit in a kernel bitmask: space separated hex words, most
/// significant word first.
pub fn bitmask_has(mask: &str, bit: usize) -> bool {
    let words: Vec<&str> = mask.split_whitespace().collect();
    let index = bit / BITS_PER_WORD;
    if index >= words.len() {
        return false;
    }
    u64::from_str_radix(words[words.len() - 1 - index], 16)
        .map(|word| word & (1u64 << (bit % BITS_PER_WORD)) != 0)
        .unwrap_or(false)
}

fn is_sound_card(block: &UdevBlock) -> bool {
    block.leaf().is_some_and(|leaf| leaf.starts_with("card"))
}

fn block_category(block: &UdevBlock) -> Option<Category> {
    if block.devtype() != Some("disk") {
        return None;
    }
    if block.flag("ID_CDROM") || block.property("ID_TYPE") == Some("cd") {
        return Some(Category::Cdrom);
    }
    if is_card_reader(block) {
        return Some(Category::Cardreader);
    }
    Some(Category::Disk)
}

fn is_card_reader(block: &UdevBlock) -> bool {
    let flash_slot = rules::FLASH_READER_SLOTS
        .iter()
        .any(|slot| block.flag(&format!("ID_DRIVE_FLASH_{}", slot)));
    if flash_slot {
        return true;
    }
    let usb_storage = block.property("ID_BUS") == Some("usb")
        && block.property("ID_USB_DRIVER") == Some("usb-storage");
    usb_storage && block.property("ID_MODEL").is_some_and(|model| CARD_READER.is_match(model))
}

/// Decode `PCI_CLASS` into `base << 8 | subclass`, dropping the prog-if
/// byte when present.
pub fn pci_class_code(raw: &str) -> Option<u32> {
    let value = u32::from_str_radix(raw.trim(), 16).ok()?;
    Some(if raw.trim().len() > 4 { value >> 8 } else { value })
}

fn pci_category(block: &UdevBlock) -> Option<Category> {
    let class = pci_class_code(block.property("PCI_CLASS")?)?;
    let category = match class {
        pci_class::NETWORK_WIRELESS => Category::Wireless,
        pci_class::MULTIMEDIA_VIDEO => Category::Capture,
        pci_class::MULTIMEDIA_AUDIO | pci_class::MULTIMEDIA_HD_AUDIO => Category::Audio,
        pci_class::SYSTEM_SDHCI | pci_class::BRIDGE_CARDBUS => Category::Cardreader,
        pci_class::SERIAL_USB => Category::Usb,
        pci_class::SERIAL_INFINIBAND => Category::Infiniband,
        pci_class::WIRELESS_BLUETOOTH => Category::Bluetooth,
        pci_class::INPUT_KEYBOARD => Category::Keyboard,
        pci_class::INPUT_MOUSE => Category::Mouse,
        _ => match class >> 8 {
            pci_class::NETWORK => Category::Network,
            pci_class::DISPLAY => Category::Video,
            _ => return None,
        },
    };
    Some(category)
}

fn usb_category(block: &UdevBlock) -> Option<Category> {
    match block.devtype() {
        Some("usb_device") => {
            let bluetooth = block
                .property("ID_USB_INTERFACES")
                .is_some_and(|ifs| ifs.to_ascii_lowercase().contains(":e00101:"));
            Some(if bluetooth { Category::Bluetooth } else { Category::Usb })
        }
        Some("usb_interface") => {
            (block.property("INTERFACE") == Some(rules::USB_BLUETOOTH_INTERFACE)).then_some(Category::Bluetooth)
        }
        _ => None,
    }
}
