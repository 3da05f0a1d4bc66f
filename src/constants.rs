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

//! Constants and defaults for udev-resource
//!
//! Default command lines, udev property names and the sysfs markers the
//! classifier relies on.

/// Default external commands
pub mod commands {
    /// Exports the whole udev database as blank-line separated blocks
    pub const UDEVADM_EXPORT_DB: &str = "udevadm info --export-db";

    /// Lists block devices as `KNAME="" TYPE="" MOUNTPOINT=""` tuples
    pub const LSBLK_PARTITIONS: &str = "lsblk -i -n -P -o KNAME,TYPE,MOUNTPOINT";
}

/// Markers found in udev device paths and symlinks
pub mod paths {
    /// Prefix of device nodes in `DEVNAME`
    pub const DEV_PREFIX: &str = "/dev/";

    /// Devices without a physical parent live below this path
    pub const VIRTUAL_DEVICES: &str = "/devices/virtual/";

    /// Symlink directory carrying filesystem UUIDs
    pub const BY_UUID: &str = "disk/by-uuid/";
}

/// lsblk TYPE values
pub mod lsblk {
    pub const TYPE_PARTITION: &str = "part";
}

/// Classification tables
pub mod classify {
    /// Network drivers that only ever bind to cellular modems
    pub const WWAN_DRIVERS: &[&str] = &["cdc_mbim", "qmi_wwan", "mhi_net", "mhi_wwan_mbim"];

    /// Generic NCM driver, a modem only when bound to an MBIM interface
    pub const NCM_DRIVER: &str = "cdc_ncm";

    /// `ID_USB_INTERFACES` entry of a Communications/MBIM interface
    pub const MBIM_INTERFACE: &str = ":020e00:";

    /// sysfs link present on every 802.11 interface
    pub const PHY80211: &str = "phy80211";

    /// `MMC_TYPE` values of removable cards
    pub const MMC_CARD_TYPES: &[&str] = &["SD", "MMC"];

    /// Models of USB mass storage devices that are really card readers
    pub const CARD_READER_PATTERN: &str = r"(?i)SD|MMC|CF|MS(?:[^a]|$)|SM|xD|Card";

    /// `ID_DRIVE_FLASH_*` suffixes reported for card reader slots
    pub const FLASH_READER_SLOTS: &[&str] = &["SD", "MS", "CF", "SM", "XD", "SDHC", "MMC"];

    /// Key codes Q through P: a keyboard has the whole top letter row
    pub const KEY_Q: usize = 16;
    pub const KEY_P: usize = 25;

    /// USB interface class triple for Bluetooth radio controllers
    pub const USB_BLUETOOTH_INTERFACE: &str = "e0/1/1";
}

/// PCI class codes (base class << 8 | subclass)
pub mod pci_class {
    pub const NETWORK: u32 = 0x02;
    pub const NETWORK_WIRELESS: u32 = 0x0280;
    pub const DISPLAY: u32 = 0x03;
    pub const MULTIMEDIA_VIDEO: u32 = 0x0400;
    pub const MULTIMEDIA_AUDIO: u32 = 0x0401;
    pub const MULTIMEDIA_HD_AUDIO: u32 = 0x0403;
    pub const BRIDGE_CARDBUS: u32 = 0x0607;
    pub const SYSTEM_SDHCI: u32 = 0x0805;
    pub const INPUT_KEYBOARD: u32 = 0x0900;
    pub const INPUT_MOUSE: u32 = 0x0902;
    pub const SERIAL_USB: u32 = 0x0c03;
    pub const SERIAL_INFINIBAND: u32 = 0x0c06;
    pub const WIRELESS_BLUETOOTH: u32 = 0x0d11;
}
