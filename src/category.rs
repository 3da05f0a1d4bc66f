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

//! Hardware categories
//!
//! The closed set of labels a device can be classified into. The variant
//! order is the order used by every listing.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
#[value(rename_all = "UPPER")]
pub enum Category {
    Accelerometer,
    Audio,
    Bluetooth,
    Capture,
    Cardreader,
    Cdrom,
    Disk,
    Keyboard,
    Infiniband,
    Mmal,
    Mouse,
    Network,
    Other,
    Partition,
    Touchpad,
    Touchscreen,
    Usb,
    Video,
    Watchdog,
    Wireless,
    Wwan,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Category::Accelerometer,
        Category::Audio,
        Category::Bluetooth,
        Category::Capture,
        Category::Cardreader,
        Category::Cdrom,
        Category::Disk,
        Category::Keyboard,
        Category::Infiniband,
        Category::Mmal,
        Category::Mouse,
        Category::Network,
        Category::Other,
        Category::Partition,
        Category::Touchpad,
        Category::Touchscreen,
        Category::Usb,
        Category::Video,
        Category::Watchdog,
        Category::Wireless,
        Category::Wwan,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Accelerometer => "ACCELEROMETER",
            Category::Audio => "AUDIO",
            Category::Bluetooth => "BLUETOOTH",
            Category::Capture => "CAPTURE",
            Category::Cardreader => "CARDREADER",
            Category::Cdrom => "CDROM",
            Category::Disk => "DISK",
            Category::Keyboard => "KEYBOARD",
            Category::Infiniband => "INFINIBAND",
            Category::Mmal => "MMAL",
            Category::Mouse => "MOUSE",
            Category::Network => "NETWORK",
            Category::Other => "OTHER",
            Category::Partition => "PARTITION",
            Category::Touchpad => "TOUCHPAD",
            Category::Touchscreen => "TOUCHSCREEN",
            Category::Usb => "USB",
            Category::Video => "VIDEO",
            Category::Watchdog => "WATCHDOG",
            Category::Wireless => "WIRELESS",
            Category::Wwan => "WWAN",
        }
    }

    /// Categories that a more specific child device may replace when folded
    /// into its parent.
    pub fn is_generic(self) -> bool {
        matches!(self, Category::Usb | Category::Other)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_sorted_in_listing_order() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert_eq!(Category::ALL.len(), 21);
    }

    #[test]
    fn test_round_trip_through_names() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str(), false), Ok(category));
        }
    }

    #[test]
    fn test_unknown_and_lowercase_names_are_rejected() {
        assert!(Category::from_str("FLOPPY", false).is_err());
        assert!(Category::from_str("usb", false).is_err());
    }

    #[test]
    fn test_clap_value_names_match_display() {
        for category in Category::ALL {
            let value = category.to_possible_value().unwrap();
            assert_eq!(value.get_name(), category.to_string());
        }
    }

    #[test]
    fn test_serializes_as_upper_case() {
        let json = serde_json::to_string(&Category::Cardreader).unwrap();
        assert_eq!(json, "\"CARDREADER\"");
    }
}
