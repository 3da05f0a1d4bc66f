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

//! Report sinks
//!
//! The parser pushes records one at a time into a `DeviceSink`. Each report
//! mode is one sink: a full attribute dump, a per-category listing, a
//! filtered dump and a JSON dump.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use ur_error::Result;

use crate::category::Category;
use crate::device::DeviceRecord;

/// Consumer of parsed device records
pub trait DeviceSink {
    fn add_device(&mut self, device: &DeviceRecord);
}

impl<F> DeviceSink for F
where
    F: FnMut(&DeviceRecord),
{
    fn add_device(&mut self, device: &DeviceRecord) {
        self(device)
    }
}

/// Result of displaying a report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Displayed,
    /// Nothing matched the requested categories
    NoData,
}

/// Write every present attribute as `name: value`, then a blank line
pub fn write_attributes<W: Write>(out: &mut W, device: &DeviceRecord) -> io::Result<()> {
    for (name, value) in device.attributes() {
        writeln!(out, "{}: {}", name, value)?;
    }
    writeln!(out)
}

// ============================================================================
// Full dump
// ============================================================================

/// Dumps each record as soon as it arrives.
pub struct FullDump<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> FullDump<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Flush the output and report the first write failure, if any
    pub fn finish(mut self) -> Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err.into());
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> DeviceSink for FullDump<W> {
    fn add_device(&mut self, device: &DeviceRecord) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = write_attributes(&mut self.out, device) {
            self.error = Some(err);
        }
    }
}

// ============================================================================
// Category filtering
// ============================================================================

fn accepts(categories: &BTreeSet<Category>, device: &DeviceRecord) -> bool {
    device.category.is_some_and(|c| categories.contains(&c))
}

/// Collects one label per accepted device, grouped by category.
#[derive(Debug, Clone, Default)]
pub struct CategorizedLister {
    labels: BTreeMap<Category, Vec<String>>,
    accepted: usize,
}

impl CategorizedLister {
    pub fn new<I: IntoIterator<Item = Category>>(categories: I) -> Self {
        Self {
            labels: categories.into_iter().map(|c| (c, Vec::new())).collect(),
            accepted: 0,
        }
    }

    pub fn accepted(&self) -> usize {
        self.accepted
    }

    pub fn labels(&self, category: Category) -> &[String] {
        self.labels.get(&category).map(Vec::as_slice).unwrap_or_default()
    }

    /// Print the listing.
    ///
    /// Short form prints bare labels with the `None` placeholders removed;
    /// long form prints a `CATEGORY (count):` header per requested category.
    pub fn display<W: Write>(&self, out: &mut W, short: bool) -> Result<Outcome> {
        if self.accepted == 0 {
            return Ok(Outcome::NoData);
        }
        for (category, labels) in &self.labels {
            if short {
                for label in labels {
                    writeln!(out, "{}", label.replace("None ", "").replace(" None", ""))?;
                }
            } else {
                writeln!(out, "{} ({}):", category, labels.len())?;
                for label in labels {
                    writeln!(out, " - {}", label)?;
                }
                writeln!(out)?;
            }
        }
        out.flush()?;
        Ok(Outcome::Displayed)
    }
}

impl DeviceSink for CategorizedLister {
    fn add_device(&mut self, device: &DeviceRecord) {
        let Some(category) = device.category else {
            return;
        };
        if let Some(labels) = self.labels.get_mut(&category) {
            labels.push(device.label());
            self.accepted += 1;
        }
    }
}

/// Keeps accepted records and dumps them in arrival order.
#[derive(Debug, Clone, Default)]
pub struct FilteredDump {
    categories: BTreeSet<Category>,
    devices: Vec<DeviceRecord>,
}

impl FilteredDump {
    pub fn new<I: IntoIterator<Item = Category>>(categories: I) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            devices: Vec::new(),
        }
    }

    pub fn devices(&self) -> &[DeviceRecord] {
        &self.devices
    }

    pub fn display<W: Write>(&self, out: &mut W) -> Result<Outcome> {
        if self.devices.is_empty() {
            return Ok(Outcome::NoData);
        }
        for device in &self.devices {
            write_attributes(out, device)?;
        }
        out.flush()?;
        Ok(Outcome::Displayed)
    }
}

impl DeviceSink for FilteredDump {
    fn add_device(&mut self, device: &DeviceRecord) {
        if accepts(&self.categories, device) {
            self.devices.push(device.clone());
        }
    }
}

// ============================================================================
// JSON dump
// ============================================================================

/// Collects every record and writes them as one JSON array.
#[derive(Debug, Clone, Default)]
pub struct JsonDump {
    devices: Vec<DeviceRecord>,
}

impl JsonDump {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display<W: Write>(&self, out: &mut W) -> Result<Outcome> {
        serde_json::to_writer_pretty(&mut *out, &self.devices)?;
        writeln!(out)?;
        out.flush()?;
        Ok(Outcome::Displayed)
    }
}

impl DeviceSink for JsonDump {
    fn add_device(&mut self, device: &DeviceRecord) {
        self.devices.push(device.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{acme_widget, record};

    fn output<F: FnOnce(&mut Vec<u8>)>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_full_dump() {
        let mut dump = FullDump::new(Vec::new());
        dump.add_device(&acme_widget());
        dump.add_device(&record("/devices/platform/pcspkr", None));
        let text = String::from_utf8(dump.finish().unwrap()).unwrap();
        assert!(text.contains("vendor: Acme\n"));
        assert!(text.contains("product: Widget\n"));
        assert!(text.contains("vendor_id: 0x1234\n"));
        assert!(text.contains("category: USB\n"));
        assert!(text.ends_with("path: /devices/platform/pcspkr\n\n"));
        assert!(!text.contains("mac:"));
    }

    #[test]
    fn test_full_dump_reports_write_errors() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut dump = FullDump::new(Broken);
        dump.add_device(&acme_widget());
        dump.add_device(&acme_widget());
        assert!(dump.finish().is_err());
    }

    #[test]
    fn test_lister_labels() {
        let mut lister = CategorizedLister::new([Category::Usb]);
        lister.add_device(&acme_widget());
        lister.add_device(&record("/devices/platform/x", Some(Category::Disk)));
        assert_eq!(lister.accepted(), 1);
        assert_eq!(lister.labels(Category::Usb), ["Acme Widget [1234:5678]"]);
        assert!(lister.labels(Category::Disk).is_empty());
    }

    #[test]
    fn test_lister_long_form_in_category_order() {
        let mut lister = CategorizedLister::new([Category::Usb, Category::Audio, Category::Watchdog]);
        lister.add_device(&acme_widget());
        lister.add_device(&record("/devices/pci0000:00/0000:00:1f.3/sound/card0", Some(Category::Audio)));
        let text = output(|buf| {
            assert_eq!(lister.display(buf, false).unwrap(), Outcome::Displayed);
        });
        assert_eq!(
            text,
            "AUDIO (1):\n - None None [0000:0000]\n\nUSB (1):\n - Acme Widget [1234:5678]\n\nWATCHDOG (0):\n\n"
        );
    }

    #[test]
    fn test_lister_short_form_strips_placeholders() {
        let mut lister = CategorizedLister::new([Category::Watchdog]);
        lister.add_device(&record("/devices/virtual/watchdog/watchdog0", Some(Category::Watchdog)));
        let text = output(|buf| {
            lister.display(buf, true).unwrap();
        });
        assert_eq!(text, "[0000:0000]\n");
    }

    #[test]
    fn test_lister_without_categories_has_no_data() {
        let mut lister = CategorizedLister::new(Vec::<Category>::new());
        lister.add_device(&acme_widget());
        let text = output(|buf| {
            assert_eq!(lister.display(buf, false).unwrap(), Outcome::NoData);
        });
        assert!(text.is_empty());
    }

    #[test]
    fn test_unclassified_devices_are_never_listed() {
        let mut lister = CategorizedLister::new(Category::ALL);
        lister.add_device(&record("/devices/platform/pcspkr", None));
        assert_eq!(lister.accepted(), 0);
    }

    #[test]
    fn test_filtered_dump() {
        let mut filtered = FilteredDump::new([Category::Usb]);
        filtered.add_device(&record("/devices/platform/x", Some(Category::Disk)));
        filtered.add_device(&acme_widget());
        assert_eq!(filtered.devices().len(), 1);
        let text = output(|buf| {
            assert_eq!(filtered.display(buf).unwrap(), Outcome::Displayed);
        });
        assert!(text.starts_with("path: /devices/pci0000:00/0000:00:14.0/usb1/1-2\n"));
        assert!(!text.contains("DISK"));
    }

    #[test]
    fn test_filtered_dump_no_data() {
        let filtered = FilteredDump::new([Category::Wwan]);
        let text = output(|buf| {
            assert_eq!(filtered.display(buf).unwrap(), Outcome::NoData);
        });
        assert!(text.is_empty());
    }

    #[test]
    fn test_json_dump() {
        let mut json = JsonDump::new();
        json.add_device(&acme_widget());
        let text = output(|buf| {
            json.display(buf).unwrap();
        });
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["vendor"], "Acme");
        assert_eq!(value[0]["product_id"], 0x5678);
    }
}
