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

//! Device records
//!
//! A `DeviceRecord` is the normalized view of one udev device (or one lsblk
//! partition). Every field except `path` is optional.

use serde::Serialize;

use crate::category::Category;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subproduct_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subvendor_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symlink_uuid: Option<String>,
}

type Accessor = fn(&DeviceRecord) -> Option<String>;

fn hex_id(id: Option<u16>) -> Option<String> {
    id.map(|v| format!("{:#06x}", v))
}

/// Every attribute in dump order, with its accessor.
pub const ATTRIBUTES: [(&str, Accessor); 16] = [
    ("path", |d| Some(d.path.clone())),
    ("name", |d| d.name.clone()),
    ("bus", |d| d.bus.clone()),
    ("category", |d| d.category.map(|c| c.to_string())),
    ("driver", |d| d.driver.clone()),
    ("product_id", |d| hex_id(d.product_id)),
    ("vendor_id", |d| hex_id(d.vendor_id)),
    ("subproduct_id", |d| hex_id(d.subproduct_id)),
    ("subvendor_id", |d| hex_id(d.subvendor_id)),
    ("product", |d| d.product.clone()),
    ("vendor", |d| d.vendor.clone()),
    ("interface", |d| d.interface.clone()),
    ("mac", |d| d.mac.clone()),
    ("product_slug", |d| d.product_slug.clone()),
    ("vendor_slug", |d| d.vendor_slug.clone()),
    ("symlink_uuid", |d| d.symlink_uuid.clone()),
];

impl DeviceRecord {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Present attributes as `(name, value)` pairs in dump order
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        ATTRIBUTES
            .iter()
            .filter_map(|(name, get)| get(self).map(|value| (*name, value)))
            .collect()
    }

    /// Set vendor and product ids together; a half-known pair is dropped.
    pub fn set_ids(&mut self, ids: Option<(u16, u16)>) {
        if let Some((vendor, product)) = ids {
            self.vendor_id = Some(vendor);
            self.product_id = Some(product);
        }
    }

    pub fn set_sub_ids(&mut self, ids: Option<(u16, u16)>) {
        if let Some((vendor, product)) = ids {
            self.subvendor_id = Some(vendor);
            self.subproduct_id = Some(product);
        }
    }

    /// Recompute slugs from the current vendor/product strings
    pub fn refresh_slugs(&mut self) {
        self.vendor_slug = self.vendor.as_deref().map(slugify);
        self.product_slug = self.product.as_deref().map(slugify);
    }

    /// True when the device carries any vendor/product identity at all
    pub fn has_identity(&self) -> bool {
        self.vendor.is_some() || self.product.is_some() || self.vendor_id.is_some() || self.product_id.is_some()
    }

    /// Label used by category listings: `"{vendor} {product} [vvvv:pppp]"`.
    ///
    /// Missing strings render as `None` and missing ids as `0000`, which is
    /// what the short listing strips back out.
    pub fn label(&self) -> String {
        let vendor = self.vendor.as_deref().unwrap_or("None");
        let product = self
            .product
            .as_deref()
            .or(self.interface.as_deref())
            .unwrap_or("None");
        format!(
            "{} {} [{:04x}:{:04x}]",
            vendor,
            product,
            self.vendor_id.unwrap_or(0),
            self.product_id.unwrap_or(0)
        )
    }

    /// Fill every field that is still unknown from `other`.
    ///
    /// Id pairs are taken as a unit so a record never ends up with a vendor
    /// id from one device and a product id from another.
    pub fn fill_missing_from(&mut self, other: &DeviceRecord) {
        fill(&mut self.name, &other.name);
        fill(&mut self.interface, &other.interface);
        fill(&mut self.mac, &other.mac);
        fill(&mut self.symlink_uuid, &other.symlink_uuid);
        self.inherit_identity(other);
    }

    /// Take bus, driver, vendor/product strings and ids from the physical
    /// device a facet belongs to, where this record has none.
    pub fn inherit_identity(&mut self, parent: &DeviceRecord) {
        fill(&mut self.bus, &parent.bus);
        fill(&mut self.driver, &parent.driver);
        fill(&mut self.product, &parent.product);
        fill(&mut self.vendor, &parent.vendor);
        if self.vendor_id.is_none() && self.product_id.is_none() {
            self.vendor_id = parent.vendor_id;
            self.product_id = parent.product_id;
        }
        if self.subvendor_id.is_none() && self.subproduct_id.is_none() {
            self.subvendor_id = parent.subvendor_id;
            self.subproduct_id = parent.subproduct_id;
        }
        self.refresh_slugs();
    }
}

fn fill(slot: &mut Option<String>, value: &Option<String>) {
    if slot.is_none() {
        slot.clone_from(value);
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with an underscore
pub fn slugify(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
