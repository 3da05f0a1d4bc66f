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

//! Identity decoding helpers
//!
//! Vendor/product ids show up in several shapes in the udev database:
//! plain `ID_VENDOR_ID` hex, `PCI_ID` pairs, the USB `PRODUCT` triple and
//! the various modalias strings. These helpers turn each shape into a
//! `(vendor, product)` pair of u16.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PCI_MODALIAS: Regex = Regex::new(
        r"^pci:v(?P<vendor>[0-9A-Fa-f]{8})d(?P<product>[0-9A-Fa-f]{8})sv(?P<subvendor>[0-9A-Fa-f]{8})sd(?P<subproduct>[0-9A-Fa-f]{8})"
    )
    .expect("valid pci modalias regex");
    static ref USB_MODALIAS: Regex =
        Regex::new(r"^usb:v(?P<vendor>[0-9A-Fa-f]{4})p(?P<product>[0-9A-Fa-f]{4})")
            .expect("valid usb modalias regex");
    static ref INPUT_MODALIAS: Regex = Regex::new(
        r"^input:b(?P<bus>[0-9A-Fa-f]{4})v(?P<vendor>[0-9A-Fa-f]{4})p(?P<product>[0-9A-Fa-f]{4})"
    )
    .expect("valid input modalias regex");
    static ref PNP_MODALIAS: Regex =
        Regex::new(r"^acpi:[A-Z]{3}[0-9A-Fa-f]{4}:").expect("valid pnp modalias regex");
}

/// Parse a hex string into a 16-bit id; wider values are rejected.
pub fn parse_hex_u16(s: &str) -> Option<u16> {
    let s = s.trim();
    let s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    if s.is_empty() {
        return None;
    }
    u32::from_str_radix(s, 16).ok().and_then(|v| u16::try_from(v).ok())
}

fn pair(vendor: &str, product: &str) -> Option<(u16, u16)> {
    Some((parse_hex_u16(vendor)?, parse_hex_u16(product)?))
}

/// `8086:1234` as found in `PCI_ID` and `PCI_SUBSYS_ID`
pub fn parse_colon_pair(s: &str) -> Option<(u16, u16)> {
    let (vendor, product) = s.split_once(':')?;
    pair(vendor, product)
}

/// The `PRODUCT` property, unpadded hex: `vendor/product/bcdDevice` on USB
/// devices, `bus/vendor/product/version` on input devices
pub fn parse_product(s: &str) -> Option<(u16, u16)> {
    let parts: Vec<&str> = s.split('/').collect();
    match parts.as_slice() {
        [_, vendor, product, _] => pair(vendor, product),
        [vendor, product, ..] => pair(vendor, product),
        _ => None,
    }
}

/// Ids and sub ids carried by a modalias
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModaliasIds {
    pub ids: Option<(u16, u16)>,
    pub sub_ids: Option<(u16, u16)>,
}

pub fn parse_modalias(modalias: &str) -> ModaliasIds {
    if let Some(caps) = PCI_MODALIAS.captures(modalias) {
        return ModaliasIds {
            ids: pair(&caps["vendor"][4..], &caps["product"][4..]),
            sub_ids: pair(&caps["subvendor"][4..], &caps["subproduct"][4..]),
        };
    }
    if let Some(caps) = USB_MODALIAS.captures(modalias) {
        return ModaliasIds {
            ids: pair(&caps["vendor"], &caps["product"]),
            sub_ids: None,
        };
    }
    if let Some(caps) = INPUT_MODALIAS.captures(modalias) {
        return ModaliasIds {
            ids: pair(&caps["vendor"], &caps["product"]),
            sub_ids: None,
        };
    }
    ModaliasIds::default()
}

/// Bus name implied by a modalias: `pnp` for ACPI PNP ids, else the prefix
pub fn modalias_bus(modalias: &str) -> Option<String> {
    if PNP_MODALIAS.is_match(modalias) {
        return Some("pnp".to_string());
    }
    let (prefix, _) = modalias.split_once(':')?;
    if prefix.is_empty() {
        None
    } else {
        Some(prefix.to_string())
    }
}

/// Decode udev `\xNN` escapes used by the `*_ENC` properties.
///
/// Decoded bytes that do not form valid UTF-8 are dropped, same as the
/// outer capture decoding.
pub fn decode_udev_escapes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 4 <= bytes.len() && bytes[i + 1] == b'x' {
            if let Some(b) = std::str::from_utf8(&bytes[i + 2..i + 4])
                .ok()
                .and_then(|h| u8::from_str_radix(h, 16).ok())
            {
                out.push(b);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    crate::udev::decode_lenient(&out)
}

/// Rebuild a MAC address from a predictable `enx<12 hex>` interface name
pub fn mac_from_net_name(name: &str) -> Option<String> {
    let hex = name.strip_prefix("enx")?;
    if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let octets: Vec<&str> = (0..6).map(|i| &hex[i * 2..i * 2 + 2]).collect();
    Some(octets.join(":").to_ascii_lowercase())
}
