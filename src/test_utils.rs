/*
 * Test utilities and fixtures for udev-resource
 *
 * Builders for udev blocks and device records, plus captured export
 * fragments shared by the parser, classifier and report tests.
 */

use crate::category::Category;
use crate::device::DeviceRecord;
use crate::udev::{parse_blocks, UdevBlock};

/// Build a single udev block from its lines
pub fn block(lines: &[&str]) -> UdevBlock {
    parse_blocks(&lines.join("\n"))
        .into_iter()
        .next()
        .unwrap_or_default()
}

/// A bare record with only a path and a category
pub fn record(path: &str, category: Option<Category>) -> DeviceRecord {
    let mut d = DeviceRecord::new(path);
    d.category = category;
    d
}

/// The USB device used throughout the report tests
pub fn acme_widget() -> DeviceRecord {
    let mut d = DeviceRecord::new(fixtures::ACME_WIDGET_PATH);
    d.name = Some("bus/usb/001/004".into());
    d.bus = Some("usb".into());
    d.category = Some(Category::Usb);
    d.driver = Some("usb".into());
    d.vendor = Some("Acme".into());
    d.product = Some("Widget".into());
    d.set_ids(Some((0x1234, 0x5678)));
    d.refresh_slugs();
    d
}

pub mod fixtures {
    pub const ACME_WIDGET_PATH: &str = "/devices/pci0000:00/0000:00:14.0/usb1/1-2";

    pub const ACME_WIDGET: &str = "\
P: /devices/pci0000:00/0000:00:14.0/usb1/1-2
N: bus/usb/001/004
E: DEVPATH=/devices/pci0000:00/0000:00:14.0/usb1/1-2
E: SUBSYSTEM=usb
E: DEVTYPE=usb_device
E: DRIVER=usb
E: PRODUCT=1234/5678/100
E: ID_BUS=usb
E: ID_VENDOR_ID=1234
E: ID_MODEL_ID=5678
E: ID_VENDOR_FROM_DATABASE=Acme
E: ID_MODEL_FROM_DATABASE=Widget
E: ID_USB_INTERFACES=:ff0000:
";

    pub const PCI_ETHERNET: &str = "\
P: /devices/pci0000:00/0000:00:1f.6
E: DEVPATH=/devices/pci0000:00/0000:00:1f.6
E: SUBSYSTEM=pci
E: DRIVER=e1000e
E: PCI_CLASS=20000
E: PCI_ID=8086:15BB
E: PCI_SUBSYS_ID=17AA:225D
E: MODALIAS=pci:v00008086d000015BBsv000017AAsd0000225Dbc02sc00i00
E: ID_VENDOR_FROM_DATABASE=Intel Corporation
E: ID_MODEL_FROM_DATABASE=Ethernet Connection (7) I219-LM

P: /devices/pci0000:00/0000:00:1f.6/net/enp0s31f6
E: DEVPATH=/devices/pci0000:00/0000:00:1f.6/net/enp0s31f6
E: SUBSYSTEM=net
E: INTERFACE=enp0s31f6
E: IFINDEX=2
E: ID_NET_NAME_MAC=enx8c1645aabbcc
E: ID_NET_DRIVER=e1000e
";

    pub const USB_KEYBOARD: &str = "\
P: /devices/pci0000:00/0000:00:14.0/usb1/1-2
N: bus/usb/001/003
E: SUBSYSTEM=usb
E: DEVTYPE=usb_device
E: DRIVER=usb
E: ID_VENDOR_ID=1234
E: ID_MODEL_ID=5678
E: ID_VENDOR=Acme
E: ID_MODEL=Keyboard

P: /devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0
E: SUBSYSTEM=usb
E: DEVTYPE=usb_interface
E: DRIVER=usbhid
E: INTERFACE=3/1/1
E: MODALIAS=usb:v1234p5678d0100dc00dsc00dp00ic03isc01ip01in00

P: /devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0/0003:1234:5678.0001
E: SUBSYSTEM=hid
E: DRIVER=hid-generic
E: HID_NAME=Acme Keyboard

P: /devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0/0003:1234:5678.0001/input/input7
E: SUBSYSTEM=input
E: NAME=\"Acme Keyboard\"
E: ID_INPUT=1
E: ID_INPUT_KEY=1
E: ID_INPUT_KEYBOARD=1
E: KEY=1000000000007 ff9f207ac14057ff febeffdfffefffff fffffffffffffffe

P: /devices/pci0000:00/0000:00:14.0/usb1/1-2/1-2:1.0/0003:1234:5678.0001/input/input7/event5
N: input/event5
E: DEVNAME=/dev/input/event5
E: SUBSYSTEM=input
E: ID_INPUT=1
E: ID_INPUT_KEYBOARD=1
";

    pub const ELAN_TOUCHPAD_PATH: &str = "/devices/pci0000:00/0000:00:15.1/i2c_designware.1/i2c-1/i2c-ELAN0504:01";

    /// I2C touchpad whose HID device exposes both a mouse and a touchpad node
    pub const ELAN_TOUCHPAD: &str = "\
P: /devices/pci0000:00/0000:00:15.1/i2c_designware.1/i2c-1/i2c-ELAN0504:01
E: SUBSYSTEM=i2c
E: DRIVER=i2c_hid_acpi
E: MODALIAS=acpi:ELAN0504:PNP0C50:

P: /devices/pci0000:00/0000:00:15.1/i2c_designware.1/i2c-1/i2c-ELAN0504:01/0018:04F3:3091.0001
E: SUBSYSTEM=hid
E: DRIVER=hid-multitouch
E: HID_NAME=ELAN0504:01 04F3:3091

P: /devices/pci0000:00/0000:00:15.1/i2c_designware.1/i2c-1/i2c-ELAN0504:01/0018:04F3:3091.0001/input/input9
E: SUBSYSTEM=input
E: PRODUCT=18/4f3/3091/100
E: NAME=\"ELAN0504:01 04F3:3091 Mouse\"
E: ID_INPUT=1
E: ID_INPUT_MOUSE=1

P: /devices/pci0000:00/0000:00:15.1/i2c_designware.1/i2c-1/i2c-ELAN0504:01/0018:04F3:3091.0001/input/input9/event7
N: input/event7
E: DEVNAME=/dev/input/event7
E: SUBSYSTEM=input
E: ID_INPUT_MOUSE=1

P: /devices/pci0000:00/0000:00:15.1/i2c_designware.1/i2c-1/i2c-ELAN0504:01/0018:04F3:3091.0001/input/input10
E: SUBSYSTEM=input
E: PRODUCT=18/4f3/3091/100
E: NAME=\"ELAN0504:01 04F3:3091 Touchpad\"
E: ID_INPUT=1
E: ID_INPUT_TOUCHPAD=1
";

    pub const LOGITECH_RECEIVER_PATH: &str = "/devices/pci0000:00/0000:00:14.0/usb1/1-3";

    /// Wireless receiver with a keyboard and a mouse behind separate interfaces
    pub const LOGITECH_RECEIVER: &str = "\
P: /devices/pci0000:00/0000:00:14.0/usb1/1-3
N: bus/usb/001/005
E: SUBSYSTEM=usb
E: DEVTYPE=usb_device
E: DRIVER=usb
E: ID_BUS=usb
E: ID_VENDOR_ID=046d
E: ID_MODEL_ID=c52b
E: ID_VENDOR_FROM_DATABASE=Logitech, Inc.
E: ID_MODEL_FROM_DATABASE=Unifying Receiver
E: ID_USB_INTERFACES=:030101:030102:030000:

P: /devices/pci0000:00/0000:00:14.0/usb1/1-3/1-3:1.0
E: SUBSYSTEM=usb
E: DEVTYPE=usb_interface
E: DRIVER=usbhid
E: INTERFACE=3/1/1

P: /devices/pci0000:00/0000:00:14.0/usb1/1-3/1-3:1.0/0003:046D:C52B.0001/input/input11
E: SUBSYSTEM=input
E: PRODUCT=3/46d/c52b/111
E: NAME=\"Logitech USB Receiver\"
E: ID_INPUT=1
E: ID_INPUT_KEYBOARD=1

P: /devices/pci0000:00/0000:00:14.0/usb1/1-3/1-3:1.1/0003:046D:C52B.0002/input/input12
E: SUBSYSTEM=input
E: NAME=\"Logitech USB Receiver Mouse\"
E: ID_INPUT=1
E: ID_INPUT_MOUSE=1
";

    pub const USB_WEBCAM_PATH: &str = "/devices/pci0000:00/0000:00:14.0/usb1/1-5";

    /// Webcam with a capture node and a microphone sound card
    pub const USB_WEBCAM: &str = "\
P: /devices/pci0000:00/0000:00:14.0/usb1/1-5
N: bus/usb/001/003
E: SUBSYSTEM=usb
E: DEVTYPE=usb_device
E: DRIVER=usb
E: ID_BUS=usb
E: ID_VENDOR_ID=04f2
E: ID_MODEL_ID=b6dd
E: ID_VENDOR_FROM_DATABASE=Chicony Electronics Co., Ltd
E: ID_MODEL=Integrated_Camera
E: ID_USB_INTERFACES=:0e0100:0e0200:010100:010200:

P: /devices/pci0000:00/0000:00:14.0/usb1/1-5/1-5:1.0/video4linux/video0
N: video0
E: DEVNAME=/dev/video0
E: SUBSYSTEM=video4linux
E: ID_V4L_PRODUCT=Integrated Camera: Integrated C
E: ID_V4L_CAPABILITIES=:capture:

P: /devices/pci0000:00/0000:00:14.0/usb1/1-5/1-5:1.3/sound/card1
E: SUBSYSTEM=sound

P: /devices/pci0000:00/0000:00:14.0/usb1/1-5/1-5:1.3/sound/card1/pcmC1D0c
N: snd/pcmC1D0c
E: DEVNAME=/dev/snd/pcmC1D0c
E: SUBSYSTEM=sound
";

    pub const SATA_DISK_PATH: &str = "/devices/pci0000:00/0000:00:17.0/ata1/host0/target0:0:0/0:0:0:0/block/sda";

    pub const SATA_DISK: &str = "\
P: /devices/pci0000:00/0000:00:17.0/ata1/host0/target0:0:0/0:0:0:0/block/sda
N: sda
S: disk/by-id/ata-Samsung_SSD_860_EVO_500GB_S3Z1NB0K123456
E: DEVNAME=/dev/sda
E: SUBSYSTEM=block
E: DEVTYPE=disk
E: ID_BUS=ata
E: ID_TYPE=disk
E: ID_MODEL=Samsung_SSD_860_EVO_500GB

P: /devices/pci0000:00/0000:00:17.0/ata1/host0/target0:0:0/0:0:0:0/block/sda/sda1
N: sda1
S: disk/by-uuid/A1B2-C3D4
E: DEVNAME=/dev/sda1
E: SUBSYSTEM=block
E: DEVTYPE=partition
E: ID_BUS=ata

P: /devices/pci0000:00/0000:00:17.0/ata1/host0/target0:0:0/0:0:0:0/block/sda/sda2
N: sda2
S: disk/by-uuid/0f3c9a8e-1b2d-4e5f-8a9b-c0d1e2f3a4b5
E: DEVNAME=/dev/sda2
E: SUBSYSTEM=block
E: DEVTYPE=partition
E: ID_BUS=ata
";

    pub const LSBLK: &str = "\
KNAME=\"sda\" TYPE=\"disk\" MOUNTPOINT=\"\"
KNAME=\"sda1\" TYPE=\"part\" MOUNTPOINT=\"/boot/efi\"
KNAME=\"sda2\" TYPE=\"part\" MOUNTPOINT=\"/\"
KNAME=\"sdz\" TYPE=\"disk\" MOUNTPOINT=\"\"
KNAME=\"sdz1\" TYPE=\"part\" MOUNTPOINT=\"\"
";
}
