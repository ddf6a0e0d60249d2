// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Record decoders for SMBIOS structures.
//!
//! The values of the types in this module are defined by [DSP0134], the
//! _SMBIOS Reference Specification_. Refer to that document for details.
//!
//! [DSP0134]:
//!     https://www.dmtf.org/sites/default/files/standards/documents/DSP0134_3.7.0.pdf

use serde::Serialize;
use slog::{debug, o};

use crate::bits::{self, DEFAULT_HEX_WIDTH};
use crate::fingerprint::Fingerprint;
use crate::lookup;
use crate::record::{Record, Value};
use crate::strings::StringTable;
use crate::walk::{Structure, Structures};
use crate::FieldError;

use type17::{FormFactor, MemoryType, TypeDetail};

macro_rules! serialize_labels {
    ($($Enum:ty),+ $(,)?) => {
        $(
            #[automatically_derived]
            impl Serialize for $Enum {
                fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
                where
                    S: serde::ser::Serializer,
                {
                    serializer.serialize_str(self.label())
                }
            }
        )+
    };
}

/// Generic summary, produced for every structure in the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Position of the structure in the table
    pub sequence_number: usize,
    #[serde(rename = "type")]
    pub stype: u8,
    pub description: &'static str,
    pub handle: u16,
    /// Length of the header and formatted area
    pub header_size: u8,
    /// Total length, including the string table
    pub size: usize,
    pub content_fingerprint: String,
}
impl Summary {
    pub fn decode(structure: &Structure<'_>, hasher: &dyn Fingerprint) -> Self {
        Self {
            sequence_number: structure.index(),
            stype: structure.stype(),
            description: lookup::describe_type(structure.stype()),
            handle: structure.handle().into(),
            header_size: structure.header().length(),
            size: structure.len(),
            content_fingerprint: hasher.fingerprint(structure.bytes()),
        }
    }
}
impl Record for Summary {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("sequence_number", self.sequence_number.into()),
            ("type", self.stype.into()),
            ("description", self.description.into()),
            ("handle", self.handle.into()),
            ("header_size", self.header_size.into()),
            ("size", self.size.into()),
            ("content_fingerprint", self.content_fingerprint.as_str().into()),
        ]
    }
}

/// Decoded Type 17 (Memory Device) structure
///
/// Any field which the firmware left unreported, or which lies beyond the
/// formatted area of an older (shorter) structure revision, is `None`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MemoryDevice {
    pub handle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_handle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_factor: Option<FormFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_width: Option<u16>,
    /// Raw size magnitude, taken from the extended size field when the
    /// legacy field says to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<MemoryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_type_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_clock_speed: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_voltage: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_voltage: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configured_voltage: Option<u16>,

    /// Type detail bits backing `memory_type_details`
    #[serde(skip)]
    pub type_detail: TypeDetail,
}
impl MemoryDevice {
    /// Decode `structure`, or `None` if it is not a Memory Device.
    pub fn decode(structure: &Structure<'_>) -> Option<Self> {
        Self::decode_with_log(structure, &crate::null_log())
    }

    /// As [MemoryDevice::decode], logging each field which could not be read.
    pub fn decode_with_log(
        structure: &Structure<'_>,
        log: &slog::Logger,
    ) -> Option<Self> {
        if structure.stype() != type17::TYPE
            || structure.len() < type17::MIN_SIZE
        {
            return None;
        }

        let log = log.new(o!("handle" => structure.handle().to_string()));
        let fields = Fields {
            area: structure.formatted(),
            strings: structure.strings(),
            log: &log,
        };
        let type_detail = fields
            .word(type17::TYPE_DETAIL)
            .map(TypeDetail::from_bits_retain)
            .unwrap_or_default();

        Some(Self {
            handle: structure.handle().to_string(),
            array_handle: fields
                .word(type17::ARRAY_HANDLE)
                .map(|h| bits::to_hex(h, DEFAULT_HEX_WIDTH)),
            form_factor: fields
                .byte(type17::FORM_FACTOR)
                .and_then(FormFactor::from_repr),
            total_width: fields
                .word(type17::TOTAL_WIDTH)
                .filter(|w| *w != type17::WIDTH_UNKNOWN),
            data_width: fields
                .word(type17::DATA_WIDTH)
                .filter(|w| *w != type17::WIDTH_UNKNOWN),
            size: fields.size(),
            set: fields
                .byte(type17::DEVICE_SET)
                .filter(|s| *s != type17::SET_UNKNOWN),
            device_locator: fields.string(type17::DEVICE_LOCATOR),
            bank_locator: fields.string(type17::BANK_LOCATOR),
            memory_type: fields
                .byte(type17::MEMORY_TYPE)
                .and_then(MemoryType::from_repr),
            memory_type_details: Some(type_detail.describe())
                .filter(|details| !details.is_empty()),
            max_speed: fields.speed(type17::SPEED),
            configured_clock_speed: fields.speed(type17::CFGD_CLOCK_SPEED),
            manufacturer: fields.string(type17::MANUFACTURER),
            serial_number: fields.string(type17::SERIAL_NUMBER),
            asset_tag: fields.string(type17::ASSET_TAG),
            part_number: fields.string(type17::PART_NUMBER),
            min_voltage: fields.voltage(type17::MIN_VOLTAGE),
            max_voltage: fields.voltage(type17::MAX_VOLTAGE),
            configured_voltage: fields.voltage(type17::CFGD_VOLTAGE),
            type_detail,
        })
    }
}
impl Record for MemoryDevice {
    fn fields(&self) -> Vec<(&'static str, Value)> {
        vec![
            ("handle", self.handle.as_str().into()),
            ("array_handle", self.array_handle.clone().into()),
            ("form_factor", self.form_factor.map(FormFactor::label).into()),
            ("total_width", self.total_width.into()),
            ("data_width", self.data_width.into()),
            ("size", self.size.into()),
            ("set", self.set.into()),
            ("device_locator", self.device_locator.clone().into()),
            ("bank_locator", self.bank_locator.clone().into()),
            ("memory_type", self.memory_type.map(MemoryType::label).into()),
            ("memory_type_details", self.memory_type_details.clone().into()),
            ("max_speed", self.max_speed.into()),
            ("configured_clock_speed", self.configured_clock_speed.into()),
            ("manufacturer", self.manufacturer.clone().into()),
            ("serial_number", self.serial_number.clone().into()),
            ("asset_tag", self.asset_tag.clone().into()),
            ("part_number", self.part_number.clone().into()),
            ("min_voltage", self.min_voltage.into()),
            ("max_voltage", self.max_voltage.into()),
            ("configured_voltage", self.configured_voltage.into()),
        ]
    }
}

/// Field reads confined to a structure's formatted area, where a failed read
/// means an absent field.
struct Fields<'a> {
    area: &'a [u8],
    strings: StringTable<'a>,
    log: &'a slog::Logger,
}
impl Fields<'_> {
    fn keep<T>(&self, offset: usize, res: Result<T, FieldError>) -> Option<T> {
        match res {
            Ok(v) => Some(v),
            Err(e) => {
                debug!(self.log, "field omitted";
                    "offset" => offset,
                    "error" => %e,
                );
                None
            }
        }
    }

    fn byte(&self, offset: usize) -> Option<u8> {
        self.keep(offset, bits::read_byte(self.area, offset))
    }
    fn word(&self, offset: usize) -> Option<u16> {
        self.keep(offset, bits::read_word(self.area, offset))
    }
    fn dword(&self, offset: usize) -> Option<u32> {
        self.keep(offset, bits::read_dword(self.area, offset))
    }

    /// String referenced by the index at `offset`; index 0 means none.
    fn string(&self, offset: usize) -> Option<String> {
        match self.byte(offset)? {
            0 => None,
            index => self.keep(offset, self.strings.get(index)),
        }
    }

    fn speed(&self, offset: usize) -> Option<u16> {
        self.word(offset).filter(|s| !matches!(*s, 0 | type17::SPEED_UNKNOWN))
    }

    fn voltage(&self, offset: usize) -> Option<u16> {
        self.word(offset).filter(|v| *v != 0)
    }

    fn size(&self) -> Option<u32> {
        match self.word(type17::SIZE)? {
            type17::SIZE_UNKNOWN => None,
            type17::SIZE_EXTENDED => self.dword(type17::EXTENDED_SIZE),
            size => Some(u32::from(size)),
        }
    }
}

/// Summaries of every structure in `data`
pub fn summaries<'a>(
    data: &'a [u8],
    hasher: &'a dyn Fingerprint,
) -> impl Iterator<Item = Summary> + 'a {
    Structures::new(data).map(move |s| Summary::decode(&s, hasher))
}

/// Every Memory Device described in `data`
pub fn memory_devices(data: &[u8]) -> impl Iterator<Item = MemoryDevice> + '_ {
    Structures::new(data).filter_map(|s| MemoryDevice::decode(&s))
}

pub mod type17 {
    use super::*;
    use bitflags::bitflags;
    use strum::{FromRepr, IntoStaticStr, VariantArray};

    pub const TYPE: u8 = lookup::StructureType::MemoryDevice as u8;

    /// Structures shorter than this are not decoded as Memory Devices.
    pub const MIN_SIZE: usize = 0x12;

    // Field offsets within the structure
    pub const ARRAY_HANDLE: usize = 0x04;
    pub const TOTAL_WIDTH: usize = 0x08;
    pub const DATA_WIDTH: usize = 0x0a;
    pub const SIZE: usize = 0x0c;
    pub const FORM_FACTOR: usize = 0x0e;
    pub const DEVICE_SET: usize = 0x0f;
    pub const DEVICE_LOCATOR: usize = 0x10;
    pub const BANK_LOCATOR: usize = 0x11;
    pub const MEMORY_TYPE: usize = 0x12;
    pub const TYPE_DETAIL: usize = 0x13;
    pub const SPEED: usize = 0x15;
    pub const MANUFACTURER: usize = 0x17;
    pub const SERIAL_NUMBER: usize = 0x18;
    pub const ASSET_TAG: usize = 0x19;
    pub const PART_NUMBER: usize = 0x1a;
    pub const EXTENDED_SIZE: usize = 0x1c;
    pub const CFGD_CLOCK_SPEED: usize = 0x20;
    pub const MIN_VOLTAGE: usize = 0x22;
    pub const MAX_VOLTAGE: usize = 0x24;
    pub const CFGD_VOLTAGE: usize = 0x26;

    pub const WIDTH_UNKNOWN: u16 = 0xffff;
    pub const SET_UNKNOWN: u8 = 0xff;
    pub const SPEED_UNKNOWN: u16 = 0xffff;
    pub const SIZE_UNKNOWN: u16 = 0xffff;
    /// Size is held in the Extended Size field instead
    pub const SIZE_EXTENDED: u16 = 0x7fff;

    /// Memory device form factor.
    ///
    /// See Table 76 in section 7.18.1 of DSP0134 for details.
    #[derive(
        Debug, Copy, Clone, PartialEq, Eq, FromRepr, IntoStaticStr, VariantArray,
    )]
    #[repr(u8)]
    pub enum FormFactor {
        #[strum(serialize = "Other")]
        Other = 0x01,
        #[strum(serialize = "Unknown")]
        Unknown = 0x02,
        #[strum(serialize = "SIMM")]
        Simm = 0x03,
        #[strum(serialize = "SIP")]
        Sip = 0x04,
        #[strum(serialize = "Chip")]
        Chip = 0x05,
        #[strum(serialize = "DIP")]
        Dip = 0x06,
        #[strum(serialize = "ZIP")]
        Zip = 0x07,
        #[strum(serialize = "Proprietary Card")]
        ProprietaryCard = 0x08,
        #[strum(serialize = "DIMM")]
        Dimm = 0x09,
        #[strum(serialize = "TSOP")]
        Tsop = 0x0A,
        #[strum(serialize = "Row of chips")]
        RowOfChips = 0x0B,
        #[strum(serialize = "RIMM")]
        Rimm = 0x0C,
        #[strum(serialize = "SODIMM")]
        Sodimm = 0x0D,
        #[strum(serialize = "SRIMM")]
        Srimm = 0x0E,
        #[strum(serialize = "FB-DIMM")]
        FbDimm = 0x0F,
    }
    impl FormFactor {
        pub fn label(self) -> &'static str {
            self.into()
        }
    }

    /// Memory device type.
    ///
    /// See Table 77 in section 7.18.2 of DSP0134 for details.
    #[derive(
        Debug, Copy, Clone, PartialEq, Eq, FromRepr, IntoStaticStr, VariantArray,
    )]
    #[repr(u8)]
    pub enum MemoryType {
        #[strum(serialize = "Other")]
        Other = 0x01,
        #[strum(serialize = "Unknown")]
        Unknown = 0x02,
        #[strum(serialize = "DRAM")]
        Dram = 0x03,
        #[strum(serialize = "EDRAM")]
        Edram = 0x04,
        #[strum(serialize = "VRAM")]
        Vram = 0x05,
        #[strum(serialize = "SRAM")]
        Sram = 0x06,
        #[strum(serialize = "RAM")]
        Ram = 0x07,
        #[strum(serialize = "ROM")]
        Rom = 0x08,
        #[strum(serialize = "FLASH")]
        Flash = 0x09,
        #[strum(serialize = "EEPROM")]
        Eeprom = 0x0A,
        #[strum(serialize = "FEPROM")]
        Feprom = 0x0B,
        #[strum(serialize = "EPROM")]
        Eprom = 0x0C,
        #[strum(serialize = "CDRAM")]
        Cdram = 0x0D,
        #[strum(serialize = "3DRAM")]
        Dram3d = 0x0E,
        #[strum(serialize = "SDRAM")]
        Sdram = 0x0F,
        #[strum(serialize = "SGRAM")]
        Sgram = 0x10,
        #[strum(serialize = "RDRAM")]
        Rdram = 0x11,
        #[strum(serialize = "DDR")]
        Ddr = 0x12,
        #[strum(serialize = "DDR2")]
        Ddr2 = 0x13,
        #[strum(serialize = "DDR2 FB-DIMM")]
        Ddr2FbDimm = 0x14,
        #[strum(serialize = "RESERVED")]
        Reserved15 = 0x15,
        #[strum(serialize = "RESERVED")]
        Reserved16 = 0x16,
        #[strum(serialize = "RESERVED")]
        Reserved17 = 0x17,
        #[strum(serialize = "DDR3")]
        Ddr3 = 0x18,
        #[strum(serialize = "FBD2")]
        Fbd2 = 0x19,
        #[strum(serialize = "DDR4")]
        Ddr4 = 0x1A,
        #[strum(serialize = "LPDDR")]
        Lpddr = 0x1B,
        #[strum(serialize = "LPDDR2")]
        Lpddr2 = 0x1C,
        #[strum(serialize = "LPDDR3")]
        Lpddr3 = 0x1D,
        #[strum(serialize = "LPDDR4")]
        Lpddr4 = 0x1E,
    }
    impl MemoryType {
        pub fn label(self) -> &'static str {
            self.into()
        }
    }

    serialize_labels! {
        FormFactor,
        MemoryType,
    }

    /// Labels for [TypeDetail], indexed by bit position
    pub const DETAIL_LABELS: [&str; 16] = [
        "Reserved",
        "Other",
        "Unknown",
        "Fast-paged",
        "Static column",
        "Pseudo-static",
        "RAMBUS",
        "Synchronous",
        "CMOS",
        "EDO",
        "Window DRAM",
        "Cache DRAM",
        "Non-volatile",
        "Registered (Buffered)",
        "Unbuffered (Unregistered)",
        "LRDIMM",
    ];

    bitflags! {
        /// Memory device type detail.
        ///
        /// See Table 78 in section 7.18.3 of DSP0134 for details.
        #[repr(transparent)]
        #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct TypeDetail: u16 {
            // Bit 0 is reserved.

            const OTHER = 1 << 1;
            const UNKNOWN = 1 << 2;
            const FAST_PAGED = 1 << 3;
            const STATIC_COLUMN = 1 << 4;
            const PSEUDO_STATIC = 1 << 5;
            const RAMBUS = 1 << 6;
            const SYNCHRONOUS = 1 << 7;
            const CMOS = 1 << 8;
            const EDO = 1 << 9;
            const WINDOW_DRAM = 1 << 10;
            const CACHE_DRAM = 1 << 11;
            const NON_VOLATILE = 1 << 12;
            /// Registered (buffered)
            const REGISTERED = 1 << 13;
            /// Unbuffered (unregistered)
            const UNBUFFERED = 1 << 14;
            const LRDIMM = 1 << 15;
        }
    }
    impl TypeDetail {
        /// Space-separated labels of the set bits, reserved bit included
        pub fn describe(&self) -> String {
            lookup::decode_bits(u64::from(self.bits()), &DETAIL_LABELS)
        }
    }

}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fingerprint::Sha256Fingerprint;
    use crate::walk::test::raw_structure;

    /// Formatted area (excluding header) of a full-length Type 17 structure
    fn memory_device_body() -> Vec<u8> {
        let mut body = vec![0u8; 0x28 - 4];
        let mut put_word = |offset: usize, value: u16| {
            body[offset - 4..offset - 2].copy_from_slice(&value.to_le_bytes());
        };
        put_word(type17::ARRAY_HANDLE, 0x1000);
        put_word(type17::TOTAL_WIDTH, 72);
        put_word(type17::DATA_WIDTH, 64);
        put_word(type17::SIZE, 16384);
        put_word(type17::TYPE_DETAIL, 0x0080);
        put_word(type17::SPEED, 3200);
        put_word(type17::CFGD_CLOCK_SPEED, 2933);
        put_word(type17::MIN_VOLTAGE, 1200);
        put_word(type17::MAX_VOLTAGE, 1350);
        put_word(type17::CFGD_VOLTAGE, 1200);
        body[type17::FORM_FACTOR - 4] = 0x09;
        body[type17::DEVICE_SET - 4] = 0x00;
        body[type17::DEVICE_LOCATOR - 4] = 1;
        body[type17::BANK_LOCATOR - 4] = 2;
        body[type17::MEMORY_TYPE - 4] = 0x1a;
        body[type17::MANUFACTURER - 4] = 3;
        body[type17::SERIAL_NUMBER - 4] = 4;
        body[type17::ASSET_TAG - 4] = 0;
        body[type17::PART_NUMBER - 4] = 5;
        body
    }

    const STRINGS: &[u8] =
        b"DIMM_A1\0BANK 0\0Samsung    \0 0x12345678\0M393A2K43DB3-CWE \0\0";

    fn decode(data: &[u8]) -> Option<MemoryDevice> {
        let structure = Structures::new(data).next().expect("structure");
        MemoryDevice::decode(&structure)
    }

    fn with_word(offset: usize, value: u16) -> Vec<u8> {
        let mut body = memory_device_body();
        body[offset - 4..offset - 2].copy_from_slice(&value.to_le_bytes());
        raw_structure(17, 0x1100, &body, STRINGS)
    }

    #[test]
    fn full_memory_device() {
        let data = raw_structure(17, 0x1100, &memory_device_body(), STRINGS);
        let dev = decode(&data).expect("memory device");

        assert_eq!(dev.handle, "0x1100");
        assert_eq!(dev.array_handle.as_deref(), Some("0x1000"));
        assert_eq!(dev.form_factor, Some(FormFactor::Dimm));
        assert_eq!(dev.total_width, Some(72));
        assert_eq!(dev.data_width, Some(64));
        assert_eq!(dev.size, Some(16384));
        assert_eq!(dev.set, Some(0));
        assert_eq!(dev.device_locator.as_deref(), Some("DIMM_A1"));
        assert_eq!(dev.bank_locator.as_deref(), Some("BANK 0"));
        assert_eq!(dev.memory_type, Some(MemoryType::Ddr4));
        assert_eq!(dev.memory_type_details.as_deref(), Some("Synchronous"));
        assert_eq!(dev.type_detail, TypeDetail::SYNCHRONOUS);
        assert_eq!(dev.max_speed, Some(3200));
        assert_eq!(dev.configured_clock_speed, Some(2933));
        assert_eq!(dev.manufacturer.as_deref(), Some("Samsung"));
        assert_eq!(dev.serial_number.as_deref(), Some(" 0x12345678"));
        assert_eq!(dev.asset_tag, None);
        assert_eq!(dev.part_number.as_deref(), Some("M393A2K43DB3-CWE"));
        assert_eq!(dev.min_voltage, Some(1200));
        assert_eq!(dev.max_voltage, Some(1350));
        assert_eq!(dev.configured_voltage, Some(1200));
    }

    #[test]
    fn only_memory_devices() {
        let data = raw_structure(16, 0x1000, &memory_device_body(), STRINGS);
        assert!(decode(&data).is_none());
    }

    #[test]
    fn undersized_memory_device() {
        // 0x0c formatted bytes plus a 2-byte string table
        let data = raw_structure(17, 0x1100, &[0u8; 8], b"\0\0");
        assert_eq!(data.len(), 0x0e);
        assert!(decode(&data).is_none());

        let data = raw_structure(17, 0x1100, &[0u8; 8], b"ABCD\0\0");
        assert_eq!(data.len(), type17::MIN_SIZE);
        assert!(decode(&data).is_some());
    }

    #[test]
    fn size_sentinels() {
        let dev = decode(&with_word(type17::SIZE, 0xffff)).unwrap();
        assert_eq!(dev.size, None);

        let mut body = memory_device_body();
        body[type17::SIZE - 4..type17::SIZE - 2]
            .copy_from_slice(&0x7fffu16.to_le_bytes());
        body[type17::EXTENDED_SIZE - 4..type17::EXTENDED_SIZE]
            .copy_from_slice(&0x0002_0000u32.to_le_bytes());
        let data = raw_structure(17, 0x1100, &body, STRINGS);
        assert_eq!(decode(&data).unwrap().size, Some(0x0002_0000));

        let dev = decode(&with_word(type17::SIZE, 0)).unwrap();
        assert_eq!(dev.size, Some(0));
    }

    #[test]
    fn width_and_set_sentinels() {
        let dev = decode(&with_word(type17::TOTAL_WIDTH, 0xffff)).unwrap();
        assert_eq!(dev.total_width, None);
        assert_eq!(dev.data_width, Some(64));

        let dev = decode(&with_word(type17::DATA_WIDTH, 0xffff)).unwrap();
        assert_eq!(dev.data_width, None);

        let mut body = memory_device_body();
        body[type17::DEVICE_SET - 4] = 0xff;
        let dev = decode(&raw_structure(17, 0x1100, &body, STRINGS)).unwrap();
        assert_eq!(dev.set, None);
    }

    #[test]
    fn speed_and_voltage_sentinels() {
        for sentinel in [0x0000, 0xffff] {
            let dev = decode(&with_word(type17::SPEED, sentinel)).unwrap();
            assert_eq!(dev.max_speed, None);
            let dev =
                decode(&with_word(type17::CFGD_CLOCK_SPEED, sentinel)).unwrap();
            assert_eq!(dev.configured_clock_speed, None);
        }
        for (offset, name) in [
            (type17::MIN_VOLTAGE, "min_voltage"),
            (type17::MAX_VOLTAGE, "max_voltage"),
            (type17::CFGD_VOLTAGE, "configured_voltage"),
        ] {
            let dev = decode(&with_word(offset, 0)).unwrap();
            assert!(dev.get(name).is_absent(), "{name} should be absent");
        }
    }

    #[test]
    fn unmapped_codes_are_absent() {
        let mut body = memory_device_body();
        body[type17::FORM_FACTOR - 4] = 0x00;
        body[type17::MEMORY_TYPE - 4] = 0x40;
        body[type17::TYPE_DETAIL - 4..type17::TYPE_DETAIL - 2]
            .copy_from_slice(&[0, 0]);
        let dev = decode(&raw_structure(17, 0x1100, &body, STRINGS)).unwrap();
        assert_eq!(dev.form_factor, None);
        assert_eq!(dev.memory_type, None);
        assert_eq!(dev.memory_type_details, None);
    }

    #[test]
    fn bad_string_index_is_absent() {
        let mut body = memory_device_body();
        body[type17::PART_NUMBER - 4] = 9;
        let dev = decode(&raw_structure(17, 0x1100, &body, STRINGS)).unwrap();
        assert_eq!(dev.part_number, None);
        assert_eq!(dev.manufacturer.as_deref(), Some("Samsung"));
    }

    #[test]
    fn short_revision_omits_later_fields() {
        // SMBIOS 2.3 layout ends after the part number
        let body = &memory_device_body()[..0x1b - 4];
        let dev = decode(&raw_structure(17, 0x1100, body, STRINGS)).unwrap();
        assert_eq!(dev.part_number.as_deref(), Some("M393A2K43DB3-CWE"));
        assert_eq!(dev.size, Some(16384));
        assert_eq!(dev.configured_clock_speed, None);
        assert_eq!(dev.min_voltage, None);
        assert_eq!(dev.configured_voltage, None);
    }

    #[test]
    fn absent_fields_not_serialized() {
        let mut body = memory_device_body();
        body[type17::DEVICE_SET - 4] = 0xff;
        let dev = decode(&raw_structure(17, 0x1100, &body, STRINGS)).unwrap();
        let json: serde_json::Value = serde_json::to_value(&dev).unwrap();
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("set"));
        assert!(!obj.contains_key("asset_tag"));
        assert!(!obj.contains_key("type_detail"));
        assert_eq!(obj["form_factor"], "DIMM");
        assert_eq!(obj["memory_type"], "DDR4");
        assert_eq!(obj["total_width"], 72);
        assert_eq!(obj["handle"], "0x1100");
    }

    #[test]
    fn summary_fields() {
        let mut data = raw_structure(0, 0x0000, &[1, 2, 3, 4], b"Vendor\0\0");
        data.extend(raw_structure(250, 0xbeef, &[], b"\0\0"));

        let all: Vec<Summary> = summaries(&data, &Sha256Fingerprint).collect();
        assert_eq!(all.len(), 2);

        assert_eq!(all[0].sequence_number, 0);
        assert_eq!(all[0].description, "BIOS Information");
        assert_eq!(all[0].header_size, 8);
        assert_eq!(all[0].size, 16);
        assert_eq!(
            all[0].content_fingerprint,
            Sha256Fingerprint.fingerprint(&data[..16])
        );

        assert_eq!(all[1].sequence_number, 1);
        assert_eq!(all[1].stype, 250);
        assert_eq!(all[1].description, "Unknown");
        assert_eq!(all[1].handle, 0xbeef);
        assert_eq!(all[1].get("size"), Value::Integer(6));

        let json = serde_json::to_value(&all[1]).unwrap();
        assert_eq!(json["type"], 250);
    }

    #[test]
    fn summary_covers_undersized_memory_device() {
        let data = raw_structure(17, 0x1100, &[0u8; 4], b"\0\0");
        assert_eq!(summaries(&data, &Sha256Fingerprint).count(), 1);
        assert_eq!(memory_devices(&data).count(), 0);
    }
}
