// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structure type descriptions and bit-field rendering.
//!
//! Consumers key on these exact strings, so they must not be reworded.

use strum::{FromRepr, IntoStaticStr, VariantArray};

/// Description emitted for type codes with no entry in [StructureType]
pub const UNKNOWN: &str = "Unknown";

/// SMBIOS structure type codes.
///
/// See Table 3 in section 6.1.2 of DSP0134 for details.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, FromRepr, IntoStaticStr, VariantArray,
)]
#[repr(u8)]
pub enum StructureType {
    #[strum(serialize = "BIOS Information")]
    BiosInformation = 0,
    #[strum(serialize = "System Information")]
    SystemInformation = 1,
    #[strum(serialize = "Base Board or Module Information")]
    BaseBoard = 2,
    #[strum(serialize = "System Enclosure or Chassis")]
    SystemEnclosure = 3,
    #[strum(serialize = "Processor Information")]
    Processor = 4,
    #[strum(serialize = "Memory Controller Information")]
    MemoryController = 5,
    #[strum(serialize = "Memory Module Information")]
    MemoryModule = 6,
    #[strum(serialize = "Cache Information")]
    Cache = 7,
    #[strum(serialize = "Port Connector Information")]
    PortConnector = 8,
    #[strum(serialize = "System Slots")]
    SystemSlots = 9,
    #[strum(serialize = "On Board Devices Information")]
    OnBoardDevices = 10,
    #[strum(serialize = "OEM Strings")]
    OemStrings = 11,
    #[strum(serialize = "System Configuration Options")]
    SystemConfigOptions = 12,
    #[strum(serialize = "BIOS Language Information")]
    BiosLanguage = 13,
    #[strum(serialize = "Group Associations")]
    GroupAssociations = 14,
    #[strum(serialize = "System Event Log")]
    SystemEventLog = 15,
    #[strum(serialize = "Physical Memory Array")]
    PhysicalMemoryArray = 16,
    #[strum(serialize = "Memory Device")]
    MemoryDevice = 17,
    #[strum(serialize = "32-bit Memory Error Information")]
    MemoryError32 = 18,
    #[strum(serialize = "Memory Array Mapped Address")]
    MemoryArrayMappedAddress = 19,
    #[strum(serialize = "Memory Device Mapped Address")]
    MemoryDeviceMappedAddress = 20,
    #[strum(serialize = "Built-in Pointing Device")]
    BuiltInPointingDevice = 21,
    #[strum(serialize = "Portable Battery")]
    PortableBattery = 22,
    #[strum(serialize = "System Reset")]
    SystemReset = 23,
    #[strum(serialize = "Hardware Security")]
    HardwareSecurity = 24,
    #[strum(serialize = "System Power Controls")]
    SystemPowerControls = 25,
    #[strum(serialize = "Voltage Probe")]
    VoltageProbe = 26,
    #[strum(serialize = "Cooling Device")]
    CoolingDevice = 27,
    #[strum(serialize = "Temperature Probe")]
    TemperatureProbe = 28,
    #[strum(serialize = "Electrical Current Probe")]
    ElectricalCurrentProbe = 29,
    #[strum(serialize = "Out-of-Band Remote Access")]
    OutOfBandRemoteAccess = 30,
    #[strum(serialize = "Boot Integrity Services")]
    BootIntegrityServices = 31,
    #[strum(serialize = "System Boot Information")]
    SystemBoot = 32,
    #[strum(serialize = "64-bit Memory Error Information")]
    MemoryError64 = 33,
    #[strum(serialize = "Management Device")]
    ManagementDevice = 34,
    #[strum(serialize = "Management Device Component")]
    ManagementDeviceComponent = 35,
    #[strum(serialize = "Management Device Threshold Data")]
    ManagementDeviceThresholdData = 36,
    #[strum(serialize = "Memory Channel")]
    MemoryChannel = 37,
    #[strum(serialize = "IPMI Device Information")]
    IpmiDevice = 38,
    #[strum(serialize = "System Power Supply")]
    SystemPowerSupply = 39,
    #[strum(serialize = "Additional Information")]
    AdditionalInformation = 40,
    #[strum(serialize = "Onboard Devices Extended Info")]
    OnboardDevicesExtended = 41,
    #[strum(serialize = "Inactive")]
    Inactive = 126,
    #[strum(serialize = "End-of-Table")]
    EndOfTable = 127,
    #[strum(serialize = "Memory SPD Data")]
    MemorySpdData = 130,
    #[strum(serialize = "OEM Processor Type")]
    OemProcessorType = 131,
    #[strum(serialize = "OEM Processor Bus Speed")]
    OemProcessorBusSpeed = 132,
}
impl StructureType {
    pub fn description(self) -> &'static str {
        self.into()
    }
}

/// Describe structure type `code`, or [UNKNOWN] if it is not one we know.
pub fn describe_type(code: u8) -> &'static str {
    StructureType::from_repr(code).map_or(UNKNOWN, StructureType::description)
}

/// Render the bits set in `mask` using `labels`, indexed by bit position.
///
/// Labels are emitted in ascending bit order, separated by single spaces.
/// Set bits without a corresponding label are ignored.
pub fn decode_bits(mask: u64, labels: &[&str]) -> String {
    labels
        .iter()
        .take(u64::BITS as usize)
        .enumerate()
        .filter(|(bit, _)| mask & (1u64 << bit) != 0)
        .map(|(_, label)| *label)
        .collect::<Vec<_>>()
        .join(" ")
}
