//! Register map and command encoding of the TSL2591.

/// Default 7-bit bus address.
pub const TSL2591_ADDR: u8 = 0x29;

/// Bits 7 and 5, "command normal": OR'd with every register address.
pub const TSL2591_COMMAND_BIT: u8 = 0xA0;
/// Bits 7-5, selects a special function instead of a register.
pub const TSL2591_SPECIAL_FUNCTION: u8 = 0xE0;

pub const TSL2591_ENABLE_POWEROFF: u8 = 0x00;
pub const TSL2591_ENABLE_POWERON: u8 = 0x01;
/// ALS enable
pub const TSL2591_ENABLE_AEN: u8 = 0x02;
/// ALS interrupt, filtered by the persist register
pub const TSL2591_ENABLE_AIEN: u8 = 0x10;
/// Sleep after interrupt
pub const TSL2591_ENABLE_SAI: u8 = 0x40;
/// No-persist interrupt
pub const TSL2591_ENABLE_NPIEN: u8 = 0x80;

/// Written to CONTROL, resets the chip.
pub const TSL2591_CONTROL_SRESET: u8 = 0x80;

pub const TSL2591_CONTROL_TIME_MASK: u8 = 0b0000_0111;

/// STATUS bit 0: an integration cycle completed and the channels are valid.
pub const TSL2591_STATUS_AVALID: u8 = 0x01;

/// Register addresses. Threshold and channel registers are 16 bit values
/// split over a low/high pair, read or written as a word from the low one.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    Enable = 0x00,
    /// Also called CONFIG
    Control = 0x01,
    /// ALS interrupt low threshold, low byte
    AiltL = 0x04,
    AiltH = 0x05,
    /// ALS interrupt high threshold, low byte
    AihtL = 0x06,
    AihtH = 0x07,
    /// No-persist ALS interrupt low threshold, low byte
    NpailtL = 0x08,
    NpailtH = 0x09,
    /// No-persist ALS interrupt high threshold, low byte
    NpaihtL = 0x0A,
    NpaihtH = 0x0B,
    /// Number of consecutive out-of-range readings before an interrupt
    PersistFilter = 0x0C,
    PackageId = 0x11,
    DeviceId = 0x12,
    Status = 0x13,
    Chan0Low = 0x14,
    Chan0High = 0x15,
    Chan1Low = 0x16,
    Chan1High = 0x17,
}

impl Register {
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// The command byte selecting this register.
    pub fn command(self) -> u8 {
        TSL2591_COMMAND_BIT | self.addr()
    }
}
