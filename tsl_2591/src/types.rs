use std::fmt;

/// Available Gains for the sensor
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Gain {
    /// gain of 1x
    LOW = 0x00,
    /// gain of 25x
    MED = 0x10,
    /// gain of 428x
    HIGH = 0x20,
    /// gain of 9876x
    MAX = 0x30,
}

impl Gain {
    pub const ALL: [Gain; 4] = [Gain::LOW, Gain::MED, Gain::HIGH, Gain::MAX];

    /// Decode the gain bits (4-5) of the control register.
    pub fn from_code(code: u8) -> Option<Gain> {
        match code {
            0x00 => Some(Gain::LOW),
            0x10 => Some(Gain::MED),
            0x20 => Some(Gain::HIGH),
            0x30 => Some(Gain::MAX),
            _ => None,
        }
    }

    pub fn from_multiplier(multiplier: u16) -> Option<Gain> {
        Gain::ALL
            .iter()
            .copied()
            .find(|g| g.multiplier() == multiplier)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// The linear amplification factor (AGAIN).
    pub fn multiplier(self) -> u16 {
        match self {
            Gain::LOW => 1,
            Gain::MED => 25,
            Gain::HIGH => 428,
            Gain::MAX => 9876,
        }
    }
}

impl Default for Gain {
    fn default() -> Self {
        Gain::LOW
    }
}

impl fmt::Display for Gain {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Gain::LOW => write!(f, "LOW (1x)"),
            Gain::MED => write!(f, "MED (25x)"),
            Gain::HIGH => write!(f, "HIGH (428x)"),
            Gain::MAX => write!(f, "MAX (9876x)"),
        }
    }
}

/// Available integration times for the sensor
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IntegrationTime {
    /// 100ms integration time
    Time100ms = 0x00,
    /// 200ms integration time
    Time200ms = 0x01,
    /// 300ms integration time
    Time300ms = 0x02,
    /// 400ms integration time
    Time400ms = 0x03,
    /// 500ms integration time
    Time500ms = 0x04,
    /// 600ms integration time
    Time600ms = 0x05,
}

impl IntegrationTime {
    pub const ALL: [IntegrationTime; 6] = [
        IntegrationTime::Time100ms,
        IntegrationTime::Time200ms,
        IntegrationTime::Time300ms,
        IntegrationTime::Time400ms,
        IntegrationTime::Time500ms,
        IntegrationTime::Time600ms,
    ];

    /// Decode the low 3 bits of the control register.
    pub fn from_code(code: u8) -> Option<IntegrationTime> {
        match code {
            0x00 => Some(IntegrationTime::Time100ms),
            0x01 => Some(IntegrationTime::Time200ms),
            0x02 => Some(IntegrationTime::Time300ms),
            0x03 => Some(IntegrationTime::Time400ms),
            0x04 => Some(IntegrationTime::Time500ms),
            0x05 => Some(IntegrationTime::Time600ms),
            _ => None,
        }
    }

    pub fn from_millis(ms: u16) -> Option<IntegrationTime> {
        IntegrationTime::ALL
            .iter()
            .copied()
            .find(|t| t.millis() == ms)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    /// Nominal integration period (ATIME).
    pub fn millis(self) -> u16 {
        100 * u16::from(self.code()) + 100
    }

    /// How long to wait after enabling before the status register is
    /// polled: 120ms per step on top of a 200ms base. Empirical, it covers
    /// the ADC conversion latency past the nominal period.
    pub fn settle_millis(self) -> u32 {
        120 * u32::from(self.code()) + 200
    }
}

impl Default for IntegrationTime {
    fn default() -> Self {
        IntegrationTime::Time100ms
    }
}

impl fmt::Display for IntegrationTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}ms", self.millis())
    }
}

/// Integration time and gain, as packed together in the control register.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SensorConfig {
    pub integration_time: IntegrationTime,
    pub gain: Gain,
}

impl SensorConfig {
    /// The control register byte: integration in bits 0-2, gain in bits 4-5.
    pub fn control_byte(&self) -> u8 {
        self.integration_time.code() | self.gain.code()
    }
}

/// Which light the caller is interested in when projecting a [`RawReading`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Channel {
    /// Channel 0, visible and infrared.
    FullSpectrum,
    /// Channel 1.
    Infrared,
    /// Channel 0 minus channel 1.
    Visible,
}

/// Raw photodiode counts from one acquisition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RawReading {
    /// Channel 0 (IR + visible)
    pub full: u16,
    /// Channel 1 (IR only)
    pub infrared: u16,
}

impl RawReading {
    /// Visible is not clamped: noise can make it negative.
    pub fn channel(&self, channel: Channel) -> i32 {
        match channel {
            Channel::FullSpectrum => i32::from(self.full),
            Channel::Infrared => i32::from(self.infrared),
            Channel::Visible => i32::from(self.full) - i32::from(self.infrared),
        }
    }
}

/// Special function commands, sent as a single byte with no register.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpecialFunction {
    /// Forces an interrupt
    ForceInterrupt = 0x04,
    /// Clears any pending ALS interrupt
    ClearAlsInterrupt = 0x06,
    /// Clears both ALS and no-persist interrupts
    ClearAllInterrupts = 0x07,
    /// Clears any pending no-persist interrupt
    ClearNoPersistInterrupt = 0x0A,
}

/// Errors when accessing the sensor
#[derive(Debug, thiserror::Error)]
pub enum TSL2591Error<E: fmt::Debug> {
    /// Errors that occur when accessing the I2C peripheral.
    #[error("i2c error: {0:?}")]
    I2cError(E),
    /// The status register did not flag valid data once the integration
    /// wait was over. Retrying the acquisition is safe.
    #[error("integration not complete (status register = {status:#04x})")]
    IntegrationIncomplete { status: u8 },
}

impl<E: fmt::Debug> From<E> for TSL2591Error<E> {
    fn from(err: E) -> TSL2591Error<E> {
        TSL2591Error::I2cError(err)
    }
}
