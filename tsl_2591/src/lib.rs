//! Driver for the TSL2591 light sensor.
//!
//! This is largely a port of
//! https://github.com/adafruit/Adafruit_TSL2591_Library
//! on top of the embedded-hal 1.0 traits.
//!
//! The sensor is kept powered off between measurements: every acquisition
//! enables it, waits for the integration to finish, reads both channels and
//! disables it again, whatever the outcome.
use std::fmt::Debug;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, log_enabled, trace, warn, Level};

mod dump;
mod lux;
pub mod registers;
mod types;

pub use dump::RegisterDump;
pub use lux::{calculate_lux, lux_from_codes};
pub use registers::Register;
pub use types::{
    Channel, Gain, IntegrationTime, RawReading, SensorConfig, SpecialFunction, TSL2591Error,
};

use registers::*;

/// Provide access to a TSL2591 sensor on the i2c bus.
///
/// Only one acquisition may be in flight per physical sensor. The driver
/// owns the bus, so sharing it between threads is up to the caller.
#[derive(Debug)]
pub struct TSL2591Sensor<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    config: SensorConfig,
}

impl<I2C, D, E> TSL2591Sensor<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    E: Debug,
{
    /// Construct a new TSL2591 sensor at the default address, with 100ms
    /// integration time and 1x gain.
    pub fn new(i2c: I2C, delay: D) -> Result<TSL2591Sensor<I2C, D>, TSL2591Error<E>> {
        Self::with_config(i2c, delay, TSL2591_ADDR, SensorConfig::default())
    }

    /// Construct a new TSL2591 sensor.
    ///
    /// The configuration is written to the device, which is then returned
    /// disabled. Measurements power it on as needed.
    pub fn with_config(
        i2c: I2C,
        delay: D,
        address: u8,
        config: SensorConfig,
    ) -> Result<TSL2591Sensor<I2C, D>, TSL2591Error<E>> {
        let mut obj = TSL2591Sensor {
            i2c,
            delay,
            address,
            config,
        };

        obj.set_timing(config.integration_time)?;
        obj.set_gain(config.gain)?;
        obj.disable()?;

        Ok(obj)
    }

    /// Destroy driver instance, return I²C bus and delay instances.
    pub fn destroy(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    // Abstraction over the raw traits

    /// Read a byte from the given register
    fn read_u8(&mut self, register: Register) -> Result<u8, TSL2591Error<E>> {
        let mut data = [0; 1];
        self.i2c
            .write_read(self.address, &[register.command()], &mut data)?;
        trace!("read {:?} = {:#04x}", register, data[0]);

        Ok(data[0])
    }

    /// Read a little endian word starting at the given register
    fn read_u16(&mut self, register: Register) -> Result<u16, TSL2591Error<E>> {
        let mut data = [0; 2];
        self.i2c
            .write_read(self.address, &[register.command()], &mut data)?;
        let word = u16::from_le_bytes(data);
        trace!("read {:?} = {:#06x}", register, word);

        Ok(word)
    }

    /// Write a byte to the given register
    fn write_u8(&mut self, register: Register, val: u8) -> Result<(), TSL2591Error<E>> {
        trace!("write {:?} = {:#04x}", register, val);
        self.i2c.write(self.address, &[register.command(), val])?;

        Ok(())
    }

    /// Write a little endian word starting at the given register
    fn write_u16(&mut self, register: Register, val: u16) -> Result<(), TSL2591Error<E>> {
        trace!("write {:?} = {:#06x}", register, val);
        let [lo, hi] = val.to_le_bytes();
        self.i2c.write(self.address, &[register.command(), lo, hi])?;

        Ok(())
    }

    /// Raw register read, for diagnostics.
    pub fn read_register(&mut self, register: Register) -> Result<u8, TSL2591Error<E>> {
        self.read_u8(register)
    }

    /// Raw register write. Writing [`Register::Control`] or
    /// [`Register::Enable`] this way bypasses the cached configuration.
    pub fn write_register(&mut self, register: Register, val: u8) -> Result<(), TSL2591Error<E>> {
        self.write_u8(register, val)
    }

    pub fn read_register_word(&mut self, register: Register) -> Result<u16, TSL2591Error<E>> {
        self.read_u16(register)
    }

    pub fn write_register_word(
        &mut self,
        register: Register,
        val: u16,
    ) -> Result<(), TSL2591Error<E>> {
        self.write_u16(register, val)
    }

    /// Send a special function command.
    pub fn write_special(&mut self, function: SpecialFunction) -> Result<(), TSL2591Error<E>> {
        trace!("special function {:?}", function);
        self.i2c
            .write(self.address, &[TSL2591_SPECIAL_FUNCTION | function as u8])?;

        Ok(())
    }

    /// Reset the chip. It comes back with 100ms and 1x.
    pub fn device_reset(&mut self) -> Result<(), TSL2591Error<E>> {
        self.write_u8(Register::Control, TSL2591_CONTROL_SRESET)?;
        self.config = SensorConfig::default();
        debug!("device reset");

        Ok(())
    }

    pub fn package_id(&mut self) -> Result<u8, TSL2591Error<E>> {
        self.read_u8(Register::PackageId)
    }

    pub fn device_id(&mut self) -> Result<u8, TSL2591Error<E>> {
        self.read_u8(Register::DeviceId)
    }

    // Configuration

    /// Write integration time and gain together; the control register
    /// holds both in a single byte.
    fn write_config(&mut self, config: SensorConfig) -> Result<(), TSL2591Error<E>> {
        self.write_u8(Register::Control, config.control_byte())?;
        self.config = config;
        debug!(
            "configured integration time {} and gain {}",
            config.integration_time, config.gain
        );

        Ok(())
    }

    /// Set the integration time on the sensor
    pub fn set_timing(&mut self, integration_time: IntegrationTime) -> Result<(), TSL2591Error<E>> {
        let config = SensorConfig {
            integration_time,
            ..self.config
        };
        self.write_config(config)
    }

    /// Set the Gain for the sensor
    pub fn set_gain(&mut self, gain: Gain) -> Result<(), TSL2591Error<E>> {
        let config = SensorConfig {
            gain,
            ..self.config
        };
        self.write_config(config)
    }

    /// The last integration time written, not read back from the device.
    pub fn get_timing(&self) -> IntegrationTime {
        self.config.integration_time
    }

    /// The last gain written, not read back from the device.
    pub fn get_gain(&self) -> Gain {
        self.config.gain
    }

    pub fn config(&self) -> SensorConfig {
        self.config
    }

    /// Read the integration time code back from the control register.
    pub fn read_timing(&mut self) -> Result<u8, TSL2591Error<E>> {
        let control = self.read_u8(Register::Control)?;
        Ok(control & TSL2591_CONTROL_TIME_MASK)
    }

    /// Power on the device with ALS enabled.
    pub fn enable(&mut self) -> Result<(), TSL2591Error<E>> {
        debug!("power on");
        self.write_u8(
            Register::Enable,
            TSL2591_ENABLE_POWERON | TSL2591_ENABLE_AEN,
        )
    }

    /// Disables the device putting it in a low power mode.
    pub fn disable(&mut self) -> Result<(), TSL2591Error<E>> {
        debug!("power off");
        self.write_u8(Register::Enable, TSL2591_ENABLE_POWEROFF)
    }

    pub fn dump_registers(&mut self) -> Result<RegisterDump, TSL2591Error<E>> {
        Ok(RegisterDump {
            enable: self.read_u8(Register::Enable)?,
            control: self.read_u8(Register::Control)?,
            als_low_threshold: self.read_u16(Register::AiltL)?,
            als_high_threshold: self.read_u16(Register::AihtL)?,
            no_persist_low_threshold: self.read_u16(Register::NpailtL)?,
            no_persist_high_threshold: self.read_u16(Register::NpaihtL)?,
            persist_filter: self.read_u8(Register::PersistFilter)?,
            package_id: self.read_u8(Register::PackageId)?,
            device_id: self.read_u8(Register::DeviceId)?,
            status: self.read_u8(Register::Status)?,
            chan0: self.read_u16(Register::Chan0Low)?,
            chan1: self.read_u16(Register::Chan1Low)?,
        })
    }

    // Measurements

    /// Enable, wait out the integration and read both channels. Leaves the
    /// device powered on.
    fn integrate(&mut self) -> Result<RawReading, TSL2591Error<E>> {
        self.enable()?;
        self.delay
            .delay_ms(self.config.integration_time.settle_millis());

        let status = self.read_u8(Register::Status)?;
        if status & TSL2591_STATUS_AVALID == 0 {
            warn!("Integration not complete, status = {:#04x}", status);
            if log_enabled!(Level::Debug) {
                if let Ok(dump) = self.dump_registers() {
                    debug!("registers:\n{}", dump);
                }
            }
            return Err(TSL2591Error::IntegrationIncomplete { status });
        }

        let full = self.read_u16(Register::Chan0Low)?;
        let infrared = self.read_u16(Register::Chan1Low)?;

        Ok(RawReading { full, infrared })
    }

    /// Run a full measurement cycle and return both raw channels.
    ///
    /// Blocks for the integration time plus the conversion latency. The
    /// device is disabled again before returning, on success or failure.
    pub fn get_full_luminosity(&mut self) -> Result<RawReading, TSL2591Error<E>> {
        let reading = self.integrate();
        let disabled = self.disable();

        match (reading, disabled) {
            (Ok(reading), Ok(())) => Ok(reading),
            (Ok(_), Err(err)) => Err(err),
            (Err(err), Ok(())) => Err(err),
            (Err(err), Err(disable_err)) => {
                warn!("Unable to disable sensor: {}", disable_err);
                Err(err)
            }
        }
    }

    /// Run a measurement cycle and project it on a single channel.
    pub fn get_luminosity(&mut self, channel: Channel) -> Result<i32, TSL2591Error<E>> {
        let reading = self.get_full_luminosity()?;
        Ok(reading.channel(channel))
    }

    /// Convert a reading using the current integration time and gain.
    pub fn lux(&self, reading: RawReading) -> f64 {
        calculate_lux(
            reading.full,
            reading.infrared,
            self.config.integration_time,
            self.config.gain,
        )
    }

    /// Run a measurement cycle and compute a lux value.
    pub fn read_lux(&mut self) -> Result<f64, TSL2591Error<E>> {
        let reading = self.get_full_luminosity()?;
        Ok(self.lux(reading))
    }
}
