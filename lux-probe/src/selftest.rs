//! Exercise a sensor across its settings and report what it sees.
use std::fmt::{self, Debug};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{info, warn};
use tsl_2591::{
    Gain, IntegrationTime, RawReading, SensorConfig, TSL2591Error, TSL2591Sensor,
};

/// One measurement and the settings it was taken with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub config: SensorConfig,
    pub reading: RawReading,
    pub lux: f64,
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Lux = {:.6}  full = {}  ir = {}  integration time = {}  gain = {}",
            self.lux,
            self.reading.full,
            self.reading.infrared,
            self.config.integration_time,
            self.config.gain
        )
    }
}

/// The settings visited by [`sweep`]: every integration time at 1x, then
/// every gain at 100ms.
pub fn sweep_configs() -> Vec<SensorConfig> {
    let times = IntegrationTime::ALL.iter().map(|t| SensorConfig {
        integration_time: *t,
        gain: Gain::LOW,
    });
    let gains = Gain::ALL.iter().map(|g| SensorConfig {
        integration_time: IntegrationTime::Time100ms,
        gain: *g,
    });

    times.chain(gains).collect()
}

/// Take one measurement with the current settings, retrying incomplete
/// integrations up to `retries` more times.
pub fn measure<I2C, D, E>(
    sensor: &mut TSL2591Sensor<I2C, D>,
    retries: u8,
) -> Result<Sample, TSL2591Error<E>>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    E: Debug,
{
    let mut attempt = 0;
    loop {
        match sensor.get_full_luminosity() {
            Ok(reading) => {
                return Ok(Sample {
                    config: sensor.config(),
                    reading,
                    lux: sensor.lux(reading),
                })
            }
            Err(TSL2591Error::IntegrationIncomplete { status }) if attempt < retries => {
                attempt += 1;
                warn!(
                    "integration incomplete (status {:#04x}), retry {}/{}",
                    status, attempt, retries
                );
            }
            Err(err) => return Err(err),
        }
    }
}

/// Measure once per sweep setting, then put the sensor back on the
/// settings it had before.
pub fn sweep<I2C, D, E>(
    sensor: &mut TSL2591Sensor<I2C, D>,
    retries: u8,
) -> Result<Vec<Sample>, TSL2591Error<E>>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    E: Debug,
{
    let initial = sensor.config();
    let mut samples = Vec::new();

    for config in sweep_configs() {
        sensor.set_gain(config.gain)?;
        sensor.set_timing(config.integration_time)?;

        let sample = measure(sensor, retries)?;
        info!("{}", sample);
        samples.push(sample);
    }

    sensor.set_gain(initial.gain)?;
    sensor.set_timing(initial.integration_time)?;

    Ok(samples)
}
