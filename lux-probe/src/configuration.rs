use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use thiserror::Error;
use tsl_2591::{Gain, IntegrationTime, SensorConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported integration time {0}ms (100 to 600, by steps of 100)")]
    IntegrationTime(u16),
    #[error("unsupported gain {0}x (1, 25, 428 or 9876)")]
    Gain(u16),
}

/// Probe settings, every field can be omitted from the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Configuration {
    /// I2C bus number, `/dev/i2c-<bus>`
    pub bus: u8,
    pub address: u8,
    pub integration_time_ms: u16,
    pub gain: u16,
    /// Run the integration time and gain sweep after the first reading.
    pub sweep: bool,
    /// Extra attempts when an integration does not complete in time.
    pub retries: u8,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            bus: 1,
            address: tsl_2591::registers::TSL2591_ADDR,
            integration_time_ms: 100,
            gain: 1,
            sweep: true,
            retries: 1,
        }
    }
}

impl Configuration {
    pub fn from_file<P: AsRef<Path>>(p: P) -> Result<Configuration, ConfigError> {
        let cfg: Configuration = read_json_from_file(p)?;
        // fail early on bad values
        cfg.sensor_config()?;

        Ok(cfg)
    }

    pub fn sensor_config(&self) -> Result<SensorConfig, ConfigError> {
        let integration_time = IntegrationTime::from_millis(self.integration_time_ms)
            .ok_or(ConfigError::IntegrationTime(self.integration_time_ms))?;
        let gain = Gain::from_multiplier(self.gain).ok_or(ConfigError::Gain(self.gain))?;

        Ok(SensorConfig {
            integration_time,
            gain,
        })
    }
}

fn read_json_from_file<P: AsRef<Path>, T: serde::de::DeserializeOwned>(
    path: P,
) -> Result<T, ConfigError> {
    // Open the file in read-only mode with buffer.
    log::debug!("Reading file: {:?}", path.as_ref());
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let t = serde_json::from_reader(reader)?;

    Ok(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg: Configuration = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, Configuration::default());
        assert_eq!(cfg.sensor_config().unwrap(), SensorConfig::default());
    }

    #[test]
    fn camel_case_keys() {
        let cfg: Configuration = serde_json::from_str(
            r#"{"bus": 0, "address": 41, "integrationTimeMs": 300, "gain": 428, "sweep": false}"#,
        )
        .unwrap();
        assert_eq!(cfg.bus, 0);
        assert!(!cfg.sweep);
        assert_eq!(cfg.retries, 1);
        assert_eq!(
            cfg.sensor_config().unwrap(),
            SensorConfig {
                integration_time: IntegrationTime::Time300ms,
                gain: Gain::HIGH,
            }
        );
    }

    #[test]
    fn rejects_unknown_settings() {
        let cfg: Configuration = serde_json::from_str(r#"{"integrationTimeMs": 250}"#).unwrap();
        assert!(matches!(
            cfg.sensor_config(),
            Err(ConfigError::IntegrationTime(250))
        ));

        let cfg: Configuration = serde_json::from_str(r#"{"gain": 2}"#).unwrap();
        assert!(matches!(cfg.sensor_config(), Err(ConfigError::Gain(2))));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Configuration::from_file("/nonexistent/lux-probe.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
