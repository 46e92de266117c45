//! Conversion from raw channel counts to lux.
//!
//! There are many opinions on computing lux values, this one follows the
//! vendor application note as used by the Adafruit libraries:
//! https://github.com/adafruit/Adafruit_TSL2591_Library/blob/master/Adafruit_TSL2591.cpp
use crate::types::{Gain, IntegrationTime};

const TSL2591_LUX_DF: f64 = 408.0;
const TSL2591_LUX_COEFB: f64 = 1.64;
const TSL2591_LUX_COEFC: f64 = 0.59;
const TSL2591_LUX_COEFD: f64 = 0.86;

/// At 100ms the ADC saturates at 37888 counts, per data sheet.
const TSL2591_MAX_COUNT_100MS: u16 = 0x9400;
const TSL2591_MAX_COUNT: u16 = 0xFFFF;

/// Compute a lux value from the two channels.
///
/// Returns `0.0` when either channel sits on the saturation value for the
/// given integration time: the reading carries no usable information then.
pub fn calculate_lux(full: u16, ir: u16, integration_time: IntegrationTime, gain: Gain) -> f64 {
    lux_from_codes(full, ir, integration_time.code(), gain.code())
}

/// Same as [`calculate_lux`] but from raw control register codes, as read
/// back from the device. Unknown codes fall back to 100ms and 1x.
pub fn lux_from_codes(full: u16, ir: u16, integration_code: u8, gain_code: u8) -> f64 {
    let max_counts = if integration_code == IntegrationTime::Time100ms.code() {
        TSL2591_MAX_COUNT_100MS
    } else {
        TSL2591_MAX_COUNT
    };

    if full == max_counts || ir == max_counts {
        return 0.0;
    }

    let atime = IntegrationTime::from_code(integration_code)
        .map_or(100.0, |t| f64::from(t.millis()));
    let again = Gain::from_code(gain_code).map_or(1.0, |g| f64::from(g.multiplier()));

    let full = f64::from(full);
    let ir = f64::from(ir);

    // counts per lux
    let cpl = (atime * again) / TSL2591_LUX_DF;
    let lux1 = (full - (TSL2591_LUX_COEFB * ir)) / cpl;
    let lux2 = ((TSL2591_LUX_COEFC * full) - (TSL2591_LUX_COEFD * ir)) / cpl;

    lux1.max(lux2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn saturated_at_100ms() {
        for gain in Gain::ALL.iter() {
            assert_eq!(
                calculate_lux(0x9400, 0, IntegrationTime::Time100ms, *gain),
                0.0
            );
            assert_eq!(
                calculate_lux(10, 0x9400, IntegrationTime::Time100ms, *gain),
                0.0
            );
        }
    }

    #[test]
    fn saturated_above_100ms() {
        for gain in Gain::ALL.iter() {
            assert_eq!(
                calculate_lux(0xFFFF, 0, IntegrationTime::Time200ms, *gain),
                0.0
            );
        }
        // 0x9400 is a legitimate reading past 100ms
        assert!(calculate_lux(0x9400, 0, IntegrationTime::Time200ms, Gain::LOW) > 0.0);
    }

    #[test]
    fn picks_the_larger_estimate() {
        // cpl = 100 / 408, lux1 = 408, lux2 = 240.72
        assert_close(
            calculate_lux(100, 0, IntegrationTime::Time100ms, Gain::LOW),
            408.0,
        );

        // lux1 = (100 - 82) * 408 / 100 = 73.44
        // lux2 = (59 - 43) * 408 / 100 = 65.28
        assert_close(
            calculate_lux(100, 50, IntegrationTime::Time100ms, Gain::LOW),
            73.44,
        );

        // lux1 = (100 - 98.4) * 408 / 100 = 6.528
        // lux2 = (59 - 51.6) * 408 / 100 = 30.192
        assert_close(
            calculate_lux(100, 60, IntegrationTime::Time100ms, Gain::LOW),
            30.192,
        );
    }

    #[test]
    fn scales_with_time_and_gain() {
        // cpl = 600 * 428 / 408
        let expected = 1000.0 * 408.0 / (600.0 * 428.0);
        assert_close(
            calculate_lux(1000, 0, IntegrationTime::Time600ms, Gain::HIGH),
            expected,
        );
    }

    #[test]
    fn unknown_codes_fall_back_to_defaults() {
        let reference = calculate_lux(100, 0, IntegrationTime::Time100ms, Gain::LOW);
        assert_close(lux_from_codes(100, 0, 0x07, 0x40), reference);
        assert_close(lux_from_codes(100, 0, 0x00, 0x40), reference);
        // unknown integration code is not the 100ms one, saturation is at 0xFFFF
        assert_eq!(lux_from_codes(0xFFFF, 0, 0x07, 0x00), 0.0);
    }
}
