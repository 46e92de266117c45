//! Runs with a debug logger installed, which makes a failed integration dump
//! the registers before the sensor is disabled. Kept apart from
//! `integration.rs` since the logger is process wide.
use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use tsl_2591::{TSL2591Error, TSL2591Sensor};

const ADDR: u8 = 0x29;
const COMMAND_BIT: u8 = 0xA0;

fn init_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

fn byte(register: u8, val: u8) -> I2cTrans {
    I2cTrans::write_read(ADDR, vec![COMMAND_BIT | register], vec![val])
}

fn word(register: u8, val: u16) -> I2cTrans {
    I2cTrans::write_read(
        ADDR,
        vec![COMMAND_BIT | register],
        val.to_le_bytes().to_vec(),
    )
}

fn power_on() -> I2cTrans {
    I2cTrans::write(ADDR, vec![COMMAND_BIT, 0x03])
}

fn power_off() -> I2cTrans {
    I2cTrans::write(ADDR, vec![COMMAND_BIT, 0x00])
}

fn new(transactions: &[I2cTrans]) -> TSL2591Sensor<I2cMock, NoopDelay> {
    let mut tr = vec![
        I2cTrans::write(ADDR, vec![COMMAND_BIT | 0x01, 0x00]),
        I2cTrans::write(ADDR, vec![COMMAND_BIT | 0x01, 0x00]),
        power_off(),
    ];
    tr.extend_from_slice(transactions);

    TSL2591Sensor::new(I2cMock::new(&tr), NoopDelay::new()).unwrap()
}

#[test]
fn incomplete_integration_dumps_registers_then_disables() {
    init_logger();
    assert!(log::log_enabled!(log::Level::Debug));

    let mut sensor = new(&[
        power_on(),
        byte(0x13, 0x00),
        // register dump
        byte(0x00, 0x03),
        byte(0x01, 0x00),
        word(0x04, 0),
        word(0x06, 0),
        word(0x08, 0),
        word(0x0A, 0),
        byte(0x0C, 0),
        byte(0x11, 0x00),
        byte(0x12, 0x50),
        byte(0x13, 0x00),
        word(0x14, 0),
        word(0x16, 0),
        power_off(),
    ]);

    assert!(matches!(
        sensor.get_full_luminosity(),
        Err(TSL2591Error::IntegrationIncomplete { status: 0 })
    ));
    sensor.destroy().0.done();
}

#[test]
fn failing_register_dump_still_disables() {
    init_logger();

    let mut sensor = new(&[
        power_on(),
        byte(0x13, 0x00),
        byte(0x00, 0x03),
        byte(0x01, 0x00).with_error(ErrorKind::Other),
        power_off(),
    ]);

    assert!(matches!(
        sensor.get_full_luminosity(),
        Err(TSL2591Error::IntegrationIncomplete { status: 0 })
    ));
    sensor.destroy().0.done();
}
