#[cfg(not(target_os = "linux"))]
fn main() {
    env_logger::init();
    log::error!("lux-probe needs a Linux I2C bus");
}

#[cfg(target_os = "linux")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use log::info;
    use lux_probe::{delay::Delay, selftest, Configuration};
    use rppal::i2c::I2c;
    use tsl_2591::TSL2591Sensor;

    env_logger::init();

    // Optional path to a JSON configuration file, defaults otherwise.
    let cfg = match std::env::args().nth(1) {
        Some(path) => Configuration::from_file(path)?,
        None => Configuration::default(),
    };
    info!("Using {:?}", cfg);

    let i2c = I2c::with_bus(cfg.bus)?;
    let mut sensor = TSL2591Sensor::with_config(i2c, Delay, cfg.address, cfg.sensor_config()?)?;

    println!("{}\n", sensor.dump_registers()?);

    let sample = selftest::measure(&mut sensor, cfg.retries)?;
    println!("{}\n", sample);

    if cfg.sweep {
        println!("*******Test Routine*******");
        for sample in selftest::sweep(&mut sensor, cfg.retries)? {
            println!("{}", sample);
        }
    }

    Ok(())
}
