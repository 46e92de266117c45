use std::thread;
use std::time::Duration;

/// Empty struct that provides delay functionality on top of `thread::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct Delay;

impl embedded_hal::delay::DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)))
    }
}
