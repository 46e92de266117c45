pub mod configuration;
pub mod delay;
pub mod selftest;

pub use configuration::Configuration;
