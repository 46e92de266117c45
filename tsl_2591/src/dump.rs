use std::fmt;

/// Snapshot of the interesting registers, for diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterDump {
    pub enable: u8,
    pub control: u8,
    pub als_low_threshold: u16,
    pub als_high_threshold: u16,
    pub no_persist_low_threshold: u16,
    pub no_persist_high_threshold: u16,
    pub persist_filter: u8,
    pub package_id: u8,
    pub device_id: u8,
    pub status: u8,
    pub chan0: u16,
    pub chan1: u16,
}

impl fmt::Display for RegisterDump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Enable = {}   CONTROL(CONFIG) = {}", self.enable, self.control)?;
        writeln!(f, "Threshold Registers:")?;
        writeln!(
            f,
            "AILT = {}   AIHT = {}",
            self.als_low_threshold, self.als_high_threshold
        )?;
        writeln!(
            f,
            "NAILT = {} NAIHT = {}",
            self.no_persist_low_threshold, self.no_persist_high_threshold
        )?;
        writeln!(f, "Persistance Filter = {}", self.persist_filter)?;
        writeln!(
            f,
            "Package ID = {} Device ID = {}",
            self.package_id, self.device_id
        )?;
        writeln!(f, "Status register = {}", self.status)?;
        write!(f, "Chan 0 = {}   Chan 1 = {}", self.chan0, self.chan1)
    }
}
