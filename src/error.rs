use thiserror::Error;

pub type Result<T> = core::result::Result<T, SHTError>;

#[derive(Error, Debug)]
pub enum SHTError {
    #[error("Read I2C Error")]
    ReadI2CError,
    #[error("Write I2C Error")]
    WriteI2CError,
    #[error("Humidity bytes [{bytes_start:#x}, {bytes_end:#x}] expected {expected_checksum:#x} but got the checksum {calculated_checksum:#x}")]
    InvalidHumidityChecksumError {
        bytes_start: u8,
        bytes_end: u8,
        expected_checksum: u8,
        calculated_checksum: u8,
    },
    #[error("Temperature bytes [{bytes_start:#x}, {bytes_end:#x}] expected {expected_checksum:#x} but got the checksum {calculated_checksum:#x}")]
    InvalidTemperatureChecksumError {
        bytes_start: u8,
        bytes_end: u8,
        expected_checksum: u8,
        calculated_checksum: u8,
    },
    #[error("Status bytes [{bytes_start:#x}, {bytes_end:#x}] expected {expected_checksum:#x} but got the checksum {calculated_checksum:#x}")]
    InvalidStatusChecksumError {
        bytes_start: u8,
        bytes_end: u8,
        expected_checksum: u8,
        calculated_checksum: u8,
    },
    #[error("Device index {0} is out of range, expected 0 (0x44) or 1 (0x45)")]
    InvalidDeviceIndex(u8),
    #[cfg(feature = "linux")]
    #[error("Could not open I2C bus {path}")]
    OpenI2CError {
        path: String,
        #[source]
        source: linux_embedded_hal::i2cdev::linux::LinuxI2CError,
    },
}

impl SHTError {
    /// True when the bus transfer succeeded but the data failed CRC validation.
    /// These are worth retrying, everything else is an I/O or setup failure.
    pub fn is_checksum_error(&self) -> bool {
        matches!(
            self,
            SHTError::InvalidHumidityChecksumError { .. }
                | SHTError::InvalidTemperatureChecksumError { .. }
                | SHTError::InvalidStatusChecksumError { .. }
        )
    }
}
