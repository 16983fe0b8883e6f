use crate::error::{Result, SHTError};
use crate::{DeviceAddr, SHT31};
use linux_embedded_hal::{Delay, I2cdev};

/// Path of the i2c-dev character device for a bus
pub fn bus_path(bus: u8) -> String {
    format!("/dev/i2c-{}", bus)
}

impl SHT31<I2cdev, Delay> {
    /// Opens `/dev/i2c-<bus>` and initializes the sensor at the given device index.
    /// Opening the device node usually needs root or membership in the `i2c` group.
    pub fn open(bus: u8, device_index: u8) -> Result<Self> {
        let address = DeviceAddr::try_from(device_index)?;
        let path = bus_path(bus);
        let i2c = I2cdev::new(&path).map_err(|source| SHTError::OpenI2CError { path, source })?;
        Self::new(i2c, Delay, address)
    }
}
