//! Blocking driver for the Sensirion SHT31 temperature and humidity sensor.
//!
//! The driver talks to the sensor through the `embedded-hal` 0.2 blocking I2C
//! traits, so any bus implementation works. With the `linux` feature enabled
//! [`SHT31::open`] opens `/dev/i2c-N` directly, which is what you want on a
//! Raspberry Pi or similar board.
//!
//! Every word read back from the sensor is checked against its CRC-8 before it
//! is converted, a failed check surfaces as an error and never as a zero reading.

pub mod command;
pub mod error;
pub mod frame;
#[cfg(feature = "linux")]
pub mod linux;
pub mod single_shot;

use command::Command;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;
use error::{Result, SHTError};
use log::{debug, trace};

pub mod prelude {
    pub use super::{
        command::Command, single_shot::Sht31Reader, DeviceAddr, Reading, Status, TemperatureUnit,
        SHT31,
    };
}

/// Time for the sensor to settle after the bus is opened
pub const POWER_UP_DELAY_MS: u32 = 50;
/// Time for the sensor to come back after a soft reset
pub const RESET_DELAY_MS: u32 = 50;

// 2**16
const TEMPERATURE_DENOM: f32 = 65536f32;
// 2**16 - 1
const HUMIDITY_DENOM: f32 = 65535f32;

// Constants used to convert values
const CELSIUS_PAIR: (f32, f32) = (45f32, 175f32);
const FAHRENHEIT_PAIR: (f32, f32) = (49f32, 315f32);

const HEATER_BIT: u16 = 1 << 13;
const STATUS_BITS_MASK: u16 = 0xFFFC;

/// The temperature and humidity sensor
///
/// Owns the bus for as long as it lives, call [`SHT31::close`] to get it back.
#[derive(Debug)]
pub struct SHT31<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    unit: TemperatureUnit,
}

/// Represents the reading gotten from the sensor
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    pub temperature: f32,
    pub humidity: f32,
}

/// The two supported I2C addresses
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum DeviceAddr {
    #[default]
    AD0 = 0x44,
    /// ADDR pin pulled high
    AD1 = 0x45,
}

impl TryFrom<u8> for DeviceAddr {
    type Error = SHTError;

    /// Maps a device index, 0 or 1, to its address
    fn try_from(index: u8) -> Result<Self> {
        match index {
            0 => Ok(DeviceAddr::AD0),
            1 => Ok(DeviceAddr::AD1),
            _ => Err(SHTError::InvalidDeviceIndex(index)),
        }
    }
}

/// Influences what the reading temperature numbers are
#[derive(Default, Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// The sensor's status register
#[derive(Default, Copy, Clone, Debug, Eq, PartialEq)]
pub struct Status(u16);

impl Status {
    pub fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// The word as it came off the bus
    pub fn raw(&self) -> u16 {
        self.0
    }

    /// Bits 0 and 1 are reserved
    pub fn masked(&self) -> u16 {
        self.0 & STATUS_BITS_MASK
    }

    pub fn heater_on(&self) -> bool {
        self.0 & HEATER_BIT != 0
    }
}

/// T = -45 + 175 * (raw / 2^16)
pub fn celsius(raw: u16) -> f32 {
    convert_temperature(raw, CELSIUS_PAIR)
}

/// T = -49 + 315 * (raw / 2^16)
pub fn fahrenheit(raw: u16) -> f32 {
    convert_temperature(raw, FAHRENHEIT_PAIR)
}

/// RH = 100 * (raw / (2^16 - 1)), not clamped
pub fn relative_humidity(raw: u16) -> f32 {
    100f32 * raw as f32 / HUMIDITY_DENOM
}

fn convert_temperature(raw: u16, (sub, mul): (f32, f32)) -> f32 {
    mul * (raw as f32 / TEMPERATURE_DENOM) - sub
}

impl Reading {
    /// Converts raw codes that already passed validation
    pub fn from_raw(temperature: u16, humidity: u16, unit: TemperatureUnit) -> Self {
        let temperature = match unit {
            TemperatureUnit::Celsius => celsius(temperature),
            TemperatureUnit::Fahrenheit => fahrenheit(temperature),
        };

        Reading {
            temperature,
            humidity: relative_humidity(humidity),
        }
    }
}

impl<I2C, D> SHT31<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u32>,
{
    /// Create a new sensor, resetting it and turning the heater off.
    /// If any step fails the bus is dropped along with the half built sensor.
    pub fn new(i2c: I2C, delay: D, address: DeviceAddr) -> Result<Self> {
        let mut sensor = Self {
            i2c,
            delay,
            address: address as u8,
            unit: TemperatureUnit::default(),
        };
        sensor.init()?;
        Ok(sensor)
    }

    /// Same as [`SHT31::new`] but picks the address from a device index
    pub fn from_index(i2c: I2C, delay: D, index: u8) -> Result<Self> {
        Self::new(i2c, delay, DeviceAddr::try_from(index)?)
    }

    fn init(&mut self) -> Result<()> {
        debug!("Initializing SHT31 at {:#x}", self.address);
        self.delay.delay_ms(POWER_UP_DELAY_MS);
        self.soft_reset()?;
        self.delay.delay_ms(RESET_DELAY_MS);
        self.heater_off()
    }

    /// Change the sensor's default temperature unit
    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// Change the sensor's default temperature unit
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn soft_reset(&mut self) -> Result<()> {
        self.send(Command::SoftReset)
    }

    pub fn heater_on(&mut self) -> Result<()> {
        self.send(Command::HeaterOn)
    }

    pub fn heater_off(&mut self) -> Result<()> {
        self.send(Command::HeaterOff)
    }

    pub fn set_heater(&mut self, on: bool) -> Result<()> {
        if on {
            self.heater_on()
        } else {
            self.heater_off()
        }
    }

    /// Reads the status register
    pub fn read_status(&mut self) -> Result<Status> {
        self.send(Command::ReadStatus)?;

        let mut buffer = [0; 3];
        self.i2c_read(&mut buffer)?;
        frame::decode_status_word(buffer)
    }

    /// Checks the status register for the heater bit
    pub fn is_heater_on(&mut self) -> Result<bool> {
        self.read_status().map(|status| status.heater_on())
    }

    /// Temperature in the default unit, performs a full measurement
    pub fn read_temperature(&mut self) -> Result<f32> {
        self.measure(self.unit).map(|reading| reading.temperature)
    }

    /// Relative humidity, performs a full measurement
    pub fn read_humidity(&mut self) -> Result<f32> {
        self.measure(self.unit).map(|reading| reading.humidity)
    }

    /// Gives back the bus and delay
    pub fn close(self) -> (I2C, D) {
        debug!("Releasing SHT31 at {:#x}", self.address);
        (self.i2c, self.delay)
    }

    pub(crate) fn send(&mut self, command: Command) -> Result<()> {
        debug!("Sending {:?} to {:#x}", command, self.address);
        self.i2c_write(&command.encode())
    }

    fn i2c_write(&mut self, bytes: &[u8]) -> Result<()> {
        match self.i2c.write(self.address, bytes) {
            Ok(res) => Ok(res),
            Err(_) => Err(SHTError::WriteI2CError),
        }
    }

    pub(crate) fn i2c_read(&mut self, buffer: &mut [u8]) -> Result<()> {
        match self.i2c.read(self.address, buffer) {
            Ok(res) => {
                trace!("Read {:02x?} from {:#x}", buffer, self.address);
                Ok(res)
            }
            Err(_) => Err(SHTError::ReadI2CError),
        }
    }

    pub(crate) fn wait_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
