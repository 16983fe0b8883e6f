use crate::command::Command;
use crate::error::Result;
use crate::{frame, Reading, TemperatureUnit, SHT31};
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;

/// Conversion time for a high repeatability measurement,
/// datasheet gives 12.5ms typical and 15ms max
pub const MEASUREMENT_WAIT_MS: u32 = 15;

pub trait Sht31Reader {
    /// Read the sensor readings
    fn read(&mut self) -> Result<Reading>;
}

impl<I2C, D> SHT31<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u32>,
{
    /// Starts a conversion and blocks until it should be done.
    /// There is no polling, a sensor slower than the max conversion time
    /// hands back garbage which fails validation.
    pub fn trigger_and_wait(&mut self) -> Result<()> {
        self.send(Command::TriggerMeasurement)?;
        self.wait_ms(MEASUREMENT_WAIT_MS);
        Ok(())
    }

    /// Triggers a measurement and reads it back, blocks for 15ms
    pub fn measure(&mut self, unit: TemperatureUnit) -> Result<Reading> {
        self.trigger_and_wait()?;

        let mut buffer = [0; 6];
        self.i2c_read(&mut buffer)?;
        let (temperature, humidity) = frame::decode_measurement(buffer)?;

        Ok(Reading::from_raw(temperature, humidity, unit))
    }
}

impl<I2C, D> Sht31Reader for SHT31<I2C, D>
where
    I2C: i2c::Write + i2c::Read,
    D: DelayMs<u32>,
{
    /// Measures using the sensor's default unit
    fn read(&mut self) -> Result<Reading> {
        self.measure(self.unit())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::SHTError;
    use crate::test::{init_transactions, RecordingDelay};
    use crate::{DeviceAddr, POWER_UP_DELAY_MS, RESET_DELAY_MS};
    use embedded_hal_mock::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const FRAME: [u8; 6] = [0x65, 0x58, 0x64, 0x84, 0x65, 0x6F];

    fn measurement(frame: [u8; 6]) -> [I2cTransaction; 2] {
        [
            I2cTransaction::write(0x44, vec![0x2C, 0x06]),
            I2cTransaction::read(0x44, frame.to_vec()),
        ]
    }

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-3, "{} != {}", a, b);
    }

    #[test]
    fn measure_celsius() {
        let mut expectations = init_transactions(0x44);
        expectations.extend(measurement(FRAME));
        let i2c = I2cMock::new(&expectations);

        let mut sensor = SHT31::from_index(i2c, RecordingDelay::default(), 0).unwrap();
        let reading = sensor.measure(TemperatureUnit::Celsius).unwrap();
        assert_close(reading.temperature, 24.27795);
        assert_close(reading.humidity, 51.71740);

        let (mut i2c, delay) = sensor.close();
        assert_eq!(
            delay.waits,
            vec![POWER_UP_DELAY_MS, RESET_DELAY_MS, MEASUREMENT_WAIT_MS]
        );
        i2c.done();
    }

    #[test]
    fn read_uses_default_unit() {
        let mut expectations = init_transactions(0x44);
        expectations.extend(measurement(FRAME));
        expectations.extend(measurement(FRAME));
        expectations.extend(measurement(FRAME));
        let i2c = I2cMock::new(&expectations);

        let mut sensor = SHT31::new(i2c, RecordingDelay::default(), DeviceAddr::AD0)
            .unwrap()
            .with_unit(TemperatureUnit::Fahrenheit);

        let reading = sensor.read().unwrap();
        assert_close(reading.temperature, 75.70032);
        assert_close(reading.humidity, 51.71740);
        assert_close(sensor.read_temperature().unwrap(), 75.70032);
        assert_close(sensor.read_humidity().unwrap(), 51.71740);

        let (mut i2c, _) = sensor.close();
        i2c.done();
    }

    #[test]
    fn corrupt_frame_is_an_error() {
        let mut corrupt = FRAME;
        corrupt[5] ^= 0xFF;

        let mut expectations = init_transactions(0x44);
        expectations.extend(measurement(corrupt));
        expectations.extend(measurement(FRAME));
        let i2c = I2cMock::new(&expectations);

        let mut sensor = SHT31::from_index(i2c, RecordingDelay::default(), 0).unwrap();
        let err = sensor.measure(TemperatureUnit::Celsius).unwrap_err();
        assert!(err.is_checksum_error());
        assert!(matches!(err, SHTError::InvalidHumidityChecksumError { .. }));

        // Checksum failures leave the sensor usable
        assert!(sensor.measure(TemperatureUnit::Celsius).is_ok());

        let (mut i2c, _) = sensor.close();
        i2c.done();
    }

    #[test]
    fn trigger_failure_skips_the_wait() {
        let mut expectations = init_transactions(0x44);
        expectations.push(
            I2cTransaction::write(0x44, vec![0x2C, 0x06]).with_error(
                embedded_hal_mock::MockError::Io(std::io::ErrorKind::Other),
            ),
        );
        let i2c = I2cMock::new(&expectations);

        let mut sensor = SHT31::from_index(i2c, RecordingDelay::default(), 0).unwrap();
        assert!(matches!(
            sensor.measure(TemperatureUnit::Celsius),
            Err(SHTError::WriteI2CError)
        ));

        let (mut i2c, delay) = sensor.close();
        assert_eq!(delay.waits, vec![POWER_UP_DELAY_MS, RESET_DELAY_MS]);
        i2c.done();
    }
}
