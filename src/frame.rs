use crate::error::{Result, SHTError};
use crate::Status;
use crc::{Algorithm, Crc};
use log::warn;

/// CRC-8 from section 4.12 of the datasheet, x^8 + x^5 + x^4 + 1 (0x131)
/// with the implicit top bit dropped
const CRC_ALGORITHM: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

const CRC: Crc<u8> = Crc::<u8>::new(&CRC_ALGORITHM);

/// Merges two bytes so the result is both, ex merge_bytes(0x20, 0x33) = 0x2033
pub(crate) fn merge_bytes(a: u8, b: u8) -> u16 {
    ((a as u16) << 8) | b as u16
}

/// Checksum of a single 16 bit word as the sensor computes it
pub fn crc8(value: u16) -> u8 {
    CRC.checksum(&value.to_be_bytes())
}

/// Err carries the calculated checksum
fn verify_word(msb: u8, lsb: u8, checksum: u8) -> core::result::Result<u16, u8> {
    let value = merge_bytes(msb, lsb);
    let calculated = crc8(value);
    if calculated == checksum {
        Ok(value)
    } else {
        Err(calculated)
    }
}

/// Splits a measurement frame into its raw temperature and humidity codes.
/// Both words must pass validation for either to be returned.
pub fn decode_measurement(buffer: [u8; 6]) -> Result<(u16, u16)> {
    let temperature = verify_word(buffer[0], buffer[1], buffer[2]).map_err(|calculated| {
        warn!("Temperature checksum mismatch in frame {:02x?}", buffer);
        SHTError::InvalidTemperatureChecksumError {
            bytes_start: buffer[0],
            bytes_end: buffer[1],
            expected_checksum: buffer[2],
            calculated_checksum: calculated,
        }
    })?;

    let humidity = verify_word(buffer[3], buffer[4], buffer[5]).map_err(|calculated| {
        warn!("Humidity checksum mismatch in frame {:02x?}", buffer);
        SHTError::InvalidHumidityChecksumError {
            bytes_start: buffer[3],
            bytes_end: buffer[4],
            expected_checksum: buffer[5],
            calculated_checksum: calculated,
        }
    })?;

    Ok((temperature, humidity))
}

/// Validates a status register frame, the checksum covers the unmasked word
pub fn decode_status_word(buffer: [u8; 3]) -> Result<Status> {
    verify_word(buffer[0], buffer[1], buffer[2])
        .map(Status::new)
        .map_err(|calculated| {
            warn!("Status checksum mismatch in frame {:02x?}", buffer);
            SHTError::InvalidStatusChecksumError {
                bytes_start: buffer[0],
                bytes_end: buffer[1],
                expected_checksum: buffer[2],
                calculated_checksum: calculated,
            }
        })
}

/// Whether the heater is on according to a status register frame
pub fn decode_status(buffer: [u8; 3]) -> Result<bool> {
    decode_status_word(buffer).map(|status| status.heater_on())
}
