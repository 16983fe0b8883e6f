/// Commands understood by the sensor in single shot operation
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub enum Command {
    SoftReset,
    ReadStatus,
    HeaterOn,
    HeaterOff,
    /// High repeatability measurement with clock stretching enabled
    TriggerMeasurement,
}

impl Command {
    /// The 16 bit command code as listed in the datasheet
    pub const fn code(self) -> u16 {
        match self {
            Command::SoftReset => 0x30A2,
            Command::ReadStatus => 0xF32D,
            Command::HeaterOn => 0x306D,
            Command::HeaterOff => 0x3066,
            Command::TriggerMeasurement => 0x2C06,
        }
    }

    /// Big endian wire representation, MSB is sent first
    pub const fn encode(self) -> [u8; 2] {
        self.code().to_be_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Command::SoftReset, [0x30, 0xA2])]
    #[case(Command::ReadStatus, [0xF3, 0x2D])]
    #[case(Command::HeaterOn, [0x30, 0x6D])]
    #[case(Command::HeaterOff, [0x30, 0x66])]
    #[case(Command::TriggerMeasurement, [0x2C, 0x06])]
    fn encode(#[case] command: Command, #[case] expected: [u8; 2]) {
        assert_eq!(command.encode(), expected);
        assert_eq!(u16::from_be_bytes(command.encode()), command.code());
    }
}
