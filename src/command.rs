//! FINS command frame builders.
//!
//! Each command struct wraps a [`FinsHeader`] (which already carries the
//! command code) together with whatever addressing/payload fields that
//! particular command needs, and exposes `to_bytes()` to produce the wire
//! frame ready to hand to a [`Transport`](crate::transport::Transport).

use crate::address::Address;
use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, NodeAddress};
use crate::response::{encode_real, ClockReading};

/// Memory area read (0x0101). Used for both word and bit reads — which one
/// depends on whether `address` carries a bit index.
pub const CMD_MEMORY_AREA_READ: u16 = 0x0101;
/// Memory area write (0x0102).
pub const CMD_MEMORY_AREA_WRITE: u16 = 0x0102;
/// Memory area fill (0x0103).
pub const CMD_MEMORY_AREA_FILL: u16 = 0x0103;
/// Multiple memory area read (0x0104).
pub const CMD_MULTIPLE_MEMORY_AREA_READ: u16 = 0x0104;
/// Memory area transfer (0x0105).
pub const CMD_MEMORY_AREA_TRANSFER: u16 = 0x0105;
/// Controller data read (0x0501).
pub const CMD_CONTROLLER_DATA_READ: u16 = 0x0501;
/// Controller status read (0x0601).
pub const CMD_CONTROLLER_STATUS_READ: u16 = 0x0601;
/// Run (0x0401).
pub const CMD_RUN: u16 = 0x0401;
/// Stop (0x0402).
pub const CMD_STOP: u16 = 0x0402;
/// Clock read (0x0720).
pub const CMD_CLOCK_READ: u16 = 0x0720;
/// Clock write (0x0721).
pub const CMD_CLOCK_WRITE: u16 = 0x0721;

/// Maximum words a single read/write command may carry in one frame.
pub const MAX_WORDS_PER_COMMAND: u16 = 999;

/// Maximum number of addresses a single `MultipleMemoryAreaRead` may carry.
pub const MAX_MULTI_READ_ADDRESSES: usize = 32;

/// PLC operating mode for the `RUN` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlcMode {
    /// Program mode (halted, editable).
    Program = 0x02,
    /// Monitor mode (running, online edits allowed).
    Monitor = 0x03,
    /// Run mode (running, no online edits).
    Run = 0x04,
}

fn header_bytes(header: FinsHeader) -> Vec<u8> {
    header.to_bytes().to_vec()
}

/// `MEMORY_AREA_READ` — reads `count` words, or `count` bits when `address`
/// carries a bit index.
#[derive(Debug, Clone)]
pub struct ReadCommand {
    header: FinsHeader,
    address: Address,
    count: u16,
}

impl ReadCommand {
    /// Builds a new read command.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` if `count` is zero or exceeds
    /// [`MAX_WORDS_PER_COMMAND`].
    pub fn new(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        address: Address,
        count: u16,
    ) -> Result<Self> {
        if count == 0 || count > MAX_WORDS_PER_COMMAND {
            return Err(FinsError::invalid_address(format!(
                "read count {count} must be between 1 and {MAX_WORDS_PER_COMMAND}"
            )));
        }
        Ok(Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_MEMORY_AREA_READ),
            address,
            count,
        })
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        bytes.extend_from_slice(&self.address.to_wire());
        bytes.extend_from_slice(&self.count.to_be_bytes());
        bytes
    }
}

/// `MEMORY_AREA_WRITE` — writes a raw payload (already in the area's native
/// wire form: big-endian words for word addresses, one byte per bit for bit
/// addresses) starting at `address`.
#[derive(Debug, Clone)]
pub struct WriteCommand {
    header: FinsHeader,
    address: Address,
    count: u16,
    payload: Vec<u8>,
}

impl WriteCommand {
    /// Builds a word-write command from a slice of 16-bit values.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` if `values` is empty or exceeds
    /// [`MAX_WORDS_PER_COMMAND`].
    pub fn words(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        address: Address,
        values: &[u16],
    ) -> Result<Self> {
        if values.is_empty() || values.len() > MAX_WORDS_PER_COMMAND as usize {
            return Err(FinsError::invalid_address(format!(
                "write word count {} must be between 1 and {MAX_WORDS_PER_COMMAND}",
                values.len()
            )));
        }
        let mut payload = Vec::with_capacity(values.len() * 2);
        for value in values {
            payload.extend_from_slice(&value.to_be_bytes());
        }
        Ok(Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_MEMORY_AREA_WRITE),
            address,
            count: values.len() as u16,
            payload,
        })
    }

    /// Builds a single-bit write command.
    pub fn bit(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        address: Address,
        value: bool,
    ) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_MEMORY_AREA_WRITE),
            address,
            count: 1,
            payload: vec![if value { 0x01 } else { 0x00 }],
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        bytes.extend_from_slice(&self.address.to_wire());
        bytes.extend_from_slice(&self.count.to_be_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}

/// `MEMORY_AREA_FILL` — fills `count` words starting at `address` with
/// `value`.
#[derive(Debug, Clone)]
pub struct FillCommand {
    header: FinsHeader,
    address: Address,
    count: u16,
    value: u16,
}

impl FillCommand {
    /// Builds a new fill command.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` if `count` is zero or exceeds
    /// [`MAX_WORDS_PER_COMMAND`].
    pub fn new(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        address: Address,
        count: u16,
        value: u16,
    ) -> Result<Self> {
        if count == 0 || count > MAX_WORDS_PER_COMMAND {
            return Err(FinsError::invalid_address(format!(
                "fill count {count} must be between 1 and {MAX_WORDS_PER_COMMAND}"
            )));
        }
        Ok(Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_MEMORY_AREA_FILL),
            address,
            count,
            value,
        })
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        bytes.extend_from_slice(&self.address.to_wire());
        bytes.extend_from_slice(&self.count.to_be_bytes());
        bytes.extend_from_slice(&self.value.to_be_bytes());
        bytes
    }
}

/// `MULTIPLE_MEMORY_AREA_READ` — reads one word from each of up to
/// [`MAX_MULTI_READ_ADDRESSES`] addresses in a single round trip.
#[derive(Debug, Clone)]
pub struct MultipleReadCommand {
    header: FinsHeader,
    addresses: Vec<Address>,
}

impl MultipleReadCommand {
    /// Builds a new multi-read command.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` if `addresses` is empty or
    /// exceeds [`MAX_MULTI_READ_ADDRESSES`].
    pub fn new(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        addresses: Vec<Address>,
    ) -> Result<Self> {
        if addresses.is_empty() {
            return Err(FinsError::invalid_address("address list must not be empty"));
        }
        if addresses.len() > MAX_MULTI_READ_ADDRESSES {
            return Err(FinsError::invalid_address(format!(
                "at most {MAX_MULTI_READ_ADDRESSES} addresses allowed per multi-read, got {}",
                addresses.len()
            )));
        }
        Ok(Self {
            header: FinsHeader::new_command(
                destination,
                source,
                sid,
                CMD_MULTIPLE_MEMORY_AREA_READ,
            ),
            addresses,
        })
    }

    /// The addresses this command reads, in order.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        for address in &self.addresses {
            bytes.extend_from_slice(&address.to_wire());
        }
        bytes
    }
}

/// `MEMORY_AREA_TRANSFER` — copies `count` words from `source_address` to
/// `destination_address`.
#[derive(Debug, Clone)]
pub struct TransferCommand {
    header: FinsHeader,
    source_address: Address,
    destination_address: Address,
    count: u16,
}

impl TransferCommand {
    /// Builds a new transfer command.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::InvalidAddress` if `count` is zero or exceeds
    /// [`MAX_WORDS_PER_COMMAND`].
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        source_address: Address,
        destination_address: Address,
        count: u16,
    ) -> Result<Self> {
        if count == 0 || count > MAX_WORDS_PER_COMMAND {
            return Err(FinsError::invalid_address(format!(
                "transfer count {count} must be between 1 and {MAX_WORDS_PER_COMMAND}"
            )));
        }
        Ok(Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_MEMORY_AREA_TRANSFER),
            source_address,
            destination_address,
            count,
        })
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        bytes.extend_from_slice(&self.source_address.to_wire());
        bytes.extend_from_slice(&self.destination_address.to_wire());
        bytes.extend_from_slice(&self.count.to_be_bytes());
        bytes
    }
}

/// `RUN` — sets the PLC to the given operating mode.
#[derive(Debug, Clone)]
pub struct RunCommand {
    header: FinsHeader,
    mode: PlcMode,
}

impl RunCommand {
    /// Builds a new run command.
    pub fn new(destination: NodeAddress, source: NodeAddress, sid: u8, mode: PlcMode) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_RUN),
            mode,
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        // Program area code 0xFFFF means "no program area change requested".
        bytes.extend_from_slice(&[0xFF, 0xFF, self.mode as u8]);
        bytes
    }
}

/// `STOP` — sets the PLC to program (stopped) mode.
#[derive(Debug, Clone)]
pub struct StopCommand {
    header: FinsHeader,
}

impl StopCommand {
    /// Builds a new stop command.
    pub fn new(destination: NodeAddress, source: NodeAddress, sid: u8) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_STOP),
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        header_bytes(self.header)
    }
}

/// `CONTROLLER_DATA_READ` — requests the PLC's model and version strings.
#[derive(Debug, Clone)]
pub struct ControllerDataReadCommand {
    header: FinsHeader,
}

impl ControllerDataReadCommand {
    /// Builds a new controller data read command.
    pub fn new(destination: NodeAddress, source: NodeAddress, sid: u8) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_CONTROLLER_DATA_READ),
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        header_bytes(self.header)
    }
}

/// `CONTROLLER_STATUS_READ` — requests the PLC's run/program/error flags.
#[derive(Debug, Clone)]
pub struct ControllerStatusReadCommand {
    header: FinsHeader,
}

impl ControllerStatusReadCommand {
    /// Builds a new controller status read command.
    pub fn new(destination: NodeAddress, source: NodeAddress, sid: u8) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_CONTROLLER_STATUS_READ),
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        header_bytes(self.header)
    }
}

/// `CLOCK_READ` — requests the PLC's current clock.
#[derive(Debug, Clone)]
pub struct ClockReadCommand {
    header: FinsHeader,
}

impl ClockReadCommand {
    /// Builds a new clock read command.
    pub fn new(destination: NodeAddress, source: NodeAddress, sid: u8) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_CLOCK_READ),
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        header_bytes(self.header)
    }
}

/// `CLOCK_WRITE` — sets the PLC's clock.
#[derive(Debug, Clone)]
pub struct ClockWriteCommand {
    header: FinsHeader,
    reading: ClockReading,
}

impl ClockWriteCommand {
    /// Builds a new clock write command.
    pub fn new(
        destination: NodeAddress,
        source: NodeAddress,
        sid: u8,
        reading: ClockReading,
    ) -> Self {
        Self {
            header: FinsHeader::new_command(destination, source, sid, CMD_CLOCK_WRITE),
            reading,
        }
    }

    /// Serializes the command to its wire frame.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = header_bytes(self.header);
        let yy = (self.reading.year % 100) as u8;
        bytes.extend_from_slice(&[
            yy,
            self.reading.month,
            self.reading.day,
            self.reading.hour,
            self.reading.minute,
            self.reading.second,
            self.reading.day_of_week,
        ]);
        bytes
    }
}

/// Encodes an `f32` as two write-ready words (used by `Session::write_real`).
pub(crate) fn real_to_words(value: f32) -> [u16; 2] {
    encode_real(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryArea;

    fn dest() -> NodeAddress {
        NodeAddress::new(0, 10, 0).unwrap()
    }
    fn src() -> NodeAddress {
        NodeAddress::new(0, 1, 0).unwrap()
    }

    #[test]
    fn test_read_command_bytes() {
        let address = Address::word(MemoryArea::DM, 0x0001);
        let cmd = ReadCommand::new(dest(), src(), 0x01, address, 10).unwrap();
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x01, 0x01]);
        assert_eq!(&bytes[12..16], &[0x82, 0x00, 0x01, 0x00]);
        assert_eq!(&bytes[16..18], &[0x00, 0x0A]);
    }

    #[test]
    fn test_read_command_rejects_zero_count() {
        let address = Address::word(MemoryArea::DM, 1);
        assert!(ReadCommand::new(dest(), src(), 1, address, 0).is_err());
    }

    #[test]
    fn test_read_command_rejects_excess_count() {
        let address = Address::word(MemoryArea::DM, 1);
        assert!(ReadCommand::new(dest(), src(), 1, address, MAX_WORDS_PER_COMMAND + 1).is_err());
    }

    #[test]
    fn test_write_command_words_bytes() {
        let address = Address::word(MemoryArea::DM, 200);
        let cmd = WriteCommand::words(dest(), src(), 0x01, address, &[0x1234, 0x5678]).unwrap();
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x01, 0x02]);
        assert_eq!(&bytes[16..18], &[0x00, 0x02]);
        assert_eq!(&bytes[18..22], &[0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn test_write_command_bit() {
        let address = Address::bit(MemoryArea::CIO, 0, 5).unwrap();
        let cmd = WriteCommand::bit(dest(), src(), 0x01, address, true);
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[12..16], &[0x30, 0x00, 0x00, 0x05]);
        assert_eq!(&bytes[18..], &[0x01]);
    }

    #[test]
    fn test_fill_command_bytes() {
        let address = Address::word(MemoryArea::DM, 100);
        let cmd = FillCommand::new(dest(), src(), 0x01, address, 50, 0x0000).unwrap();
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x01, 0x03]);
        assert_eq!(&bytes[16..18], &[0x00, 0x32]);
    }

    #[test]
    fn test_multiple_read_command_rejects_empty() {
        assert!(MultipleReadCommand::new(dest(), src(), 1, vec![]).is_err());
    }

    #[test]
    fn test_multiple_read_command_rejects_excess() {
        let addresses = (0..33)
            .map(|i| Address::word(MemoryArea::DM, i))
            .collect::<Vec<_>>();
        assert!(MultipleReadCommand::new(dest(), src(), 1, addresses).is_err());
    }

    #[test]
    fn test_multiple_read_command_bytes() {
        let addresses = vec![
            Address::word(MemoryArea::DM, 0),
            Address::word(MemoryArea::DM, 100),
        ];
        let cmd = MultipleReadCommand::new(dest(), src(), 1, addresses).unwrap();
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x01, 0x04]);
        assert_eq!(bytes.len(), 12 + 4 + 4);
    }

    #[test]
    fn test_run_command_bytes() {
        let cmd = RunCommand::new(dest(), src(), 1, PlcMode::Monitor);
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x04, 0x01]);
        assert_eq!(&bytes[12..], &[0xFF, 0xFF, PlcMode::Monitor as u8]);
    }

    #[test]
    fn test_stop_command_bytes() {
        let cmd = StopCommand::new(dest(), src(), 1);
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x04, 0x02]);
        assert_eq!(bytes.len(), 12);
    }

    #[test]
    fn test_clock_read_command_bytes() {
        let cmd = ClockReadCommand::new(dest(), src(), 1);
        assert_eq!(&cmd.to_bytes()[10..12], &[0x07, 0x20]);
    }

    #[test]
    fn test_clock_write_command_bytes() {
        let reading = ClockReading {
            year: 2024,
            month: 3,
            day: 15,
            hour: 14,
            minute: 30,
            second: 0,
            day_of_week: 5,
        };
        let cmd = ClockWriteCommand::new(dest(), src(), 1, reading);
        let bytes = cmd.to_bytes();
        assert_eq!(&bytes[10..12], &[0x07, 0x21]);
        assert_eq!(&bytes[12..], &[24, 3, 15, 14, 30, 0, 5]);
    }
}
