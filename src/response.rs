//! FINS response parsing and payload decoding.

use crate::error::{FinsError, Result};
use crate::header::{FinsHeader, FINS_HEADER_SIZE};

/// Minimum valid response size: the 12-byte header plus 2 response-code bytes.
pub const MIN_RESPONSE_SIZE: usize = FINS_HEADER_SIZE + 2;

/// A parsed FINS response frame.
#[derive(Debug, Clone)]
pub struct FinsResponse {
    header: FinsHeader,
    main_code: u8,
    sub_code: u8,
    data: Vec<u8>,
}

/// Decoded controller status (`get_status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerStatus {
    /// Bit 0 — the PLC is in run mode.
    pub run_mode: bool,
    /// Bit 1 — the PLC is in program mode.
    pub program_mode: bool,
    /// Bit 6 — a fatal error is present.
    pub fatal_error: bool,
    /// Bit 7 — a non-fatal error is present.
    pub non_fatal_error: bool,
}

/// Decoded controller identification data (`get_cpu_unit_data`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerData {
    /// ASCII model string, trimmed of trailing padding.
    pub controller_model: String,
    /// ASCII version string, trimmed of trailing padding.
    pub controller_version: String,
}

/// Decoded PLC clock reading (`read_clock`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    /// Full year (e.g. 2024).
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
    /// Day of month, 1-31.
    pub day: u8,
    /// Hour, 0-23.
    pub hour: u8,
    /// Minute, 0-59.
    pub minute: u8,
    /// Second, 0-59.
    pub second: u8,
    /// Day of week, 0-6.
    pub day_of_week: u8,
}

impl FinsResponse {
    /// Parses a response frame.
    ///
    /// # Errors
    ///
    /// Returns `FinsError::Read` if the frame is shorter than
    /// [`MIN_RESPONSE_SIZE`] or the header is malformed.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_RESPONSE_SIZE {
            return Err(FinsError::read(format!(
                "response too short: expected at least {MIN_RESPONSE_SIZE} bytes, got {}",
                data.len()
            )));
        }

        let header = FinsHeader::from_bytes(&data[..FINS_HEADER_SIZE])
            .map_err(|_| FinsError::read("malformed response header"))?;

        Ok(Self {
            header,
            main_code: data[FINS_HEADER_SIZE],
            sub_code: data[FINS_HEADER_SIZE + 1],
            data: data[MIN_RESPONSE_SIZE..].to_vec(),
        })
    }

    /// The parsed header.
    pub fn header(&self) -> FinsHeader {
        self.header
    }

    /// The main response code.
    pub fn main_code(&self) -> u8 {
        self.main_code
    }

    /// The sub response code.
    pub fn sub_code(&self) -> u8 {
        self.sub_code
    }

    /// The payload bytes following the two response-code bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `true` if both response codes are zero.
    pub fn is_success(&self) -> bool {
        self.main_code == 0x00 && self.sub_code == 0x00
    }

    /// Returns `Ok(())` on success, or `FinsError::Protocol` carrying both
    /// response codes otherwise. There is no leniency for any other
    /// (main, sub) pair — a non-(0,0) response is always a protocol error.
    pub fn check_protocol(&self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(FinsError::protocol(self.main_code, self.sub_code))
        }
    }

    /// Checks that the response's SID matches the request's.
    pub fn check_sid(&self, expected: u8) -> Result<()> {
        if self.header.sid == expected {
            Ok(())
        } else {
            Err(FinsError::read(format!(
                "SID mismatch: expected 0x{expected:02X}, received 0x{:02X}",
                self.header.sid
            )))
        }
    }

    /// Decodes the payload as a tight sequence of big-endian 16-bit words.
    pub fn to_words(&self) -> Result<Vec<u16>> {
        if self.data.len() % 2 != 0 {
            return Err(FinsError::read("payload length is not a whole number of words"));
        }
        Ok(self
            .data
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect())
    }

    /// Decodes the payload as a single bit value (non-zero byte = on).
    pub fn to_bit(&self) -> Result<bool> {
        self.data
            .first()
            .map(|&b| b != 0)
            .ok_or_else(|| FinsError::read("empty payload for bit read"))
    }

    /// Decodes the payload as a REAL (`f32`), applying the 16-bit word swap
    /// FINS uses for multi-word numeric types: given wire bytes `b0 b1 b2
    /// b3`, the value is interpreted as big-endian `f32` from `b2 b3 b0 b1`.
    pub fn to_real(&self) -> Result<f32> {
        if self.data.len() < 4 {
            return Err(FinsError::read("insufficient payload for REAL (need 4 bytes)"));
        }
        Ok(decode_real(&self.data[..4]))
    }

    /// Decodes the payload as controller status.
    pub fn to_status(&self) -> Result<ControllerStatus> {
        let byte = self
            .data
            .first()
            .copied()
            .ok_or_else(|| FinsError::read("empty payload for controller status"))?;
        Ok(ControllerStatus {
            run_mode: byte & 0x01 != 0,
            program_mode: byte & 0x02 != 0,
            fatal_error: byte & 0x40 != 0,
            non_fatal_error: byte & 0x80 != 0,
        })
    }

    /// Decodes the payload as controller identification data.
    pub fn to_controller_data(&self) -> Result<ControllerData> {
        if self.data.len() < 40 {
            return Err(FinsError::read(
                "insufficient payload for controller data (need 40 bytes)",
            ));
        }
        let model = ascii_trimmed(&self.data[0..20]);
        let version = ascii_trimmed(&self.data[20..40]);
        Ok(ControllerData {
            controller_model: model,
            controller_version: version,
        })
    }

    /// Decodes the payload as a clock reading: `YY MM DD hh mm ss DOW`.
    pub fn to_clock(&self) -> Result<ClockReading> {
        if self.data.len() < 7 {
            return Err(FinsError::read("insufficient payload for clock (need 7 bytes)"));
        }
        let yy = self.data[0] as u16;
        let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
        Ok(ClockReading {
            year,
            month: self.data[1],
            day: self.data[2],
            hour: self.data[3],
            minute: self.data[4],
            second: self.data[5],
            day_of_week: self.data[6],
        })
    }
}

fn ascii_trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}

/// Decodes 4 wire bytes `b0 b1 b2 b3` as an `f32`, applying FINS's REAL
/// word swap (the value is `f32::from_be_bytes([b2, b3, b0, b1])`).
pub(crate) fn decode_real(bytes: &[u8]) -> f32 {
    f32::from_be_bytes([bytes[2], bytes[3], bytes[0], bytes[1]])
}

/// Encodes an `f32` into two wire words, applying the inverse of
/// [`decode_real`]'s swap.
pub(crate) fn encode_real(value: f32) -> [u16; 2] {
    let b = value.to_be_bytes();
    let swapped = [b[2], b[3], b[0], b[1]];
    [
        u16::from_be_bytes([swapped[0], swapped[1]]),
        u16::from_be_bytes([swapped[2], swapped[3]]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::NodeAddress;

    fn sample_header_bytes(sid: u8, command: u16) -> Vec<u8> {
        FinsHeader::new_command(
            NodeAddress::new(0, 1, 0).unwrap(),
            NodeAddress::new(0, 0, 0).unwrap(),
            sid,
            command,
        )
        .to_bytes()
        .to_vec()
    }

    #[test]
    fn test_from_bytes_too_short() {
        assert!(FinsResponse::from_bytes(&[0u8; 10]).is_err());
    }

    #[test]
    fn test_is_success_strict() {
        let mut bytes = sample_header_bytes(1, 0x0101);
        bytes.extend_from_slice(&[0x00, 0x40]);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        assert!(!resp.is_success());
        assert!(resp.check_protocol().is_err());
    }

    #[test]
    fn test_check_protocol_success() {
        let mut bytes = sample_header_bytes(1, 0x0101);
        bytes.extend_from_slice(&[0x00, 0x00, 0x12, 0x34]);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        assert!(resp.check_protocol().is_ok());
        assert_eq!(resp.to_words().unwrap(), vec![0x1234]);
    }

    #[test]
    fn test_check_protocol_error_carries_codes() {
        let mut bytes = sample_header_bytes(1, 0x0101);
        bytes.extend_from_slice(&[0x01, 0x02]);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        match resp.check_protocol() {
            Err(FinsError::Protocol { main_code, sub_code }) => {
                assert_eq!(main_code, 0x01);
                assert_eq!(sub_code, 0x02);
            }
            other => panic!("expected Protocol error, got {other:?}"),
        }
    }

    #[test]
    fn test_check_sid() {
        let mut bytes = sample_header_bytes(7, 0x0101);
        bytes.extend_from_slice(&[0x00, 0x00]);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        assert!(resp.check_sid(7).is_ok());
        assert!(resp.check_sid(8).is_err());
    }

    #[test]
    fn test_to_status_bits() {
        let mut bytes = sample_header_bytes(1, 0x0601);
        bytes.extend_from_slice(&[0x00, 0x00, 0b1000_0001]);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        let status = resp.to_status().unwrap();
        assert!(status.run_mode);
        assert!(!status.program_mode);
        assert!(!status.fatal_error);
        assert!(status.non_fatal_error);
    }

    #[test]
    fn test_to_controller_data() {
        let mut bytes = sample_header_bytes(1, 0x0501);
        bytes.extend_from_slice(&[0x00, 0x00]);
        let mut model = b"CJ2M-CPU31".to_vec();
        model.resize(20, 0);
        let mut version = b"V2.10".to_vec();
        version.resize(20, 0);
        bytes.extend_from_slice(&model);
        bytes.extend_from_slice(&version);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        let data = resp.to_controller_data().unwrap();
        assert_eq!(data.controller_model, "CJ2M-CPU31");
        assert_eq!(data.controller_version, "V2.10");
    }

    #[test]
    fn test_to_clock() {
        let mut bytes = sample_header_bytes(1, 0x0720);
        bytes.extend_from_slice(&[0x00, 0x00]);
        bytes.extend_from_slice(&[24, 3, 15, 14, 30, 0, 5]);
        let resp = FinsResponse::from_bytes(&bytes).unwrap();
        let clock = resp.to_clock().unwrap();
        assert_eq!(clock.year, 2024);
        assert_eq!(clock.month, 3);
        assert_eq!(clock.day, 15);
        assert_eq!(clock.hour, 14);
        assert_eq!(clock.minute, 30);
        assert_eq!(clock.second, 0);
        assert_eq!(clock.day_of_week, 5);
    }

    #[test]
    fn test_real_roundtrip() {
        let words = encode_real(10.25);
        let mut bytes = vec![];
        bytes.extend_from_slice(&words[0].to_be_bytes());
        bytes.extend_from_slice(&words[1].to_be_bytes());
        assert_eq!(decode_real(&bytes), 10.25);
    }
}
