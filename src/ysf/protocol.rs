//! # YSF Protocol Constants and Types
//!
//! Core protocol definitions for System Fusion (YSF) frames as they cross
//! the modem interface.

use std::fmt;

/// Length of the over-the-air YSF frame in bytes (encoded FICH + payload)
pub const YSF_FRAME_LENGTH_BYTES: usize = 120;

/// Modem frame length: tag(1) + reserved(1) + encoded frame
pub const MODEM_FRAME_LENGTH: usize = YSF_FRAME_LENGTH_BYTES + 2;

/// YSF frame synchronization pattern, written over the first five bytes of
/// the encoded region of every outbound frame
pub const YSF_SYNC_BYTES: [u8; 5] = [0xD4, 0x71, 0xC9, 0x63, 0x4D];

/// Width of a YSF callsign field in bytes
pub const YSF_CALLSIGN_LENGTH: usize = 10;

/// Fixed-width display placeholder for an unresolved callsign
pub const UNKNOWN_CALLSIGN: &str = "??????????";

/// Modem frame tag (byte 0 of a modem frame)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameTag {
    /// Frame carries call data
    Data = 0x01,

    /// The modem lost frame synchronization mid-call
    Lost = 0x02,

    /// End of transmission
    EndOfTransmission = 0x03,
}

impl FrameTag {
    /// Parse a raw tag byte
    ///
    /// # Returns
    ///
    /// * `Option<FrameTag>` - The tag, or `None` for an unrecognized byte
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x01 => Some(FrameTag::Data),
            0x02 => Some(FrameTag::Lost),
            0x03 => Some(FrameTag::EndOfTransmission),
            _ => None,
        }
    }
}

/// FICH frame indicator (FI field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameIndicator {
    /// Call setup header, first frame of a transmission
    Header = 0x00,

    /// Communications channel frame (voice/data)
    Communications = 0x01,

    /// Call terminator, last frame of a transmission
    Terminator = 0x02,

    /// Test frame
    Test = 0x03,
}

impl FrameIndicator {
    /// Parse the raw 2-bit FI field value
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(FrameIndicator::Header),
            0x01 => Some(FrameIndicator::Communications),
            0x02 => Some(FrameIndicator::Terminator),
            0x03 => Some(FrameIndicator::Test),
            _ => None,
        }
    }
}

/// FICH call mode (CM field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    /// Group (CQ) call, addressed to everyone
    Group = 0x00,

    /// Individual call, addressed to a single station
    Individual = 0x03,
}

impl CallMode {
    /// Parse the raw CM field value
    ///
    /// Anything other than the group value addresses a specific station, so
    /// it is treated as an individual call.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            0x00 => CallMode::Group,
            _ => CallMode::Individual,
        }
    }
}

/// FICH data type (DT field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Voice/data mode 1 (V/D mode 1)
    VdMode1 = 0x00,

    /// Full-rate data mode
    DataFullRate = 0x01,

    /// Voice/data mode 2 (V/D mode 2)
    VdMode2 = 0x02,

    /// Full-rate voice mode
    VoiceFullRate = 0x03,
}

impl DataType {
    /// Parse the raw DT field value
    ///
    /// # Returns
    ///
    /// * `Option<DataType>` - The data type, or `None` for a value outside
    ///   the defined range (no bit-error scoring is applied to such frames)
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0x00 => Some(DataType::VdMode1),
            0x01 => Some(DataType::DataFullRate),
            0x02 => Some(DataType::VdMode2),
            0x03 => Some(DataType::VoiceFullRate),
            _ => None,
        }
    }
}

/// Fixed-width YSF callsign field
///
/// Callsigns on the air are always ten bytes, space padded. The control
/// layer keeps owned copies for the lifetime of a call; they are dropped at
/// call cleanup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Callsign([u8; YSF_CALLSIGN_LENGTH]);

impl Callsign {
    /// Create a callsign from text, space padded or truncated to ten bytes
    pub fn new(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Create a callsign from raw bytes, space padded or truncated to ten bytes
    pub fn from_bytes(raw: &[u8]) -> Self {
        let mut field = [b' '; YSF_CALLSIGN_LENGTH];
        let len = raw.len().min(YSF_CALLSIGN_LENGTH);
        field[..len].copy_from_slice(&raw[..len]);
        Callsign(field)
    }

    /// The synthetic all-call destination used for group calls
    pub fn all_call() -> Self {
        Callsign::new("ALL")
    }

    /// Raw ten-byte field
    pub fn as_bytes(&self) -> &[u8; YSF_CALLSIGN_LENGTH] {
        &self.0
    }
}

impl fmt::Display for Callsign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            // Callsign fields are ASCII; anything else renders as '.'
            let c = if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Stamp the YSF frame sync pattern over the head of an encoded frame
///
/// Stateless transform applied to the encoded region (the bytes after the
/// two-byte modem tag) before any outbound relay.
pub fn add_sync(frame: &mut [u8]) {
    if frame.len() >= YSF_SYNC_BYTES.len() {
        frame[..YSF_SYNC_BYTES.len()].copy_from_slice(&YSF_SYNC_BYTES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_constants() {
        assert_eq!(YSF_FRAME_LENGTH_BYTES, 120);
        assert_eq!(MODEM_FRAME_LENGTH, 122);
        assert_eq!(YSF_CALLSIGN_LENGTH, 10);
        assert_eq!(UNKNOWN_CALLSIGN.len(), YSF_CALLSIGN_LENGTH);
    }

    #[test]
    fn test_frame_tag_from_raw() {
        assert_eq!(FrameTag::from_raw(0x01), Some(FrameTag::Data));
        assert_eq!(FrameTag::from_raw(0x02), Some(FrameTag::Lost));
        assert_eq!(FrameTag::from_raw(0x03), Some(FrameTag::EndOfTransmission));
        assert_eq!(FrameTag::from_raw(0x00), None);
        assert_eq!(FrameTag::from_raw(0xFF), None);
    }

    #[test]
    fn test_frame_indicator_from_raw() {
        assert_eq!(FrameIndicator::from_raw(0x00), Some(FrameIndicator::Header));
        assert_eq!(FrameIndicator::from_raw(0x01), Some(FrameIndicator::Communications));
        assert_eq!(FrameIndicator::from_raw(0x02), Some(FrameIndicator::Terminator));
        assert_eq!(FrameIndicator::from_raw(0x03), Some(FrameIndicator::Test));
        assert_eq!(FrameIndicator::from_raw(0x04), None);
    }

    #[test]
    fn test_call_mode_from_raw() {
        assert_eq!(CallMode::from_raw(0x00), CallMode::Group);
        assert_eq!(CallMode::from_raw(0x03), CallMode::Individual);
        // Reserved values address a specific station
        assert_eq!(CallMode::from_raw(0x01), CallMode::Individual);
        assert_eq!(CallMode::from_raw(0x02), CallMode::Individual);
    }

    #[test]
    fn test_data_type_from_raw() {
        assert_eq!(DataType::from_raw(0x00), Some(DataType::VdMode1));
        assert_eq!(DataType::from_raw(0x01), Some(DataType::DataFullRate));
        assert_eq!(DataType::from_raw(0x02), Some(DataType::VdMode2));
        assert_eq!(DataType::from_raw(0x03), Some(DataType::VoiceFullRate));
        assert_eq!(DataType::from_raw(0x04), None);
    }

    #[test]
    fn test_callsign_padding() {
        let cs = Callsign::new("G4KLX");
        assert_eq!(cs.as_bytes(), b"G4KLX     ");
        assert_eq!(cs.to_string(), "G4KLX     ");
    }

    #[test]
    fn test_callsign_truncation() {
        let cs = Callsign::new("VERYLONGCALLSIGN");
        assert_eq!(cs.as_bytes(), b"VERYLONGCA");
    }

    #[test]
    fn test_callsign_all_call() {
        assert_eq!(Callsign::all_call().as_bytes(), b"ALL       ");
        assert_eq!(Callsign::all_call().to_string(), "ALL       ");
    }

    #[test]
    fn test_callsign_from_bytes_non_ascii() {
        let cs = Callsign::from_bytes(&[0xFF, b'A', b'B']);
        assert_eq!(cs.to_string(), ".AB       ");
    }

    #[test]
    fn test_add_sync() {
        let mut frame = [0u8; YSF_FRAME_LENGTH_BYTES];
        add_sync(&mut frame);
        assert_eq!(&frame[..5], &YSF_SYNC_BYTES);
        assert!(frame[5..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_add_sync_short_buffer_is_noop() {
        let mut frame = [0u8; 3];
        add_sync(&mut frame);
        assert_eq!(frame, [0u8; 3]);
    }
}
