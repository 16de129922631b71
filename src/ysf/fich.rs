//! # FICH Decoding Seam
//!
//! The Frame Information Channel Header (FICH) carries the per-frame control
//! fields of a YSF transmission. The bit-level codec (Golay/interleaving/CRC)
//! is an external collaborator; this module defines the decoded form the
//! control layer works with and the trait the codec implements.

use super::protocol::{CallMode, DataType, FrameIndicator};

/// Decoded FICH fields for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fich {
    /// Frame indicator (header / communications / terminator / test)
    pub frame_indicator: FrameIndicator,

    /// Group or individual call
    pub call_mode: CallMode,

    /// Payload data type; `None` when the raw field is unrecognized
    pub data_type: Option<DataType>,

    /// Frame number within the superframe (FN field)
    pub frame_number: u8,

    /// Frame total (FT field)
    pub frame_total: u8,

    /// Manual-relay/busy flag (MR field)
    pub busy: bool,
}

/// Bit-level FICH codec collaborator
///
/// Implementations decode and re-encode the FICH section of the 120-byte
/// encoded frame region. Decode failure (checksum or structure invalid) is
/// reported as `None`; the control layer then relays the frame as an erasure.
pub trait FichCodec: Send {
    /// Decode the FICH from an encoded frame region
    fn decode(&self, frame: &[u8]) -> Option<Fich>;

    /// Re-encode FICH fields into an encoded frame region
    ///
    /// Used after the control layer mutates fields (e.g. setting the busy
    /// flag on a duplex relay) so the outgoing frame carries them.
    fn encode(&self, fich: &Fich, frame: &mut [u8]);
}
