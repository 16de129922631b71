//! # Network Relay Module
//!
//! Trait abstraction over the network side of the gateway (reflector or
//! remote repeater link). The socket handling itself lives in the host; the
//! control layer only needs to pull inbound frames, push outbound frames
//! with call addressing, and reset the link's addressing state between
//! calls.

use bytes::Bytes;

use crate::ysf::protocol::Callsign;

/// Network transport collaborator
///
/// `read` is polled once per clock tick by the control layer. Frames cross
/// this interface in modem format: tag(1) + reserved(1) + 120-byte encoded
/// region.
pub trait YsfNetwork: Send {
    /// Pull the next inbound frame, if one is pending
    fn read(&mut self) -> Option<Bytes>;

    /// Send one frame toward the network
    ///
    /// # Arguments
    ///
    /// * `source` - Resolved source callsign, if known yet
    /// * `dest` - Resolved destination callsign, if known yet
    /// * `payload` - The 120-byte encoded frame region (without the modem tag)
    /// * `is_end` - True for the end-of-transmission frame
    fn write(
        &mut self,
        source: Option<&Callsign>,
        dest: Option<&Callsign>,
        payload: &[u8],
        is_end: bool,
    );

    /// Clear the link's per-call addressing state
    fn reset(&mut self);
}
