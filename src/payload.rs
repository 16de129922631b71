//! # Payload Reassembly Seam
//!
//! Trait abstraction over the per-data-type payload processor: FEC
//! regeneration of the data channel, bit-error scoring of the voice
//! channel, and extraction of the embedded source/destination callsigns.
//! The DCH/VCH bit plumbing is an external collaborator; the control layer
//! drives it per frame and reads back identity and error counts.

use crate::ysf::protocol::Callsign;

/// Payload reassembly collaborator
///
/// The `process_*_data` methods regenerate the data channel in place and
/// return whether reassembly succeeded; a `false` return degrades the frame
/// to a non-regenerable pass-through without ending the session. The
/// `process_*_audio` methods return the number of erroneous payload bits
/// found in the voice channel.
pub trait PayloadProcessor: Send {
    /// Drop all per-call reassembly state
    fn reset(&mut self);

    /// Set the uplink (repeater) callsign inserted into relayed headers
    fn set_uplink(&mut self, callsign: &str);

    /// Set the downlink (repeater) callsign inserted into relayed headers
    fn set_downlink(&mut self, callsign: &str);

    /// Process a header or terminator frame
    fn process_header(&mut self, frame: &mut [u8]) -> bool;

    /// Process the data channel of a V/D mode 1 frame
    fn process_vd_mode1_data(&mut self, frame: &mut [u8], frame_number: u8) -> bool;

    /// Score the voice channel of a V/D mode 1 frame, returning error bits
    fn process_vd_mode1_audio(&mut self, frame: &mut [u8]) -> u32;

    /// Process the data channel of a V/D mode 2 frame
    fn process_vd_mode2_data(&mut self, frame: &mut [u8], frame_number: u8) -> bool;

    /// Score the voice channel of a V/D mode 2 frame, returning error bits
    fn process_vd_mode2_audio(&mut self, frame: &mut [u8]) -> u32;

    /// Process a full-rate data frame
    fn process_data_fr_mode_data(&mut self, frame: &mut [u8], frame_number: u8) -> bool;

    /// Score a full-rate voice frame, returning error bits
    fn process_voice_fr_mode_audio(&mut self, frame: &mut [u8]) -> u32;

    /// Source callsign recovered from the current call, once known
    fn source(&self) -> Option<Callsign>;

    /// Destination callsign recovered from the current call, once known
    fn dest(&self) -> Option<Callsign>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct Inner {
        header_valid: bool,
        data_valid: bool,
        audio_errors: u32,
        source: Option<Callsign>,
        dest: Option<Callsign>,
        resets: usize,
        uplink: String,
        downlink: String,
        audio_calls: usize,
        data_calls: usize,
    }

    /// Scripted payload processor for testing
    ///
    /// Clones share state, so tests can keep a handle while the control
    /// layer owns the boxed collaborator.
    #[derive(Clone, Default)]
    pub struct ScriptedPayload {
        inner: Arc<Mutex<Inner>>,
    }

    impl ScriptedPayload {
        pub fn new() -> Self {
            let payload = Self::default();
            payload.set_valid(true);
            payload
        }

        /// Set the result returned by all `process_*_data` / header calls
        pub fn set_valid(&self, valid: bool) {
            let mut inner = self.inner.lock().unwrap();
            inner.header_valid = valid;
            inner.data_valid = valid;
        }

        /// Set the error-bit count returned by all `process_*_audio` calls
        pub fn set_audio_errors(&self, errors: u32) {
            self.inner.lock().unwrap().audio_errors = errors;
        }

        pub fn set_source(&self, source: Option<Callsign>) {
            self.inner.lock().unwrap().source = source;
        }

        pub fn set_dest(&self, dest: Option<Callsign>) {
            self.inner.lock().unwrap().dest = dest;
        }

        pub fn reset_count(&self) -> usize {
            self.inner.lock().unwrap().resets
        }

        pub fn audio_call_count(&self) -> usize {
            self.inner.lock().unwrap().audio_calls
        }

        pub fn data_call_count(&self) -> usize {
            self.inner.lock().unwrap().data_calls
        }

        pub fn uplink(&self) -> String {
            self.inner.lock().unwrap().uplink.clone()
        }

        pub fn downlink(&self) -> String {
            self.inner.lock().unwrap().downlink.clone()
        }
    }

    impl PayloadProcessor for ScriptedPayload {
        fn reset(&mut self) {
            self.inner.lock().unwrap().resets += 1;
        }

        fn set_uplink(&mut self, callsign: &str) {
            self.inner.lock().unwrap().uplink = callsign.to_string();
        }

        fn set_downlink(&mut self, callsign: &str) {
            self.inner.lock().unwrap().downlink = callsign.to_string();
        }

        fn process_header(&mut self, _frame: &mut [u8]) -> bool {
            self.inner.lock().unwrap().header_valid
        }

        fn process_vd_mode1_data(&mut self, _frame: &mut [u8], _frame_number: u8) -> bool {
            let mut inner = self.inner.lock().unwrap();
            inner.data_calls += 1;
            inner.data_valid
        }

        fn process_vd_mode1_audio(&mut self, _frame: &mut [u8]) -> u32 {
            let mut inner = self.inner.lock().unwrap();
            inner.audio_calls += 1;
            inner.audio_errors
        }

        fn process_vd_mode2_data(&mut self, _frame: &mut [u8], _frame_number: u8) -> bool {
            let mut inner = self.inner.lock().unwrap();
            inner.data_calls += 1;
            inner.data_valid
        }

        fn process_vd_mode2_audio(&mut self, _frame: &mut [u8]) -> u32 {
            let mut inner = self.inner.lock().unwrap();
            inner.audio_calls += 1;
            inner.audio_errors
        }

        fn process_data_fr_mode_data(&mut self, _frame: &mut [u8], _frame_number: u8) -> bool {
            let mut inner = self.inner.lock().unwrap();
            inner.data_calls += 1;
            inner.data_valid
        }

        fn process_voice_fr_mode_audio(&mut self, _frame: &mut [u8]) -> u32 {
            let mut inner = self.inner.lock().unwrap();
            inner.audio_calls += 1;
            inner.audio_errors
        }

        fn source(&self) -> Option<Callsign> {
            self.inner.lock().unwrap().source
        }

        fn dest(&self) -> Option<Callsign> {
            self.inner.lock().unwrap().dest
        }
    }
}
