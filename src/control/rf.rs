//! # RF Session State Machine
//!
//! Consumes frames recovered from the air by the modem, drives the payload
//! and FICH collaborators, and relays each frame toward the network and
//! (in duplex mode) back out through the output queue.

use tracing::{info, warn};

use crate::ysf::fich::Fich;
use crate::ysf::protocol::{
    add_sync, DataType, FrameIndicator, FrameTag, MODEM_FRAME_LENGTH,
};

use super::{NetState, RfState, YsfControl};

/// Payload bit budget of one V/D mode 1 frame
const VD_MODE1_BITS: u32 = 235;

/// Payload bit budget of one V/D mode 2 frame
const VD_MODE2_BITS: u32 = 135;

/// Payload bit budget of one full-rate voice frame
const VOICE_FR_BITS: u32 = 720;

impl YsfControl {
    /// Process one frame delivered by the modem
    ///
    /// # Arguments
    ///
    /// * `data` - Modem frame buffer (tag + reserved + encoded region); it
    ///   is retagged and re-encoded in place for relay, and never retained
    ///   beyond this call
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the frame was consumed as part of an active
    ///   call; `false` for ignored and call-terminating frames
    pub fn process_modem_frame(&mut self, data: &mut [u8]) -> bool {
        if data.len() < MODEM_FRAME_LENGTH {
            warn!("modem frame too short: {} bytes", data.len());
            return false;
        }

        if data[0] == FrameTag::Lost as u8 {
            if self.rf_state == RfState::Audio {
                info!(
                    "RF transmission lost, {:.1} seconds, BER: {:.1}%",
                    self.rf_seconds(),
                    self.rf_ber()
                );
                self.end_rf_call();
            }
            return false;
        }

        let fich = self.codec.decode(&data[2..]);

        if let Some(fich) = fich {
            if self.rf_state == RfState::Listening {
                // A stray terminator never opens a call
                if fich.frame_indicator == FrameIndicator::Terminator {
                    return false;
                }
                self.start_rf_call();
            }
        }

        // Frames outside an active call are dropped
        if self.rf_state != RfState::Audio {
            return false;
        }

        match fich {
            Some(fich) => match fich.frame_indicator {
                FrameIndicator::Header => {
                    self.process_rf_header(data, fich);
                    true
                }
                FrameIndicator::Terminator => {
                    self.process_rf_terminator(data, fich);
                    false
                }
                FrameIndicator::Communications | FrameIndicator::Test => {
                    self.process_rf_data(data, fich);
                    true
                }
            },
            None => {
                self.process_rf_erasure(data);
                true
            }
        }
    }

    /// Enter the Audio state for a newly heard call
    fn start_rf_call(&mut self) {
        self.rf_frames = 0;
        self.rf_errs = 0;
        // Seeded at 1 so a header-only call can't divide by zero
        self.rf_bits = 1;
        self.rf_timeout.start();
        self.holdoff.stop();
        self.payload.reset();

        if let Some(capture) = self.capture.as_mut() {
            if let Err(e) = capture.open() {
                warn!("failed to open frame capture: {}", e);
            }
        }

        self.rf_state = RfState::Audio;
    }

    /// Header frame: reassemble call setup data and relay
    fn process_rf_header(&mut self, data: &mut [u8], fich: Fich) {
        add_sync(&mut data[2..]);
        self.rf_frames += 1;

        // Decode failure is tolerated; the relay continues regardless
        let valid = self.payload.process_header(&mut data[2..]);

        data[0] = FrameTag::Data as u8;
        data[1] = 0x00;
        self.write_network(data);

        if self.duplex {
            let mut relay = fich;
            relay.busy = true;
            self.codec.encode(&relay, &mut data[2..]);
            self.write_queue_rf(data);
        }

        self.capture_frame(data);

        self.routing
            .resolve(fich.call_mode, valid, self.payload.source(), self.payload.dest());

        let source = self.routing.source_display();
        let dest = self.routing.dest_display();
        self.display
            .report_call(&source, &dest, crate::display::Direction::Rf);
        info!("received RF header from {} to {}", source, dest);
    }

    /// Terminator frame: relay, log call statistics, close the session
    fn process_rf_terminator(&mut self, data: &mut [u8], fich: Fich) {
        add_sync(&mut data[2..]);
        self.rf_frames += 1;

        // Result unused: the call ends either way
        let _ = self.payload.process_header(&mut data[2..]);

        data[0] = FrameTag::EndOfTransmission as u8;
        data[1] = 0x00;
        self.write_network(data);

        if self.duplex {
            let mut relay = fich;
            relay.busy = true;
            self.codec.encode(&relay, &mut data[2..]);
            self.write_queue_rf(data);
        }

        self.capture_frame(data);

        info!(
            "received RF end of transmission, {:.1} seconds, BER: {:.1}%",
            self.rf_seconds(),
            self.rf_ber()
        );
        self.end_rf_call();
    }

    /// Voice/data frame: reassemble, score bit errors, resolve identity, relay
    fn process_rf_data(&mut self, data: &mut [u8], fich: Fich) {
        add_sync(&mut data[2..]);
        self.rf_frames += 1;

        let frame = &mut data[2..];
        let mut valid = true;

        match fich.data_type {
            Some(DataType::VdMode1) => {
                valid = self.payload.process_vd_mode1_data(frame, fich.frame_number);
                self.rf_errs += self.payload.process_vd_mode1_audio(frame);
                self.rf_bits += VD_MODE1_BITS;
            }
            Some(DataType::VdMode2) => {
                valid = self.payload.process_vd_mode2_data(frame, fich.frame_number);
                self.rf_errs += self.payload.process_vd_mode2_audio(frame);
                self.rf_bits += VD_MODE2_BITS;
            }
            Some(DataType::DataFullRate) => {
                valid = self.payload.process_data_fr_mode_data(frame, fich.frame_number);
            }
            Some(DataType::VoiceFullRate) => {
                // The first frame after the header is irregular; relay it
                // but keep it out of the error estimate
                if fich.frame_number != 0 || fich.frame_total != 1 {
                    self.rf_errs += self.payload.process_voice_fr_mode_audio(frame);
                    self.rf_bits += VOICE_FR_BITS;
                }
                valid = false;
            }
            None => {
                // Unknown data type: no reassembly, no scoring
            }
        }

        let changed = self.routing.resolve(
            fich.call_mode,
            valid,
            self.payload.source(),
            self.payload.dest(),
        );

        if changed {
            let source = self.routing.source_display();
            let dest = self.routing.dest_display();
            self.display
                .report_call(&source, &dest, crate::display::Direction::Rf);
            info!("received RF data from {} to {}", source, dest);
        }

        data[0] = FrameTag::Data as u8;
        data[1] = 0x00;
        self.write_network(data);

        if self.duplex {
            let mut relay = fich;
            relay.busy = true;
            self.codec.encode(&relay, &mut data[2..]);
            self.write_queue_rf(data);
        }

        self.capture_frame(data);
    }

    /// Undecodable frame: forward unmodified to preserve stream timing
    fn process_rf_erasure(&mut self, data: &mut [u8]) {
        add_sync(&mut data[2..]);
        self.rf_frames += 1;

        data[0] = FrameTag::Data as u8;
        data[1] = 0x00;
        self.write_network(data);

        // No FICH re-encode: the frame could not be decoded
        if self.duplex {
            self.write_queue_rf(data);
        }

        self.capture_frame(data);
    }

    /// Shared end-of-RF-call cleanup for terminator, loss and reset paths
    pub(super) fn end_rf_call(&mut self) {
        self.rf_state = RfState::Listening;

        self.rf_timeout.stop();
        self.payload.reset();

        // Owned identity copies are dropped here, never reused across calls
        self.routing.clear();

        if let Some(capture) = self.capture.as_mut() {
            capture.close();
        }

        if self.net_state == NetState::Idle {
            self.display.clear_call();

            if let Some(network) = self.network.as_mut() {
                network.reset();
            }
        }
    }

    fn capture_frame(&mut self, data: &[u8]) {
        if let Some(capture) = self.capture.as_mut() {
            if let Err(e) = capture.write_frame(&data[2..]) {
                warn!("failed to write frame capture: {}", e);
            }
        }
    }

    fn rf_seconds(&self) -> f32 {
        self.rf_frames as f32 / 10.0
    }

    fn rf_ber(&self) -> f32 {
        self.rf_errs as f32 * 100.0 / self.rf_bits as f32
    }
}
