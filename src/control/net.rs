//! # Network Session State Machine
//!
//! Pulls frames from the network relay once per clock tick and feeds them
//! into the output queue for the modem. A watchdog force-ends the session
//! when the remote stream goes stale.

use tracing::{info, warn};

use crate::display::Direction;
use crate::ysf::protocol::{FrameTag, MODEM_FRAME_LENGTH, UNKNOWN_CALLSIGN};

use super::{NetState, RfState, YsfControl};

impl YsfControl {
    /// Pull at most one frame from the network collaborator
    pub(super) fn poll_network(&mut self) {
        let frame = {
            let Some(network) = self.network.as_mut() else {
                return;
            };

            match network.read() {
                Some(frame) => frame,
                None => return,
            }
        };

        if frame.len() < MODEM_FRAME_LENGTH {
            warn!("network frame too short: {} bytes", frame.len());
            return;
        }

        // Never start a network relay while an RF call is in progress
        if self.rf_state != RfState::Listening && self.net_state == NetState::Idle {
            return;
        }

        self.network_watchdog.start();

        if self.net_state == NetState::Idle {
            self.display
                .report_call(UNKNOWN_CALLSIGN, UNKNOWN_CALLSIGN, Direction::Network);
            info!(
                "received network data from {} to {}",
                UNKNOWN_CALLSIGN, UNKNOWN_CALLSIGN
            );

            self.net_timeout.start();
            self.holdoff.start();
            self.net_state = NetState::Audio;
            self.net_frames = 0;
        }

        self.net_frames += 1;
        self.write_queue_net(&frame);

        if frame[0] == FrameTag::EndOfTransmission as u8 {
            info!(
                "received network end of transmission, {:.1} seconds",
                self.net_frames as f32 / 10.0
            );
            self.end_net_call();
        }
    }

    /// Shared end-of-network-call cleanup for end-of-transmission, watchdog
    /// expiry and reset paths
    pub(super) fn end_net_call(&mut self) {
        self.net_state = NetState::Idle;

        self.net_timeout.stop();
        self.network_watchdog.stop();

        self.display.clear_call();

        if let Some(network) = self.network.as_mut() {
            network.reset();
        }
    }
}
