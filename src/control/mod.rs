//! # YSF Control Module
//!
//! The RF ⇄ network relay state machine at the heart of the gateway.
//!
//! This module handles:
//! - Classifying incoming modem frames and driving the RF call session
//! - Polling the network relay once per clock tick and driving the network
//!   call session
//! - Resolving caller/destination identity from FICH and payload data
//! - Accumulating bit-error statistics over each RF call
//! - Buffering outbound frames for the modem with backpressure
//! - Enforcing timing rules: transmission timeout, stale-stream watchdog,
//!   and the post-network holdoff window
//!
//! The model is single-threaded and cooperative. The host must serialize
//! calls to [`YsfControl::clock`], [`YsfControl::process_modem_frame`] and
//! [`YsfControl::read_modem`] from one execution context; none of them
//! block or suspend. A multi-threaded host needs its own synchronization
//! around the whole [`YsfControl`].

pub mod queue;
pub mod routing;
pub mod timer;

mod net;
mod rf;

use bytes::Bytes;
use tracing::info;

use crate::capture::FrameCapture;
use crate::config::Config;
use crate::display::CallDisplay;
use crate::net::YsfNetwork;
use crate::payload::PayloadProcessor;
use crate::ysf::fich::FichCodec;
use crate::ysf::protocol::{FrameTag, MODEM_FRAME_LENGTH};

use queue::FrameQueue;
use routing::CallRouting;
use timer::Timer;

/// Watchdog window for the network stream; a network call with no frames
/// for this long is force-ended as stale
pub const NETWORK_WATCHDOG_MS: u32 = 1500;

/// Post-network mute window; the output queue is held shut for this long
/// after a network call starts, to avoid an RF/network collision
pub const HOLDOFF_MS: u32 = 500;

/// RF call session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfState {
    /// No RF call in progress
    Listening,

    /// An RF call is being relayed
    Audio,
}

/// Network call session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetState {
    /// No network call in progress
    Idle,

    /// A network call is being relayed
    Audio,
}

/// The System Fusion relay control layer
///
/// Owns both session state machines, the timer bank and the output queue.
/// Collaborators (network transport, display sink, FICH codec, payload
/// reassembly) are injected at construction.
pub struct YsfControl {
    network: Option<Box<dyn YsfNetwork>>,
    display: Box<dyn CallDisplay>,
    codec: Box<dyn FichCodec>,
    payload: Box<dyn PayloadProcessor>,
    duplex: bool,
    queue: FrameQueue,
    rf_state: RfState,
    net_state: NetState,
    rf_timeout: Timer,
    net_timeout: Timer,
    network_watchdog: Timer,
    holdoff: Timer,
    rf_frames: u32,
    net_frames: u32,
    rf_errs: u32,
    rf_bits: u32,
    routing: CallRouting,
    capture: Option<FrameCapture>,
}

impl YsfControl {
    /// Create the control layer
    ///
    /// # Arguments
    ///
    /// * `config` - Gateway configuration (callsign, timeout, duplex, queue)
    /// * `network` - Network transport, or `None` for an RF-only repeater;
    ///   without it all network-facing operations are no-ops
    /// * `display` - Display/log sink for current-call reporting
    /// * `codec` - FICH bit-level codec
    /// * `payload` - Payload reassembly and bit-error scoring
    pub fn new(
        config: &Config,
        network: Option<Box<dyn YsfNetwork>>,
        display: Box<dyn CallDisplay>,
        codec: Box<dyn FichCodec>,
        mut payload: Box<dyn PayloadProcessor>,
    ) -> Self {
        payload.set_uplink(&config.callsign);
        payload.set_downlink(&config.callsign);

        let timeout_ms = config.timeout_s.saturating_mul(1000);

        Self {
            network,
            display,
            codec,
            payload,
            duplex: config.duplex,
            queue: FrameQueue::new(config.queue_size),
            rf_state: RfState::Listening,
            net_state: NetState::Idle,
            rf_timeout: Timer::new(timeout_ms),
            net_timeout: Timer::new(timeout_ms),
            network_watchdog: Timer::new(NETWORK_WATCHDOG_MS),
            holdoff: Timer::new(HOLDOFF_MS),
            rf_frames: 0,
            net_frames: 0,
            rf_errs: 0,
            rf_bits: 0,
            routing: CallRouting::new(),
            capture: config.dump.enabled.then(|| FrameCapture::new(&config.dump.dir)),
        }
    }

    /// Advance all timers and poll the network, once per periodic tick
    ///
    /// # Arguments
    ///
    /// * `ms` - Milliseconds elapsed since the previous tick
    pub fn clock(&mut self, ms: u32) {
        self.poll_network();

        self.holdoff.clock(ms);
        if self.holdoff.has_expired() {
            self.holdoff.stop();
        }

        self.rf_timeout.clock(ms);
        self.net_timeout.clock(ms);

        if self.net_state == NetState::Audio {
            self.network_watchdog.clock(ms);

            if self.network_watchdog.has_expired() {
                info!(
                    "network watchdog has expired, {:.1} seconds",
                    self.net_frames as f32 / 10.0
                );
                self.end_net_call();
            }
        }
    }

    /// Drain one frame toward the modem
    ///
    /// # Returns
    ///
    /// * `Option<Bytes>` - The oldest queued frame, or `None` while the
    ///   queue is empty or the holdoff window is open
    pub fn read_modem(&mut self) -> Option<Bytes> {
        // Don't relay anything until the holdoff timer has stopped
        if self.holdoff.is_running() {
            return None;
        }

        self.queue.pop()
    }

    /// Current RF session state
    pub fn rf_state(&self) -> RfState {
        self.rf_state
    }

    /// Current network session state
    pub fn net_state(&self) -> NetState {
        self.net_state
    }

    /// Queue a duplex RF relay frame for the modem
    fn write_queue_rf(&mut self, data: &[u8]) {
        // No duplex RF echo while a network call owns the queue
        if self.net_state != NetState::Idle {
            return;
        }

        if self.rf_timeout.has_expired() {
            return;
        }

        self.queue.push(&data[..MODEM_FRAME_LENGTH]);
    }

    /// Queue a network relay frame for the modem
    fn write_queue_net(&mut self, data: &[u8]) {
        if self.net_timeout.has_expired() {
            return;
        }

        self.queue.push(&data[..MODEM_FRAME_LENGTH]);
    }

    /// Forward one RF frame to the network collaborator
    fn write_network(&mut self, data: &[u8]) {
        let Some(network) = self.network.as_mut() else {
            return;
        };

        if self.rf_timeout.has_expired() {
            return;
        }

        let is_end = data[0] == FrameTag::EndOfTransmission as u8;
        network.write(self.routing.source(), self.routing.dest(), &data[2..], is_end);
    }
}
