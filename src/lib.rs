//! # YSF Bridge Library
//!
//! Protocol control layer for a System Fusion (YSF) digital-voice
//! repeater/gateway.
//!
//! This library sits between a radio-modem byte stream and a network relay
//! and maintains the call-session state on both sides: it classifies modem
//! frames, resolves caller/destination identity, accumulates bit-error
//! statistics, buffers outbound frames with backpressure, and enforces the
//! timing rules (transmission timeout, stale-stream watchdog, RF/network
//! collision holdoff). The modem and network transports, the FICH codec and
//! the payload reassembler are collaborators supplied by the host process.

pub mod capture;
pub mod config;
pub mod control;
pub mod display;
pub mod error;
pub mod net;
pub mod payload;
pub mod ysf;
