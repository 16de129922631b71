//! # YSF Protocol Module
//!
//! System Fusion frame definitions shared by the control layer and its
//! collaborators.
//!
//! This module handles:
//! - Modem frame layout and tag bytes
//! - FICH field enums (frame indicator, call mode, data type)
//! - Fixed-width callsign fields
//! - Frame sync stamping for outbound frames

pub mod fich;
pub mod protocol;
