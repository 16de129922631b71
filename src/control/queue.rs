//! # Output Frame Queue
//!
//! Bounded byte ring buffer of length-prefixed frame records, feeding the
//! modem transmit path. Each record is a one-byte length followed by the
//! frame bytes, so frame boundaries survive the byte buffer. Producers are
//! never blocked: a push that does not fit is rejected whole and the frame
//! dropped.

use bytes::{Bytes, BytesMut};
use tracing::error;

/// Bounded FIFO of length-prefixed frames
#[derive(Debug)]
pub struct FrameQueue {
    buffer: Vec<u8>,
    read: usize,
    used: usize,
}

impl FrameQueue {
    /// Create a queue with a fixed byte capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity],
            read: 0,
            used: 0,
        }
    }

    /// Bytes still available for records (length prefixes included)
    pub fn free_space(&self) -> usize {
        self.buffer.len() - self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Append one frame as a length-prefixed record
    ///
    /// # Returns
    ///
    /// * `bool` - `false` if the record does not fit (or the frame exceeds
    ///   the one-byte length prefix); the queue is left unchanged and the
    ///   frame dropped
    pub fn push(&mut self, frame: &[u8]) -> bool {
        if frame.is_empty() || frame.len() > u8::MAX as usize {
            error!("invalid frame length {} for the output queue", frame.len());
            return false;
        }

        let needed = frame.len() + 1;
        if needed > self.free_space() {
            error!("overflow in the System Fusion output queue");
            return false;
        }

        self.push_byte(frame.len() as u8);
        for &b in frame {
            self.push_byte(b);
        }

        true
    }

    /// Remove and return the oldest frame
    pub fn pop(&mut self) -> Option<Bytes> {
        if self.is_empty() {
            return None;
        }

        let len = self.pop_byte() as usize;

        let mut frame = BytesMut::with_capacity(len);
        for _ in 0..len {
            frame.extend_from_slice(&[self.pop_byte()]);
        }

        Some(frame.freeze())
    }

    fn push_byte(&mut self, b: u8) {
        let write = (self.read + self.used) % self.buffer.len();
        self.buffer[write] = b;
        self.used += 1;
    }

    fn pop_byte(&mut self) -> u8 {
        let b = self.buffer[self.read];
        self.read = (self.read + 1) % self.buffer.len();
        self.used -= 1;
        b
    }
}
