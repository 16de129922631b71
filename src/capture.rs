//! # Raw-Frame Capture
//!
//! Optional diagnostic capture of relayed RF frames to a per-call file.
//!
//! A capture file is opened when an RF call starts, receives one 120-byte
//! encoded frame per relayed frame, and is closed when the call ends. Files
//! are named after the wall-clock time the call started, e.g.
//! `YSF_20260824_193055.ambe`, and begin with a three-byte `YSF` magic.

use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::ysf::protocol::YSF_FRAME_LENGTH_BYTES;

/// File magic written at the start of every capture file
const CAPTURE_MAGIC: &[u8] = b"YSF";

/// Per-call raw-frame capture file
///
/// The file handle is scoped to one RF call: `open` at call start, `close`
/// at call cleanup. Opening while already open is a no-op, so a capture
/// never spans two calls by accident.
#[derive(Debug)]
pub struct FrameCapture {
    dir: PathBuf,
    file: Option<File>,
}

impl FrameCapture {
    /// Create a capture writing into the given directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            file: None,
        }
    }

    /// Open a new timestamped capture file for the starting call
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or the magic cannot be
    /// written
    pub fn open(&mut self) -> Result<()> {
        if self.file.is_some() {
            return Ok(());
        }

        let name = Local::now().format("YSF_%Y%m%d_%H%M%S.ambe").to_string();
        let path = self.dir.join(name);

        let mut file = File::create(&path)?;
        file.write_all(CAPTURE_MAGIC)?;

        debug!("opened frame capture file {}", path.display());
        self.file = Some(file);

        Ok(())
    }

    /// Append one encoded frame region to the open capture file
    ///
    /// Does nothing when no file is open.
    ///
    /// # Errors
    ///
    /// Returns error if the write fails
    pub fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            let len = frame.len().min(YSF_FRAME_LENGTH_BYTES);
            file.write_all(&frame[..len])?;
        }

        Ok(())
    }

    /// Close the capture file at the end of the call
    pub fn close(&mut self) {
        self.file = None;
    }

    /// Whether a capture file is currently open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}
