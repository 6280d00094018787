//! Matrix Orbital LCD output
//!
//! Frames are written to a character device that is already configured
//! (for example with `stty -F /dev/serial/matrix_orbital speed 19200 -onlcr`).
//! Only the commands needed to position text, clear the screen and switch the
//! backlight are used, which the MX2/MX3 (LK202) family and compatibles share.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use crate::error::DeviceError;
use crate::model::DisplayFrame;

/// Raw command bytes
pub mod command {
    const PREFIX: u8 = 0xFE;

    pub const CLEAR: [u8; 2] = [PREFIX, b'X'];
    pub const HOME: [u8; 2] = [PREFIX, b'H'];
    pub const BACKLIGHT_OFF: [u8; 2] = [PREFIX, b'F'];

    /// Backlight on; zero minutes keeps it on indefinitely.
    pub fn backlight_on(minutes: u8) -> [u8; 3] {
        [PREFIX, b'B', minutes]
    }

    /// Move the cursor; both coordinates are 1-based.
    pub fn cursor_to(column: u8, row: u8) -> [u8; 4] {
        [PREFIX, b'G', column, row]
    }
}

/// Somewhere frames end up
pub trait FrameSink {
    fn write_frame(&mut self, frame: &DisplayFrame) -> Result<()>;

    /// Blank the display before exit.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A sink that drops every frame
pub struct Discard;

impl FrameSink for Discard {
    fn write_frame(&mut self, _frame: &DisplayFrame) -> Result<()> {
        Ok(())
    }
}

/// Bytes that reset the screen and turn the backlight on
pub fn init_sequence() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(7);
    bytes.extend_from_slice(&command::CLEAR);
    bytes.extend_from_slice(&command::HOME);
    bytes.extend_from_slice(&command::backlight_on(0));
    bytes
}

/// Bytes that clear the screen and turn the backlight off
pub fn shutdown_sequence() -> Vec<u8> {
    let mut bytes = Vec::with_capacity(6);
    bytes.extend_from_slice(&command::CLEAR);
    bytes.extend_from_slice(&command::HOME);
    bytes.extend_from_slice(&command::BACKLIGHT_OFF);
    bytes
}

/// Bytes that draw both rows of `frame`.
///
/// Rows are always full width, so nothing needs clearing in between.
pub fn encode_frame(frame: &DisplayFrame) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 * (frame.columns() + 4));
    for (index, row) in frame.rows().iter().enumerate() {
        bytes.extend_from_slice(&command::cursor_to(1, index as u8 + 1));
        bytes.extend(row.chars().map(lcd_byte));
    }
    bytes
}

/// The LCD character set is plain ASCII; anything else shows as `?`.
fn lcd_byte(c: char) -> u8 {
    if c == ' ' || c.is_ascii_graphic() { c as u8 } else { b'?' }
}

/// A Matrix Orbital display behind a device path.
///
/// The device is opened lazily and reopened after a failed write, so a
/// display that is unplugged and plugged back in picks up again.
pub struct LcdDevice {
    path: PathBuf,
    port: Option<File>,
}

impl LcdDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            port: None,
        }
    }

    /// Open the device and send the init sequence if not already open.
    pub fn open(&mut self) -> Result<(), DeviceError> {
        if self.port.is_some() {
            return Ok(());
        }

        let port = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|source| DeviceError::Open {
                path: self.path.clone(),
                source,
            })?;
        tracing::info!(path = %self.path.display(), "LCD device opened");

        self.port = Some(port);
        self.send(&init_sequence())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        let Some(port) = self.port.as_mut() else {
            return Ok(());
        };

        if let Err(source) = port.write_all(bytes).and_then(|()| port.flush()) {
            // Drop the handle so the next frame reopens the device
            self.port = None;
            return Err(DeviceError::Write {
                path: self.path.clone(),
                source,
            });
        }
        Ok(())
    }
}

impl FrameSink for LcdDevice {
    fn write_frame(&mut self, frame: &DisplayFrame) -> Result<()> {
        self.open()?;
        self.send(&encode_frame(frame))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.port.is_some() {
            self.send(&shutdown_sequence())?;
            self.port = None;
            tracing::info!(path = %self.path.display(), "LCD device closed");
        }
        Ok(())
    }
}
