//! Controller module - Event handling and frame output
//!
//! This module contains the application controller that applies player
//! events to the display renderer and hands finished frames to a sink.
//! It is organized into submodules by responsibility:
//!
//! - `player_events`: Applying player events to the renderer
//! - `commands`: JSON-lines event source on stdin
//! - `input`: Key event handling for the terminal simulator

mod player_events;
mod commands;
mod input;

pub use commands::spawn_stdin_reader;
pub use input::{KeyAction, Simulator};

use crate::lcd::FrameSink;
use crate::model::{DisplayFrame, DisplayRenderer};

pub struct AppController {
    renderer: DisplayRenderer,
    sink: Box<dyn FrameSink>,
    last_written: Option<DisplayFrame>,
    /// Set while writes keep failing, so a missing device warns only once
    sink_failing: bool,
}

impl AppController {
    pub fn new(renderer: DisplayRenderer, sink: Box<dyn FrameSink>) -> Self {
        Self {
            renderer,
            sink,
            last_written: None,
            sink_failing: false,
        }
    }

    pub fn renderer(&self) -> &DisplayRenderer {
        &self.renderer
    }

    /// Advance the renderer one tick and show the result.
    pub fn tick(&mut self) {
        let frame = self.renderer.tick();
        self.present(frame);
    }

    /// Write `frame` to the sink unless it is already on the display.
    fn present(&mut self, frame: DisplayFrame) {
        if self.last_written.as_ref() == Some(&frame) {
            return;
        }

        tracing::trace!(%frame, "Writing frame");
        match self.sink.write_frame(&frame) {
            Ok(()) => {
                if self.sink_failing {
                    tracing::info!("Display output recovered");
                    self.sink_failing = false;
                }
                self.last_written = Some(frame);
            }
            Err(e) => {
                if self.sink_failing {
                    tracing::debug!(error = %e, "Failed to write frame");
                } else {
                    tracing::warn!(error = %e, "Failed to write frame, retrying every tick");
                    self.sink_failing = true;
                }
                // Force a full rewrite once the sink recovers
                self.last_written = None;
            }
        }
    }

    /// Blank the display; called once when the loop ends.
    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down display");
        if let Err(e) = self.sink.close() {
            tracing::warn!(error = %e, "Failed to close display");
        }
        self.last_written = None;
    }
}
