//! Model module - Display state and data types
//!
//! This module contains the data structures and state management behind the
//! LCD output. It is organized into submodules by responsibility:
//!
//! - `types`: Playback state, view mode, track metadata and player events
//! - `frame`: Fixed-width two-row frames and row layout helpers
//! - `scroll`: Scroll cursor and the circular window over long rows
//! - `renderer`: The display renderer that ties the above together

mod types;
mod frame;
mod scroll;
mod renderer;

pub use types::{PlaybackState, PlayerEvent, TrackInfo, ViewMode};

pub use frame::{DisplayFrame, format_duration};

pub use renderer::{DisplayRenderer, RendererConfig};
