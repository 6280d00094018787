//! Core type definitions for the display model

use std::time::Duration;

use serde::Deserialize;

/// Playback state as reported by the player host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
    Seeking,
}

/// Which pair of metadata fields is shown while playing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    ArtistTitle,
    AlbumTrack,
}

impl ViewMode {
    pub fn next(self) -> Self {
        match self {
            ViewMode::ArtistTitle => ViewMode::AlbumTrack,
            ViewMode::AlbumTrack => ViewMode::ArtistTitle,
        }
    }
}

/// Metadata of the current track.
///
/// Text fields are never optional: a missing artist, title or album is an
/// empty string, so rendering has nothing to fail on.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackInfo {
    pub artist: String,
    pub title: String,
    pub album: String,
    pub track_number: Option<u32>,
    pub disc_number: Option<u32>,
    #[serde(rename = "length_ms", deserialize_with = "millis::optional")]
    pub length: Option<Duration>,
}

impl TrackInfo {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, album: impl Into<String>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            album: album.into(),
            ..Default::default()
        }
    }

    pub fn with_track_number(mut self, track_number: u32) -> Self {
        self.track_number = Some(track_number);
        self
    }

    pub fn with_disc_number(mut self, disc_number: u32) -> Self {
        self.disc_number = Some(disc_number);
        self
    }

    pub fn with_length(mut self, length: Duration) -> Self {
        self.length = Some(length);
        self
    }
}

/// A notification from the player host
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlayerEvent {
    Play,
    Pause,
    Stop,
    Seek {
        #[serde(rename = "position_ms", deserialize_with = "millis::required")]
        position: Duration,
    },
    Track(TrackInfo),
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }

    pub fn optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
