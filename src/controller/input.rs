//! Key event handling for the terminal simulator

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{PlayerEvent, TrackInfo};

const SEEK_STEP: Duration = Duration::from_secs(10);

/// Outcome of a key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Events(Vec<PlayerEvent>),
    Quit,
    Ignore,
}

/// A stand-in player: a short playlist plus enough state to turn key presses
/// into the events a real host would send.
pub struct Simulator {
    playlist: Vec<TrackInfo>,
    current: Option<usize>,
    playing: bool,
    position: Duration,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new(demo_playlist())
    }
}

impl Simulator {
    pub fn new(playlist: Vec<TrackInfo>) -> Self {
        Self {
            playlist,
            current: None,
            playing: false,
            position: Duration::ZERO,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignore;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Char(' ') => self.toggle_playback(),
            KeyCode::Char('n') => self.next_track(),
            KeyCode::Char('s') => self.seek_forward(),
            KeyCode::Char('x') => self.stop(),
            _ => KeyAction::Ignore,
        }
    }

    fn toggle_playback(&mut self) -> KeyAction {
        if self.current.is_none() {
            return self.next_track();
        }
        self.playing = !self.playing;
        let event = if self.playing { PlayerEvent::Play } else { PlayerEvent::Pause };
        KeyAction::Events(vec![event])
    }

    fn next_track(&mut self) -> KeyAction {
        if self.playlist.is_empty() {
            return KeyAction::Ignore;
        }

        let next = self.current.map_or(0, |i| (i + 1) % self.playlist.len());
        self.current = Some(next);
        self.playing = true;
        self.position = Duration::ZERO;

        KeyAction::Events(vec![
            PlayerEvent::Track(self.playlist[next].clone()),
            PlayerEvent::Play,
        ])
    }

    fn seek_forward(&mut self) -> KeyAction {
        let Some(current) = self.current else {
            return KeyAction::Ignore;
        };

        self.position += SEEK_STEP;
        if let Some(length) = self.playlist[current].length {
            self.position = self.position.min(length);
        }
        KeyAction::Events(vec![PlayerEvent::Seek { position: self.position }])
    }

    fn stop(&mut self) -> KeyAction {
        self.playing = false;
        self.position = Duration::ZERO;
        KeyAction::Events(vec![PlayerEvent::Stop])
    }
}

fn demo_playlist() -> Vec<TrackInfo> {
    vec![
        TrackInfo::new("Radiohead", "Idioteque", "Kid A")
            .with_disc_number(1)
            .with_track_number(8)
            .with_length(Duration::from_secs(309)),
        TrackInfo::new(
            "Julie Andrews & Dick Van Dyke",
            "Supercalifragilisticexpialidocious",
            "Mary Poppins (Original Motion Picture Soundtrack)",
        )
        .with_track_number(11)
        .with_length(Duration::from_secs(134)),
        TrackInfo::new("Sigur Rós", "Svefn-g-englar", "Ágætis byrjun")
            .with_track_number(2)
            .with_length(Duration::from_secs(604)),
    ]
}
