//! Display state renderer
//!
//! Turns playback state and track metadata into two fixed-width LCD rows.
//! The renderer owns all display state; callers feed it player events and
//! timer ticks and read back the resulting [`DisplayFrame`].

use std::time::Duration;

use super::frame::{DisplayFrame, center, fit, format_duration, justify};
use super::scroll::{ScrollCursor, cycle_len, window};
use super::types::{PlaybackState, TrackInfo, ViewMode};

const NOT_PLAYING: &str = "* not playing *";
const PAUSED: &str = "* paused *";
const NOW_PLAYING: &str = "* now playing *";
const SEEKING: &str = "Seeking...";

/// Layout and timing knobs, with intervals already converted to ticks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RendererConfig {
    pub columns: usize,
    pub separator: String,
    pub header: String,
    pub view_cycle_ticks: u32,
    pub seek_hold_ticks: u32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            separator: " | ".to_string(),
            header: "Now Playing".to_string(),
            view_cycle_ticks: 13,
            seek_hold_ticks: 3,
        }
    }
}

pub struct DisplayRenderer {
    config: RendererConfig,
    state: PlaybackState,
    resume_state: PlaybackState,
    track: Option<TrackInfo>,
    view: ViewMode,
    cursors: [ScrollCursor; 2],
    seek_position: Option<Duration>,
    seek_ticks_left: u32,
    ticks_in_view: u32,
    /// Per row: static, or scrolled through at least one full cycle
    settled: [bool; 2],
    frame: DisplayFrame,
}

impl DisplayRenderer {
    pub fn new(config: RendererConfig) -> Self {
        let mut renderer = Self {
            frame: DisplayFrame::blank(config.columns),
            config,
            state: PlaybackState::Stopped,
            resume_state: PlaybackState::Stopped,
            track: None,
            view: ViewMode::ArtistTitle,
            cursors: [ScrollCursor::default(); 2],
            seek_position: None,
            seek_ticks_left: 0,
            ticks_in_view: 0,
            settled: [false; 2],
        };
        renderer.refresh();
        renderer
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Scroll cursor of `row` (0 is the top row)
    pub fn cursor(&self, row: usize) -> ScrollCursor {
        self.cursors[row]
    }

    pub fn track(&self) -> Option<&TrackInfo> {
        self.track.as_ref()
    }

    pub fn seek_position(&self) -> Option<Duration> {
        self.seek_position
    }

    /// The frame produced by the last event or tick
    pub fn frame(&self) -> &DisplayFrame {
        &self.frame
    }

    pub fn on_state_changed(&mut self, new_state: PlaybackState, seek_position: Option<Duration>) {
        tracing::debug!(from = ?self.state, to = ?new_state, ?seek_position, "Playback state changed");

        match new_state {
            PlaybackState::Seeking => {
                // Repeated seeks keep returning to the state before the first one
                if self.state != PlaybackState::Seeking {
                    self.resume_state = self.state;
                }
                self.seek_position = seek_position;
                self.seek_ticks_left = self.config.seek_hold_ticks.max(1);
            }
            PlaybackState::Stopped => {
                self.seek_position = None;
                self.reset_view();
            }
            PlaybackState::Playing | PlaybackState::Paused => {
                self.seek_position = None;
            }
        }

        self.state = new_state;
        self.refresh();
    }

    pub fn on_track_changed(&mut self, info: TrackInfo) {
        tracing::debug!(artist = %info.artist, title = %info.title, album = %info.album, "Track changed");
        self.track = Some(info);
        self.reset_view();
        self.refresh();
    }

    /// Advance scrolling and view cycling by one timer step.
    pub fn tick(&mut self) -> DisplayFrame {
        match self.state {
            PlaybackState::Playing => self.advance(),
            PlaybackState::Seeking => {
                self.seek_ticks_left = self.seek_ticks_left.saturating_sub(1);
                if self.seek_ticks_left == 0 {
                    tracing::trace!(resume = ?self.resume_state, "Seek hold expired");
                    self.state = self.resume_state;
                    self.seek_position = None;
                }
            }
            PlaybackState::Stopped | PlaybackState::Paused => {}
        }

        self.refresh();
        self.frame.clone()
    }

    /// Compute the frame for the current state without touching it.
    pub fn render(&self) -> DisplayFrame {
        let columns = self.config.columns;
        match self.state {
            PlaybackState::Stopped => self.status_frame(NOT_PLAYING),
            PlaybackState::Paused => self.status_frame(PAUSED),
            PlaybackState::Seeking => self.seek_frame(),
            PlaybackState::Playing => match self.view_rows() {
                Some([top, bottom]) => {
                    let separator = &self.config.separator;
                    let [top_cursor, bottom_cursor] = self.cursors;
                    DisplayFrame::new(
                        columns,
                        &window(&top, columns, separator, top_cursor.offset()),
                        &window(&bottom, columns, separator, bottom_cursor.offset()),
                    )
                }
                None => self.status_frame(NOW_PLAYING),
            },
        }
    }

    fn refresh(&mut self) {
        self.frame = self.render();
    }

    fn reset_view(&mut self) {
        self.view = ViewMode::ArtistTitle;
        for cursor in &mut self.cursors {
            cursor.reset();
        }
        self.ticks_in_view = 0;
        self.settled = [false; 2];
    }

    fn advance(&mut self) {
        let Some(cycles) = self.scroll_cycles() else {
            return;
        };

        self.ticks_in_view = self.ticks_in_view.saturating_add(1);

        // Each row wraps at its own cycle so no row ever jumps back early
        for (row, cycle) in cycles.into_iter().enumerate() {
            match cycle {
                Some(cycle) => {
                    if self.cursors[row].advance(cycle) {
                        self.settled[row] = true;
                    }
                }
                None => self.settled[row] = true,
            }
        }

        let settled = self.settled.iter().all(|&s| s);
        if settled && self.ticks_in_view >= self.config.view_cycle_ticks {
            let next = self.view.next();
            tracing::trace!(from = ?self.view, to = ?next, "Cycling view");
            self.reset_view();
            self.view = next;
        }
    }

    /// Scroll cycle of each row of the active view; `None` for static rows
    fn scroll_cycles(&self) -> Option<[Option<usize>; 2]> {
        let rows = self.view_rows()?;
        Some(rows.map(|row| cycle_len(&row, self.config.columns, &self.config.separator)))
    }

    fn view_rows(&self) -> Option<[String; 2]> {
        let track = self.track.as_ref()?;
        let rows = match self.view {
            ViewMode::ArtistTitle => [track.artist.clone(), track.title.clone()],
            ViewMode::AlbumTrack => [track.album.clone(), self.disc_track_line(track)],
        };
        Some(rows)
    }

    fn disc_track_line(&self, track: &TrackInfo) -> String {
        let disc = track.disc_number.map(|n| format!("Disc {n}")).unwrap_or_default();
        let number = track.track_number.map(|n| format!("Track {n}")).unwrap_or_default();
        justify(&disc, &number, self.config.columns)
    }

    fn status_frame(&self, status: &str) -> DisplayFrame {
        let columns = self.config.columns;
        DisplayFrame::new(columns, &center(&self.config.header, columns), &center(status, columns))
    }

    fn seek_frame(&self) -> DisplayFrame {
        let columns = self.config.columns;
        let label = self
            .seek_position
            .map(format_duration)
            .unwrap_or_else(|| "-:--".to_string());
        let length = self
            .track
            .as_ref()
            .and_then(|t| t.length)
            .filter(|l| !l.is_zero());

        let bar_width = columns.saturating_sub(label.chars().count() + 1);
        let bottom = match (self.seek_position, length) {
            (Some(position), Some(length)) if bar_width > 0 => {
                let ratio = (position.as_secs_f64() / length.as_secs_f64()).clamp(0.0, 1.0);
                let filled = (ratio * bar_width as f64).round() as usize;
                format!("{}{} {label}", "#".repeat(filled), ".".repeat(bar_width - filled))
            }
            _ => center(&label, columns),
        };

        DisplayFrame::new(columns, &center(SEEKING, columns), &fit(&bottom, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn renderer(columns: usize) -> DisplayRenderer {
        DisplayRenderer::new(RendererConfig {
            columns,
            ..Default::default()
        })
    }

    fn playing(columns: usize, track: TrackInfo) -> DisplayRenderer {
        let mut r = renderer(columns);
        r.on_track_changed(track);
        r.on_state_changed(PlaybackState::Playing, None);
        r
    }

    #[test]
    fn starts_stopped() {
        let r = renderer(20);
        assert_eq!(r.state(), PlaybackState::Stopped);
        assert_eq!(r.frame().top(), "    Now Playing     ");
        assert_eq!(r.frame().bottom(), "  * not playing *   ");
    }

    #[test]
    fn static_artist_title_frame() {
        let r = playing(20, TrackInfo::new("Radiohead", "Idioteque", "Kid A"));
        let frame = r.render();
        assert_eq!(frame.top(), "Radiohead           ");
        assert_eq!(frame.bottom(), "Idioteque           ");
        assert_eq!(frame, r.render());
        assert_eq!(&frame, r.frame());
    }

    #[test]
    fn static_frame_is_stable_across_ticks() {
        let mut r = playing(20, TrackInfo::new("Radiohead", "Idioteque", "Kid A"));
        let first = r.frame().clone();
        for _ in 0..5 {
            assert_eq!(r.tick(), first);
        }
    }

    #[test]
    fn paused_shows_status() {
        let mut r = playing(20, TrackInfo::new("Radiohead", "Idioteque", "Kid A"));
        r.on_state_changed(PlaybackState::Paused, None);
        assert_eq!(r.frame().bottom(), "     * paused *     ");
        let frozen = r.frame().clone();
        assert_eq!(r.tick(), frozen);
    }

    #[test]
    fn playing_without_track_shows_header() {
        let mut r = renderer(20);
        r.on_state_changed(PlaybackState::Playing, None);
        assert_eq!(r.frame().bottom(), "  * now playing *   ");
        r.tick();
        assert_eq!(r.cursor(0).offset(), 0);
    }

    #[test]
    fn missing_metadata_renders_blank_rows() {
        let r = playing(12, TrackInfo::default());
        assert_eq!(r.frame().top(), " ".repeat(12));
        assert_eq!(r.frame().bottom(), " ".repeat(12));
    }

    #[test]
    fn long_title_scrolls_one_character_per_tick() {
        let word = "Supercalifragilisticexpialidocious";
        let mut r = playing(10, TrackInfo::new("Julie", word, ""));
        assert_eq!(r.frame().bottom(), "Supercalif");
        assert_eq!(r.tick().bottom(), "upercalifr");
        assert_eq!(r.tick().bottom(), "percalifra");
        // Static rows do not move while the other one scrolls
        assert_eq!(r.frame().top(), "Julie     ");
    }

    #[test]
    fn long_title_eventually_shows_every_character() {
        let word = "Supercalifragilisticexpialidocious";
        let mut r = playing(10, TrackInfo::new("", word, ""));
        let looped: Vec<char> = format!("{word} | ").chars().collect();

        let mut seen = vec![false; looped.len()];
        let mut expected_start = 0;
        while !seen.iter().all(|&s| s) {
            let frame = r.frame().clone();
            assert_eq!(r.view(), ViewMode::ArtistTitle);
            for (i, ch) in frame.bottom().chars().enumerate() {
                let pos = (expected_start + i) % looped.len();
                assert_eq!(ch, looped[pos]);
                seen[pos] = true;
            }
            r.tick();
            expected_start = (expected_start + 1) % looped.len();
        }
    }

    #[test]
    fn track_change_resets_cursor_and_view() {
        let mut r = playing(10, TrackInfo::new("An artist name that is long", "x", "y"));
        for _ in 0..5 {
            r.tick();
        }
        assert_eq!(r.cursor(0).offset(), 5);

        r.on_track_changed(TrackInfo::new("Radiohead", "Idioteque", "Kid A"));
        assert_eq!(r.cursor(0).offset(), 0);
        assert_eq!(r.view(), ViewMode::ArtistTitle);
        assert_eq!(r.frame().top(), "Radiohead ");
    }

    #[test]
    fn views_cycle_while_playing() {
        let track = TrackInfo::new("Radiohead", "Idioteque", "Kid A")
            .with_disc_number(1)
            .with_track_number(8);
        let mut r = playing(20, track);
        let cycle = r.config().view_cycle_ticks;

        for _ in 0..cycle - 1 {
            r.tick();
        }
        assert_eq!(r.view(), ViewMode::ArtistTitle);

        let frame = r.tick();
        assert_eq!(r.view(), ViewMode::AlbumTrack);
        assert_eq!(frame.top(), "Kid A               ");
        assert_eq!(frame.bottom(), "Disc 1       Track 8");

        for _ in 0..cycle {
            r.tick();
        }
        assert_eq!(r.view(), ViewMode::ArtistTitle);
    }

    #[test]
    fn touching_disc_and_track_fields_scroll() {
        let track = TrackInfo::new("A", "B", "Album")
            .with_disc_number(1)
            .with_track_number(13);
        let mut r = playing(14, track);
        for _ in 0..r.config().view_cycle_ticks {
            r.tick();
        }
        assert_eq!(r.view(), ViewMode::AlbumTrack);
        assert_eq!(r.frame().bottom(), "Disc 1 Track 1");

        let frame = r.tick();
        assert_eq!(frame.bottom(), "isc 1 Track 13");
        assert_eq!(r.cursor(1).offset(), 1);
    }

    #[test]
    fn view_waits_for_scroll_to_finish() {
        let config = RendererConfig {
            columns: 10,
            view_cycle_ticks: 2,
            ..Default::default()
        };
        let mut r = DisplayRenderer::new(config);
        r.on_track_changed(TrackInfo::new("Supercalifragilisticexpialidocious", "", "Album"));
        r.on_state_changed(PlaybackState::Playing, None);

        // 34 characters plus the three-character separator
        for _ in 0..36 {
            r.tick();
            assert_eq!(r.view(), ViewMode::ArtistTitle);
        }
        r.tick();
        assert_eq!(r.view(), ViewMode::AlbumTrack);
        assert_eq!(r.cursor(0).offset(), 0);
    }

    #[test]
    fn overflowing_rows_scroll_independently() {
        let artist = "Fifteen chars!!";
        let title = "Twenty-two characters!";
        let mut r = DisplayRenderer::new(RendererConfig {
            columns: 10,
            view_cycle_ticks: 1000,
            ..Default::default()
        });
        r.on_track_changed(TrackInfo::new(artist, title, "Album"));
        r.on_state_changed(PlaybackState::Playing, None);
        assert_eq!(cycle_len(artist, 10, " | "), Some(18));
        assert_eq!(cycle_len(title, 10, " | "), Some(25));

        // Past the wrap of both rows: neither may restart early
        for step in 0..60 {
            let frame = r.frame().clone();
            assert_eq!(frame.top(), window(artist, 10, " | ", step % 18), "top row at tick {step}");
            assert_eq!(frame.bottom(), window(title, 10, " | ", step % 25), "bottom row at tick {step}");
            r.tick();
        }
        assert_eq!(r.view(), ViewMode::ArtistTitle);
    }

    #[test]
    fn seeking_renders_progress_bar() {
        let track = TrackInfo::new("Radiohead", "Idioteque", "Kid A").with_length(Duration::from_secs(180));
        let mut r = playing(20, track);
        r.on_state_changed(PlaybackState::Seeking, Some(Duration::from_secs(45)));

        let frame = r.frame();
        assert_eq!(frame.top(), "     Seeking...     ");
        assert_eq!(frame.bottom(), "####........... 0:45");
    }

    #[test]
    fn seeking_without_length_shows_position() {
        let mut r = playing(20, TrackInfo::new("Radiohead", "Idioteque", "Kid A"));
        r.on_state_changed(PlaybackState::Seeking, Some(Duration::from_secs(45)));
        assert_eq!(r.frame().top(), "     Seeking...     ");
        assert_eq!(r.frame().bottom(), "        0:45        ");
    }

    #[test]
    fn seek_hold_returns_to_previous_state() {
        let mut r = playing(20, TrackInfo::new("Radiohead", "Idioteque", "Kid A"));
        r.on_state_changed(PlaybackState::Seeking, Some(Duration::from_secs(10)));
        r.on_state_changed(PlaybackState::Seeking, Some(Duration::from_secs(20)));

        for _ in 0..r.config().seek_hold_ticks - 1 {
            r.tick();
            assert_eq!(r.state(), PlaybackState::Seeking);
        }
        let frame = r.tick();
        assert_eq!(r.state(), PlaybackState::Playing);
        assert_eq!(frame.top(), "Radiohead           ");
        assert_eq!(r.seek_position(), None);
    }

    #[test]
    fn stop_resets_view() {
        let mut r = playing(10, TrackInfo::new("An artist name that is long", "x", "y"));
        r.tick();
        r.on_state_changed(PlaybackState::Stopped, None);
        assert_eq!(r.cursor(0).offset(), 0);
        assert_eq!(r.frame().bottom(), "* not play");
    }

    proptest! {
        #[test]
        fn short_fields_are_left_justified(artist in "[ -~]{0,16}", title in "[ -~]{0,16}", columns in 16usize..40) {
            let r = playing(columns, TrackInfo::new(artist.clone(), title.clone(), ""));
            let frame = r.render();
            prop_assert_eq!(frame.top().chars().count(), columns);
            prop_assert_eq!(frame.bottom().chars().count(), columns);
            prop_assert!(frame.top().starts_with(&artist));
            prop_assert!(frame.bottom().starts_with(&title));
            prop_assert!(frame.top()[artist.len()..].chars().all(|c| c == ' '));
        }

        #[test]
        fn rows_always_fit(artist in "\\PC{0,60}", title in "\\PC{0,60}", columns in 1usize..30, ticks in 0usize..80) {
            let mut r = playing(columns, TrackInfo::new(artist, title, "").with_track_number(3));
            for _ in 0..ticks {
                let frame = r.tick();
                prop_assert_eq!(frame.top().chars().count(), columns);
                prop_assert_eq!(frame.bottom().chars().count(), columns);
            }
        }
    }
}
