//! Applying player host events to the renderer

use crate::model::{PlaybackState, PlayerEvent};
use super::AppController;

impl AppController {
    /// Apply one player event and show the re-rendered frame immediately.
    pub fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::Play => {
                tracing::debug!("PlayerEvent::Play");
                self.renderer.on_state_changed(PlaybackState::Playing, None);
            }
            PlayerEvent::Pause => {
                tracing::debug!("PlayerEvent::Pause");
                self.renderer.on_state_changed(PlaybackState::Paused, None);
            }
            PlayerEvent::Stop => {
                tracing::debug!("PlayerEvent::Stop");
                self.renderer.on_state_changed(PlaybackState::Stopped, None);
            }
            PlayerEvent::Seek { position } => {
                tracing::debug!(position_ms = position.as_millis() as u64, "PlayerEvent::Seek");
                self.renderer.on_state_changed(PlaybackState::Seeking, Some(position));
            }
            PlayerEvent::Track(info) => {
                tracing::info!(
                    artist = %info.artist,
                    title = %info.title,
                    album = %info.album,
                    track_number = ?info.track_number,
                    "PlayerEvent::Track"
                );
                self.renderer.on_track_changed(info);
            }
        }

        let frame = self.renderer.frame().clone();
        self.present(frame);
    }
}
