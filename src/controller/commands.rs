//! Player events as JSON lines
//!
//! A player hook writes one event per line, e.g.
//! `{"event":"track","artist":"Radiohead","title":"Idioteque"}` or
//! `{"event":"seek","position_ms":45000}`. The bare words `play`, `pause`
//! and `stop` are accepted as shorthands.

use std::io::BufRead;
use std::thread::JoinHandle;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use crate::model::PlayerEvent;

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_event_line(line: &str) -> Result<Option<PlayerEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let event = match line {
        "play" => PlayerEvent::Play,
        "pause" => PlayerEvent::Pause,
        "stop" => PlayerEvent::Stop,
        _ => serde_json::from_str(line).with_context(|| format!("Invalid event line: {line}"))?,
    };
    Ok(Some(event))
}

/// Forward every parsable line of `reader` to `tx` until input ends or the
/// receiver goes away. Blocks; run it off the runtime.
///
/// Lines that are not valid UTF-8 are decoded lossily and end up skipped as
/// unparsable; only real read errors stop forwarding.
pub fn forward_events<R: BufRead>(mut reader: R, tx: &mpsc::Sender<PlayerEvent>) -> Result<()> {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read event input")?;
        if read == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        match parse_event_line(&line) {
            Ok(Some(event)) => {
                if tx.blocking_send(event).is_err() {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Skipping event line"),
        }
    }
    tracing::debug!("Event input closed");
    Ok(())
}

/// Read events from stdin on a dedicated thread.
///
/// Stdin reads cannot be cancelled, so the thread is left detached and never
/// holds up runtime shutdown. Dropping `tx` at end of input closes the channel.
pub fn spawn_stdin_reader(tx: mpsc::Sender<PlayerEvent>) -> Result<JoinHandle<()>> {
    let handle = std::thread::Builder::new()
        .name("stdin-events".to_string())
        .spawn(move || {
            let stdin = std::io::stdin().lock();
            if let Err(e) = forward_events(stdin, &tx) {
                tracing::error!(error = ?e, "Event reader failed");
            }
        })
        .context("Failed to start stdin reader")?;
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::TrackInfo;

    #[test]
    fn parses_shorthands_and_json() {
        assert_eq!(parse_event_line("play").unwrap(), Some(PlayerEvent::Play));
        assert_eq!(parse_event_line("  pause \n").unwrap(), Some(PlayerEvent::Pause));
        assert_eq!(parse_event_line(r#"{"event":"stop"}"#).unwrap(), Some(PlayerEvent::Stop));
        assert_eq!(
            parse_event_line(r#"{"event":"seek","position_ms":45000}"#).unwrap(),
            Some(PlayerEvent::Seek { position: Duration::from_secs(45) })
        );
    }

    #[test]
    fn parses_full_track() {
        let line = r#"{"event":"track","artist":"Radiohead","title":"Idioteque","album":"Kid A",
            "track_number":8,"disc_number":1,"length_ms":309000}"#
            .replace('\n', "");
        let expected = TrackInfo::new("Radiohead", "Idioteque", "Kid A")
            .with_track_number(8)
            .with_disc_number(1)
            .with_length(Duration::from_secs(309));
        assert_eq!(parse_event_line(&line).unwrap(), Some(PlayerEvent::Track(expected)));
    }

    #[test]
    fn missing_metadata_defaults_to_empty() {
        let event = parse_event_line(r#"{"event":"track","title":"Untitled"}"#).unwrap();
        let Some(PlayerEvent::Track(info)) = event else {
            panic!("expected a track event");
        };
        assert_eq!(info.title, "Untitled");
        assert_eq!(info.artist, "");
        assert_eq!(info.album, "");
        assert_eq!(info.track_number, None);
        assert_eq!(info.length, None);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(parse_event_line("").unwrap(), None);
        assert_eq!(parse_event_line("# now playing feed").unwrap(), None);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_event_line("rewind").is_err());
        assert!(parse_event_line(r#"{"event":"seek"}"#).is_err());
    }

    #[test]
    fn forwards_events_until_input_ends() {
        let input = b"play\nnot an event\n\n{\"event\":\"seek\",\"position_ms\":1500}\nstop\n";
        let (tx, mut rx) = mpsc::channel(8);

        forward_events(&input[..], &tx).unwrap();
        drop(tx);

        assert_eq!(rx.blocking_recv(), Some(PlayerEvent::Play));
        assert_eq!(
            rx.blocking_recv(),
            Some(PlayerEvent::Seek { position: Duration::from_millis(1500) })
        );
        assert_eq!(rx.blocking_recv(), Some(PlayerEvent::Stop));
        assert_eq!(rx.blocking_recv(), None);
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let (tx, mut rx) = mpsc::channel(8);

        forward_events(&b"\xff\nplay\n\xfe\xfdpause\npause"[..], &tx).unwrap();
        drop(tx);

        assert_eq!(rx.blocking_recv(), Some(PlayerEvent::Play));
        // The last line has no trailing newline
        assert_eq!(rx.blocking_recv(), Some(PlayerEvent::Pause));
        assert_eq!(rx.blocking_recv(), None);
    }

    #[test]
    fn stops_when_receiver_is_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        forward_events(&b"play\npause\n"[..], &tx).unwrap();
    }
}
