//! Soundtrack playback for the crawl, backed by `rodio`.

use anyhow::{Context, Result, anyhow};
use rodio::{Decoder, OutputStream, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, info};

pub struct MusicPlayer {
    path: Option<PathBuf>,
    volume: f32,
    playback: Option<Playback>,
}

struct Playback {
    _stream: OutputStream,
    sink: Sink,
}

impl MusicPlayer {
    pub fn new(path: Option<PathBuf>, volume: f32) -> Self {
        Self {
            path,
            volume: volume.clamp(0.0, 1.0),
            playback: None,
        }
    }

    pub fn has_track(&self) -> bool {
        self.path.is_some()
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Start or resume the soundtrack. `restart` rewinds to the beginning.
    pub fn play(&mut self, restart: bool) -> Result<()> {
        if !restart {
            if let Some(playback) = &self.playback {
                if !playback.sink.empty() {
                    debug!("Resuming soundtrack");
                    playback.sink.play();
                    return Ok(());
                }
            }
        }

        let path = self
            .path
            .clone()
            .ok_or_else(|| anyhow!("No soundtrack configured"))?;
        self.stop();

        let (stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating sink")?;
        let file = File::open(&path)
            .with_context(|| format!("Opening soundtrack {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Decoding soundtrack {}", path.display()))?;
        sink.set_volume(self.volume);
        sink.append(source);
        sink.play();
        info!(path = %path.display(), volume = self.volume, "Playing soundtrack");
        self.playback = Some(Playback {
            _stream: stream,
            sink,
        });
        Ok(())
    }

    pub fn pause(&self) {
        if let Some(playback) = &self.playback {
            debug!("Pausing soundtrack");
            playback.sink.pause();
        }
    }

    pub fn stop(&mut self) {
        if let Some(playback) = self.playback.take() {
            debug!("Stopping soundtrack");
            playback.sink.stop();
        }
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(playback) = &self.playback {
            playback.sink.set_volume(self.volume);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|playback| !playback.sink.is_paused() && !playback.sink.empty())
    }
}

impl std::fmt::Debug for MusicPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MusicPlayer")
            .field("path", &self.path)
            .field("volume", &self.volume)
            .field("playing", &self.is_playing())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_without_track_is_an_error() {
        let mut player = MusicPlayer::new(None, 0.5);
        assert!(!player.has_track());
        assert!(player.play(false).is_err());
        assert!(!player.is_playing());
    }

    #[test]
    fn volume_is_clamped() {
        let mut player = MusicPlayer::new(None, 3.0);
        assert_eq!(player.volume(), 1.0);
        player.set_volume(-1.0);
        assert_eq!(player.volume(), 0.0);
    }
}
