//! Background music selection.

/// Tracks which music file is playing. Decoding and output are left to the platform.
#[derive(Debug)]
pub struct MusicPlayer {
    volume: u8,
    current: Option<String>,
}

impl Default for MusicPlayer {
    fn default() -> Self {
        Self::new(7)
    }
}

impl MusicPlayer {
    /// Creates a new player with the given volume (0-10).
    pub fn new(volume: u8) -> Self {
        Self {
            volume: volume.min(10),
            current: None,
        }
    }

    /// Returns current volume.
    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Track currently playing, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Switches to `track`, `None` meaning silence.
    ///
    /// Requesting the track that is already playing does nothing and returns `false`.
    pub fn play_track(&mut self, track: Option<&str>) -> bool {
        if self.current.as_deref() == track {
            return false;
        }
        match track {
            Some(name) => log::info!("Play music {} at volume {}", name, self.volume),
            None => log::info!("Stop music"),
        }
        self.current = track.map(str::to_string);
        true
    }
}
