//! Sound cues for the lander, played through Kira.
//!
//! The game only talks to the [`SoundBoard`] trait. [`AudioSystem`] is the
//! real backend; [`Silent`] stands in when no audio device can be opened,
//! and [`Recorder`] keeps a log of calls for tests.

use anyhow::Result;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    sound::PlaybackState,
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;

/// Every sound the game can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Music,
    Thrust,
    Win,
    Lose,
    Alert,
}

impl Cue {
    pub const ALL: [Cue; 5] = [Cue::Music, Cue::Thrust, Cue::Win, Cue::Lose, Cue::Alert];

    /// File name inside the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Music => "interstellar_theme.mp3",
            Cue::Thrust => "thrust_sound_space.wav",
            Cue::Win => "celebration_sound.wav",
            Cue::Lose => "buzzer_sound.wav",
            Cue::Alert => "alert_sound.wav",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Cue::Music => "music",
            Cue::Thrust => "thrust",
            Cue::Win => "win",
            Cue::Lose => "lose",
            Cue::Alert => "alert",
        }
    }
}

/// Per-cue playback volume, 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CueVolumes {
    pub music: f64,
    pub thrust: f64,
    pub win: f64,
    pub lose: f64,
    pub alert: f64,
}

impl Default for CueVolumes {
    fn default() -> Self {
        Self { music: 0.1, thrust: 0.9, win: 0.8, lose: 0.8, alert: 0.8 }
    }
}

impl CueVolumes {
    pub fn get(&self, cue: Cue) -> f64 {
        match cue {
            Cue::Music => self.music,
            Cue::Thrust => self.thrust,
            Cue::Win => self.win,
            Cue::Lose => self.lose,
            Cue::Alert => self.alert,
        }
    }
}

/// Play/stop named sounds. Cues that were never loaded are ignored.
pub trait SoundBoard {
    /// Start `cue`, replacing any instance already playing.
    fn play(&mut self, cue: Cue, looping: bool);
    /// Stop every instance of `cue`.
    fn stop(&mut self, cue: Cue);
    fn stop_all(&mut self) {
        for cue in Cue::ALL {
            self.stop(cue);
        }
    }
}

/// Kira-backed sound board.
pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<Cue, StaticSoundData>,
    playing: HashMap<Cue, StaticSoundHandle>,
}

impl AudioSystem {
    /// Open the default audio device and load every cue found in `dir`.
    /// Missing or unreadable files are skipped with a warning.
    pub fn new(dir: &Path, volumes: &CueVolumes, master_volume: f64) -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;
        let mut system = Self { manager, sounds: HashMap::new(), playing: HashMap::new() };

        for cue in Cue::ALL {
            if let Err(e) = system.load_sound(cue, &dir.join(cue.file_name()), volumes.get(cue)) {
                log::warn!("Could not load {} sound: {e}", cue.name());
            }
        }
        system.set_master_volume(master_volume);
        log::info!("Audio ready: {}/{} cues loaded", system.sounds.len(), Cue::ALL.len());
        Ok(system)
    }

    /// Load a sound from a file.
    pub fn load_sound(&mut self, cue: Cue, path: &Path, volume: f64) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)?;
        let settings = StaticSoundSettings::new().volume(volume);
        self.sounds.insert(cue, sound_data.with_settings(settings));
        Ok(())
    }

    /// Forget handles for sounds that finished on their own.
    pub fn cleanup(&mut self) {
        self.playing.retain(|_, handle| handle.state() != PlaybackState::Stopped);
    }

    /// Set master volume (0.0 to 1.0).
    pub fn set_master_volume(&mut self, volume: f64) {
        let _ = self.manager.main_track().set_volume(volume, Tween::default());
    }
}

impl SoundBoard for AudioSystem {
    fn play(&mut self, cue: Cue, looping: bool) {
        self.cleanup();
        let Some(data) = self.sounds.get(&cue).cloned() else {
            return;
        };
        self.stop(cue);
        let data = if looping { data.loop_region(..) } else { data };
        match self.manager.play(data) {
            Ok(handle) => {
                self.playing.insert(cue, handle);
            }
            Err(e) => log::warn!("Could not play {} sound: {e}", cue.name()),
        }
    }

    fn stop(&mut self, cue: Cue) {
        if let Some(mut handle) = self.playing.remove(&cue) {
            let _ = handle.stop(Tween::default());
        }
    }
}

/// Sound board that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundBoard for Silent {
    fn play(&mut self, _cue: Cue, _looping: bool) {}
    fn stop(&mut self, _cue: Cue) {}
}

/// Open the audio device, or fall back to [`Silent`] if that fails.
pub fn open_sound_board(dir: &Path, volumes: &CueVolumes, master_volume: f64) -> Box<dyn SoundBoard> {
    match AudioSystem::new(dir, volumes, master_volume) {
        Ok(system) => Box::new(system),
        Err(e) => {
            log::warn!("Audio unavailable ({e}); running silent");
            Box::new(Silent)
        }
    }
}

/// One call made on a [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    Play { cue: Cue, looping: bool },
    Stop(Cue),
}

/// Sound board that records calls and tracks what would be playing.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<SoundEvent>,
    active: HashMap<Cue, bool>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `cue` was started and not stopped since.
    pub fn is_playing(&self, cue: Cue) -> bool {
        self.active.contains_key(&cue)
    }

    /// Number of times `cue` was started.
    pub fn play_count(&self, cue: Cue) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SoundEvent::Play { cue: c, .. } if *c == cue))
            .count()
    }
}

impl SoundBoard for Recorder {
    fn play(&mut self, cue: Cue, looping: bool) {
        self.events.push(SoundEvent::Play { cue, looping });
        self.active.insert(cue, looping);
    }

    fn stop(&mut self, cue: Cue) {
        if self.active.remove(&cue).is_some() {
            self.events.push(SoundEvent::Stop(cue));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_files_and_default_volumes() {
        assert_eq!(Cue::Music.file_name(), "interstellar_theme.mp3");
        assert_eq!(Cue::Alert.file_name(), "alert_sound.wav");
        let v = CueVolumes::default();
        assert_eq!(v.get(Cue::Music), 0.1);
        assert_eq!(v.get(Cue::Thrust), 0.9);
        assert_eq!(v.get(Cue::Lose), 0.8);
    }

    #[test]
    fn recorder_tracks_active_cues() {
        let mut board = Recorder::new();
        board.play(Cue::Music, true);
        board.play(Cue::Thrust, true);
        board.stop(Cue::Thrust);
        board.stop(Cue::Thrust);
        assert!(board.is_playing(Cue::Music));
        assert!(!board.is_playing(Cue::Thrust));
        assert_eq!(board.events.len(), 3);

        board.stop_all();
        assert!(!board.is_playing(Cue::Music));
        assert_eq!(board.events.last(), Some(&SoundEvent::Stop(Cue::Music)));
        assert_eq!(board.play_count(Cue::Music), 1);
    }

    #[test]
    fn silent_accepts_everything() {
        let mut board: Box<dyn SoundBoard> = Box::new(Silent);
        board.play(Cue::Win, false);
        board.stop_all();
    }
}
