//=========================================================================
// Audio
//=========================================================================
//
// Fire-and-forget cue playback.
//
//   Game → push(AudioCue) → MessageBus → AudioSystem::update()
//                                          ↓
//                                  AudioPlayer::play(clip, path)
//
// With the `audio` feature, `RodioAudioPlayer` decodes and plays clips on
// its own thread. Without it, `LogAudioPlayer` stands in.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::Path;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetCatalog, AssetId};
use crate::core::message_bus::MessageBus;

#[cfg(feature = "audio")]
mod rodio_player;

#[cfg(feature = "audio")]
pub use rodio_player::{AudioError, RodioAudioPlayer};

//=== AudioCue ============================================================

/// Sound events raised by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A difference was found.
    Hit,
    /// All differences were found.
    Clear,
}

impl AudioCue {
    pub fn asset(self) -> AssetId {
        match self {
            AudioCue::Hit => AssetId::HitSound,
            AudioCue::Clear => AssetId::ClearSound,
        }
    }
}

//=== AudioPlayer =========================================================

/// Plays a preloaded clip. Nothing is returned to the game.
pub trait AudioPlayer: Send {
    fn play(&mut self, clip: AssetId, path: &Path);
}

/// Player that only logs; used when no output device is available or the
/// `audio` feature is off.
#[derive(Debug, Default)]
pub struct LogAudioPlayer;

impl AudioPlayer for LogAudioPlayer {
    fn play(&mut self, clip: AssetId, path: &Path) {
        debug!(target: "audio", "Playing {:?} ({})", clip, path.display());
    }
}

//=== AudioSystem =========================================================

/// Drains queued cues once per tick and hands them to the player.
pub struct AudioSystem {
    player: Box<dyn AudioPlayer>,
    catalog: AssetCatalog,
}

impl AudioSystem {
    pub fn new(player: Box<dyn AudioPlayer>, catalog: AssetCatalog) -> Self {
        Self { player, catalog }
    }

    /// Plays every queued cue in the order it was raised.
    pub fn update(&mut self, bus: &mut MessageBus) {
        for cue in bus.drain::<AudioCue>() {
            let clip = cue.asset();
            self.player.play(clip, self.catalog.path(clip));
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetConfig;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingAudio(Arc<Mutex<Vec<AssetId>>>);

    impl AudioPlayer for RecordingAudio {
        fn play(&mut self, clip: AssetId, _path: &Path) {
            self.0.lock().unwrap().push(clip);
        }
    }

    #[test]
    fn cues_map_to_sound_assets() {
        assert_eq!(AudioCue::Hit.asset(), AssetId::HitSound);
        assert_eq!(AudioCue::Clear.asset(), AssetId::ClearSound);
    }

    #[test]
    fn update_plays_cues_in_order_and_drains_them() {
        let recorder = RecordingAudio::default();
        let mut system = AudioSystem::new(
            Box::new(recorder.clone()),
            AssetCatalog::from_config(&AssetConfig::default()),
        );
        let mut bus = MessageBus::new();
        bus.push(AudioCue::Hit);
        bus.push(AudioCue::Clear);

        system.update(&mut bus);

        assert_eq!(*recorder.0.lock().unwrap(), vec![AssetId::HitSound, AssetId::ClearSound]);
        assert!(!bus.has_messages::<AudioCue>());
    }

    #[test]
    fn update_without_cues_plays_nothing() {
        let recorder = RecordingAudio::default();
        let mut system = AudioSystem::new(
            Box::new(recorder.clone()),
            AssetCatalog::from_config(&AssetConfig::default()),
        );

        system.update(&mut MessageBus::new());
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
