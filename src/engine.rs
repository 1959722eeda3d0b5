//=========================================================================
// Engine
//
// Builds and runs the game.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Runtime]
//         │                          │
//         ├─ with_config()           ├─ spawns core thread
//         ├─ with_tps()              ├─ runs platform on this thread
//         ├─ with_audio_player()     └─ joins core on exit
//         └─ with_share_target()
// ```
//
// `build()` verifies every asset before any scene exists, so a missing
// image or sound stops the game at startup.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::config::GameConfig;
use crate::core::assets::AssetCatalog;
use crate::core::audio::{AudioPlayer, AudioSystem, LogAudioPlayer};
#[cfg(feature = "audio")]
use crate::core::audio::RodioAudioPlayer;
use crate::core::game::Game;
use crate::core::globals::GlobalSystems;
use crate::core::platform_bridge::PlatformEvent;
use crate::core::scene::Stage;
use crate::core::share::{IntentShareTarget, ShareSystem, ShareTarget};
use crate::core::CoreSystemsOrchestrator;
use crate::error::GameError;
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **Config**: [`GameConfig::default`]
/// - **TPS / channel capacity**: taken from `config.engine`
/// - **Audio**: `RodioAudioPlayer` with the `audio` feature and an output
///   device, otherwise [`LogAudioPlayer`]
/// - **Share**: [`IntentShareTarget`] on `config.share.intent_url`
///
/// # Examples
///
/// ```no_run
/// use spot_diff::{EngineBuilder, GameConfig};
///
/// let config = GameConfig::load_or_default()?;
/// EngineBuilder::new()
///     .with_config(config)
///     .build()?
///     .run()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EngineBuilder {
    config: GameConfig,
    audio_player: Option<Box<dyn AudioPlayer>>,
    share_target: Option<Box<dyn ShareTarget>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            audio_player: None,
            share_target: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the core tick rate. The game timer advances by `1 / tps` per
    /// tick.
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.config.engine.tps = tps;
        self
    }

    /// Sets the platform → core channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.config.engine.channel_capacity = capacity;
        self
    }

    /// Plays audio cues through `player` instead of the default player.
    pub fn with_audio_player(mut self, player: Box<dyn AudioPlayer>) -> Self {
        self.audio_player = Some(player);
        self
    }

    /// Opens share requests through `target`.
    pub fn with_share_target(mut self, target: Box<dyn ShareTarget>) -> Self {
        self.share_target = Some(target);
        self
    }

    /// Validates the configuration, verifies assets and starts the game in
    /// its Playing state.
    ///
    /// # Errors
    ///
    /// [`GameError::Config`] for an invalid configuration and
    /// [`GameError::Asset`] for the first missing asset.
    pub fn build(self) -> Result<Engine, GameError> {
        let config = self.config;
        config.validate()?;
        let catalog = AssetCatalog::verify(&config.assets)?;

        info!(
            "Building engine (TPS: {}, channel: {}, regions: {})",
            config.engine.tps,
            config.engine.channel_capacity,
            config.level.regions.len()
        );

        let audio_player = self.audio_player.unwrap_or_else(default_audio_player);
        let share_target = self
            .share_target
            .unwrap_or_else(|| Box::new(IntentShareTarget::new(config.share.intent_url.clone())));

        let stage = Stage::new(config.window.width as f32, config.window.height as f32);
        let systems = GlobalSystems::new(
            Game::new(stage, config.clone()),
            AudioSystem::new(audio_player, catalog),
            ShareSystem::new(share_target),
        );

        Ok(Engine {
            orchestrator: CoreSystemsOrchestrator::new(systems),
            config,
        })
    }
}

#[cfg(feature = "audio")]
fn default_audio_player() -> Box<dyn AudioPlayer> {
    match RodioAudioPlayer::spawn() {
        Ok(player) => Box::new(player),
        Err(e) => {
            log::warn!("Audio disabled: {}", e);
            Box::new(LogAudioPlayer)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn default_audio_player() -> Box<dyn AudioPlayer> {
    Box::new(LogAudioPlayer)
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// A built game, ready to run.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► Input, Game, Audio, Share
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Pointer Input
///
/// Communication: bounded crossbeam channel (PlatformEvent)
/// ```
pub struct Engine {
    orchestrator: CoreSystemsOrchestrator<Stage>,
    config: GameConfig,
}

impl Engine {
    /// The configuration the engine was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the bounded platform → core channel
    /// 2. Spawns the core thread at the configured TPS
    /// 3. Runs the platform event loop (blocks here)
    /// 4. On close: `WindowClosed` stops the core thread, which is joined
    ///
    /// # Errors
    ///
    /// [`GameError::Platform`] if the event loop fails. A panicked core
    /// thread is logged, not returned.
    pub fn run(self) -> Result<(), GameError> {
        let tps = self.config.engine.tps;
        let capacity = self.config.engine.channel_capacity;
        info!("Starting engine runtime (TPS: {})", tps);

        //--- 1. Create communication channel -----------------------------
        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) = bounded(capacity);
        info!("Platform channel created (capacity: {})", capacity);

        //--- 2. Spawn the core logic thread -------------------------------
        let core_handle = self.orchestrator.spawn_core_thread(rx, tps);
        info!("Core logic thread spawned");

        //--- 3. Launch the platform subsystem -----------------------------
        let platform = Platform::new(tx, self.config.window.clone());
        info!("Platform initialized, entering event loop");
        let result = platform.run();
        info!("Platform event loop exited");

        //--- 4. Cleanup: wait for the core thread ------------------------
        match core_handle.join() {
            Ok(()) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        info!("Engine shutdown complete");
        result.map_err(GameError::from)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
