//=========================================================================
// Error Types
//=========================================================================
//
// Startup-fatal error taxonomy.
//
//   ConfigError   - config file unreadable, malformed or out of range
//   AssetError    - a required image or audio clip is missing
//   PlatformError - winit event loop could not be created or run
//   GameError     - aggregate returned by the engine facade
//
// Nothing here is recoverable at runtime: once the engine is running,
// every core operation succeeds by construction.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetId;
use crate::core::platform_bridge::PlatformError;

//=== ConfigError =========================================================

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

//=== AssetError ==========================================================

/// A required resource could not be found.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("missing asset {id:?} at {path}")]
    Missing { id: AssetId, path: PathBuf },
}

//=== GameError ===========================================================

/// Everything that can stop the game from starting.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error(transparent)]
    Platform(#[from] PlatformError),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_message_names_the_path() {
        let err = AssetError::Missing {
            id: AssetId::HitSound,
            path: PathBuf::from("assets/sound/hit.mp3"),
        };
        let msg = err.to_string();
        assert!(msg.contains("HitSound"), "Message should name the asset: {}", msg);
        assert!(msg.contains("assets/sound/hit.mp3"), "Message should name the path: {}", msg);
    }

    #[test]
    fn game_error_wraps_config_error_transparently() {
        let err: GameError = ConfigError::Invalid("tps must be positive".into()).into();
        assert_eq!(err.to_string(), "invalid configuration: tps must be positive");
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + std::error::Error>() {}
        assert_send_sync::<GameError>();
    }
}
