//=========================================================================
// Asset Catalog
//=========================================================================
//
// Stable identifiers for the four preloaded resources and where they
// live on disk. Decoding is the renderer's and audio backend's business;
// the catalog only guarantees at startup that every file is present.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::config::AssetConfig;
use crate::error::AssetError;

//=== AssetId =============================================================

/// Identifier of a preloaded resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    /// Reference illustration (top).
    SampleImage,
    /// Illustration containing the differences (bottom).
    PuzzleImage,
    /// Played when a difference is found.
    HitSound,
    /// Played when the last difference is found.
    ClearSound,
}

impl AssetId {
    pub const ALL: [AssetId; 4] = [
        AssetId::SampleImage,
        AssetId::PuzzleImage,
        AssetId::HitSound,
        AssetId::ClearSound,
    ];

    fn index(self) -> usize {
        match self {
            AssetId::SampleImage => 0,
            AssetId::PuzzleImage => 1,
            AssetId::HitSound => 2,
            AssetId::ClearSound => 3,
        }
    }
}

//=== AssetCatalog ========================================================

/// Resolved asset paths.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    paths: [PathBuf; 4],
}

impl AssetCatalog {
    /// Resolves paths from configuration without touching the filesystem.
    pub fn from_config(config: &AssetConfig) -> Self {
        Self {
            paths: [
                config.root.join(&config.sample_image),
                config.root.join(&config.puzzle_image),
                config.root.join(&config.hit_sound),
                config.root.join(&config.clear_sound),
            ],
        }
    }

    /// Resolves paths and fails on the first asset that is not a file.
    pub fn verify(config: &AssetConfig) -> Result<Self, AssetError> {
        let catalog = Self::from_config(config);

        for id in AssetId::ALL {
            let path = catalog.path(id);
            if !path.is_file() {
                return Err(AssetError::Missing {
                    id,
                    path: path.to_path_buf(),
                });
            }
            debug!(target: "assets", "Found {:?} at {}", id, path.display());
        }

        info!(target: "assets", "All {} assets present", AssetId::ALL.len());
        Ok(catalog)
    }

    pub fn path(&self, id: AssetId) -> &Path {
        &self.paths[id.index()]
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
