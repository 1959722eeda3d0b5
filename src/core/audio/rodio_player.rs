//=========================================================================
// Rodio Audio Player
//=========================================================================
//
// Plays clips through the default output device.
//
//   core thread                      audio thread
//   play(clip, path) ──Sender<PathBuf>──> decode → Sink → detach
//
// rodio's output stream must stay alive for as long as sounds play and is
// not `Send`, so it is opened and kept on a dedicated thread. The core
// thread only ever sends paths; it never waits on playback.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{bounded, unbounded, Sender};
use log::{debug, info, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use thiserror::Error;

//=== Internal Dependencies ===============================================

use super::AudioPlayer;
use crate::core::assets::AssetId;

//=== AudioError ==========================================================

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoDevice(String),

    #[error("failed to start audio thread: {0}")]
    Thread(#[source] std::io::Error),

    #[error("failed to open clip {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode clip {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("playback failed: {0}")]
    Playback(String),
}

//=== RodioAudioPlayer ====================================================

pub struct RodioAudioPlayer {
    clips: Sender<PathBuf>,
}

impl RodioAudioPlayer {
    /// Opens the default output device on a new `audio` thread.
    ///
    /// Returns once the device is open, or with [`AudioError::NoDevice`]
    /// if there is none.
    pub fn spawn() -> Result<Self, AudioError> {
        let (clips, queue) = unbounded::<PathBuf>();
        let (ready_tx, ready_rx) = bounded::<Result<(), AudioError>>(1);

        let worker = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                // spawn() blocks on ready_rx until one of these is sent
                let (_stream, handle) = match OutputStream::try_default() {
                    Ok(output) => {
                        let _ = ready_tx.send(Ok(()));
                        output
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(AudioError::NoDevice(e.to_string())));
                        return;
                    }
                };

                for path in queue {
                    if let Err(e) = play_file(&handle, &path) {
                        warn!(target: "audio", "{}", e);
                    }
                }
                debug!(target: "audio", "Audio thread stopped");
            })
            .map_err(AudioError::Thread)?;

        match ready_rx.recv() {
            Ok(Ok(())) => {
                info!(target: "audio", "Audio output opened");
                Ok(Self { clips })
            }
            Ok(Err(e)) => {
                // The worker has already returned
                if worker.join().is_err() {
                    warn!(target: "audio", "Audio thread panicked during startup");
                }
                Err(e)
            }
            Err(_) => Err(AudioError::NoDevice("audio thread exited during startup".into())),
        }
    }
}

impl AudioPlayer for RodioAudioPlayer {
    fn play(&mut self, clip: AssetId, path: &Path) {
        debug!(target: "audio", "Queueing {:?} ({})", clip, path.display());
        if self.clips.send(path.to_path_buf()).is_err() {
            warn!(target: "audio", "Audio thread is gone, dropping {:?}", clip);
        }
    }
}

//=== Playback ============================================================

fn play_file(handle: &OutputStreamHandle, path: &Path) -> Result<(), AudioError> {
    let source = decode(path)?;
    let sink = Sink::try_new(handle).map_err(|e| AudioError::Playback(e.to_string()))?;
    sink.append(source);
    sink.detach();
    Ok(())
}

fn decode(path: &Path) -> Result<Decoder<BufReader<File>>, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
