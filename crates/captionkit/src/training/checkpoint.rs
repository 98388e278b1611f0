//! # Checkpoint Store
//!
//! Model parameters are opaque blobs, saved and loaded by name.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::errors::{CKResult, CaptionError};

/// File extension for stored blobs.
pub const CHECKPOINT_EXTENSION: &str = "pt";

/// The well-known checkpoint names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::AsRefStr)]
pub enum CheckpointName {
    /// The best-scoring model so far.
    #[strum(serialize = "best-model")]
    BestModel,

    /// The model at early-stopping exit.
    #[strum(serialize = "final-model")]
    FinalModel,

    /// The per-epoch model snapshot.
    #[strum(serialize = "checkpoint-model")]
    CheckpointModel,

    /// Epoch, optimizer and scheduler state; see [`TrainingState`].
    #[strum(serialize = "state_dict_checkpoint")]
    StateDictCheckpoint,
}

/// Persists named blobs.
pub trait CheckpointStore {
    /// Save `blob` under `name`, replacing any previous blob.
    fn save(
        &mut self,
        name: &str,
        blob: &[u8],
    ) -> CKResult<()>;

    /// Load the blob saved under `name`.
    fn load(
        &self,
        name: &str,
    ) -> CKResult<Vec<u8>>;
}

/// Stores each blob as `<dir>/<name>.pt`.
#[derive(Debug, Clone)]
pub struct DirectoryCheckpointStore {
    dir: PathBuf,
}

impl DirectoryCheckpointStore {
    /// Open a store at `dir`, creating it if needed.
    pub fn open<P: AsRef<Path>>(dir: P) -> CKResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file path of `name`.
    pub fn blob_path(
        &self,
        name: &str,
    ) -> PathBuf {
        self.dir.join(format!("{name}.{CHECKPOINT_EXTENSION}"))
    }
}

impl CheckpointStore for DirectoryCheckpointStore {
    fn save(
        &mut self,
        name: &str,
        blob: &[u8],
    ) -> CKResult<()> {
        let path = self.blob_path(name);
        fs::write(&path, blob)?;
        log::debug!("wrote {} bytes to {}", blob.len(), path.display());
        Ok(())
    }

    fn load(
        &self,
        name: &str,
    ) -> CKResult<Vec<u8>> {
        Ok(fs::read(self.blob_path(name))?)
    }
}

/// Training-loop state saved as [`CheckpointName::StateDictCheckpoint`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingState {
    /// The epoch just completed.
    pub epoch: usize,

    /// Opaque scheduler state.
    pub scheduler: Vec<u8>,

    /// Opaque optimizer state.
    pub optimizer: Vec<u8>,
}

impl TrainingState {
    /// Serialize to a blob.
    pub fn to_blob(&self) -> CKResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Deserialize from a blob.
    pub fn from_blob(blob: &[u8]) -> CKResult<Self> {
        serde_json::from_slice(blob).map_err(CaptionError::from)
    }

    /// Load from `store`.
    pub fn load<S: CheckpointStore + ?Sized>(store: &S) -> CKResult<Self> {
        Self::from_blob(&store.load(CheckpointName::StateDictCheckpoint.as_ref())?)
    }
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_checkpoint_names() {
        assert_eq!(CheckpointName::BestModel.as_ref(), "best-model");
        assert_eq!(CheckpointName::FinalModel.as_ref(), "final-model");
        assert_eq!(CheckpointName::CheckpointModel.as_ref(), "checkpoint-model");
        assert_eq!(
            CheckpointName::StateDictCheckpoint.as_ref(),
            "state_dict_checkpoint"
        );
    }

    #[test]
    fn test_directory_store() -> CKResult<()> {
        let tmp = TempDir::new("captionkit-ckpt")?;
        let mut store = DirectoryCheckpointStore::open(tmp.path().join("out"))?;

        store.save("best-model", b"weights-1")?;
        store.save("best-model", b"weights-2")?;
        assert_eq!(store.load("best-model")?, b"weights-2");
        assert!(store.blob_path("best-model").ends_with("best-model.pt"));

        assert!(matches!(store.load("final-model"), Err(CaptionError::Io(_))));
        Ok(())
    }

    #[test]
    fn test_training_state_blob() -> CKResult<()> {
        let state = TrainingState {
            epoch: 3,
            scheduler: vec![1, 2],
            optimizer: vec![9],
        };
        assert_eq!(TrainingState::from_blob(&state.to_blob()?)?, state);
        assert!(TrainingState::from_blob(b"not json").is_err());
        Ok(())
    }
}
