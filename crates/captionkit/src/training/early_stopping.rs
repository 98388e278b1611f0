//! # Early Stopping
//!
//! Tracks a validation score across epochs, saving the best model and
//! deciding when training should stop.

use crate::{
    errors::CKResult,
    training::{CheckpointName, CheckpointStore, TrainingState},
};

/// Whether higher or lower scores are better.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreMode {
    /// Higher is better.
    #[default]
    Max,

    /// Lower is better.
    Min,
}

impl ScoreMode {
    /// The starting best score.
    pub fn initial_best(self) -> f64 {
        match self {
            ScoreMode::Max => 0.0,
            ScoreMode::Min => f64::INFINITY,
        }
    }
}

/// Options for [`EarlyStopping`].
#[derive(Debug, Clone)]
pub struct EarlyStoppingOptions {
    /// Consecutive non-improving epochs tolerated before stopping.
    pub patience: usize,

    /// Score direction.
    pub mode: ScoreMode,

    /// Minimum change that counts as an improvement.
    pub threshold: f64,

    /// Save [`CheckpointName::FinalModel`] when stopping.
    pub save_final_model: bool,
}

impl Default for EarlyStoppingOptions {
    fn default() -> Self {
        Self {
            patience: 5,
            mode: ScoreMode::Max,
            threshold: 1e-4,
            save_final_model: false,
        }
    }
}

impl EarlyStoppingOptions {
    /// Set the patience.
    pub fn with_patience(
        self,
        patience: usize,
    ) -> Self {
        Self { patience, ..self }
    }

    /// Set the score mode.
    pub fn with_mode(
        self,
        mode: ScoreMode,
    ) -> Self {
        Self { mode, ..self }
    }

    /// Set the improvement threshold.
    pub fn with_threshold(
        self,
        threshold: f64,
    ) -> Self {
        Self { threshold, ..self }
    }

    /// Save the final model on exit.
    pub fn with_save_final_model(
        self,
        save_final_model: bool,
    ) -> Self {
        Self {
            save_final_model,
            ..self
        }
    }

    /// Build an [`EarlyStopping`] monitor writing to `store`.
    pub fn init<C: CheckpointStore>(
        self,
        store: C,
    ) -> EarlyStopping<C> {
        EarlyStopping {
            best_score: self.mode.initial_best(),
            bad_epochs: 0,
            options: self,
            store,
        }
    }
}

/// The result of one [`EarlyStopping::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpochOutcome {
    /// New best score; the best model was saved.
    Improved {
        /// The new best score.
        best_score: f64,
    },

    /// No improvement, still within patience.
    NoImprovement {
        /// Consecutive bad epochs so far.
        bad_epochs: usize,
    },

    /// Patience exhausted; training should end.
    Stop {
        /// The best score reached.
        best_score: f64,
    },
}

impl EpochOutcome {
    /// Should training go on?
    pub fn should_continue(&self) -> bool {
        !matches!(self, EpochOutcome::Stop { .. })
    }
}

/// Early-stopping monitor.
#[derive(Debug)]
pub struct EarlyStopping<C: CheckpointStore> {
    options: EarlyStoppingOptions,

    store: C,

    best_score: f64,

    bad_epochs: usize,
}

impl<C: CheckpointStore> EarlyStopping<C> {
    /// Get the options.
    pub fn options(&self) -> &EarlyStoppingOptions {
        &self.options
    }

    /// The best score so far.
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    /// Consecutive non-improving epochs.
    pub fn bad_epochs(&self) -> usize {
        self.bad_epochs
    }

    /// The checkpoint store.
    pub fn store(&self) -> &C {
        &self.store
    }

    /// Release the checkpoint store.
    pub fn into_store(self) -> C {
        self.store
    }

    /// Does `score` beat the best score by more than the threshold?
    pub fn is_improvement(
        &self,
        score: f64,
    ) -> bool {
        match self.options.mode {
            ScoreMode::Max => score - self.best_score > self.options.threshold,
            ScoreMode::Min => self.best_score - score > self.options.threshold,
        }
    }

    /// Record an epoch's score.
    ///
    /// `model` is the current parameter blob; it is saved as
    /// [`CheckpointName::BestModel`] on improvement, and as
    /// [`CheckpointName::FinalModel`] on stop when configured.
    pub fn step(
        &mut self,
        score: f64,
        model: &[u8],
    ) -> CKResult<EpochOutcome> {
        if self.is_improvement(score) {
            self.best_score = score;
            self.bad_epochs = 0;
            log::info!("saving new best-model with score: {score:.4}");
            self.store.save(CheckpointName::BestModel.as_ref(), model)?;
            return Ok(EpochOutcome::Improved { best_score: score });
        }

        self.bad_epochs += 1;
        log::info!("bad epoch; total bad epochs: {}", self.bad_epochs);
        if self.bad_epochs < self.options.patience {
            return Ok(EpochOutcome::NoImprovement {
                bad_epochs: self.bad_epochs,
            });
        }

        log::info!(
            "stopping early; best score: {:.4}; saving final model: {}",
            self.best_score,
            self.options.save_final_model
        );
        if self.options.save_final_model {
            self.store.save(CheckpointName::FinalModel.as_ref(), model)?;
        }
        Ok(EpochOutcome::Stop {
            best_score: self.best_score,
        })
    }

    /// Save the per-epoch [`CheckpointName::CheckpointModel`].
    pub fn save_epoch_checkpoint(
        &mut self,
        model: &[u8],
    ) -> CKResult<()> {
        log::info!("saving epoch checkpoint");
        self.store
            .save(CheckpointName::CheckpointModel.as_ref(), model)
    }

    /// Save [`CheckpointName::StateDictCheckpoint`].
    pub fn save_training_state(
        &mut self,
        state: &TrainingState,
    ) -> CKResult<()> {
        self.store.save(
            CheckpointName::StateDictCheckpoint.as_ref(),
            &state.to_blob()?,
        )
    }
}
