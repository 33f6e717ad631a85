//! Run driver for the overlapping-model solver
//!
//! Owns the immutable pattern data and the mutable wave, and repeats
//! observe → propagate until the wave is fully decided, a cell runs dry, or
//! a cooperative cancellation signal is raised. Terminal states are
//! absorbing; the driver alone decides them.

use crate::algorithm::observer::{observe, ObserveOutcome};
use crate::algorithm::propagation::propagate;
use crate::algorithm::wave::Wave;
use crate::analysis::compatibility::CompatibilityOracle;
use crate::analysis::palette::Exemplar;
use crate::analysis::patterns::{PatternSet, Symmetry};
use crate::io::configuration::MAX_OUTPUT_DIMENSION;
use crate::io::error::WithContext;
use ndarray::Array2;
use rand::{rngs::StdRng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Run parameters for a single synthesis
#[derive(Clone, Copy, Debug)]
pub struct ModelConfig {
    /// Edge length N of extracted patterns
    pub tile_size: usize,
    /// Output width in cells
    pub output_width: usize,
    /// Output height in cells
    pub output_height: usize,
    /// Dihedral symmetry level for pattern extraction
    pub symmetry: Symmetry,
    /// Whether exemplar window extraction wraps
    pub periodic_input: bool,
    /// Whether output neighbor lookup wraps
    pub periodic_output: bool,
    /// Seed for the run's deterministic generator
    pub seed: u32,
}

/// Overall state of a synthesis run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStatus {
    /// Undecided cells remain and no failure has occurred
    Running,
    /// Every cell collapsed to a single pattern
    Succeeded,
    /// Some cell ran out of possible patterns
    Contradicted,
    /// The cancellation signal was raised between steps
    Cancelled,
}

/// Overlapping-model wave function collapse executor
///
/// Observation and propagation borrow the wave exclusively for one step at
/// a time; the pattern set and compatibility oracle are shared read-only
/// for the lifetime of the run.
pub struct OverlappingModel {
    patterns: PatternSet,
    oracle: CompatibilityOracle,
    wave: Wave,
    rng: StdRng,
    palette: Vec<[u8; 4]>,
    cancel_signal: Option<Arc<AtomicBool>>,
    iteration: usize,
    status: RunStatus,
    contradiction_cell: Option<[usize; 2]>,
}

impl OverlappingModel {
    /// Build a model from an exemplar and run parameters
    ///
    /// Extracts the weighted pattern set, builds the compatibility oracle,
    /// and allocates the wave. Everything the hot loop touches is allocated
    /// here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The output dimensions are zero or exceed the size limit
    /// - Pattern extraction fails (window larger than the exemplar)
    /// - The exemplar yields more patterns than the solver supports
    pub fn new(exemplar: &Exemplar, config: ModelConfig) -> crate::io::error::Result<Self> {
        if config.output_width == 0
            || config.output_height == 0
            || config.output_width > MAX_OUTPUT_DIMENSION
            || config.output_height > MAX_OUTPUT_DIMENSION
        {
            return Err(crate::io::error::invalid_parameter(
                "output dimensions",
                &format!("{}x{}", config.output_width, config.output_height),
                &format!("must be between 1 and {MAX_OUTPUT_DIMENSION}"),
            ));
        }

        let patterns = PatternSet::extract(
            exemplar,
            config.tile_size,
            config.symmetry,
            config.periodic_input,
        )?;
        let oracle = CompatibilityOracle::build(&patterns)?;
        let wave = Wave::new(
            config.output_height,
            config.output_width,
            &patterns,
            &oracle,
            config.periodic_output,
        )?;

        log::debug!(
            "Model ready: {} patterns of size {} for a {}x{} wave",
            patterns.len(),
            config.tile_size,
            config.output_width,
            config.output_height
        );

        Ok(Self {
            patterns,
            oracle,
            wave,
            rng: StdRng::seed_from_u64(u64::from(config.seed)),
            palette: exemplar.palette().to_vec(),
            cancel_signal: None,
            iteration: 0,
            status: RunStatus::Running,
            contradiction_cell: None,
        })
    }

    /// Install a cooperative cancellation signal
    ///
    /// The flag is checked between observation steps, never inside a
    /// propagation fixpoint.
    pub fn set_cancel_signal(&mut self, signal: Arc<AtomicBool>) {
        self.cancel_signal = Some(signal);
    }

    /// Execute one observe → propagate step
    ///
    /// Returns `Ok(true)` while the run should continue and `Ok(false)`
    /// once a terminal status is reached; `status()` reports which.
    ///
    /// # Errors
    ///
    /// Never errs in the steady state: contradictions and cancellation are
    /// converted into terminal statuses here rather than surfaced.
    pub fn execute_iteration(&mut self) -> crate::io::error::Result<bool> {
        if self.status != RunStatus::Running {
            return Ok(false);
        }

        if self.is_cancelled() {
            self.status = RunStatus::Cancelled;
            log::debug!("Run cancelled at iteration {}", self.iteration);
            return Ok(false);
        }

        self.iteration += 1;

        match observe(&mut self.wave, &mut self.rng) {
            ObserveOutcome::Done => {
                self.status = RunStatus::Succeeded;
                log::debug!("Wave fully decided after {} iterations", self.iteration);
                return Ok(false);
            }
            ObserveOutcome::Contradiction { cell } => {
                self.status = RunStatus::Contradicted;
                self.contradiction_cell = Some(self.wave.cell_position(cell));
                log::debug!(
                    "Contradiction at cell {:?} on iteration {}",
                    self.wave.cell_position(cell),
                    self.iteration
                );
                return Ok(false);
            }
            ObserveOutcome::Decided { .. } => {}
        }

        if let Err(error) = propagate(&mut self.wave, &self.oracle) {
            self.status = RunStatus::Contradicted;
            if let crate::io::error::SynthesisError::Contradiction { cell, .. } = error {
                self.contradiction_cell = Some(cell);
            }
            log::debug!("Propagation emptied a cell on iteration {}", self.iteration);
            return Ok(false);
        }

        Ok(true)
    }

    /// Run to a terminal status
    ///
    /// # Errors
    ///
    /// Propagates only unexpected internal failures; contradiction and
    /// cancellation end the run through the returned status
    pub fn run(&mut self) -> crate::io::error::Result<RunStatus> {
        while self.execute_iteration()? {}
        Ok(self.status)
    }

    /// Terminal or running status of the model
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Completed observe → propagate steps so far
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Position of the cell that ran dry, when the run contradicted
    pub const fn contradiction_cell(&self) -> Option<[usize; 2]> {
        self.contradiction_cell
    }

    /// Read access to the wave, for progress and diagnostics
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Mutable access to the wave, the seeding hook for external constraints
    pub fn wave_mut(&mut self) -> &mut Wave {
        &mut self.wave
    }

    /// The extracted pattern set
    pub const fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// The compatibility oracle
    pub const fn oracle(&self) -> &CompatibilityOracle {
        &self.oracle
    }

    /// RGBA palette carried over from the exemplar
    pub fn palette(&self) -> &[[u8; 4]] {
        &self.palette
    }

    /// Decode the decided wave into a palette-index grid
    ///
    /// Each cell contributes the top-left pixel of its sole surviving
    /// pattern.
    ///
    /// # Errors
    ///
    /// Returns `Contradiction` (or `Cancelled`) when the run did not
    /// succeed, enriched with the iteration the run ended on
    pub fn render(&self) -> crate::io::error::Result<Array2<usize>> {
        match self.status {
            RunStatus::Succeeded => {}
            RunStatus::Cancelled => {
                return Err(crate::io::error::SynthesisError::Cancelled { iteration: None })
                    .with_iteration(self.iteration);
            }
            RunStatus::Running | RunStatus::Contradicted => {
                return Err(crate::io::error::SynthesisError::Contradiction {
                    cell: self.contradiction_cell.unwrap_or([0, 0]),
                    iteration: None,
                })
                .with_iteration(self.iteration);
            }
        }

        let mut cells = Array2::zeros((self.wave.rows(), self.wave.cols()));
        for row in 0..self.wave.rows() {
            for col in 0..self.wave.cols() {
                let cell = self.wave.cell_index(row, col);
                let pattern = self.wave.sole_pattern(cell).unwrap_or(0);
                let index = self
                    .patterns
                    .pixels(pattern)
                    .and_then(|pixels| pixels.get([0, 0]))
                    .copied()
                    .unwrap_or(0);
                if let Some(target) = cells.get_mut([row, col]) {
                    *target = index;
                }
            }
        }
        Ok(cells)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel_signal
            .as_ref()
            .is_some_and(|signal| signal.load(Ordering::Relaxed))
    }
}
