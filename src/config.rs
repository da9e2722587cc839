use crate::constants::{DEFAULT_MAX_FRAMES, DEFAULT_NUM_FRAMES};
use crate::error::{Error, Result};
use crate::replacement::ReplacementStrategy;
use crate::report::OutputMode;

/// Settings fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Size of the physical frame pool
    pub total_frames: usize,
    /// Resident-set cap; a process at the cap replaces one of its own pages
    pub max_frames_per_process: usize,
    pub strategy: ReplacementStrategy,
    /// Emit per-access diagnostics; never changes results
    pub verbose: bool,
    pub output: OutputMode,
}

impl SimulationConfig {
    pub fn new(total_frames: usize, max_frames_per_process: usize, strategy: ReplacementStrategy) -> Self {
        SimulationConfig {
            total_frames,
            max_frames_per_process,
            strategy,
            ..Self::default()
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_frames == 0 {
            return Err(Error::InvalidConfig("frame count must be at least 1".to_string()));
        }
        if self.max_frames_per_process == 0 {
            return Err(Error::InvalidConfig(
                "max frames per process must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            total_frames: DEFAULT_NUM_FRAMES,
            max_frames_per_process: DEFAULT_MAX_FRAMES,
            strategy: ReplacementStrategy::default(),
            verbose: false,
            output: OutputMode::default(),
        }
    }
}
