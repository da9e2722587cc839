pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod page_table;
pub mod process;
pub mod replacement;
pub mod report;
pub mod simulation;
pub mod translation;

// Re-export commonly used items for convenience
pub use config::SimulationConfig;
pub use constants::*;
pub use error::{Error, Result};
pub use io::SimulationInput;
pub use process::{Process, ProcessId};
pub use replacement::ReplacementStrategy;
pub use report::{OutputMode, SimulationStats};
pub use simulation::Simulation;
pub use translation::{AccessOutcome, PhysicalAddress, VirtualAddress};
