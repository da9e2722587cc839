//! Error types for the paging simulator.
//!
//! The first group of variants are the fatal conditions of the engine itself; the
//! rest come from loading simulation files and configuration.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

use crate::process::ProcessId;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Page index outside the process's page count
    #[error("SEGFAULT - INVALID PAGE (process {process_id}, page {page})")]
    InvalidPage { process_id: ProcessId, page: usize },

    /// Offset outside the resolved page's byte length
    #[error("SEGFAULT - INVALID OFFSET (process {process_id}, page {page}, offset {offset})")]
    InvalidOffset {
        process_id: ProcessId,
        page: usize,
        offset: usize,
    },

    #[error("Access names unknown process {0}")]
    UnknownProcess(ProcessId),

    /// Process has no free frame to take and nothing resident to evict
    #[error("No frame available for process {0}: no free frames and no resident pages to evict")]
    NoEvictableFrame(ProcessId),

    #[error("Invalid strategy flag: {0} (expected FIFO or LRU)")]
    InvalidStrategy(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to read file for PID {pid}: {}", .path.display())]
    MissingProcessImage { pid: ProcessId, path: PathBuf },

    #[error("Error reading simulation file: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the two segmentation-fault conditions
    pub fn is_segfault(&self) -> bool {
        matches!(self, Self::InvalidPage { .. } | Self::InvalidOffset { .. })
    }

    /// Numeric exit status for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::InvalidPage { .. } | Self::InvalidOffset { .. } => 139,
            Self::InvalidStrategy(_) | Self::InvalidConfig(_) => 2,
            Self::MissingProcessImage { .. } | Self::Parse(_) => 3,
            Self::UnknownProcess(_) | Self::NoEvictableFrame(_) => 4,
            Self::Io(_) => 7,
        }
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}
