use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::page_table::PageTable;

/// Page replacement policy. Victims are always chosen from the faulting
/// process's own table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplacementStrategy {
    /// Evict the page that has been resident longest
    #[default]
    Fifo,
    /// Evict the page touched least recently
    Lru,
}

impl ReplacementStrategy {
    pub fn select_victim(&self, page_table: &PageTable) -> Option<usize> {
        match self {
            Self::Fifo => page_table.oldest_present_row(),
            Self::Lru => page_table.least_recently_used_row(),
        }
    }
}

impl FromStr for ReplacementStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FIFO" => Ok(Self::Fifo),
            "LRU" => Ok(Self::Lru),
            _ => Err(Error::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for ReplacementStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fifo => write!(f, "FIFO"),
            Self::Lru => write!(f, "LRU"),
        }
    }
}
