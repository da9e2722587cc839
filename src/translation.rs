use std::fmt;

use crate::constants::*;
use crate::error::{Error, Result};
use crate::memory::FrameIndex;
use crate::process::ProcessId;

/// A trace entry decomposed into its page and offset components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualAddress {
    pub process_id: ProcessId,
    pub page: usize,
    pub offset: usize,
}

impl VirtualAddress {
    pub fn new(process_id: ProcessId, page: usize, offset: usize) -> Self {
        VirtualAddress { process_id, page, offset }
    }

    /// Decompose a raw 16-bit address into its components
    pub fn from_raw(process_id: ProcessId, raw: u32) -> Self {
        let page = ((raw >> PAGE_SHIFT) & PAGE_MASK) as usize;
        let offset = (raw & OFFSET_MASK) as usize;

        VirtualAddress { process_id, page, offset }
    }

    /// Parse an address token written as exactly `ADDRESS_BITS` binary digits
    pub fn from_string(process_id: ProcessId, token: &str) -> Result<Self> {
        let well_formed = token.len() == ADDRESS_BITS as usize
            && token.bytes().all(|b| b == b'0' || b == b'1');
        if !well_formed {
            return Err(Error::Parse(format!(
                "Invalid virtual address for PID {}: {} (expected {} binary digits)",
                process_id, token, ADDRESS_BITS
            )));
        }

        let raw = u32::from_str_radix(token, 2)
            .map_err(|_| Error::Parse(format!("Invalid virtual address: {}", token)))?;
        Ok(Self::from_raw(process_id, raw))
    }

    /// Recombine page and offset into the raw address bits
    #[inline]
    pub fn raw(&self) -> u32 {
        ((self.page as u32) << PAGE_SHIFT) | self.offset as u32
    }
}

impl fmt::Display for VirtualAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PID {} @ {:0width$b} [page: {}; offset: {}]",
            self.process_id,
            self.raw(),
            self.page,
            self.offset,
            width = ADDRESS_BITS as usize
        )
    }
}

/// Frame plus offset; derived during translation, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalAddress {
    pub frame: FrameIndex,
    pub offset: usize,
}

impl PhysicalAddress {
    pub fn new(frame: FrameIndex, offset: usize) -> Self {
        PhysicalAddress { frame, offset }
    }
}

impl fmt::Display for PhysicalAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0fw$b}{:0ow$b} [frame: {}; offset: {}]",
            self.frame,
            self.offset,
            self.frame,
            self.offset,
            fw = PAGE_BITS as usize,
            ow = OFFSET_BITS as usize
        )
    }
}

/// What happened on one successfully translated access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessOutcome {
    pub byte: u8,
    pub physical_address: PhysicalAddress,
    pub page_fault: bool,
    /// Page of the same process that gave up its frame, if any
    pub evicted_page: Option<usize>,
    pub resident_set_size: usize,
}
