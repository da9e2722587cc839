use std::io::{self, Read};

use crate::memory::Page;
use crate::page_table::PageTable;

pub type ProcessId = u32;

/// A loaded process image, its page table and its access counters
#[derive(Debug, Clone)]
pub struct Process {
    pages: Vec<Page>,
    num_bytes: usize,
    pub(crate) page_table: PageTable,
    pub(crate) memory_accesses: u64,
    pub(crate) page_faults: u64,
}

impl Process {
    pub fn new(pages: Vec<Page>) -> Self {
        let num_bytes = pages.iter().map(Page::size).sum();
        let page_table = PageTable::new(pages.len());

        Process {
            pages,
            num_bytes,
            page_table,
            memory_accesses: 0,
            page_faults: 0,
        }
    }

    /// Cut a process image into pages
    pub fn read_from_input<R: Read>(input: &mut R) -> io::Result<Self> {
        let mut pages = Vec::new();
        while let Some(page) = Page::read_from_input(input)? {
            pages.push(page);
        }
        Ok(Self::new(pages))
    }

    /// Total bytes across all pages
    pub fn size(&self) -> usize {
        self.num_bytes
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_table(&self) -> &PageTable {
        &self.page_table
    }

    #[inline]
    pub fn page_index_valid(&self, index: usize) -> bool {
        index < self.pages.len()
    }

    pub fn memory_accesses(&self) -> u64 {
        self.memory_accesses
    }

    pub fn page_faults(&self) -> u64 {
        self.page_faults
    }

    pub fn resident_set_size(&self) -> usize {
        self.page_table.present_count()
    }

    /// Faults as a percentage of accesses; 0 before the first access
    pub fn fault_rate(&self) -> f64 {
        if self.memory_accesses == 0 {
            return 0.0;
        }
        self.page_faults as f64 / self.memory_accesses as f64 * 100.0
    }
}
