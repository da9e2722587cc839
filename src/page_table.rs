use crate::memory::FrameIndex;

/// Virtual clock value; one tick per translated access
pub type VirtualTime = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTableRow {
    pub present: bool,
    pub frame: Option<FrameIndex>,
    pub loaded_at: VirtualTime,
    pub last_accessed_at: VirtualTime,
}

impl PageTableRow {
    /// Record a load into `frame` at time `now`
    pub(crate) fn mark_present(&mut self, frame: FrameIndex, now: VirtualTime) {
        self.present = true;
        self.frame = Some(frame);
        self.loaded_at = now;
        self.last_accessed_at = now;
    }

    /// Drop residency, returning the frame the row held
    pub(crate) fn mark_absent(&mut self) -> Option<FrameIndex> {
        self.present = false;
        self.frame.take()
    }

    pub(crate) fn touch(&mut self, now: VirtualTime) {
        self.last_accessed_at = now;
    }
}

/// Flat per-process table, one row per page of the process image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    rows: Vec<PageTableRow>,
}

impl PageTable {
    pub fn new(num_pages: usize) -> Self {
        PageTable {
            rows: vec![PageTableRow::default(); num_pages],
        }
    }

    pub fn rows(&self) -> &[PageTableRow] {
        &self.rows
    }

    pub fn row(&self, page: usize) -> Option<&PageTableRow> {
        self.rows.get(page)
    }

    pub(crate) fn row_mut(&mut self, page: usize) -> Option<&mut PageTableRow> {
        self.rows.get_mut(page)
    }

    pub fn present_count(&self) -> usize {
        self.rows.iter().filter(|row| row.present).count()
    }

    /// Present row loaded earliest; ties go to the lowest page index
    pub fn oldest_present_row(&self) -> Option<usize> {
        self.min_present_by(|row| row.loaded_at)
    }

    /// Present row touched least recently; ties go to the lowest page index
    pub fn least_recently_used_row(&self) -> Option<usize> {
        self.min_present_by(|row| row.last_accessed_at)
    }

    fn min_present_by<F>(&self, key: F) -> Option<usize>
    where
        F: Fn(&PageTableRow) -> VirtualTime,
    {
        // min_by_key keeps the first of equal minima
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.present)
            .min_by_key(|(_, row)| key(row))
            .map(|(page, _)| page)
    }
}
