use std::collections::VecDeque;
use std::io::{self, Read};

use crate::constants::*;
use crate::process::ProcessId;

pub type FrameIndex = usize;

/// One page of a process image. Contents never change after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    bytes: Vec<u8>,
}

impl Page {
    pub fn new(bytes: Vec<u8>) -> Self {
        debug_assert!(bytes.len() <= PAGE_SIZE);
        Page { bytes }
    }

    /// Read the next page (up to `PAGE_SIZE` bytes) from a process image.
    /// Returns `None` once the stream is exhausted.
    pub fn read_from_input<R: Read>(input: &mut R) -> io::Result<Option<Page>> {
        let mut bytes = Vec::with_capacity(PAGE_SIZE);
        input.take(PAGE_SIZE as u64).read_to_end(&mut bytes)?;

        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(Page { bytes }))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_valid_offset(&self, offset: usize) -> bool {
        offset < self.bytes.len()
    }

    /// Byte at `offset`, or `None` past the end of the page
    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(offset).copied()
    }
}

/// A physical frame and the (process, page) currently loaded in it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    occupant: Option<(ProcessId, usize)>,
}

impl Frame {
    pub fn occupant(&self) -> Option<(ProcessId, usize)> {
        self.occupant
    }

    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }

    fn set_page(&mut self, process_id: ProcessId, page: usize) {
        self.occupant = Some((process_id, page));
    }
}

/// Fixed array of frames plus the queue of frames never handed out
pub struct FramePool {
    frames: Vec<Frame>,
    free_frames: VecDeque<FrameIndex>,
}

impl FramePool {
    /// Create `num_frames` empty frames, all on the free list in index order
    pub fn new(num_frames: usize) -> Self {
        FramePool {
            frames: vec![Frame::default(); num_frames],
            free_frames: (0..num_frames).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.free_frames.len()
    }

    pub fn frame(&self, index: FrameIndex) -> Option<&Frame> {
        self.frames.get(index)
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Take the next free frame (FIFO order) and bind it to `(process_id, page)`
    pub fn allocate(&mut self, process_id: ProcessId, page: usize) -> Option<FrameIndex> {
        let index = self.free_frames.pop_front()?;
        self.frames[index].set_page(process_id, page);
        log::debug!("frame {} bound to process {} page {}", index, process_id, page);
        Some(index)
    }

    /// Hand an occupied frame over to a new page. Returns the previous occupant.
    pub fn rebind(
        &mut self,
        index: FrameIndex,
        process_id: ProcessId,
        page: usize,
    ) -> Option<(ProcessId, usize)> {
        let frame = &mut self.frames[index];
        let previous = frame.occupant;
        frame.set_page(process_id, page);
        log::debug!(
            "frame {} rebound from {:?} to process {} page {}",
            index, previous, process_id, page
        );
        previous
    }
}
