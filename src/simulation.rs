//! The paging engine: translation, fault handling and local page replacement.
//!
//! A [`Simulation`] replays an ordered trace of [`VirtualAddress`]es against a
//! fixed pool of frames. Every access either hits a resident page or faults; a
//! fault takes a free frame while the process is under its cap and frames
//! remain, otherwise it evicts one of the *same* process's resident pages as
//! chosen by the configured [`ReplacementStrategy`].

use std::collections::BTreeMap;
use std::io::Write;

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::memory::{FrameIndex, FramePool};
use crate::page_table::VirtualTime;
use crate::process::{Process, ProcessId};
use crate::replacement::ReplacementStrategy;
use crate::report::{self, ProcessStats, SimulationStats};
use crate::translation::{AccessOutcome, PhysicalAddress, VirtualAddress};

pub struct Simulation {
    config: SimulationConfig,
    processes: BTreeMap<ProcessId, Process>,
    frames: FramePool,
    trace: Vec<VirtualAddress>,
    clock: VirtualTime,
    page_faults: u64,
}

/// Frame chosen for a faulting page, and the page it displaced
struct FaultResolution {
    frame: FrameIndex,
    evicted_page: Option<usize>,
}

impl Simulation {
    pub fn new(
        config: SimulationConfig,
        processes: BTreeMap<ProcessId, Process>,
        trace: Vec<VirtualAddress>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Simulation {
            frames: FramePool::new(config.total_frames),
            config,
            processes,
            trace,
            clock: 0,
            page_faults: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn processes(&self) -> &BTreeMap<ProcessId, Process> {
        &self.processes
    }

    pub fn process(&self, process_id: ProcessId) -> Option<&Process> {
        self.processes.get(&process_id)
    }

    pub fn frames(&self) -> &FramePool {
        &self.frames
    }

    pub fn trace(&self) -> &[VirtualAddress] {
        &self.trace
    }

    /// Current virtual time; equals the number of successful accesses so far
    pub fn clock(&self) -> VirtualTime {
        self.clock
    }

    pub fn page_faults(&self) -> u64 {
        self.page_faults
    }

    /// Replay the whole trace, then write the summary in the configured output
    /// mode. Verbose diagnostics for each access go to `out` as well.
    ///
    /// The first fatal condition stops the run; nothing after it is replayed.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<SimulationStats> {
        log::info!(
            "replaying {} accesses over {} processes with {} frames ({} per process, {})",
            self.trace.len(),
            self.processes.len(),
            self.frames.len(),
            self.config.max_frames_per_process,
            self.config.strategy
        );

        for i in 0..self.trace.len() {
            let address = self.trace[i];
            if self.config.verbose {
                writeln!(out, "{}", address)?;
            }

            let outcome = self.perform_memory_access(&address)?;

            if self.config.verbose {
                report::write_access(out, &outcome)?;
            }
        }

        let stats = self.stats();
        stats.write(out, self.config.output)?;

        log::info!(
            "run complete: {} faults, {} free frames",
            stats.total_page_faults,
            stats.free_frames
        );
        Ok(stats)
    }

    /// Translate one virtual address, handling a page fault if needed, and
    /// return the byte it names.
    pub fn perform_memory_access(&mut self, address: &VirtualAddress) -> Result<AccessOutcome> {
        let now = self.clock;
        let process_id = address.process_id;
        let page = address.page;

        let process = self.processes.get_mut(&process_id).ok_or_else(|| {
            log::warn!("access to unknown process {}", process_id);
            Error::UnknownProcess(process_id)
        })?;

        if !process.page_index_valid(page) {
            log::warn!("process {} referenced page {} of {}", process_id, page, process.pages().len());
            return Err(Error::InvalidPage { process_id, page });
        }

        let present = process.page_table.rows()[page].present;
        process.memory_accesses += 1;

        let (frame, evicted_page) = if present {
            let row = process
                .page_table
                .row_mut(page)
                .ok_or(Error::InvalidPage { process_id, page })?;
            row.touch(now);
            log::trace!("process {} page {} hit at t={}", process_id, page, now);
            (row.frame, None)
        } else {
            process.page_faults += 1;
            self.page_faults += 1;
            let resolution = Self::handle_page_fault(
                &mut self.frames,
                &self.config,
                process_id,
                process,
                page,
                now,
            )?;
            (Some(resolution.frame), resolution.evicted_page)
        };

        // present rows always carry a frame
        let Some(frame) = frame else {
            return Err(Error::NoEvictableFrame(process_id));
        };

        let Some(byte) = process.page(page).and_then(|p| p.byte_at(address.offset)) else {
            log::warn!(
                "process {} page {} offset {} is past the end of the page",
                process_id, page, address.offset
            );
            return Err(Error::InvalidOffset {
                process_id,
                page,
                offset: address.offset,
            });
        };

        self.clock += 1;

        Ok(AccessOutcome {
            byte,
            physical_address: PhysicalAddress::new(frame, address.offset),
            page_fault: !present,
            evicted_page,
            resident_set_size: process.resident_set_size(),
        })
    }

    /// Load `page` into a frame: a free one while the process is under its cap,
    /// otherwise one reclaimed from the process's own resident pages.
    fn handle_page_fault(
        frames: &mut FramePool,
        config: &SimulationConfig,
        process_id: ProcessId,
        process: &mut Process,
        page: usize,
        now: VirtualTime,
    ) -> Result<FaultResolution> {
        log::debug!("process {} page fault on page {} at t={}", process_id, page, now);

        let under_cap = process.resident_set_size() < config.max_frames_per_process;
        let free_frame = if under_cap { frames.allocate(process_id, page) } else { None };

        let resolution = match free_frame {
            Some(frame) => FaultResolution { frame, evicted_page: None },
            None => Self::evict(frames, config.strategy, process_id, process, page)?,
        };

        let row = process
            .page_table
            .row_mut(page)
            .ok_or(Error::InvalidPage { process_id, page })?;
        row.mark_present(resolution.frame, now);

        Ok(resolution)
    }

    fn evict(
        frames: &mut FramePool,
        strategy: ReplacementStrategy,
        process_id: ProcessId,
        process: &mut Process,
        page: usize,
    ) -> Result<FaultResolution> {
        let Some(victim) = strategy.select_victim(&process.page_table) else {
            log::warn!("process {} has no free frame and nothing resident to evict", process_id);
            return Err(Error::NoEvictableFrame(process_id));
        };

        let frame = process
            .page_table
            .row_mut(victim)
            .and_then(|row| row.mark_absent())
            .ok_or(Error::NoEvictableFrame(process_id))?;

        let previous = frames.rebind(frame, process_id, page);
        debug_assert_eq!(previous, Some((process_id, victim)));
        log::debug!(
            "process {} evicted page {} from frame {} ({})",
            process_id, victim, frame, strategy
        );

        Ok(FaultResolution { frame, evicted_page: Some(victim) })
    }

    /// Snapshot of all counters
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            processes: self
                .processes
                .iter()
                .map(|(&pid, process)| ProcessStats::from_process(pid, process))
                .collect(),
            total_memory_accesses: self.trace.len(),
            total_page_faults: self.page_faults,
            free_frames: self.frames.free_count(),
        }
    }
}
