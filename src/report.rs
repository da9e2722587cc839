//! Text and CSV rendering of simulation statistics.

use std::io::{self, Write};

use crate::process::{Process, ProcessId};
use crate::translation::{AccessOutcome, VirtualAddress};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    #[default]
    Text,
    Csv,
}

/// Counters for one process at the end of (or during) a run
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessStats {
    pub process_id: ProcessId,
    pub memory_accesses: u64,
    pub page_faults: u64,
    pub fault_rate: f64,
    pub resident_set_size: usize,
}

impl ProcessStats {
    pub fn from_process(process_id: ProcessId, process: &Process) -> Self {
        ProcessStats {
            process_id,
            memory_accesses: process.memory_accesses(),
            page_faults: process.page_faults(),
            fault_rate: process.fault_rate(),
            resident_set_size: process.resident_set_size(),
        }
    }
}

/// Per-process counters in ascending pid order plus run-wide totals
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStats {
    pub processes: Vec<ProcessStats>,
    /// Length of the trace, not the number of accesses actually performed
    pub total_memory_accesses: usize,
    pub total_page_faults: u64,
    pub free_frames: usize,
}

impl SimulationStats {
    pub fn write<W: Write>(&self, out: &mut W, mode: OutputMode) -> io::Result<()> {
        match mode {
            OutputMode::Text => self.write_text(out),
            OutputMode::Csv => self.write_csv(out),
        }
    }

    fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for p in &self.processes {
            writeln!(
                out,
                "Process {:3}:  ACCESSES: {:<6} FAULTS: {:<6} FAULT RATE: {:<8.2} RSS: {:<6}",
                p.process_id, p.memory_accesses, p.page_faults, p.fault_rate, p.resident_set_size
            )?;
        }

        writeln!(out)?;
        writeln!(out, "{:<25} {:>12}", "Total memory accesses:", self.total_memory_accesses)?;
        writeln!(out, "{:<25} {:>12}", "Total page faults:", self.total_page_faults)?;
        writeln!(out, "{:<25} {:>12}", "Free frames remaining:", self.free_frames)?;
        Ok(())
    }

    fn write_csv<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for p in &self.processes {
            writeln!(
                out,
                "{},{},{},{:.2},{}",
                p.process_id, p.memory_accesses, p.page_faults, p.fault_rate, p.resident_set_size
            )?;
        }

        writeln!(out, "{},,,,", self.total_memory_accesses)?;
        writeln!(out, "{},,,,", self.total_page_faults)?;
        writeln!(out, "{},,,,", self.free_frames)?;
        Ok(())
    }
}

/// Verbose lines for one completed access
pub fn write_access<W: Write>(out: &mut W, outcome: &AccessOutcome) -> io::Result<()> {
    if outcome.page_fault {
        writeln!(out, "    -> PAGE FAULT")?;
    } else {
        writeln!(out, "    -> IN MEMORY")?;
    }
    writeln!(out, "    -> physical address {}", outcome.physical_address)?;
    writeln!(out, "    -> RSS: {}", outcome.resident_set_size)?;
    Ok(())
}

/// Echo of what was loaded, printed before the run
pub fn write_loaded<'a, W, I>(out: &mut W, processes: I, trace: &[VirtualAddress]) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a ProcessId, &'a Process)>,
{
    for (pid, process) in processes {
        writeln!(out, "Process {}: Size: {}", pid, process.size())?;
    }
    for address in trace {
        writeln!(out, "{}", address)?;
    }
    Ok(())
}
