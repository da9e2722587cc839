use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::process::{Process, ProcessId};
use crate::translation::VirtualAddress;

/// Everything a simulation file describes: the processes and the access trace
#[derive(Debug, Default)]
pub struct SimulationInput {
    pub processes: BTreeMap<ProcessId, Process>,
    pub trace: Vec<VirtualAddress>,
}

impl SimulationInput {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Parse(format!("Unable to open file {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    /// Parse a simulation file, loading each process image from disk. Image
    /// paths are taken as written, relative to the working directory.
    pub fn parse(content: &str) -> Result<Self> {
        Self::parse_with(content, load_process_image)
    }

    /// Parse a simulation file, using `load_image` to build each process
    pub fn parse_with<F>(content: &str, mut load_image: F) -> Result<Self>
    where
        F: FnMut(&Path) -> io::Result<Process>,
    {
        let mut tokens = content.split_whitespace();

        let count_token = tokens
            .next()
            .ok_or_else(|| Error::Parse("Simulation file is empty".to_string()))?;
        let num_processes: usize = count_token
            .parse()
            .map_err(|_| Error::Parse(format!("Invalid process count: {}", count_token)))?;

        let mut processes = BTreeMap::new();
        for _ in 0..num_processes {
            let pid = parse_pid(tokens.next(), "process list")?;
            let path = tokens.next().map(PathBuf::from).ok_or_else(|| {
                Error::Parse(format!("Missing process image path for PID {}", pid))
            })?;

            if processes.contains_key(&pid) {
                return Err(Error::Parse(format!("Duplicate process id: {}", pid)));
            }

            let process = load_image(&path).map_err(|e| {
                log::debug!("failed to load {}: {}", path.display(), e);
                Error::MissingProcessImage { pid, path: path.clone() }
            })?;
            log::debug!("loaded process {} from {} ({} bytes)", pid, path.display(), process.size());
            processes.insert(pid, process);
        }

        let mut trace = Vec::new();
        while let Some(pid_token) = tokens.next() {
            let pid = parse_pid(Some(pid_token), "address list")?;
            let address = tokens.next().ok_or_else(|| {
                Error::Parse(format!("Missing virtual address for PID {}", pid))
            })?;
            trace.push(VirtualAddress::from_string(pid, address)?);
        }

        Ok(SimulationInput { processes, trace })
    }
}

fn parse_pid(token: Option<&str>, section: &str) -> Result<ProcessId> {
    let token = token.ok_or_else(|| Error::Parse(format!("Unexpected end of file in {}", section)))?;
    token
        .parse()
        .map_err(|_| Error::Parse(format!("Invalid process id in {}: {}", section, token)))
}

/// Read a process image file and cut it into pages
pub fn load_process_image(path: &Path) -> io::Result<Process> {
    let mut reader = BufReader::new(File::open(path)?);
    Process::read_from_input(&mut reader)
}
