//! Paging simulator - Main Entry Point
//!
//! Usage: paging-sim [OPTIONS] <FILE>
//!
//! FILE lists the process images to load followed by the trace of virtual
//! addresses to replay. Per-process and total statistics are printed once the
//! trace has been replayed.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;

use paging_sim::report::write_loaded;
use paging_sim::{
    OutputMode, ReplacementStrategy, Result, Simulation, SimulationConfig, SimulationInput,
    DEFAULT_MAX_FRAMES, DEFAULT_NUM_FRAMES,
};

#[derive(Parser)]
#[command(name = "paging-sim")]
#[command(about = "Demand-paged virtual memory simulator with FIFO and LRU page replacement")]
#[command(version)]
struct Cli {
    /// Simulation file: process images followed by the access trace
    file: PathBuf,

    /// Print every access as it is translated
    #[arg(short, long)]
    verbose: bool,

    /// Page replacement strategy (FIFO or LRU)
    #[arg(short, long, default_value = "FIFO")]
    strategy: String,

    /// Maximum resident frames per process
    #[arg(short = 'f', long, default_value_t = DEFAULT_MAX_FRAMES)]
    max_frames: usize,

    /// Total physical frames
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_FRAMES)]
    frames: usize,

    /// Print the summary as CSV
    #[arg(short, long)]
    csv: bool,

    /// Print the loaded processes and parsed trace before running
    #[arg(short = 'F', long)]
    file_verbose: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    // Run the simulation and handle any errors
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let strategy: ReplacementStrategy = cli.strategy.parse()?;
    let output = if cli.csv { OutputMode::Csv } else { OutputMode::Text };
    let config = SimulationConfig::new(cli.frames, cli.max_frames, strategy)
        .with_verbose(cli.verbose)
        .with_output(output);
    config.validate()?;

    let input = SimulationInput::from_file(&cli.file)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.file_verbose {
        write_loaded(&mut out, &input.processes, &input.trace)?;
    }

    let mut simulation = Simulation::new(config, input.processes, input.trace)?;
    let result = simulation.run(&mut out);

    // keep whatever verbose output preceded a fatal access
    out.flush()?;
    result.map(|_| ())
}
