//! CLI integration tests for paging-sim.
//!
//! Runs the real binary against simulation files written to a temp directory.

#![allow(deprecated)] // cargo_bin still works, just deprecated for custom build-dir

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn paging_sim() -> Command {
    Command::cargo_bin("paging-sim").expect("Failed to find paging-sim binary")
}

/// Write one image per `(pid, size)` and a simulation file replaying `trace`.
/// Returns the simulation file path.
fn write_simulation(dir: &TempDir, images: &[(u32, usize)], trace: &[(u32, &str)]) -> std::path::PathBuf {
    let mut content = format!("{}\n", images.len());
    for &(pid, size) in images {
        let image = dir.path().join(format!("process_{}.bin", pid));
        let bytes: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        fs::write(&image, bytes).expect("Failed to write image");
        content.push_str(&format!("{} {}\n", pid, image.display()));
    }
    for &(pid, address) in trace {
        content.push_str(&format!("{} {}\n", pid, address));
    }

    let path = dir.path().join("sim.txt");
    fs::write(&path, content).expect("Failed to write simulation file");
    path
}

fn page(p: u32, offset: u32) -> String {
    format!("{:010b}{:06b}", p, offset)
}

fn run_csv(sim: &Path, extra: &[&str]) -> String {
    let output = paging_sim().arg(sim).arg("--csv").args(extra).output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// Help and arguments
// ============================================================================

#[test]
fn test_help_flag() {
    paging_sim()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("paging-sim"))
        .stdout(predicate::str::contains("--strategy"));
}

#[test]
fn test_missing_file_argument() {
    paging_sim().assert().failure();
}

#[test]
fn test_unreadable_simulation_file() {
    paging_sim()
        .arg("/nonexistent/paging-sim/sim.txt")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unable to open file"));
}

#[test]
fn test_invalid_strategy() {
    let dir = TempDir::new().unwrap();
    let sim = write_simulation(&dir, &[(1, 64)], &[]);

    paging_sim()
        .arg(&sim)
        .args(["--strategy", "CLOCK"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid strategy flag: CLOCK"));
}

#[test]
fn test_zero_frames_rejected() {
    let dir = TempDir::new().unwrap();
    let sim = write_simulation(&dir, &[(1, 64)], &[]);

    paging_sim()
        .arg(&sim)
        .args(["--frames", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
}

// ============================================================================
// Simulation runs
// ============================================================================

#[test]
fn test_text_summary() {
    let dir = TempDir::new().unwrap();
    let a = page(0, 1);
    let b = page(1, 0);
    let sim = write_simulation(&dir, &[(1, 128), (2, 64)], &[(1, &a), (1, &b), (1, &a)]);

    paging_sim()
        .arg(&sim)
        .assert()
        .success()
        .stdout(predicate::str::contains("Process   1:  ACCESSES: 3      FAULTS: 2"))
        .stdout(predicate::str::contains("Process   2:  ACCESSES: 0      FAULTS: 0"))
        .stdout(predicate::str::contains("Total memory accesses:               3"))
        .stdout(predicate::str::contains("Total page faults:                   2"))
        .stdout(predicate::str::contains("Free frames remaining:             510"));
}

#[test]
fn test_fifo_single_frame_csv() {
    let dir = TempDir::new().unwrap();
    let (p0, p1) = (page(0, 0), page(1, 0));
    let sim = write_simulation(&dir, &[(1, 192)], &[(1, &p0), (1, &p1), (1, &p0)]);

    let csv = run_csv(&sim, &["--frames", "1", "--strategy", "FIFO"]);
    assert_eq!(csv, "1,3,3,100.00,1\n3,,,,\n3,,,,\n0,,,,\n");
}

#[test]
fn test_lru_versus_fifo() {
    let dir = TempDir::new().unwrap();
    let (p0, p1, p2) = (page(0, 0), page(1, 0), page(2, 0));
    let trace = [(1, p0.as_str()), (1, p1.as_str()), (1, p0.as_str()), (1, p2.as_str()), (1, p0.as_str())];
    let sim = write_simulation(&dir, &[(1, 192)], &trace);

    // LRU keeps page 0 resident, FIFO evicts it right before it is needed again
    let lru = run_csv(&sim, &["-n", "2", "-s", "lru"]);
    assert!(lru.starts_with("1,5,3,60.00,2\n"), "{}", lru);

    let fifo = run_csv(&sim, &["-n", "2", "-s", "fifo"]);
    assert!(fifo.starts_with("1,5,4,80.00,2\n"), "{}", fifo);
}

#[test]
fn test_max_frames_per_process() {
    let dir = TempDir::new().unwrap();
    let pages: Vec<String> = (0..4).map(|p| page(p, 0)).collect();
    let trace: Vec<(u32, &str)> = pages.iter().map(|p| (1, p.as_str())).collect();
    let sim = write_simulation(&dir, &[(1, 256)], &trace);

    let csv = run_csv(&sim, &["--max-frames", "2", "--frames", "8"]);
    assert_eq!(csv, "1,4,4,100.00,2\n4,,,,\n4,,,,\n6,,,,\n");
}

#[test]
fn test_verbose_output() {
    let dir = TempDir::new().unwrap();
    let a = page(0, 3);
    let sim = write_simulation(&dir, &[(1, 64)], &[(1, &a), (1, &a)]);

    paging_sim()
        .arg(&sim)
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("PID 1 @ 0000000000000011 [page: 0; offset: 3]"))
        .stdout(predicate::str::contains("    -> PAGE FAULT"))
        .stdout(predicate::str::contains("    -> IN MEMORY"))
        .stdout(predicate::str::contains("    -> physical address 0000000000000011 [frame: 0; offset: 3]"))
        .stdout(predicate::str::contains("    -> RSS: 1"));
}

#[test]
fn test_file_verbose_output() {
    let dir = TempDir::new().unwrap();
    let a = page(1, 2);
    let sim = write_simulation(&dir, &[(4, 100)], &[(4, &a)]);

    paging_sim()
        .arg(&sim)
        .arg("--file-verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Process 4: Size: 100"))
        .stdout(predicate::str::contains("PID 4 @ 0000000001000010 [page: 1; offset: 2]"));
}

// ============================================================================
// Fatal conditions
// ============================================================================

#[test]
fn test_invalid_page_segfault() {
    let dir = TempDir::new().unwrap();
    let (ok, bad) = (page(0, 0), page(5, 0));
    let sim = write_simulation(&dir, &[(1, 64)], &[(1, &ok), (1, &bad), (1, &ok)]);

    paging_sim()
        .arg(&sim)
        .assert()
        .code(139)
        .stderr(predicate::str::contains("SEGFAULT - INVALID PAGE"))
        .stdout(predicate::str::contains("Total memory accesses").not());
}

#[test]
fn test_invalid_offset_segfault() {
    let dir = TempDir::new().unwrap();
    // second page holds only 10 bytes
    let bad = page(1, 10);
    let sim = write_simulation(&dir, &[(1, 74)], &[(1, &bad)]);

    paging_sim()
        .arg(&sim)
        .arg("-v")
        .assert()
        .code(139)
        .stdout(predicate::str::contains("PID 1 @"))
        .stderr(predicate::str::contains("SEGFAULT - INVALID OFFSET"));
}

#[test]
fn test_missing_process_image() {
    let dir = TempDir::new().unwrap();
    let sim = dir.path().join("sim.txt");
    let image = dir.path().join("nowhere.bin");
    fs::write(&sim, format!("1\n3 {}\n", image.display())).unwrap();

    paging_sim()
        .arg(&sim)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unable to read file for PID 3"));
}

#[test]
fn test_malformed_address() {
    let dir = TempDir::new().unwrap();
    let sim = write_simulation(&dir, &[(1, 64)], &[(1, "0x10")]);

    paging_sim()
        .arg(&sim)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("0x10"));
}

#[test]
fn test_unknown_process_in_trace() {
    let dir = TempDir::new().unwrap();
    let a = page(0, 0);
    let sim = write_simulation(&dir, &[(1, 64)], &[(2, &a)]);

    paging_sim()
        .arg(&sim)
        .assert()
        .code(4)
        .stderr(predicate::str::contains("unknown process 2"));
}
