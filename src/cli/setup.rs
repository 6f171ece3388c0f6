//! Setup and initialization functions for CLI
//!
//! Thread pool sizing and the default logging level derived from flags.

use anyhow::{Context, Result};

/// Rayon thread stack size (8MB for deeply nested syntax trees)
const RAYON_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Build the worker pool used for per-unit analysis.
pub fn configure_thread_pool(jobs: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .stack_size(RAYON_STACK_SIZE)
        .num_threads(get_worker_count(jobs))
        .thread_name(|i| format!("flog-worker-{i}"))
        .build()
        .context("Failed to build worker thread pool")
}

/// Get the number of worker threads to use
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        jobs
    }
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn log_level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
