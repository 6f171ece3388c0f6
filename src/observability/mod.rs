//! Logging setup.
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` takes precedence;
//! without it the level follows `--quiet`/`--verbose`.
//!
//! ```ignore
//! use flog::observability::init_tracing;
//!
//! fn main() {
//!     init_tracing(cli.verbosity, cli.quiet);
//! }
//! ```

use crate::cli::log_level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter from `RUST_LOG` when set and valid, else from the CLI flags.
pub fn env_filter(verbosity: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbosity, quiet)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_tracing(verbosity: u8, quiet: bool) {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(env_filter(verbosity, quiet))
        .try_init();
}
