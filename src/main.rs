use anyhow::Result;
use flog::cli;
use flog::observability::init_tracing;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    init_tracing(cli.verbosity, cli.quiet);
    flog::commands::run(cli)
}
