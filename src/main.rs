use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod core;
mod coverage;
mod matching;
mod parsing;
mod report;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("asm_eval=debug,info")
    } else {
        EnvFilter::new("asm_eval=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    cli::eval::run(&cli)
}
