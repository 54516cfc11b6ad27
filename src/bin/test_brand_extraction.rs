use clap::Parser;
use pomelli_tools::config::{DEFAULT_OUTPUT_PATH, DEFAULT_TARGET_URL};
use pomelli_tools::{logging, run_probe, ProbeConfig};
use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Scrape one page through FireCrawl and keep the raw JSON response
#[derive(Debug, Parser)]
struct Args {
    /// Page to scrape
    #[arg(long, default_value = DEFAULT_TARGET_URL)]
    url: String,

    /// Where a successful response is written
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    logging::init();
    let args = Args::parse();

    let config = match ProbeConfig::from_env() {
        Ok(config) => config.with_target_url(args.url).with_output_path(args.output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stdout = io::stdout();
    let outcome = run_probe(&config, &mut stdout.lock())?;
    tracing::debug!(?outcome, "probe finished");

    Ok(())
}
