use clap::Parser;
use pomelli_tools::migrations::{apply_via_api, render_header, render_report, DEFAULT_MIGRATIONS_DIR};
use pomelli_tools::{logging, MigrationSet};
use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Print the pending SQL migrations and how to apply them by hand
#[derive(Debug, Parser)]
struct Args {
    /// Directory holding the migration files
    #[arg(long, default_value = DEFAULT_MIGRATIONS_DIR)]
    dir: PathBuf,

    /// Also run the REST API path first (it cannot apply DDL and only explains why)
    #[arg(long)]
    try_api: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    logging::init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    render_header(&mut out)?;
    let set = match MigrationSet::load(&args.dir) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if args.try_api {
        for migration in &set.migrations {
            apply_via_api(migration, &mut out)?;
        }
    }

    render_report(&set, &mut out)?;
    Ok(())
}
