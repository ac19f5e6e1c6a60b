// nmlrs/src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nmlrs::{scan_namelist, NamelistReader, ParsedNamelist, DEFAULT_BLOCK_CAPACITY};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nml")]
#[command(about = "Inspect and normalise namelist input decks", long_about = None)]
#[command(version)]
struct Cli {
    /// Maximum size of a single namelist block, in bytes
    #[arg(short, long, value_name = "BYTES", global = true, default_value_t = DEFAULT_BLOCK_CAPACITY)]
    capacity: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every block in normalised form
    Show { file: PathBuf },
    /// Parse every block and report group names and entity counts
    Check { file: PathBuf },
    /// Dump the parsed blocks as JSON
    #[cfg(feature = "json")]
    Json { file: PathBuf },
}

fn open(path: &Path, capacity: usize) -> Result<NamelistReader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    Ok(NamelistReader::new(BufReader::new(file)).with_capacity(capacity))
}

fn for_each_block<F>(path: &Path, capacity: usize, mut visit: F) -> Result<usize>
where
    F: FnMut(ParsedNamelist) -> Result<()>,
{
    let mut reader = open(path, capacity)?;
    let mut count = 0;
    while let Some(block) = reader
        .next_block()
        .with_context(|| format!("{}: line {}", path.display(), reader.line()))?
    {
        let parsed = scan_namelist(&block)
            .with_context(|| format!("{}: block ending at line {}", path.display(), reader.line()))?;
        visit(parsed)?;
        count += 1;
    }
    Ok(count)
}

fn entrypoint() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Show { file } => {
            for_each_block(&file, cli.capacity, |parsed| {
                nmlrs::show_namelist(&mut out, &parsed)?;
                Ok(())
            })?;
        }
        Commands::Check { file } => {
            let count = for_each_block(&file, cli.capacity, |parsed| {
                writeln!(out, "{}: {} entities", parsed.group_name(), parsed.len())?;
                Ok(())
            })?;
            log::info!("{}: {} block(s) ok", file.display(), count);
        }
        #[cfg(feature = "json")]
        Commands::Json { file } => {
            let mut blocks = Vec::new();
            for_each_block(&file, cli.capacity, |parsed| {
                blocks.push(parsed);
                Ok(())
            })?;
            writeln!(out, "{}", nmlrs::to_json(&blocks)?)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match entrypoint() {
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}
