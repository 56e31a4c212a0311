//! Thin command-line driver over [`biblio`]: identifies and, unless
//! `--identify-only` is given, parses and normalizes each path's
//! metadata, printing one record per file.

use biblio::Registry;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "biblio-id", about = "Identify ebook/media files and print their metadata")]
struct Args {
    /// Files to inspect.
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Raise the log level (-v = info, -vv = debug, -vvv = trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the metadata record as JSON instead of the default
    /// human-readable block.
    #[arg(long)]
    json: bool,

    /// Only identify the file type; skip parsing and normalization.
    #[arg(long)]
    identify_only: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();

    let registry = Registry::bootstrap();
    let mut any_failed = false;

    for path in &args.paths {
        if let Err(err) = inspect(path, &registry, &args) {
            eprintln!("{}: {}", path.display(), err);
            any_failed = true;
        }
    }

    if any_failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn inspect(
    path: &std::path::Path,
    registry: &Registry,
    args: &Args,
) -> Result<(), biblio::error::ParserError> {
    if args.identify_only {
        return match biblio::identify_file(path, registry)? {
            Some(filetype) => {
                println!("{}: {:?}", path.display(), filetype);
                Ok(())
            }
            None => {
                println!("{}: not an ebook file", path.display());
                Ok(())
            }
        };
    }

    match biblio::read_processed_metadata(path, registry, None)? {
        Some(metadata) => {
            if args.json {
                let json = serde_json::to_string_pretty(&metadata)
                    .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
                println!("{}", json);
            } else {
                println!("==> {}", path.display());
                println!("{}", metadata);
            }
            Ok(())
        }
        None => {
            println!("{}: not an ebook file", path.display());
            Ok(())
        }
    }
}
