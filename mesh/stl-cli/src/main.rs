//! `stl` - inspect a directory of binary STL models.
//!
//! # Commands
//!
//! - `stl list` - Names of the `.stl` files in the library
//! - `stl show <NAME>` - A decoded model as JSON
//! - `stl info <NAME>` - Facet count and encoded size of a model
//! - `stl check` - Decode every file and report the ones that fail
//!
//! The library directory comes from `--root`, then `STL_ROOT`, then
//! `assets/upload` next to the executable. Logs go to stderr; use `-v` or
//! `RUST_LOG` to see them.

mod commands;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use stl_io::{DEFAULT_MAX_FACE_COUNT, DecodeOptions, LibraryConfig, StlLibrary};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Library directory used when neither `--root` nor `STL_ROOT` is given,
/// relative to the executable.
const DEFAULT_ROOT: &str = "assets/upload";

/// Inspect a directory of binary STL models
#[derive(Parser)]
#[command(name = "stl")]
#[command(about = "Inspect a directory of binary STL models", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding the STL files [default: assets/upload next to the executable]
    #[arg(long, global = true, env = "STL_ROOT")]
    root: Option<PathBuf>,

    /// Reject files declaring more facets than this
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_FACE_COUNT)]
    max_faces: u32,

    /// Ignore bytes after the last facet instead of rejecting the file
    #[arg(long, global = true)]
    allow_trailing: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the STL files in the library
    List,

    /// Print a model as JSON
    Show {
        /// File name of the model
        #[arg(name = "NAME")]
        name: String,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the facet count and encoded size of a model
    Info {
        /// File name of the model
        #[arg(name = "NAME")]
        name: String,
    },

    /// Decode every file in the library and report failures
    Check,
}

impl Cli {
    fn library_config(&self) -> Result<LibraryConfig> {
        let config = match &self.root {
            Some(root) => LibraryConfig::new(root),
            None => LibraryConfig::relative_to_executable(DEFAULT_ROOT)
                .context("failed to resolve the executable directory")?,
        };
        let decode = DecodeOptions::default()
            .with_max_face_count(self.max_faces)
            .allow_trailing_bytes(self.allow_trailing);
        Ok(config.with_decode_options(decode))
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.library_config()?;
    debug!(root = %config.root.display(), "using STL library");
    let library = StlLibrary::open(config).context("failed to open STL library")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List => commands::list(&library, &mut out)?,
        Commands::Show { name, pretty } => commands::show(&library, &name, pretty, &mut out)?,
        Commands::Info { name } => commands::info(&library, &name, &mut out)?,
        Commands::Check => {
            let all_ok = commands::check(&library, &mut out)?;
            if !all_ok {
                out.flush()?;
                std::process::exit(1);
            }
        }
    }

    out.flush()?;
    Ok(())
}
