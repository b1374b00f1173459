//! Symref CLI - resolve and expand symbol cross-references from an index

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use symref::IndexDb;
use symref::config;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "symref")]
#[command(version)]
#[command(about = "Read-only symbol cross-reference resolver")]
#[command(long_about = r#"
Symref answers two questions against a persisted code index:
  • Which symbol occupies a source location (locate)
  • Where are all the declaration and reference sites of a symbol (expand)

Example usage:
  symref locate --index .idx/db /proj/Foo.swift 20 3
  symref expand --index .idx/db "s:bar"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the symbol at a source location to its USR
    Locate {
        /// Path to the index database
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// Source file path
        file: String,

        /// 1-based line number
        line: u32,

        /// 1-based column number
        column: u32,
    },

    /// List every declaration and reference site of a USR, one JSON
    /// entity per line
    Expand {
        /// Path to the index database
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// Resolution identifier to expand
        usr: String,

        /// Identifier text at the originating site (context only)
        #[arg(long, default_value = "")]
        old_value: String,
    },

    /// Dump the kind catalog
    Kinds {
        /// Path to the index database
        #[arg(short, long)]
        index: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Locate {
            index,
            file,
            line,
            column,
        } => {
            let db = open_index(index)?;
            match db.usr_at_location(&file, line, column) {
                Some(usr) => println!("{}", usr),
                None => {
                    eprintln!("no symbol at {}:{}:{}", file, line, column);
                    std::process::exit(1);
                }
            }
        }

        Commands::Expand {
            index,
            usr,
            old_value,
        } => {
            let db = open_index(index)?;
            for entity in db.entities_for_usr(&usr, &old_value) {
                println!("{}", serde_json::to_string(&entity)?);
            }
        }

        Commands::Kinds { index } => {
            let db = open_index(index)?;
            let mut kinds: Vec<_> = db.kinds().iter().collect();
            kinds.sort_by_key(|(id, _)| **id);
            for (id, name) in kinds {
                println!("{}\t{}", id, name);
            }
        }
    }

    Ok(())
}

/// Resolve the index path from the flag or `symref.toml`.
fn open_index(index: Option<PathBuf>) -> anyhow::Result<IndexDb> {
    let index = match index {
        Some(path) => path,
        None => config::load_config(None)?
            .and_then(|c| c.index)
            .map(PathBuf::from)
            .ok_or_else(|| {
                anyhow::anyhow!("no index given (pass --index or set it in symref.toml)")
            })?,
    };
    Ok(IndexDb::open(&index)?)
}
