//! Graft CLI - rewrites factory calls in templating document frontmatter.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "graft")]
#[command(about = "Rewrites React.createElement calls in document frontmatter to h() calls")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to graft.toml config file
    #[arg(short, long, default_value = "graft.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite eligible documents under the given paths
    Apply {
        /// Files or directories to process (defaults to the configured source dir)
        paths: Vec<PathBuf>,

        /// Write rewritten documents here instead of in place
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Report documents that would change without writing anything
        #[arg(long)]
        check: bool,

        /// Write a .map file next to each rewritten document
        #[arg(long)]
        maps: bool,
    },

    /// Print the rewritten form of a single document
    Show {
        /// Document to rewrite
        file: PathBuf,

        /// Print the position map as JSON instead of the text
        #[arg(long)]
        map: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Apply {
            paths,
            out,
            check,
            maps,
        } => {
            commands::apply::run(paths, out.as_deref(), check, maps, &cli.config)?;
        }
        Commands::Show { file, map } => {
            commands::show::run(&file, map)?;
        }
    }

    Ok(())
}
