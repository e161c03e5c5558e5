// SPDX-License-Identifier: AGPL-3.0-or-later
//! fsnode CLI
//!
//! Typed file and directory handles from the command line.

mod commands;
mod logging;

use clap::{Args, Parser, Subcommand};
use fsnode_core::Filter;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fsnode")]
#[command(author, version, about = "fsnode - file and directory handles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Node kind selection shared by the listing commands
#[derive(Args, Debug, Clone, Copy, Default)]
struct KindFilter {
    /// Only files
    #[arg(long, conflicts_with = "dirs")]
    files: bool,

    /// Only directories
    #[arg(long)]
    dirs: bool,
}

impl KindFilter {
    fn filter(self) -> Filter {
        match (self.files, self.dirs) {
            (true, _) => Filter::OnlyFiles,
            (_, true) => Filter::OnlyDirectories,
            _ => Filter::All,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Directory to list (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        #[command(flatten)]
        kind: KindFilter,

        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// List everything below a directory, parents first
    Tree {
        #[arg(default_value = ".")]
        path: String,

        #[command(flatten)]
        kind: KindFilter,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how path strings are classified
    Classify {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Only a trailing separator marks a directory
        #[arg(long)]
        strict: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Display file contents
    Cat {
        /// File to display
        path: String,
    },

    /// Copy a file or a whole directory
    Cp {
        source: String,
        dest: String,

        /// Copy what can be copied and report failures at the end
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Move a file or a whole directory
    Mv {
        source: String,
        dest: String,

        /// Copy what can be copied and report failures at the end
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Remove files or directories
    Rm {
        #[arg(required = true)]
        paths: Vec<String>,

        /// Remove directories and everything under them
        #[arg(short, long)]
        recursive: bool,

        /// Empty directories but keep them
        #[arg(long, conflicts_with = "recursive")]
        contents: bool,
    },

    /// Create directories, parents included
    Mkdir {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Create empty files
    Touch {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Show file or directory information
    Stat {
        path: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Ls { path, kind, long, human, json } => {
            commands::ls(&path, kind.filter(), long, human, json)
        }
        Commands::Tree { path, kind, json } => commands::tree(&path, kind.filter(), json),
        Commands::Classify { paths, strict, json } => commands::classify(&paths, strict, json),
        Commands::Cat { path } => commands::cat(&path),
        Commands::Cp { source, dest, keep_going } => commands::cp(&source, &dest, keep_going),
        Commands::Mv { source, dest, keep_going } => commands::mv(&source, &dest, keep_going),
        Commands::Rm { paths, recursive, contents } => commands::rm(&paths, recursive, contents),
        Commands::Mkdir { paths } => commands::mkdir(&paths),
        Commands::Touch { paths } => commands::touch(&paths),
        Commands::Stat { path, json } => commands::stat(&path, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", console::style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
