use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Command line interface for gbook.
#[derive(Parser, Debug)]
#[command(author, version, about = "gbook: GitBook-flavored Markdown to static HTML")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long)]
  pub verbose: bool,
}

/// All supported subcommands for the gbook CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Run a one-shot build of the site.
  Build(BuildOpts),

  /// Build once, then watch the input directory and rebuild on change.
  Watch(BuildOpts),

  /// Initialize a new gbook configuration file.
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "gbook.toml")]
    output: PathBuf,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

/// Options shared by `build` and `watch`.
#[derive(Args, Debug, Default)]
pub struct BuildOpts {
  /// Path to a configuration file (TOML or JSON)
  #[arg(short = 'c', long = "config-file")]
  pub config_file: Option<PathBuf>,

  /// Path to the directory containing markdown files
  #[arg(short, long)]
  pub input_dir: Option<PathBuf>,

  /// Output directory for the generated site
  #[arg(short, long)]
  pub output_dir: Option<PathBuf>,

  /// Summary document path, relative to the input directory
  #[arg(long)]
  pub summary: Option<PathBuf>,

  /// Title of the documentation
  #[arg(short = 'T', long)]
  pub title: Option<String>,

  /// Whether to generate the client-side search index
  #[arg(short = 'S', long = "generate-search", action = clap::ArgAction::SetTrue)]
  pub generate_search: bool,
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
