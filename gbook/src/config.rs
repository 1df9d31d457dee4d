use std::{
  fs,
  path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{cli::BuildOpts, error::BuildError};

// Default values live in functions so serde can reference them; some
// (like PathBuf construction) cannot be expressed as literals.
fn default_input_dir() -> PathBuf {
  PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
  PathBuf::from("build")
}

fn default_summary_path() -> PathBuf {
  PathBuf::from("SUMMARY.md")
}

fn default_title() -> String {
  "gbook documentation".to_string()
}

const fn default_true() -> bool {
  true
}

/// Configuration options for gbook. One immutable value per build,
/// threaded by reference into every component entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
  /// Input directory containing markdown files
  #[serde(default = "default_input_dir")]
  pub input_dir: PathBuf,

  /// Output directory for the generated site
  #[serde(default = "default_output_dir")]
  pub output_dir: PathBuf,

  /// Summary document path, relative to `input_dir`
  #[serde(default = "default_summary_path")]
  pub summary_path: PathBuf,

  /// Title for the documentation
  #[serde(default = "default_title")]
  pub title: String,

  /// Whether to generate the client-side search index
  #[serde(default = "default_true")]
  pub generate_search: bool,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      input_dir:       default_input_dir(),
      output_dir:      default_output_dir(),
      summary_path:    default_summary_path(),
      title:           default_title(),
      generate_search: default_true(),
    }
  }
}

impl Config {
  /// Create a new configuration from a file.
  /// Only TOML and JSON are supported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BuildError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match path.extension().and_then(|ext| ext.to_str()) {
      Some("toml") => Ok(toml::from_str(&content)?),
      Some("json") => Ok(serde_json::from_str(&content)?),
      other => Err(BuildError::Config(format!(
        "Unsupported config format {:?} for {}",
        other.unwrap_or("none"),
        path.display()
      ))),
    }
  }

  /// Build the effective configuration for a `build`/`watch` run:
  /// file-based config (when given) with CLI overrides applied on top.
  pub fn load(opts: &BuildOpts) -> Result<Self, BuildError> {
    let mut config = match &opts.config_file {
      Some(path) => Self::from_file(path)?,
      None => Self::default(),
    };
    config.merge_with_cli(opts);
    Ok(config)
  }

  fn merge_with_cli(&mut self, opts: &BuildOpts) {
    if let Some(input_dir) = &opts.input_dir {
      self.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &opts.output_dir {
      self.output_dir = output_dir.clone();
    }
    if let Some(summary) = &opts.summary {
      self.summary_path = summary.clone();
    }
    if let Some(title) = &opts.title {
      self.title = title.clone();
    }
    if opts.generate_search {
      self.generate_search = true;
    }
  }

  /// Absolute-or-relative path of the summary document.
  #[must_use]
  pub fn summary_file(&self) -> PathBuf {
    self.input_dir.join(&self.summary_path)
  }

  /// Write a default TOML configuration file, for `gbook init`.
  pub fn generate_default_config(path: &Path) -> Result<(), BuildError> {
    let rendered = toml::to_string_pretty(&Self::default())?;
    fs::write(path, rendered)?;
    Ok(())
  }
}
