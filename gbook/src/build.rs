//! One-shot site build: summary → navigation → per-page parse →
//! content fragments + search artifact.
//!
//! Single-threaded and run-to-completion by design; pages are
//! processed in flattened navigation order, deterministically. The
//! output directory is mutated in place.
use std::fs;

use log::{debug, info, warn};

use crate::{config::Config, error::BuildError, nav, search};

/// Run one full build.
///
/// An unreadable summary document is the only unrecoverable failure;
/// pages referenced by the summary but missing on disk are logged and
/// skipped.
pub fn build(config: &Config) -> Result<(), BuildError> {
  info!("Starting site generation...");

  fs::create_dir_all(&config.output_dir)?;

  let summary_path = config.summary_file();
  let summary =
    fs::read_to_string(&summary_path).map_err(|source| BuildError::Summary {
      path: summary_path.clone(),
      source,
    })?;

  let groups = nav::build_nav(&summary);
  let pages = nav::flatten(&groups);
  info!(
    "Navigation built: {} groups, {} pages",
    groups.len(),
    pages.len()
  );

  let mut rendered = 0usize;
  for page in &pages {
    let source_path = config.input_dir.join(&page.md_path);
    let content = match fs::read_to_string(&source_path) {
      Ok(content) => content,
      Err(err) => {
        warn!("Skipping missing page {}: {err}", source_path.display());
        continue;
      },
    };

    let result = gbook_markdown::parse(&content);

    let output_path = config.output_dir.join(&page.html_path);
    if let Some(parent) = output_path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, &result.html).map_err(|source| {
      BuildError::Write {
        path: output_path.clone(),
        source,
      }
    })?;

    debug!("Rendered {} -> {}", page.md_path, page.html_path);
    rendered += 1;
  }

  if config.generate_search {
    let records = search::build_index(&pages, &config.input_dir);
    search::write_index(&records, &config.output_dir)?;
  }

  info!(
    "Generated {rendered} pages in {}",
    config.output_dir.display()
  );

  Ok(())
}
