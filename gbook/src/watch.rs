//! Watch mode: rebuild the whole site whenever the input tree changes.
//!
//! Synchronous by design: each rebuild runs to completion before the
//! next filesystem event is looked at, so concurrent rebuilds cannot
//! happen and no cancellation is needed.
use std::{sync::mpsc, time::Duration};

use log::{error, info};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::{build, config::Config, error::BuildError};

/// A single save produces a burst of change events; anything arriving
/// within this window is merged into one rebuild.
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Build once, then watch the input directory and rebuild on change.
///
/// The first build propagates errors (an unreadable summary is a
/// startup failure); rebuild errors afterwards are logged and the
/// watcher keeps observing.
pub fn watch(config: &Config) -> Result<(), BuildError> {
  build::build(config)?;

  let (tx, rx) = mpsc::channel();
  let mut watcher = RecommendedWatcher::new(
    move |event: Result<Event, notify::Error>| {
      let _ = tx.send(event);
    },
    notify::Config::default(),
  )?;
  watcher.watch(&config.input_dir, RecursiveMode::Recursive)?;

  info!(
    "Watching {} for changes (Ctrl+C to stop)...",
    config.input_dir.display()
  );

  while let Ok(event) = rx.recv() {
    if let Err(err) = event {
      error!("Watcher error: {err}");
      continue;
    }

    // Drain the rest of the burst before rebuilding.
    while rx.recv_timeout(DEBOUNCE).is_ok() {}

    info!("Change detected, rebuilding...");
    if let Err(err) = build::build(config) {
      error!("Rebuild failed: {err}");
    }
  }

  Ok(())
}
