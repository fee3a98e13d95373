//! Rebuild `pool.json` from the upload server's log.
//!
//! Prints the reconciled pool to stdout; redirect it to persist.

use std::fs::File;
use std::io::{self, BufReader, Write};

use anyhow::Context;
use log::info;

mod config;
mod error;
mod log_line;
mod markers;
mod output;
mod pool;
mod reconcile;
mod types;

use config::Config;
use error::Error;
use markers::BrokenMarkers;
use pool::Pool;
use reconcile::Reconciler;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    // Load configuration
    let cfg = Config::load()?;
    info!("Rebuilding pool with config: {:?}", cfg);

    let mut pool = Pool::load(&cfg.pool_path)?;
    let markers = BrokenMarkers::read(&cfg.broken_dir)?;
    info!(
        "Loaded {} pool entries and {} broken markers",
        pool.len(),
        markers.len()
    );
    let log = File::open(&cfg.log_path).map_err(|source| Error::OpenLog {
        path: cfg.log_path.clone(),
        source,
    })?;

    let reconciler = Reconciler::new(cfg.marker_policy, cfg.line_ending);
    reconciler
        .run(&mut pool, &markers, BufReader::new(log))
        .with_context(|| format!("Failed to replay {}", cfg.log_path.display()))?;

    // Nothing is written until the whole log has been applied.
    let text = output::render(&pool)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    stdout.flush()?;
    Ok(())
}
