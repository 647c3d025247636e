//! apiref - API reference explorer
//!
//! Usage: apiref [config.json] [member]
//!
//! Bootstraps the explorer against the configured backend (or a bundled
//! dump in offline mode), optionally resolves one member, and prints the
//! document title and the visible detail section.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use apiref_data::{ApiSource, HttpSource, OfflineSource};
use apiref_explorer::{Explorer, ExplorerConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let member = args.next().unwrap_or_default();

    let config = match &config_path {
        Some(path) => ExplorerConfig::from_file(Path::new(path))
            .with_context(|| format!("loading config {path}"))?,
        None => ExplorerConfig::default(),
    };

    let source: Box<dyn ApiSource> = if config.offline {
        let dump_path = config
            .dump_path
            .clone()
            .context("offline mode requires dump_path")?;
        let source = OfflineSource::from_file(&dump_path, &config.product)
            .with_context(|| format!("loading dump {}", dump_path.display()))?;
        Box::new(source)
    } else {
        let base = config
            .base_url
            .clone()
            .context("base_url is required unless offline is set")?;
        Box::new(HttpSource::new(&base, &config.product)?)
    };

    let mut explorer = Explorer::new(config, source).context("bootstrap failed")?;
    if !member.is_empty() {
        explorer.open(&member)?;
    }

    println!("{}", explorer.document_title());
    if let Some(html) = explorer.visible_section_html() {
        println!("{html}");
    }
    Ok(())
}
