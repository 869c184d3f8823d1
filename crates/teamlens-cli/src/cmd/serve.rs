use anyhow::Context;
use std::path::{Path, PathBuf};
use teamlens_core::config::Config;

pub fn run(config_path: &Path, port: Option<u16>, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = Config::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(db) = db {
        config.db_path = db;
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(teamlens_server::serve(config))
}
