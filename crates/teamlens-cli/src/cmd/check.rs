use anyhow::Context;
use std::path::Path;
use teamlens_core::config::Config;
use teamlens_llm::{Client, MessagesRequest};

pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let key = Config::api_key()
        .context("ANTHROPIC_API_KEY is not set; export it before running check")?;

    let client = Client::new(key);
    let request = MessagesRequest::single(
        config.model.clone(),
        32,
        "Say \"Hello, API is working!\" if you can read this.",
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let response = runtime
        .block_on(client.complete(&request))
        .context("model probe failed")?;

    println!("model: {}", config.model);
    println!("response: {}", response.trim());
    Ok(())
}
