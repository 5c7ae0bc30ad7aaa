use anyhow::Context;
use clap::Parser;
use postgen::utils::{logger, validation::Validate};
use postgen::{app, AppState, CliConfig, OpenAiClient, ServerConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_logger(cli.verbose);
    }

    tracing::info!("Starting postgen");

    let config = match ServerConfig::resolve(&cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(
        "Provider: {} (model {}, timeout {:?})",
        config.provider.api_base,
        config.provider.model,
        config.provider.timeout_seconds
    );

    let provider = OpenAiClient::new(&config.provider).context("failed to build provider client")?;
    let state = AppState::new(Arc::new(provider));

    let listener = app::bind(config.socket_addr()?).await?;
    app::serve(listener, state).await?;

    Ok(())
}
