use clap::Parser;

use cli::Cli;
use settings::Settings;

mod cli;
mod commands;
mod error;
mod feed;
mod render;
mod settings;
mod snapshot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.as_deref())?;
    let level = cli.level.as_deref().unwrap_or(&settings.level);

    tracing_subscriber::fmt()
        .with_env_filter(format!("roomsplit={level},engine={level}"))
        .with_writer(std::io::stderr)
        .init();

    commands::run(cli.command, &settings).await?;
    Ok(())
}
