use std::env;
use std::sync::Arc;

use email_template_studio::Studio;
use email_template_studio::config::load_config_or_panic;
use email_template_studio::database::{connect, migrate};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn initialize_standard_tracing() {
    let default_directives = "email_template_studio=info,sea_orm=info,sqlx=warn";
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    let registry = tracing_subscriber::registry().with(env_filter);
    let layer = fmt::layer().with_target(true).with_level(true);

    registry.with(layer).init();
}

/// Connects, brings the schema up to date and reports what is stored.
#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    color_eyre::install()?;
    // .env is optional
    let _ = dotenvy::dotenv();

    initialize_standard_tracing();

    let config = load_config_or_panic();
    let db = Arc::new(connect(&config).await?);

    let skip_migrations = env::args().any(|a| a == "--no-migrate");
    if config.run_migrations && !skip_migrations {
        migrate(db.as_ref()).await?;
    } else {
        tracing::info!("Skipping migrations");
    }

    let studio = Studio::new(db);
    let summary = studio.summary().await?;
    tracing::info!(
        courses = summary.courses,
        email_templates = summary.email_templates,
        content_blocks = summary.content_blocks,
        ai_generations = summary.ai_generations,
        media_assets = summary.media_assets,
        layout_presets = summary.layout_presets,
        "Store summary"
    );
    Ok(())
}
