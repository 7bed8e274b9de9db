// src/main.rs

use std::sync::Arc;

use anyhow::Context;
use env_logger::{Builder, Target};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use movieflix::application::commands::load_catalog;
use movieflix::application::shell::{Shell, HELP};
use movieflix::application::state::AppState;
use movieflix::config::AppConfig;
use movieflix::db::{
    create_connection_pool, get_database_stats, initialize_database, verify_database_integrity,
};
use movieflix::integrations::{MetadataApi, TmdbClient};
use movieflix::repositories::{
    ContentRepository, SettingsRepository, SqliteContentRepository, SqliteSettingsRepository,
};

fn init_logging(config: &AppConfig) {
    // stdout carries the shell's JSON; logs go to stderr
    if std::env::var("RUST_LOG").is_err() {
        Builder::new()
            .target(Target::Stderr)
            .filter_level(config.log_level)
            .init();
    } else {
        env_logger::init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. CONFIGURATION
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_logging(&config);

    // 2. INFRASTRUCTURE
    let pool = Arc::new(
        create_connection_pool(&config.db_path).context("failed to open catalog database")?,
    );
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
        verify_database_integrity(&conn)?;
        let stats = get_database_stats(&conn)?;
        log::info!(
            "Catalog schema v{}: {} movies, {} web series, {} bytes",
            stats.schema_version,
            stats.movie_count,
            stats.web_series_count,
            stats.size_bytes
        );
    }

    // 3. ADAPTERS
    let content_repo: Arc<dyn ContentRepository> =
        Arc::new(SqliteContentRepository::new(Arc::clone(&pool)));
    let settings_repo: Arc<dyn SettingsRepository> =
        Arc::new(SqliteSettingsRepository::new(Arc::clone(&pool)));
    let metadata_api: Arc<dyn MetadataApi> = Arc::new(TmdbClient::new(
        config.tmdb_base_url.clone(),
        config.http_timeout,
    )?);

    // 4. APPLICATION STATE (services + event wiring)
    let state = AppState::build(config, content_repo, settings_repo, metadata_api)?;

    // 5. INITIAL LOAD - a failure leaves an empty catalog
    let mut stdout = tokio::io::stdout();
    let greeting = match load_catalog(&state) {
        Ok(home) => serde_json::json!({ "ok": true, "data": home, "help": HELP }),
        Err(error) => {
            serde_json::json!({ "ok": false, "notice": error.into_notice(), "help": HELP })
        }
    };
    write_line(&mut stdout, &greeting).await?;

    // 6. SHELL LOOP
    let mut shell = Shell::new(&state);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match shell.execute(&line).await {
            Some(reply) => write_line(&mut stdout, &reply).await?,
            None => break,
        }
    }

    log::info!("Shutting down");
    Ok(())
}

async fn write_line(
    stdout: &mut tokio::io::Stdout,
    value: &serde_json::Value,
) -> anyhow::Result<()> {
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    stdout.write_all(&line).await?;
    stdout.flush().await?;
    Ok(())
}
