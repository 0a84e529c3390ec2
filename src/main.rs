use mimalloc::MiMalloc;
use pokevault::config::Config;
use pokevault::db::RecordStorage;
use pokevault::error::VaultError;
use pokevault::service::{Harvester, HarvestSummary};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), VaultError> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        db_host = %cfg.database.host,
        db_port = cfg.database.port,
        dbname = %cfg.database.dbname,
        api_base = %cfg.fetch.api_base,
        start_id = cfg.fetch.start_id,
        end_id = cfg.fetch.end_id,
        "starting harvest"
    );

    match run(&cfg).await {
        Ok(summary) => {
            info!(
                attempted = summary.attempted,
                inserted = summary.inserted,
                already_present = summary.already_present,
                http_skipped = summary.http_skipped,
                error_skipped = summary.error_skipped,
                "harvest complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "{}", e.kind().label());
            Err(e)
        }
    }
}

/// Connect, initialize the schema, run the pass, and release the pool on
/// every exit path.
async fn run(cfg: &Config) -> Result<HarvestSummary, VaultError> {
    let storage = RecordStorage::connect(&cfg.database).await?;

    let result = async {
        storage.init_schema().await?;
        let harvester = Harvester::new(storage.clone(), cfg.fetch.clone(), cfg.policy.clone())?;
        harvester.run().await
    }
    .await;

    storage.close().await;
    result
}
