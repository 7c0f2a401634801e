use catalog_sqlite::Db;
use catalog_store::ProductRankingStore;
use catalogdemo::{AppConfig, Cli, run};
use time::OffsetDateTime;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the ranked listing on stdout stays clean.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::import()?;
    let AppConfig { store, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let store = ProductRankingStore::new(db, store);
    store.load().await?;

    run(&store, cli.command, OffsetDateTime::now_utc(), &mut std::io::stdout()).await
}
