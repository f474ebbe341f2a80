use std::sync::Arc;

use movie_catalog::{
    AppState,
    config::Config,
    db, routes,
    seed::{self, Fixtures},
    store::Store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_catalog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let fixtures = Fixtures::load(&config.fixtures)?;
    seed::seed(&db, fixtures).await?;

    let state = Arc::new(AppState { store: Store::new(db) });
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
