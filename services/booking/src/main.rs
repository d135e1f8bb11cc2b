use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use common::{
    cache::{RedisConfig, RedisPool},
    database,
};

use booking::{
    chat::{ChatClient, ChatConfig},
    repositories::{BookingRepository, UserRepository},
    routes,
    session::SessionStore,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting booking service");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    // Initialize the Redis-backed session store
    let redis_pool = RedisPool::new(&RedisConfig::from_env()).await?;
    let sessions = SessionStore::new(redis_pool);

    let chat = ChatClient::new(&ChatConfig::from_env())?;
    let users = UserRepository::new(pool.clone());
    let bookings = BookingRepository::new(pool.clone());

    let app_state = AppState {
        db_pool: pool,
        sessions,
        users,
        bookings,
        chat,
    };

    // Start the web server
    let app = routes::create_router(app_state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Booking service listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
