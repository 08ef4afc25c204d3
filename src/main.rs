use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use pet_grooming_backend::{
    AppState,
    config::Config,
    create_router,
    database::{
        self, MemoryPetRepository, MemoryUserRepository, PetRepository, PgPetRepository,
        PgUserRepository, UserRepository,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repositories = (Arc<dyn UserRepository>, Arc<dyn PetRepository>);

fn in_memory() -> Repositories {
    (
        Arc::new(MemoryUserRepository::default()),
        Arc::new(MemoryPetRepository::default()),
    )
}

async fn repositories(config: &Config) -> Repositories {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("No DATABASE_URL configured, starting in demo mode with in-memory storage");
        return in_memory();
    };

    let pool = match database::connect(database_url, config).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {}", e);
            tracing::warn!("Starting in demo mode with in-memory storage");
            return in_memory();
        }
    };

    match database::migrate(&pool).await {
        Ok(()) => tracing::info!("Database connected and migrated successfully"),
        Err(e) => tracing::warn!("Failed to run migrations: {}", e),
    }

    (
        Arc::new(PgUserRepository::new(pool.clone())),
        Arc::new(PgPetRepository::new(pool)),
    )
}

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置，签名密钥缺失时直接退出
    let config = Config::from_env().expect("Failed to load configuration");

    let (users, pets) = repositories(&config).await;
    let state = AppState::new(config, users, pets);
    let app = create_router(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
