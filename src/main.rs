use ripple::{AppState, app, config::Config, store::MemoryStore};
use tracing::info;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();

    let store = MemoryStore::open(&config.store_url).expect("failed to open store");

    std::fs::create_dir_all(&config.upload_dir).expect("failed to create upload directory");

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, store);
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();

    info!("Server running on http://{}", bind_addr);
    info!("Endpoints:");
    info!("  GET    /health              - Health check");
    info!("  GET    /sign-up             - Sign-up form");
    info!("  POST   /sign-up             - Create account");
    info!("  POST   /log-in              - Login (sets session cookie)");
    info!("  GET    /log-out             - Logout");
    info!("  GET    /                    - Feed with resolved authors");
    info!("  POST   /visit-as-guest      - Feed as read-only guest");
    info!("  POST   /send-post           - Create post (auth)");
    info!("  POST   /like-post/{{id}}      - Like a post, idempotent (auth)");
    info!("  POST   /add-comment/{{id}}    - Comment on a post (auth)");
    info!("  POST   /follow/{{id}}         - Follow a user (auth)");
    info!("  POST   /upload-profile-pic  - Upload profile picture (auth)");
    info!("  GET    /profile             - Own profile (auth)");
    info!("  GET    /profile/{{id}}        - Any profile");
    info!("  GET    /list-of-users       - All users");

    axum::serve(listener, app).await.unwrap();
}
