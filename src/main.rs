use chrono::Duration;
use import_export_portal::config::{environment::Config, init_db, run_migrations};
use import_export_portal::repositories::Repositories;
use import_export_portal::services::{
    jwt::JwtService,
    mailer::{EmailSender, HttpMailer, LogMailer},
    rate_limit::create_ip_rate_limiter,
};
use import_export_portal::AppState;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "import_export_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load environment configuration");

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to connect to MySQL");
    tracing::info!("Connected to MySQL");

    run_migrations(&db).await.expect("Failed to run migrations");
    tracing::info!("Migrations applied");

    let jwt_service = JwtService::new(
        &config.jwt_secret,
        Duration::days(config.jwt_expiry_days),
    )
    .expect("Failed to initialise token service");

    let settings = config.auth_settings();
    let mailer: Arc<dyn EmailSender> = match config.email.clone() {
        Some(email) => Arc::new(
            HttpMailer::new(email, settings.otp_ttl.num_seconds())
                .expect("Failed to build mail client"),
        ),
        None => {
            tracing::warn!("EMAIL_API_URL not set, outgoing email is disabled");
            Arc::new(LogMailer)
        }
    };

    if settings.expose_debug_secrets {
        tracing::warn!("APP_ENV=development: OTP codes and reset tokens are echoed in responses");
    }

    let state = AppState {
        repos: Repositories::mysql(db),
        jwt_service,
        mailer,
        settings,
    };

    let limiter = create_ip_rate_limiter(config.rate_limit_burst, config.rate_limit_per_minute)
        .trust_forwarded_for(config.trust_forwarded_for);
    if config.trust_forwarded_for {
        tracing::info!("Rate limits keyed on X-Forwarded-For");
    }
    let app = import_export_portal::create_app(state, limiter, config.cors_origin.as_deref());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server running on http://{}", config.bind_addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}
