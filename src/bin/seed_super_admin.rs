//! Provisions the super-admin account. Reads `SUPER_ADMIN_NAME`,
//! `SUPER_ADMIN_EMAIL` and `SUPER_ADMIN_PASSWORD` alongside the usual
//! database settings.

use import_export_portal::config::{environment::Config, init_db, run_migrations};
use import_export_portal::error::AppError;
use import_export_portal::modules::auth::{
    credentials::{normalize_email, CredentialStore},
    crud::MySqlAccountRepository,
};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "import_export_portal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load environment configuration");

    let name = env::var("SUPER_ADMIN_NAME").unwrap_or_else(|_| "Super Admin".to_string());
    let email = normalize_email(&env::var("SUPER_ADMIN_EMAIL").expect("SUPER_ADMIN_EMAIL must be set"));
    let password = env::var("SUPER_ADMIN_PASSWORD").expect("SUPER_ADMIN_PASSWORD must be set");
    if password.len() < 8 {
        panic!("SUPER_ADMIN_PASSWORD must be at least 8 characters");
    }

    let db = init_db(&config.database_url)
        .await
        .expect("Failed to connect to MySQL");
    run_migrations(&db).await.expect("Failed to run migrations");

    let repo = MySqlAccountRepository::new(db);
    match CredentialStore::new(&repo)
        .create_super_admin(&name, &email, &password)
        .await
    {
        Ok(account) => tracing::info!(id = %account.id, email = %account.email, "super-admin created"),
        Err(AppError::Conflict(_)) => {
            tracing::warn!(email = %email, "an account with this email already exists, nothing to do")
        }
        Err(e) => panic!("Failed to create super-admin: {e}"),
    }
}
