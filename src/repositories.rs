use std::sync::Arc;

use crate::config::DbPool;
use crate::modules::auth::{
    crud::{MySqlAccountRepository, MySqlOtpRepository, MySqlPasswordResetRepository},
    interface::{AccountRepository, OtpRepository, PasswordResetRepository},
    memory::{MemoryAccountRepository, MemoryOtpRepository, MemoryPasswordResetRepository},
};
use crate::modules::catalog::{
    crud::MySqlCatalogRepository, interface::CatalogRepository, memory::MemoryCatalogRepository,
};
use crate::modules::contacts::{
    crud::MySqlContactRepository, interface::ContactRepository, memory::MemoryContactRepository,
};
use crate::modules::requests::{
    crud::MySqlRequestRepository, interface::RequestRepository, memory::MemoryRequestRepository,
};
use crate::modules::reviews::{
    crud::MySqlReviewRepository, interface::ReviewRepository, memory::MemoryReviewRepository,
};

/// Every store the handlers touch, behind its repository trait.
#[derive(Clone)]
pub struct Repositories {
    pub accounts: Arc<dyn AccountRepository>,
    pub otps: Arc<dyn OtpRepository>,
    pub resets: Arc<dyn PasswordResetRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub requests: Arc<dyn RequestRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    pub fn mysql(pool: DbPool) -> Self {
        Self {
            accounts: Arc::new(MySqlAccountRepository::new(pool.clone())),
            otps: Arc::new(MySqlOtpRepository::new(pool.clone())),
            resets: Arc::new(MySqlPasswordResetRepository::new(pool.clone())),
            catalog: Arc::new(MySqlCatalogRepository::new(pool.clone())),
            requests: Arc::new(MySqlRequestRepository::new(pool.clone())),
            contacts: Arc::new(MySqlContactRepository::new(pool.clone())),
            reviews: Arc::new(MySqlReviewRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountRepository::default()),
            otps: Arc::new(MemoryOtpRepository::default()),
            resets: Arc::new(MemoryPasswordResetRepository::default()),
            catalog: Arc::new(MemoryCatalogRepository::default()),
            requests: Arc::new(MemoryRequestRepository::default()),
            contacts: Arc::new(MemoryContactRepository::default()),
            reviews: Arc::new(MemoryReviewRepository::default()),
        }
    }
}
