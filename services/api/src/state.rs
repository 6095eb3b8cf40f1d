//! Client state shared by the dashboards and the command line

use std::sync::Arc;

use auth::{
    AccessGuard, AuthClient, ClientConfig, Clock, RequestGateway, SessionStore, SessionSweeper,
    StorageKind, SystemClock,
};
use common::{FileStorage, MemoryStorage, RedisConfig, RedisStorage, StorageArea};
use tracing::info;

use crate::error::ApiResult;
use crate::repositories::{
    ApprovalRepository, BalanceRepository, HolidayRepository, LeaveRepository,
};

/// Everything a page needs, wired to one session store
#[derive(Clone)]
pub struct AppState {
    pub config: ClientConfig,
    pub clock: Arc<dyn Clock>,
    pub store: SessionStore,
    pub auth: AuthClient,
    pub guard: AccessGuard,
    pub gateway: RequestGateway,
    pub leave_repository: LeaveRepository,
    pub holiday_repository: HolidayRepository,
    pub approval_repository: ApprovalRepository,
    pub balance_repository: BalanceRepository,
}

impl AppState {
    /// Open the configured storage area and build the state on the system clock
    pub async fn from_config(config: ClientConfig) -> ApiResult<Self> {
        let storage = open_storage(&config).await?;
        Self::new(config, storage, Arc::new(SystemClock))
    }

    /// Build the state over an already opened storage area
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn StorageArea>,
        clock: Arc<dyn Clock>,
    ) -> ApiResult<Self> {
        let store = SessionStore::new(storage);
        let auth = AuthClient::from_config(&config, store.clone(), clock.clone())?;
        let gateway = RequestGateway::from_config(&config, store.clone(), clock.clone())?;
        let guard = AccessGuard::new(store.clone(), clock.clone(), config.request_policy());

        Ok(Self {
            leave_repository: LeaveRepository::new(gateway.clone()),
            holiday_repository: HolidayRepository::new(gateway.clone()),
            approval_repository: ApprovalRepository::new(gateway.clone()),
            balance_repository: BalanceRepository::new(gateway.clone()),
            config,
            clock,
            store,
            auth,
            guard,
            gateway,
        })
    }

    /// Background sweep over this state's session
    pub fn sweeper(&self) -> SessionSweeper {
        SessionSweeper::new(
            self.store.clone(),
            self.clock.clone(),
            self.config.sweep_policy(),
            self.config.sweep_interval(),
        )
    }
}

/// Open the storage area selected by `config.storage`
pub async fn open_storage(config: &ClientConfig) -> ApiResult<Arc<dyn StorageArea>> {
    let storage: Arc<dyn StorageArea> = match config.storage {
        StorageKind::File => {
            info!("Using session file {}", config.storage_path);
            Arc::new(FileStorage::open(&config.storage_path).await?)
        }
        StorageKind::Memory => {
            info!("Using in-memory session storage");
            Arc::new(MemoryStorage::new())
        }
        StorageKind::Redis => {
            let redis_config = RedisConfig::from_env()?;
            let storage = RedisStorage::new(&redis_config).await?;
            if storage.health_check().await? {
                info!("Redis connection successful");
            }
            Arc::new(storage)
        }
    };
    Ok(storage)
}
