//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the CLI commands.
//! Services are generic over the repository trait, but AppState pins them
//! to the storage backend selected in `config.toml`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rentora_core::marketplace::service::MarketplaceService;
use rentora_core::repository::property::{ListingFilter, PropertyRepository};
use rentora_core::wizard::rules::RuleSet;
use rentora_core::wizard::service::WizardService;
use rentora_infra::config::{load_app_config, resolve_data_dir};
use rentora_infra::fixtures;
use rentora_infra::jsonstore::JsonFilePropertyRepository;
use rentora_infra::latency::SimulatedLatency;
use rentora_infra::memory::InMemoryPropertyRepository;
use rentora_types::config::{AppConfig, StorageKind};
use rentora_types::error::RepositoryError;
use rentora_types::property::{Property, PropertyId};

/// The storage backend selected at startup.
///
/// An enum rather than a trait object because `PropertyRepository` is not
/// dyn-compatible (native async fn in trait).
#[derive(Clone)]
pub enum StorageBackend {
    Memory(InMemoryPropertyRepository),
    File(JsonFilePropertyRepository),
}

impl PropertyRepository for StorageBackend {
    async fn create(&self, property: &Property) -> Result<Property, RepositoryError> {
        match self {
            StorageBackend::Memory(repo) => repo.create(property).await,
            StorageBackend::File(repo) => repo.create(property).await,
        }
    }

    async fn get_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        match self {
            StorageBackend::Memory(repo) => repo.get_by_id(id).await,
            StorageBackend::File(repo) => repo.get_by_id(id).await,
        }
    }

    async fn list(
        &self,
        filter: Option<ListingFilter>,
    ) -> Result<Vec<Property>, RepositoryError> {
        match self {
            StorageBackend::Memory(repo) => repo.list(filter).await,
            StorageBackend::File(repo) => repo.list(filter).await,
        }
    }

    async fn update(&self, property: &Property) -> Result<Property, RepositoryError> {
        match self {
            StorageBackend::Memory(repo) => repo.update(property).await,
            StorageBackend::File(repo) => repo.update(property).await,
        }
    }

    async fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        match self {
            StorageBackend::Memory(repo) => repo.delete(id).await,
            StorageBackend::File(repo) => repo.delete(id).await,
        }
    }
}

/// Concrete repository type the services are pinned to.
pub type ConcreteRepo = SimulatedLatency<StorageBackend>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub wizard: Arc<WizardService<ConcreteRepo>>,
    pub marketplace: Arc<MarketplaceService<ConcreteRepo>>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: open storage, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;

        let backend = match config.storage.kind {
            StorageKind::Memory => StorageBackend::Memory(InMemoryPropertyRepository::new()),
            StorageKind::File => StorageBackend::File(
                JsonFilePropertyRepository::open(data_dir.join("listings.json")).await?,
            ),
        };
        let repo = SimulatedLatency::new(
            backend,
            Duration::from_millis(config.storage.latency_ms),
        );

        if config.storage.seed_demo {
            fixtures::seed_if_empty(&repo).await?;
        }

        tracing::debug!(
            data_dir = %data_dir.display(),
            backend = ?config.storage.kind,
            latency_ms = config.storage.latency_ms,
            "application state initialized"
        );

        let wizard = WizardService::new(repo.clone(), config.wizard.clone(), RuleSet::builtin());
        let marketplace = MarketplaceService::new(repo);

        Ok(Self {
            wizard: Arc::new(wizard),
            marketplace: Arc::new(marketplace),
            config,
            data_dir,
        })
    }
}
