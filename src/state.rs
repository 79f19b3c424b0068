use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

use crate::api::NotificationEvent;
use crate::clients::openai::OpenAiClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::AssistantService;

/// Build a shared HTTP client with reasonable defaults for API calls.
/// Reused across HTTP-based services to enable connection pooling.
fn build_shared_http_client(timeout_seconds: u64) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent("Botdeck/1.0")
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub assistant: Arc<AssistantService>,

    pub event_bus: broadcast::Sender<NotificationEvent>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let (event_bus, _) = broadcast::channel(config.general.event_bus_buffer_size);
        Self::init_with_event_bus(config, event_bus).await
    }

    pub async fn with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> anyhow::Result<Self> {
        Self::init_with_event_bus(config, event_bus).await
    }

    async fn init_with_event_bus(
        config: Config,
        event_bus: broadcast::Sender<NotificationEvent>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let http_client =
            build_shared_http_client(config.assistant.request_timeout_seconds.into())?;

        let openai = Arc::new(OpenAiClient::with_shared_client(
            http_client,
            &config.assistant,
        ));

        let assistant = Arc::new(AssistantService::new(
            openai,
            config.assistant.enabled,
            !config.assistant.api_key.is_empty(),
        ));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            store,
            assistant,
            event_bus,
        })
    }

    pub async fn config(&self) -> Config {
        self.config.read().await.clone()
    }
}
