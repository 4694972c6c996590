pub mod api_client;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod views;

use std::sync::Arc;
use std::time::Duration;

use api_client::ApiClient;
use cache::{RegistrationStore, SharedStore};
use services::{GuestListPoller, StatusTransitionHandler};
use views::GuestListView;

// Shared state для представления списка гостей одного события
#[derive(Clone)]
pub struct GuestListState {
    pub config: config::Config,
    pub client: ApiClient,
    pub store: SharedStore,
    pub transitions: StatusTransitionHandler,
}

impl GuestListState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, error::ApiError> {
        let client = ApiClient::from_config(&config.api)?;
        Ok(Arc::new(Self::with_client(config, client)))
    }

    pub fn with_client(config: config::Config, client: ApiClient) -> Self {
        let store = RegistrationStore::shared(config.guest_list.event_id.clone());
        let transitions = StatusTransitionHandler::new(client.clone(), store.clone());
        Self {
            config,
            client,
            store,
            transitions,
        }
    }

    /// Разовая загрузка регистраций и отзывов.
    pub async fn refresh(&self) -> services::poller::RefreshOutcome {
        services::poller::refresh(&self.client, &self.store).await
    }

    /// Запускает фоновый опрос; он остановится, когда вернувшийся объект будет удалён.
    pub fn start_polling(&self) -> GuestListPoller {
        GuestListPoller::spawn(
            self.client.clone(),
            self.store.clone(),
            Duration::from_secs(self.config.guest_list.poll_interval_seconds),
        )
    }

    pub fn view(&self) -> GuestListView {
        GuestListView::new(self.config.guest_list.page_size)
    }
}
