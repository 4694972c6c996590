use std::time::Duration;
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info};

use crate::api_client::ApiClient;
use crate::cache::SharedStore;

/// Результат одного опроса бэкенда.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub registrations_updated: bool,
    pub reviews_updated: bool,
}

/// Перечитывает регистрации и отзывы события.
///
/// Оба запроса идут параллельно. Если запрос не удался, ошибка пишется в лог,
/// а в кеше остаётся предыдущий снимок (при первой загрузке - пустой).
/// Повторов нет: следующая попытка будет на следующем тике.
pub async fn refresh(client: &ApiClient, store: &SharedStore) -> RefreshOutcome {
    let event_id = store.read().await.event_id().to_string();

    let (registrations, reviews) = futures::join!(
        client.list_registrations(&event_id),
        client.list_reviews(&event_id),
    );

    let mut store = store.write().await;
    let mut outcome = RefreshOutcome {
        registrations_updated: false,
        reviews_updated: false,
    };

    match registrations {
        Ok(registrations) => {
            store.replace_registrations(registrations);
            outcome.registrations_updated = true;
        }
        Err(e) => error!("Failed to fetch registrations for event {}: {}", event_id, e),
    }

    match reviews {
        Ok(reviews) => {
            store.replace_reviews(reviews);
            outcome.reviews_updated = true;
        }
        Err(e) => error!("Failed to fetch reviews for event {}: {}", event_id, e),
    }

    outcome
}

/// Фоновый опрос списка гостей.
///
/// Живёт, пока жив этот объект: при drop задача отменяется, так что
/// закрытое представление больше ничего не запрашивает.
pub struct GuestListPoller {
    handle: JoinHandle<()>,
}

impl GuestListPoller {
    pub fn spawn(client: ApiClient, store: SharedStore, interval: Duration) -> Self {
        info!("Starting guest list polling every {:?}", interval);

        let handle = task::spawn(async move {
            loop {
                let outcome = refresh(&client, &store).await;
                debug!("Poll tick: {:?}", outcome);
                tokio::time::sleep(interval).await;
            }
        });

        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Явная остановка; то же самое происходит при drop.
    pub fn shutdown(self) {
        drop(self);
    }
}

impl Drop for GuestListPoller {
    fn drop(&mut self) {
        self.handle.abort();
        info!("Guest list polling stopped");
    }
}
