use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{Registration, RegistrationId, Review};

pub mod registrations;
pub mod reviews;

/// Общий доступ к хранилищу для поллера и обработчика статусов.
pub type SharedStore = Arc<RwLock<RegistrationStore>>;

/// Клиентский кеш списка гостей одного события.
///
/// Единственный источник правды для представления: всё, что показывается
/// организатору, считается из этого массива. Записи пишутся сюда только
/// после ответа сервера.
#[derive(Debug, Clone)]
pub struct RegistrationStore {
    event_id: String,
    registrations: Vec<Registration>,
    reviews: Vec<Review>,
    // Контекстное меню открыто не более чем для одной строки
    open_menu: Option<RegistrationId>,
    last_refreshed: Option<DateTime<Utc>>,
}

impl RegistrationStore {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            registrations: Vec::new(),
            reviews: Vec::new(),
            open_menu: None,
            last_refreshed: None,
        }
    }

    pub fn shared(event_id: impl Into<String>) -> SharedStore {
        Arc::new(RwLock::new(Self::new(event_id)))
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        self.last_refreshed
    }

    // === Контекстное меню строки ===

    /// Открывает меню для строки. Меню другой строки при этом закрывается.
    pub fn open_menu(&mut self, id: &RegistrationId) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        self.open_menu = Some(id.clone());
        true
    }

    pub fn close_menu(&mut self) {
        self.open_menu = None;
    }

    pub fn open_menu_id(&self) -> Option<&RegistrationId> {
        self.open_menu.as_ref()
    }
}
