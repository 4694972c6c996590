//! status.rs
//!
//! Смена статуса регистрации: отметка на входе, отмена, восстановление, откат.
//!
//! Кеш меняется только после успешного ответа сервера, и только статусом,
//! который подтвердил сервер. При ошибке кеш не трогается вовсе.
//!
//! Таблица переходов ниже - это весь контракт со стороны клиента. Бэкенд
//! может применять свои, более строгие правила; тогда он вернёт ошибку, и
//! её текст уйдёт организатору.

use tracing::{debug, error, info, warn};

use crate::api_client::ApiClient;
use crate::cache::SharedStore;
use crate::error::TransitionError;
use crate::models::{Registration, RegistrationId, RegistrationStatus};

/// Пункт контекстного меню строки.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionAction {
    pub label: &'static str,
    pub to: RegistrationStatus,
}

const FROM_CONFIRMED: &[TransitionAction] = &[
    TransitionAction { label: "Approve Check-In", to: RegistrationStatus::CheckedIn },
    TransitionAction { label: "Cancel Registration", to: RegistrationStatus::Cancelled },
];

const FROM_CHECKED_IN: &[TransitionAction] = &[
    TransitionAction { label: "Undo Check-In", to: RegistrationStatus::Confirmed },
];

const FROM_CANCELLED: &[TransitionAction] = &[
    TransitionAction { label: "Restore Registration", to: RegistrationStatus::Confirmed },
];

/// Действия, доступные для строки в данном статусе.
pub fn available_actions(from: RegistrationStatus) -> &'static [TransitionAction] {
    match from {
        RegistrationStatus::Confirmed => FROM_CONFIRMED,
        RegistrationStatus::CheckedIn => FROM_CHECKED_IN,
        RegistrationStatus::Cancelled => FROM_CANCELLED,
    }
}

pub fn is_allowed(from: RegistrationStatus, to: RegistrationStatus) -> bool {
    available_actions(from).iter().any(|a| a.to == to)
}

#[derive(Clone)]
pub struct StatusTransitionHandler {
    client: ApiClient,
    store: SharedStore,
}

impl StatusTransitionHandler {
    pub fn new(client: ApiClient, store: SharedStore) -> Self {
        Self { client, store }
    }

    /// Переводит регистрацию в новый статус.
    ///
    /// Повторный запрос того же статуса ничего не отправляет и возвращает
    /// запись как есть.
    pub async fn transition(
        &self,
        id: &RegistrationId,
        new_status: RegistrationStatus,
    ) -> Result<Registration, TransitionError> {
        let current = {
            let store = self.store.read().await;
            store
                .get(id)
                .cloned()
                .ok_or_else(|| TransitionError::UnknownRegistration(id.clone()))?
        };

        if current.status == new_status {
            debug!("Registration {} is already {}, nothing to do", id, new_status);
            return Ok(current);
        }

        if !is_allowed(current.status, new_status) {
            warn!("Rejected transition {} -> {} for registration {}", current.status, new_status, id);
            return Err(TransitionError::NotAllowed {
                from: current.status,
                to: new_status,
            });
        }

        // Блокировку на время запроса не держим: поллер должен продолжать работать
        let confirmed = self.client.update_status(id, new_status).await.map_err(|e| {
            error!("Failed to update registration {}: {}", id, e);
            TransitionError::from(e)
        })?;

        if confirmed.status != new_status {
            warn!(
                "Server normalized registration {} to {} instead of {}",
                id, confirmed.status, new_status
            );
        }

        if confirmed.id != *id {
            warn!("Server confirmed registration {} while {} was updated", confirmed.id, id);
        }

        // Статус ложится на запрошенную запись, id из ответа не используется
        let mut store = self.store.write().await;
        if !store.apply_status(id, confirmed.status) {
            // Запись пропала из снимка, пока шёл запрос; следующий опрос всё исправит
            warn!("Registration {} vanished from the guest list during update", id);
        }
        store.close_menu_for(id);

        info!("Registration {} is now {}", id, confirmed.status);
        Ok(current.with_status(confirmed.status))
    }
}
