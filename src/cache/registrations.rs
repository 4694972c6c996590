use chrono::Utc;
use tracing::{debug, warn};

use crate::cache::RegistrationStore;
use crate::models::{Registration, RegistrationId, RegistrationStatus};

impl RegistrationStore {
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    pub fn get(&self, id: &RegistrationId) -> Option<&Registration> {
        self.registrations.iter().find(|r| &r.id == id)
    }

    /// Заменяет содержимое кеша свежим снимком с сервера.
    ///
    /// Записи чужих событий отбрасываются: регистрация принадлежит ровно
    /// одному событию.
    pub fn replace_registrations(&mut self, registrations: Vec<Registration>) {
        let total = registrations.len();
        let event_id = self.event_id.clone();
        self.registrations = registrations
            .into_iter()
            .filter(|r| r.event_id == event_id)
            .collect();

        if self.registrations.len() != total {
            warn!(
                "Dropped {} registrations not belonging to event {}",
                total - self.registrations.len(),
                event_id
            );
        }

        // Меню строки, которой больше нет, закрываем
        if let Some(id) = self.open_menu.clone() {
            if self.get(&id).is_none() {
                self.open_menu = None;
            }
        }

        self.last_refreshed = Some(Utc::now());
        debug!("Guest list for event {} now holds {} registrations", event_id, self.registrations.len());
    }

    /// Применяет подтверждённый сервером статус к записи `id`.
    ///
    /// Меняется только `status`: снимок гостя, время бронирования и событие
    /// неизменяемы. Возвращает `false`, если записи в кеше нет.
    pub fn apply_status(&mut self, id: &RegistrationId, status: RegistrationStatus) -> bool {
        match self.registrations.iter_mut().find(|r| &r.id == id) {
            Some(entry) => {
                entry.status = status;
                true
            }
            None => false,
        }
    }

    /// Закрывает меню, если оно открыто именно для этой строки.
    pub fn close_menu_for(&mut self, id: &RegistrationId) {
        if self.open_menu.as_ref() == Some(id) {
            self.open_menu = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GuestSnapshot, RegistrationStatus};
    use chrono::{TimeZone, Utc};

    fn registration(id: &str, event_id: &str) -> Registration {
        Registration {
            id: RegistrationId::from(id),
            status: RegistrationStatus::Confirmed,
            guest: GuestSnapshot {
                name: format!("Guest {id}"),
                student_id: format!("S-{id}"),
                email: format!("{id}@uni.edu"),
            },
            booking_time: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            event_id: event_id.to_string(),
        }
    }

    #[test]
    fn replace_drops_foreign_registrations() {
        let mut store = RegistrationStore::new("e-1");
        store.replace_registrations(vec![registration("a", "e-1"), registration("b", "e-2")]);

        assert_eq!(store.registrations().len(), 1);
        assert!(store.last_refreshed().is_some());
    }

    #[test]
    fn apply_status_only_touches_that_row() {
        let mut store = RegistrationStore::new("e-1");
        store.replace_registrations(vec![registration("a", "e-1"), registration("b", "e-1")]);

        assert!(store.apply_status(&RegistrationId::from("a"), RegistrationStatus::CheckedIn));
        let entry = store.get(&RegistrationId::from("a")).unwrap();
        assert_eq!(entry.status, RegistrationStatus::CheckedIn);
        assert_eq!(entry.guest.name, "Guest a");
        assert_eq!(store.get(&RegistrationId::from("b")).unwrap().status, RegistrationStatus::Confirmed);

        assert!(!store.apply_status(&RegistrationId::from("zzz"), RegistrationStatus::Cancelled));
        assert_eq!(store.registrations().len(), 2);
    }

    #[test]
    fn menu_follows_rows() {
        let mut store = RegistrationStore::new("e-1");
        store.replace_registrations(vec![registration("a", "e-1"), registration("b", "e-1")]);

        assert!(!store.open_menu(&RegistrationId::from("missing")));
        assert!(store.open_menu(&RegistrationId::from("a")));

        store.close_menu_for(&RegistrationId::from("b"));
        assert_eq!(store.open_menu_id(), Some(&RegistrationId::from("a")));

        store.replace_registrations(vec![registration("b", "e-1")]);
        assert_eq!(store.open_menu_id(), None);
    }
}
