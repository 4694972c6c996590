use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Непрозрачный идентификатор регистрации (в бэкенде это строка).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(pub String);

impl RegistrationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for RegistrationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Статус регистрации. Набор закрытый.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationStatus {
    Confirmed,
    CheckedIn,
    Cancelled,
}

impl RegistrationStatus {
    pub const ALL: [RegistrationStatus; 3] = [
        RegistrationStatus::Confirmed,
        RegistrationStatus::CheckedIn,
        RegistrationStatus::Cancelled,
    ];

    /// Значение на проводе.
    pub fn as_wire(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::CheckedIn => "checked_in",
            RegistrationStatus::Cancelled => "cancelled",
        }
    }

    /// Подпись для таблицы и CSV.
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationStatus::Confirmed => "Confirmed",
            RegistrationStatus::CheckedIn => "Checked In",
            RegistrationStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registration status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for RegistrationStatus {
    type Err = UnknownStatus;

    // Бэкенд исторически отдаёт статус в разных написаниях:
    // "confirmed", "CONFIRMED", "checked-in", "CheckedIn", "checked_in".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "confirmed" => Ok(RegistrationStatus::Confirmed),
            "checkedin" => Ok(RegistrationStatus::CheckedIn),
            "cancelled" | "canceled" => Ok(RegistrationStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

impl Serialize for RegistrationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for RegistrationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Снимок данных гостя на момент бронирования.
///
/// Это замороженное значение, а не ссылка на живой профиль пользователя:
/// после бронирования оно не перезапрашивается и может устареть.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSnapshot {
    pub name: String,
    #[serde(alias = "studentId", alias = "student_number")]
    pub student_id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(alias = "_id")]
    pub id: RegistrationId,
    pub status: RegistrationStatus,
    pub guest: GuestSnapshot,
    #[serde(alias = "created_at", alias = "bookingTime")]
    pub booking_time: DateTime<Utc>,
    #[serde(alias = "eventId")]
    pub event_id: String,
}

impl Registration {
    /// Копия записи с другим статусом. Остальные поля не меняются никогда.
    pub fn with_status(&self, status: RegistrationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_legacy_spellings() {
        for raw in ["checked_in", "checked-in", "CheckedIn", "CHECKED_IN"] {
            assert_eq!(raw.parse::<RegistrationStatus>(), Ok(RegistrationStatus::CheckedIn));
        }
        assert_eq!("CONFIRMED".parse::<RegistrationStatus>(), Ok(RegistrationStatus::Confirmed));
        assert_eq!("canceled".parse::<RegistrationStatus>(), Ok(RegistrationStatus::Cancelled));
        assert!("pending".parse::<RegistrationStatus>().is_err());
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "_id": "r-17",
            "status": "checked-in",
            "guest": { "name": "Ali Hassan", "studentId": "A123", "email": "ali@uni.edu" },
            "created_at": "2026-03-01T09:15:00Z",
            "eventId": "e-1"
        }"#;

        let registration: Registration = serde_json::from_str(json).unwrap();
        assert_eq!(registration.id.as_str(), "r-17");
        assert_eq!(registration.status, RegistrationStatus::CheckedIn);
        assert_eq!(registration.guest.student_id, "A123");
        assert_eq!(registration.event_id, "e-1");

        let out = serde_json::to_value(&registration).unwrap();
        assert_eq!(out["status"], "checked_in");
        assert_eq!(out["id"], "r-17");
    }

    #[test]
    fn with_status_keeps_everything_else() {
        let json = r#"{"id":"r-1","status":"confirmed","guest":{"name":"Siti","student_id":"S1","email":"s@uni.edu"},"booking_time":"2026-03-01T09:00:00Z","event_id":"e-1"}"#;
        let original: Registration = serde_json::from_str(json).unwrap();
        let changed = original.with_status(RegistrationStatus::Cancelled);

        assert_eq!(changed.status, RegistrationStatus::Cancelled);
        assert_eq!(changed.with_status(RegistrationStatus::Confirmed), original);
    }
}
