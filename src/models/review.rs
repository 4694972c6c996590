use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Отзыв студента о событии. Только для отображения.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(alias = "_id")]
    pub id: String,
    /// Оценка 1-5. Значения вне диапазона сводка отзывов не учитывает.
    #[serde(deserialize_with = "rounded_rating")]
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(alias = "student_name", alias = "reviewerName", default)]
    pub reviewer_name: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

// Бэкенд хранит оценку как Number и может отдать 4.0 или 4.5
fn rounded_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, f64::from(u8::MAX)) as u8)
}
