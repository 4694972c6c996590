//! analytics.rs
//!
//! Производные метрики для дашборда списка гостей.
//!
//! Включает в себя:
//! - Подсчёт регистраций по статусам (всего, отмечены, ожидают, отменены).
//! - Тренд бронирований по часам суток или по дням недели.
//! - Сводку по отзывам (средняя оценка, распределение 1-5).
//!
//! Всё здесь - чистые функции от текущего массива: никакого накопления
//! между перерисовками.

use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};
use serde::Serialize;
use std::str::FromStr;

use crate::cache::RegistrationStore;
use crate::models::{Registration, RegistrationStatus, Review};

const HOUR_LABELS: [&str; 24] = [
    "12AM", "1AM", "2AM", "3AM", "4AM", "5AM", "6AM", "7AM", "8AM", "9AM", "10AM", "11AM",
    "12PM", "1PM", "2PM", "3PM", "4PM", "5PM", "6PM", "7PM", "8PM", "9PM", "10PM", "11PM",
];

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Счётчики по статусам.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub checked_in: usize,
    /// Подтверждённые, но ещё не отмеченные на входе.
    pub pending: usize,
    pub cancelled: usize,
}

impl StatusCounts {
    pub fn from_registrations(registrations: &[Registration]) -> Self {
        registrations.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                RegistrationStatus::Confirmed => acc.pending += 1,
                RegistrationStatus::CheckedIn => acc.checked_in += 1,
                RegistrationStatus::Cancelled => acc.cancelled += 1,
            }
            acc
        })
    }
}

/// Доля в процентах. Делитель - `max(total, 1)`, так что пустой список даёт 0.
pub fn percent(part: usize, total: usize) -> f64 {
    part as f64 * 100.0 / total.max(1) as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendMode {
    /// По часам суток
    #[default]
    Daily,
    /// По дням недели
    Weekly,
}

impl FromStr for TrendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "hourly" => Ok(TrendMode::Daily),
            "weekly" => Ok(TrendMode::Weekly),
            other => Err(format!("unknown trend mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendBucket {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub mode: TrendMode,
    pub buckets: Vec<TrendBucket>,
}

impl TrendSeries {
    fn zeroed(mode: TrendMode) -> Self {
        let labels: &[&'static str] = match mode {
            TrendMode::Daily => &HOUR_LABELS,
            TrendMode::Weekly => &WEEKDAY_LABELS,
        };
        Self {
            mode,
            buckets: labels.iter().map(|&label| TrendBucket { label, count: 0 }).collect(),
        }
    }

    pub fn count(&self, label: &str) -> Option<usize> {
        self.buckets.iter().find(|b| b.label == label).map(|b| b.count)
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

fn bucket_index<Tz: TimeZone>(booking_time: &DateTime<Tz>, mode: TrendMode) -> usize {
    match mode {
        TrendMode::Daily => booking_time.hour() as usize,
        TrendMode::Weekly => booking_time.weekday().num_days_from_monday() as usize,
    }
}

/// Тренд бронирований в заданном часовом поясе.
pub fn trend_in<Tz: TimeZone>(registrations: &[Registration], mode: TrendMode, tz: &Tz) -> TrendSeries {
    let mut series = TrendSeries::zeroed(mode);
    for r in registrations {
        let local = r.booking_time.with_timezone(tz);
        series.buckets[bucket_index(&local, mode)].count += 1;
    }
    series
}

/// Тренд бронирований по локальному времени машины организатора.
pub fn trend(registrations: &[Registration], mode: TrendMode) -> TrendSeries {
    trend_in(registrations, mode, &Local)
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReviewSummary {
    pub count: usize,
    pub average_rating: f64,
    /// Количество оценок 1..=5, индекс 0 - оценка 1.
    pub histogram: [usize; 5],
}

impl ReviewSummary {
    // Оценки вне 1..=5 не учитываются
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut summary = Self::default();
        let mut sum = 0usize;
        for review in reviews.iter().filter(|r| (1..=5).contains(&r.rating)) {
            summary.count += 1;
            summary.histogram[review.rating as usize - 1] += 1;
            sum += review.rating as usize;
        }
        summary.average_rating = sum as f64 / summary.count.max(1) as f64;
        summary
    }
}

/// Снимок дашборда для текущего состояния кеша.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub counts: StatusCounts,
    pub checked_in_rate: f64,
    pub pending_rate: f64,
    pub cancelled_rate: f64,
    pub trend: TrendSeries,
    pub reviews: ReviewSummary,
}

impl Dashboard {
    pub fn build(store: &RegistrationStore, mode: TrendMode) -> Self {
        Self::build_in(store.registrations(), store.reviews(), mode, &Local)
    }

    pub fn build_in<Tz: TimeZone>(
        registrations: &[Registration],
        reviews: &[Review],
        mode: TrendMode,
        tz: &Tz,
    ) -> Self {
        let counts = StatusCounts::from_registrations(registrations);
        Self {
            counts,
            checked_in_rate: percent(counts.checked_in, counts.total),
            pending_rate: percent(counts.pending, counts.total),
            cancelled_rate: percent(counts.cancelled, counts.total),
            trend: trend_in(registrations, mode, tz),
            reviews: ReviewSummary::from_reviews(reviews),
        }
    }
}
