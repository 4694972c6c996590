//! Экспорт текущего представления списка гостей в CSV.
//!
//! Экспортируются все строки, прошедшие поиск и фильтр, а не только
//! видимая страница. Поля с запятой, кавычкой или переводом строки
//! заключаются в кавычки, кавычки внутри удваиваются (RFC 4180).

use chrono::{Local, TimeZone};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::models::Registration;

pub const CSV_HEADER: [&str; 5] = ["Guest Name", "Status", "Contact", "Student ID", "Booking Date"];

pub fn file_name(event_id: &str) -> String {
    format!("guest_list_{}.csv", event_id)
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn push_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line: Vec<String> = fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()).into_owned())
        .collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

/// CSV-текст; дата бронирования выводится в часовом поясе `tz`.
pub fn to_csv_in<'a, Tz, I>(rows: I, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
    I: IntoIterator<Item = &'a Registration>,
{
    let mut out = String::new();
    push_row(&mut out, CSV_HEADER);

    for r in rows {
        let booked = r.booking_time.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string();
        push_row(
            &mut out,
            [
                r.guest.name.as_str(),
                r.status.label(),
                r.guest.email.as_str(),
                r.guest.student_id.as_str(),
                booked.as_str(),
            ],
        );
    }
    out
}

pub fn to_csv<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = &'a Registration>,
{
    to_csv_in(rows, &Local)
}

/// Пишет `guest_list_<eventId>.csv` в каталог `dir` и возвращает путь к файлу.
pub async fn write_csv<'a, I>(dir: &Path, event_id: &str, rows: I) -> std::io::Result<PathBuf>
where
    I: IntoIterator<Item = &'a Registration>,
{
    let path = dir.join(file_name(event_id));
    let csv = to_csv(rows);
    tokio::fs::write(&path, csv).await?;
    info!("Exported guest list for event {} to {}", event_id, path.display());
    Ok(path)
}
