//! guest_list.rs
//!
//! Проекция списка гостей на текущую страницу.
//!
//! Поиск (подстрока без учёта регистра по имени гостя или студенческому
//! номеру) и фильтр по статусу объединяются через И. Любое изменение
//! фильтров сбрасывает страницу на первую, а номер страницы всегда
//! прижимается к `[1, max(1, total_pages)]`.

use std::fmt;
use std::str::FromStr;

use crate::models::{Registration, RegistrationStatus, registration::UnknownStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(RegistrationStatus),
}

impl StatusFilter {
    pub fn accepts(&self, status: RegistrationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => *expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

fn matches_search(registration: &Registration, needle: &str) -> bool {
    needle.is_empty()
        || registration.guest.name.to_lowercase().contains(needle)
        || registration.guest.student_id.to_lowercase().contains(needle)
}

/// Все записи, прошедшие поиск и фильтр статуса, в исходном порядке.
pub fn filter_registrations<'a>(
    registrations: &'a [Registration],
    search: &str,
    status_filter: StatusFilter,
) -> Vec<&'a Registration> {
    let needle = search.to_lowercase();
    registrations
        .iter()
        .filter(|r| status_filter.accepts(r.status) && matches_search(r, &needle))
        .collect()
}

pub fn total_pages(total_matches: usize, page_size: usize) -> usize {
    total_matches.div_ceil(page_size.max(1))
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Видимая страница списка.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Registration>,
    pub page: usize,
    pub total_matches: usize,
    pub total_pages: usize,
}

pub fn paginate<'a>(filtered: &[&'a Registration], page: usize, page_size: usize) -> Page<'a> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(filtered.len(), page_size);
    let page = clamp_page(page, total_pages);

    let start = (page - 1) * page_size;
    let items = filtered.iter().skip(start).take(page_size).copied().collect();

    Page {
        items,
        page,
        total_matches: filtered.len(),
        total_pages,
    }
}

/// Состояние представления списка гостей: строка поиска, фильтр, страница.
#[derive(Debug, Clone)]
pub struct GuestListView {
    search: String,
    status_filter: StatusFilter,
    page: usize,
    page_size: usize,
}

impl GuestListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            status_filter: StatusFilter::All,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        self.status_filter = status_filter;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Все совпадения без разбивки на страницы (для экспорта).
    pub fn matching<'a>(&self, registrations: &'a [Registration]) -> Vec<&'a Registration> {
        filter_registrations(registrations, &self.search, self.status_filter)
    }

    /// Текущая страница. Номер страницы прижимается к допустимому диапазону
    /// и запоминается, если набор записей сократился.
    pub fn render<'a>(&mut self, registrations: &'a [Registration]) -> Page<'a> {
        let filtered = self.matching(registrations);
        let page = paginate(&filtered, self.page, self.page_size);
        self.page = page.page;
        page
    }
}
