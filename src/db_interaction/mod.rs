use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod restaurants;
pub mod employees;
pub mod staff;
pub mod menu;
pub mod inventory;
pub mod seating;
pub mod customers;
pub mod orders;
pub mod vendors;
pub mod notifications;
pub mod finance;
pub mod references;
pub mod stats;
pub mod dashboards;

pub const DEFAULT_PAGE_SIZE: i64 = 50;
pub const MAX_PAGE_SIZE: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page{
    pub page: i64,
    pub limit: i64
}

impl Page {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Page{
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

// Pagination fields shared by every list endpoint
#[derive(Deserialize, Debug, Default, Clone)]
pub struct PageQuery{
    pub page: Option<i64>,
    pub limit: Option<i64>
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.page, self.limit)
    }
}

#[derive(Serialize, Debug)]
pub struct Paginated<T>{
    pub count: i64,
    pub page: i64,
    pub limit: i64,
    pub results: Vec<T>
}

impl<T> Paginated<T> {
    pub fn new(count: i64, page: Page, results: Vec<T>) -> Self {
        Paginated{ count, page: page.page, limit: page.limit, results }
    }
}

// Pattern for a case-insensitive substring match
pub fn search_pattern(term: &str) -> String {
    let escaped = term.trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

// [start, end) of a UTC calendar day
pub fn day_range(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
    (start, start + Duration::days(1))
}

pub fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day_range(day).0
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;

    #[test]
    fn page_defaults_and_clamps() {
        assert_eq!(Page::new(None, None), Page{ page: 1, limit: 50 });
        assert_eq!(Page::new(Some(0), Some(1000)), Page{ page: 1, limit: 200 });
        assert_eq!(Page::new(Some(3), Some(20)).offset(), 40);
    }

    #[test]
    fn search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(" pasta "), "%pasta%");
        assert_eq!(search_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn day_range_spans_one_day() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let (start, end) = day_range(day);

        assert_eq!(start.date_naive(), day);
        assert_eq!(start.hour(), 0);
        assert_eq!((end - start).num_hours(), 24);
    }
}
