//! Date context injected into the analysis prompt so the traffic trend is
//! anchored to the real trailing twelve months.

use chrono::{Datelike, Local, NaiveDate};

const MONTHS_IT: [&str; 12] = [
    "gennaio",
    "febbraio",
    "marzo",
    "aprile",
    "maggio",
    "giugno",
    "luglio",
    "agosto",
    "settembre",
    "ottobre",
    "novembre",
    "dicembre",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalContext {
    today: NaiveDate,
}

impl TemporalContext {
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Context for the local current date.
    #[must_use]
    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }

    /// Analysis date in Italian short form, e.g. `18/10/2026`.
    #[must_use]
    pub fn analysis_date(&self) -> String {
        self.today.format("%d/%m/%Y").to_string()
    }

    /// e.g. `ottobre 2026`.
    #[must_use]
    pub fn current_month_year(&self) -> String {
        month_year(self.today.year(), self.today.month0())
    }

    /// Same month one year earlier, e.g. `ottobre 2025`.
    #[must_use]
    pub fn year_ago_month_year(&self) -> String {
        month_year(self.today.year() - 1, self.today.month0())
    }
}

fn month_year(year: i32, month0: u32) -> String {
    let name = usize::try_from(month0)
        .ok()
        .and_then(|i| MONTHS_IT.get(i))
        .copied()
        .unwrap_or("gennaio");
    format!("{name} {year}")
}
