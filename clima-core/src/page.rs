use chrono::NaiveDateTime;

use crate::model::ForecastSeries;

/// One rendered row: localized timestamp plus formatted temperature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    /// "day/month hour:minute" in the series' local time.
    pub when: String,
    /// One decimal place, e.g. "23.4 °C".
    pub temperature: String,
}

/// Pure projection of the pager's current window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub rows: Vec<PageRow>,
    pub page_index: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// "page X of Y (Zh shown)"; empty for an empty series.
    pub status: String,
}

/// Owns the fetched series and the visible window over it.
///
/// The window index snaps back to the first page whenever the series or the
/// page size changes, and is clamped into range on every view.
#[derive(Debug, Clone)]
pub struct Pager {
    series: ForecastSeries,
    page_index: usize,
    page_size: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            series: ForecastSeries::default(),
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn with_series(series: ForecastSeries, page_size: usize) -> Self {
        let mut pager = Self::new(page_size);
        pager.replace_series(series);
        pager
    }

    /// Wholesale replacement; partial updates don't exist.
    pub fn replace_series(&mut self, series: ForecastSeries) {
        self.series = series;
        self.page_index = 0;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    pub fn total_pages(&self) -> usize {
        self.series.len().div_ceil(self.page_size).max(1)
    }

    /// Advance one page; no-op on the last page.
    pub fn next(&mut self) -> bool {
        if self.page_index + 1 < self.total_pages() {
            self.page_index += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page; no-op on the first page.
    pub fn prev(&mut self) -> bool {
        if self.page_index > 0 {
            self.page_index -= 1;
            true
        } else {
            false
        }
    }

    pub fn view(&self) -> PageView {
        if self.series.is_empty() {
            return PageView {
                rows: Vec::new(),
                page_index: 0,
                total_pages: 0,
                has_prev: false,
                has_next: false,
                status: String::new(),
            };
        }

        let total = self.series.len();
        let total_pages = self.total_pages();
        let page_index = self.page_index.min(total_pages - 1);

        let start = page_index * self.page_size;
        let end = (start + self.page_size).min(total);

        let rows = (start..end)
            .filter_map(|i| self.series.get(i))
            .map(|(time, temperature)| PageRow {
                when: format_timestamp(time),
                temperature: format!("{temperature:.1} °C"),
            })
            .collect();

        PageView {
            rows,
            page_index,
            total_pages,
            has_prev: page_index > 0,
            has_next: page_index + 1 < total_pages,
            status: format!("page {} of {} ({}h shown)", page_index + 1, total_pages, end - start),
        }
    }
}

// Open-Meteo sends local timestamps at minute resolution; fall back to the
// raw string for anything else.
fn format_timestamp(raw: &str) -> String {
    for fmt in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(when) = NaiveDateTime::parse_from_str(raw, fmt) {
            return when.format("%d/%m %H:%M").to_string();
        }
    }
    raw.to_string()
}
