//! Dashboard Page
//!
//! Turns an order table into the rendered dashboard: headline metrics, the
//! daily order chart, the best/worst category charts and the windowed chart.
//!
//! ```text
//! OrderTable → Dashboard::build (rollups) → charts / DashboardPage (askama)
//! ```

use askama::Template;
use chrono::NaiveDate;

use super::chart::{self, Annotation, DateTicks, LineChart};
use super::currency::{CurrencyError, CurrencyFormatter};
use crate::config::DisplayConfig;
use crate::data::OrderTable;
use crate::rollup::{
    best_performing, category_rollup, daily_rollup, window, worst_performing, CategoryRollupRow,
    DailyRollupRow, HeadlineTotals,
};

/// Resolved presentation settings
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub currency: CurrencyFormatter,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    pub top_n: usize,
    pub window_title: String,
    pub window_caption: String,
}

impl DashboardSettings {
    pub fn from_config(config: &DisplayConfig) -> Result<Self, CurrencyError> {
        Ok(Self {
            currency: CurrencyFormatter::new(&config.currency, &config.locale)?,
            window_start: config.window_start,
            window_end: config.window_end,
            top_n: config.top_n,
            window_title: config.window_title.clone(),
            window_caption: config.window_caption.clone(),
        })
    }
}

/// Everything the page shows, computed once per run
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub totals: HeadlineTotals,
    pub total_revenue_display: String,
    pub daily: Vec<DailyRollupRow>,
    pub categories: Vec<CategoryRollupRow>,
    pub windowed: Vec<DailyRollupRow>,
    pub annotation: Option<Annotation>,
    settings: DashboardSettings,
}

impl Dashboard {
    /// Run every rollup over the table
    pub fn build(orders: &OrderTable, settings: &DashboardSettings) -> Self {
        let daily = daily_rollup(orders);
        let categories = category_rollup(orders);
        let totals = HeadlineTotals::from_daily(&daily);
        let windowed = window(&daily, settings.window_start, settings.window_end);
        let annotation = Annotation::at_peak(&windowed);

        tracing::debug!(
            days = daily.len(),
            categories = categories.len(),
            window_days = windowed.len(),
            total_orders = totals.total_orders,
            "Computed rollups"
        );

        Self {
            total_revenue_display: settings.currency.format(totals.total_revenue),
            totals,
            daily,
            categories,
            windowed,
            annotation,
            settings: settings.clone(),
        }
    }

    pub fn best(&self) -> Vec<CategoryRollupRow> {
        best_performing(&self.categories, self.settings.top_n)
    }

    pub fn worst(&self) -> Vec<CategoryRollupRow> {
        worst_performing(&self.categories, self.settings.top_n)
    }

    /// Order count over the full date range
    pub fn daily_chart(&self) -> String {
        LineChart::order_count(&self.daily).render()
    }

    /// Best and worst performing categories
    pub fn category_chart(&self) -> String {
        chart::render_bar_pair(&self.best(), &self.worst())
    }

    /// Windowed order count with area fill and max annotation
    pub fn window_chart(&self) -> String {
        LineChart::order_count(&self.windowed)
            .title("Jumlah Pesanan Bulanan")
            .axis_labels("Bulan", "Jumlah Pesanan")
            .stroke(chart::WINDOW_LINE)
            .fill(chart::WINDOW_FILL, 0.3)
            .ticks(DateTicks::MonthStarts)
            .grid()
            .annotation(self.annotation.clone())
            .size(1200.0, 600.0)
            .render()
    }

    /// Template context for the page
    pub fn page(&self) -> DashboardPage {
        DashboardPage {
            total_orders: self.totals.total_orders,
            total_revenue: self.total_revenue_display.clone(),
            daily_chart: self.daily_chart(),
            category_chart: self.category_chart(),
            window_title: self.settings.window_title.clone(),
            window_caption: self.settings.window_caption.clone(),
            window_chart: self.window_chart(),
        }
    }

    /// The complete HTML page
    pub fn render_html(&self) -> Result<String, askama::Error> {
        self.page().render()
    }
}

/// The dashboard page, rendered from `templates/dashboard.html`.
///
/// Text fields are HTML-escaped by the template; the chart fields hold
/// finished SVG documents and are inserted as-is.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub total_orders: u64,
    pub total_revenue: String,
    pub daily_chart: String,
    pub category_chart: String,
    pub window_title: String,
    pub window_caption: String,
    pub window_chart: String,
}
