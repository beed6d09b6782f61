//! Presentation
//!
//! Rendering of the rollups for people: currency-formatted headline numbers,
//! SVG charts and the HTML dashboard page (an askama template). Chart
//! rendering never fails; anything that can go wrong (bad locale,
//! unreadable data) is rejected before a [`Dashboard`] exists.

pub mod chart;
pub mod currency;
pub mod dashboard;
pub mod svg;

pub use chart::{render_bar_pair, Annotation, BarChart, DateTicks, LineChart};
pub use currency::{CurrencyError, CurrencyFormatter};
pub use dashboard::{Dashboard, DashboardPage, DashboardSettings};
