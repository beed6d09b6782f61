//! Order CSV Loader
//!
//! Reads the order line-item CSV into an [`OrderTable`]. Columns are found
//! by header name, so the wide merged export (dozens of columns) loads the
//! same way as a four-column extract.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;
use std::time::Instant;

use super::error::{LoadError, LoadResult};
use super::source::DataSource;
use super::types::{OrderRecord, OrderTable};

const ORDER_ID: &str = "order_id";
const PRICE: &str = "price";
const CATEGORY: &str = "product_category_name";
const SHIPPING_LIMIT_DATE: &str = "shipping_limit_date";

/// Timestamp layouts tried in order before falling back to RFC 3339
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Fetch and parse the order table from a source
pub async fn load_orders(source: &DataSource, client: &reqwest::Client) -> LoadResult<OrderTable> {
    let start = Instant::now();
    let reader = source.open(client);

    tracing::debug!(source = %reader.describe(), "Fetching order data");
    let bytes = reader.fetch().await?;

    let table = parse_orders(bytes.as_slice())?;
    let span = table.day_span();

    tracing::info!(
        source = %source,
        rows = table.len(),
        bytes = bytes.len(),
        first_day = ?span.map(|(first, _)| first),
        last_day = ?span.map(|(_, last)| last),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Loaded order data"
    );

    Ok(table)
}

/// Column positions of the required fields
struct ColumnIndex {
    order_id: usize,
    price: usize,
    category: usize,
    shipping_limit_date: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> LoadResult<Self> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or(LoadError::MissingColumn(name))
        };

        Ok(Self {
            order_id: find(ORDER_ID)?,
            price: find(PRICE)?,
            category: find(CATEGORY)?,
            shipping_limit_date: find(SHIPPING_LIMIT_DATE)?,
        })
    }
}

/// Parse order CSV content (header row required)
pub fn parse_orders<R: Read>(input: R) -> LoadResult<OrderTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let price = match cell(columns.price) {
            "" => None,
            raw => Some(parse_price(raw).ok_or_else(|| LoadError::InvalidValue {
                line,
                column: PRICE,
                value: raw.to_string(),
            })?),
        };

        let shipping_limit_date = match cell(columns.shipping_limit_date) {
            "" => None,
            raw => Some(parse_timestamp(raw).ok_or_else(|| LoadError::InvalidValue {
                line,
                column: SHIPPING_LIMIT_DATE,
                value: raw.to_string(),
            })?),
        };

        let optional = |idx: usize| match cell(idx) {
            "" => None,
            value => Some(value.to_string()),
        };

        rows.push(OrderRecord {
            order_id: optional(columns.order_id),
            product_category_name: optional(columns.category),
            price,
            shipping_limit_date,
        });
    }

    Ok(OrderTable::new(rows))
}

fn parse_price(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Coerce a timestamp cell to a naive date-time.
///
/// Offsets in RFC 3339 input are dropped after conversion to UTC; a bare
/// date maps to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}
