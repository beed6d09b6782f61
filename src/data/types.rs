//! Order table types

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single order line item.
///
/// An order spanning several products appears as several records sharing
/// the same `order_id`. Every field is optional because merged order
/// exports carry orders without line items as blank cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order identifier (not unique per row), `None` when the cell is empty
    pub order_id: Option<String>,
    /// Product category, `None` when the cell is empty
    pub product_category_name: Option<String>,
    /// Unit price of the line item
    pub price: Option<Decimal>,
    /// Shipping-limit timestamp
    pub shipping_limit_date: Option<NaiveDateTime>,
}

impl OrderRecord {
    /// Create a record
    pub fn new(
        order_id: impl Into<String>,
        category: Option<&str>,
        price: Decimal,
        shipping_limit_date: NaiveDateTime,
    ) -> Self {
        Self {
            order_id: Some(order_id.into()),
            product_category_name: category.map(str::to_string),
            price: Some(price),
            shipping_limit_date: Some(shipping_limit_date),
        }
    }

    /// Calendar day of the shipping-limit timestamp
    pub fn day(&self) -> Option<NaiveDate> {
        self.shipping_limit_date.map(|ts| ts.date())
    }
}

/// The loaded order table, rows in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderTable {
    rows: Vec<OrderRecord>,
}

impl OrderTable {
    pub fn new(rows: Vec<OrderRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[OrderRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last calendar day present, `None` when no row is dated
    pub fn day_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.rows.iter().filter_map(OrderRecord::day).min()?;
        let last = self.rows.iter().filter_map(OrderRecord::day).max()?;
        Some((first, last))
    }
}

impl FromIterator<OrderRecord> for OrderTable {
    fn from_iter<I: IntoIterator<Item = OrderRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_day_span() {
        let table: OrderTable = vec![
            OrderRecord::new("b", Some("toys"), dec!(5), at("2018-01-03 10:00:00")),
            OrderRecord::new("a", None, dec!(7.5), at("2018-01-01 23:59:59")),
        ]
        .into_iter()
        .collect();

        let (first, last) = table.day_span().unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2018, 1, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2018, 1, 3).unwrap());
    }

    #[test]
    fn test_empty_table_has_no_span() {
        assert!(OrderTable::default().day_span().is_none());
    }

    #[test]
    fn test_undated_rows_ignored_in_span() {
        let mut undated = OrderRecord::new("c", Some("toys"), dec!(1), at("2018-01-01 00:00:00"));
        undated.shipping_limit_date = None;
        let table = OrderTable::new(vec![
            undated,
            OrderRecord::new("d", Some("toys"), dec!(1), at("2018-02-01 00:00:00")),
        ]);

        let (first, last) = table.day_span().unwrap();
        assert_eq!(first, last);
    }
}
