//! Daily order and revenue rollup

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::data::OrderTable;

/// One calendar day of activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRollupRow {
    pub date: NaiveDate,
    /// Distinct order ids shipping that day
    pub order_count: u64,
    /// Sum of line-item prices
    pub revenue: Decimal,
}

#[derive(Default)]
struct DayBucket<'a> {
    orders: HashSet<&'a str>,
    revenue: Decimal,
}

/// Resample the table to daily frequency.
///
/// Rows without a shipping-limit date are skipped; rows without an order id
/// add to revenue but not to the order count. Days between the first
/// and last dated row that have no orders are emitted with zero count and
/// zero revenue.
pub fn daily_rollup(orders: &OrderTable) -> Vec<DailyRollupRow> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket<'_>> = BTreeMap::new();

    for record in orders.rows() {
        let Some(day) = record.day() else {
            continue;
        };
        let bucket = buckets.entry(day).or_default();
        if let Some(id) = record.order_id.as_deref() {
            bucket.orders.insert(id);
        }
        if let Some(price) = record.price {
            bucket.revenue += price;
        }
    }

    let (Some(&first), Some(&last)) = (buckets.keys().next(), buckets.keys().next_back()) else {
        return Vec::new();
    };

    first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|date| match buckets.get(&date) {
            Some(bucket) => DailyRollupRow {
                date,
                order_count: bucket.orders.len() as u64,
                revenue: bucket.revenue,
            },
            None => DailyRollupRow {
                date,
                order_count: 0,
                revenue: Decimal::ZERO,
            },
        })
        .collect()
}

/// Headline numbers shown above the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeadlineTotals {
    pub total_orders: u64,
    pub total_revenue: Decimal,
}

impl HeadlineTotals {
    /// Sum the daily rollup
    pub fn from_daily(rows: &[DailyRollupRow]) -> Self {
        Self {
            total_orders: rows.iter().map(|r| r.order_count).sum(),
            total_revenue: rows.iter().map(|r| r.revenue).sum(),
        }
    }
}

/// Rows whose date lies in `[start, end]` (inclusive)
pub fn window(rows: &[DailyRollupRow], start: NaiveDate, end: NaiveDate) -> Vec<DailyRollupRow> {
    rows.iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// First row holding the highest order count
pub fn peak(rows: &[DailyRollupRow]) -> Option<&DailyRollupRow> {
    rows.iter()
        .fold(None, |best: Option<&DailyRollupRow>, row| match best {
            Some(b) if b.order_count >= row.order_count => Some(b),
            _ => Some(row),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OrderRecord;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn at(ts: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn item(order: &str, price: Decimal, ts: &str) -> OrderRecord {
        OrderRecord::new(order, Some("housewares"), price, at(ts))
    }

    #[test]
    fn test_single_category_two_days() {
        let mut rows = Vec::new();
        for i in 0..7 {
            rows.push(item(&format!("d1-{i}"), dec!(10), "2018-02-01 09:00:00"));
        }
        for i in 0..3 {
            rows.push(item(&format!("d2-{i}"), dec!(5), "2018-02-02 17:30:00"));
        }
        let table = OrderTable::new(rows);

        let daily = daily_rollup(&table);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].date, day("2018-02-01"));
        assert_eq!(daily[0].order_count, 7);
        assert_eq!(daily[0].revenue, dec!(70));
        assert_eq!(daily[1].order_count, 3);
        assert_eq!(daily[1].revenue, dec!(15));
    }

    #[test]
    fn test_distinct_orders_not_rows() {
        let table = OrderTable::new(vec![
            item("a", dec!(1.10), "2018-01-01 08:00:00"),
            item("a", dec!(2.20), "2018-01-01 09:00:00"),
            item("b", dec!(3.30), "2018-01-01 10:00:00"),
        ]);

        let daily = daily_rollup(&table);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].order_count, 2);
        assert_eq!(daily[0].revenue, dec!(6.60));
        assert_eq!(HeadlineTotals::from_daily(&daily).total_orders, 2);
    }

    #[test]
    fn test_gaps_are_zero_filled() {
        let table = OrderTable::new(vec![
            item("late", dec!(4), "2018-01-05 00:00:00"),
            item("early", dec!(1), "2018-01-01 23:59:59"),
        ]);

        let daily = daily_rollup(&table);

        assert_eq!(daily.len(), 5);
        assert!(daily.windows(2).all(|w| w[1].date == w[0].date.succ_opt().unwrap()));
        assert_eq!(daily[0].date, day("2018-01-01"));
        assert_eq!(daily[4].date, day("2018-01-05"));
        for gap in &daily[1..4] {
            assert_eq!(gap.order_count, 0);
            assert_eq!(gap.revenue, Decimal::ZERO);
        }
    }

    #[test]
    fn test_sum_of_counts_matches_distinct_orders() {
        let table = OrderTable::new(vec![
            item("a", dec!(1), "2018-03-01 08:00:00"),
            item("a", dec!(1), "2018-03-01 08:00:00"),
            item("b", dec!(1), "2018-03-03 08:00:00"),
            item("c", dec!(1), "2018-03-07 08:00:00"),
            item("c", dec!(1), "2018-03-07 12:00:00"),
            item("d", dec!(1), "2018-03-07 13:00:00"),
        ]);

        let distinct: HashSet<_> = table.rows().iter().filter_map(|r| r.order_id.clone()).collect();
        let totals = HeadlineTotals::from_daily(&daily_rollup(&table));

        assert_eq!(totals.total_orders, distinct.len() as u64);
        assert_eq!(totals.total_revenue, dec!(6));
    }

    #[test]
    fn test_undated_rows_and_missing_prices() {
        let mut undated = item("x", dec!(100), "2018-01-01 00:00:00");
        undated.shipping_limit_date = None;
        let mut unpriced = item("y", dec!(0), "2018-01-01 00:00:00");
        unpriced.price = None;

        let table = OrderTable::new(vec![undated, unpriced]);
        let daily = daily_rollup(&table);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].order_count, 1);
        assert_eq!(daily[0].revenue, Decimal::ZERO);
    }

    #[test]
    fn test_blank_order_id_not_counted() {
        let mut anonymous = item("a1", dec!(2), "2018-01-01 11:00:00");
        anonymous.order_id = None;
        let table = OrderTable::new(vec![item("a1", dec!(1), "2018-01-01 10:00:00"), anonymous]);

        let daily = daily_rollup(&table);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].order_count, 1);
        assert_eq!(daily[0].revenue, dec!(3));
    }

    #[test]
    fn test_empty_table() {
        assert!(daily_rollup(&OrderTable::default()).is_empty());
        let totals = HeadlineTotals::from_daily(&[]);
        assert_eq!(totals.total_orders, 0);
        assert_eq!(totals.total_revenue, Decimal::ZERO);
    }

    #[test]
    fn test_window_is_inclusive() {
        let table = OrderTable::new(vec![
            item("a", dec!(1), "2017-08-31 10:00:00"),
            item("b", dec!(1), "2017-09-01 10:00:00"),
            item("c", dec!(1), "2017-09-03 10:00:00"),
        ]);
        let daily = daily_rollup(&table);

        let selected = window(&daily, day("2017-09-01"), day("2017-09-03"));

        assert_eq!(selected.len(), 3);
        assert_eq!(selected[0].date, day("2017-09-01"));
        assert_eq!(selected[2].date, day("2017-09-03"));
    }

    #[test]
    fn test_peak_takes_first_maximum() {
        let rows = vec![
            DailyRollupRow { date: day("2018-01-01"), order_count: 2, revenue: dec!(0) },
            DailyRollupRow { date: day("2018-01-02"), order_count: 5, revenue: dec!(0) },
            DailyRollupRow { date: day("2018-01-03"), order_count: 5, revenue: dec!(0) },
        ];

        assert_eq!(peak(&rows).unwrap().date, day("2018-01-02"));
        assert!(peak(&[]).is_none());
    }
}
