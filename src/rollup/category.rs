//! Per-category sales rollup

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::data::OrderTable;

/// Sales count for one product category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryRollupRow {
    pub category: String,
    /// Distinct orders containing at least one item of this category
    pub number_of_sales: u64,
}

/// Count distinct orders per category, busiest first.
///
/// Rows without a category are left out, and rows without an order id are
/// not counted. Groups are formed in category-name
/// order and then stably sorted by count, so ties stay alphabetical.
pub fn category_rollup(orders: &OrderTable) -> Vec<CategoryRollupRow> {
    let mut groups: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();

    for record in orders.rows() {
        let Some(category) = record.product_category_name.as_deref() else {
            continue;
        };
        let ids = groups.entry(category).or_default();
        if let Some(id) = record.order_id.as_deref() {
            ids.insert(id);
        }
    }

    let mut rows: Vec<CategoryRollupRow> = groups
        .into_iter()
        .map(|(category, ids)| CategoryRollupRow {
            category: category.to_string(),
            number_of_sales: ids.len() as u64,
        })
        .collect();

    rows.sort_by(|a, b| b.number_of_sales.cmp(&a.number_of_sales));
    rows
}

/// The first `n` rows of a descending rollup
pub fn best_performing(rows: &[CategoryRollupRow], n: usize) -> Vec<CategoryRollupRow> {
    rows.iter().take(n).cloned().collect()
}

/// Re-sort ascending (stable) and take the first `n` rows
pub fn worst_performing(rows: &[CategoryRollupRow], n: usize) -> Vec<CategoryRollupRow> {
    let mut ascending = rows.to_vec();
    ascending.sort_by_key(|r| r.number_of_sales);
    ascending.truncate(n);
    ascending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OrderRecord;
    use chrono::NaiveDateTime;
    use rust_decimal_macros::dec;

    fn item(order: &str, category: Option<&str>) -> OrderRecord {
        let ts = NaiveDateTime::parse_from_str("2018-05-05 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        OrderRecord::new(order, category, dec!(1), ts)
    }

    fn sample() -> OrderTable {
        let mut rows = Vec::new();
        for i in 0..4 {
            rows.push(item(&format!("bed-{i}"), Some("cama_mesa_banho")));
        }
        // second item of an existing order must not count twice
        rows.push(item("bed-0", Some("cama_mesa_banho")));
        for i in 0..6 {
            rows.push(item(&format!("hb-{i}"), Some("beleza_saude")));
        }
        rows.push(item("toy-0", Some("brinquedos")));
        rows.push(item("pc-0", Some("informatica_acessorios")));
        rows.push(item("pc-1", Some("informatica_acessorios")));
        rows.push(item("nocat", None));
        OrderTable::new(rows)
    }

    #[test]
    fn test_sorted_descending_distinct() {
        let rollup = category_rollup(&sample());

        let pairs: Vec<(&str, u64)> = rollup
            .iter()
            .map(|r| (r.category.as_str(), r.number_of_sales))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("beleza_saude", 6),
                ("cama_mesa_banho", 4),
                ("informatica_acessorios", 2),
                ("brinquedos", 1),
            ]
        );
    }

    #[test]
    fn test_single_category_ten_orders() {
        let rows = (0..10).map(|i| item(&format!("o{i}"), Some("esporte_lazer"))).collect();
        let rollup = category_rollup(&OrderTable::new(rows));

        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].number_of_sales, 10);
    }

    #[test]
    fn test_blank_order_id_not_counted() {
        let mut anonymous = item("a1", Some("toys"));
        anonymous.order_id = None;
        let table = OrderTable::new(vec![item("a1", Some("toys")), anonymous]);

        let rollup = category_rollup(&table);

        assert_eq!(rollup.len(), 1);
        assert_eq!(rollup[0].number_of_sales, 1);
    }

    #[test]
    fn test_ties_keep_name_order() {
        let table = OrderTable::new(vec![
            item("1", Some("zeta")),
            item("2", Some("alpha")),
            item("3", Some("mid")),
            item("4", Some("mid")),
        ]);

        let names: Vec<String> = category_rollup(&table).into_iter().map(|r| r.category).collect();
        assert_eq!(names, vec!["mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_worst_view_is_same_pairs_reordered() {
        let rollup = category_rollup(&sample());
        let worst = worst_performing(&rollup, rollup.len());

        assert!(worst.windows(2).all(|w| w[0].number_of_sales <= w[1].number_of_sales));

        let best: HashSet<_> = rollup.iter().cloned().collect();
        let reordered: HashSet<_> = worst.into_iter().collect();
        assert_eq!(best, reordered);
    }

    #[test]
    fn test_top_and_bottom_five() {
        let mut rows = Vec::new();
        for (c, n) in [("a", 9), ("b", 8), ("c", 7), ("d", 6), ("e", 5), ("f", 4), ("g", 3)] {
            for i in 0..n {
                rows.push(item(&format!("{c}{i}"), Some(c)));
            }
        }
        let rollup = category_rollup(&OrderTable::new(rows));

        let best: Vec<_> = best_performing(&rollup, 5).into_iter().map(|r| r.category).collect();
        let worst: Vec<_> = worst_performing(&rollup, 5).into_iter().map(|r| r.category).collect();

        assert_eq!(best, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(worst, vec!["g", "f", "e", "d", "c"]);
    }

    #[test]
    fn test_fewer_than_n_categories() {
        let rollup = category_rollup(&OrderTable::new(vec![item("1", Some("solo"))]));
        assert_eq!(best_performing(&rollup, 5).len(), 1);
        assert_eq!(worst_performing(&rollup, 5).len(), 1);
    }
}
