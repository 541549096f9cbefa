//! Order aggregation.

use crate::model::{Order, OrderId};
use serde::Serialize;
use std::collections::HashMap;

/// One purchaser's share of a [`SummaryItem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    pub order_id: OrderId,
    pub customer_name: String,
    pub quantity: u32,
}

/// Everything ordered under one item name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryItem {
    pub name: String,
    pub count: u32,
    pub total: f64,
    pub order_details: Vec<OrderDetail>,
}

/// Grand totals over a summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryTotals {
    pub amount: f64,
    pub count: u32,
}

/// Rounds to one decimal place.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Groups orders by item name.
///
/// Rows come out in the order each name is first seen. Names are compared exactly. A quantity
/// of `0` is counted as `1`. The running total is rounded to one decimal after every order, so
/// repeated fractional prices do not drift. Counts saturate at `u32::MAX`.
pub fn summarize(orders: &[Order]) -> Vec<SummaryItem> {
    let mut items: Vec<SummaryItem> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for order in orders {
        let quantity = order.quantity.max(1);
        let slot = *index.entry(order.item_name.as_str()).or_insert_with(|| {
            items.push(SummaryItem {
                name: order.item_name.clone(),
                count: 0,
                total: 0.0,
                order_details: Vec::new(),
            });
            items.len() - 1
        });

        let item = &mut items[slot];
        item.count = item.count.saturating_add(quantity);
        item.total = round1(item.total + order.price * f64::from(quantity));
        item.order_details.push(OrderDetail {
            order_id: order.id,
            customer_name: order.customer_name.clone(),
            quantity,
        });
    }

    items
}

pub fn totals(summary: &[SummaryItem]) -> SummaryTotals {
    SummaryTotals {
        amount: round1(summary.iter().map(|item| item.total).sum()),
        count: summary
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GroupId;
    use chrono::Utc;

    fn order(id: u32, item: &str, price: f64, quantity: u32, customer: &str) -> Order {
        Order {
            id: OrderId(id),
            group_id: GroupId(1),
            item_name: item.to_string(),
            price,
            quantity,
            customer_name: customer.to_string(),
            created_at: Utc::now(),
        }
    }

    fn by_name(summary: &[SummaryItem]) -> Vec<(String, u32, f64)> {
        let mut rows: Vec<_> = summary
            .iter()
            .map(|item| (item.name.clone(), item.count, item.total))
            .collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        rows
    }

    #[test]
    fn test_counts_and_totals_per_item() {
        let orders = vec![
            order(1, "A", 10.0, 2, "Ann"),
            order(2, "A", 10.0, 1, "Ben"),
            order(3, "B", 5.0, 1, "Cy"),
        ];
        let summary = summarize(&orders);
        assert_eq!(
            by_name(&summary),
            vec![("A".to_string(), 3, 30.0), ("B".to_string(), 1, 5.0)]
        );
        assert_eq!(summary[0].order_details.len(), 2);
    }

    #[test]
    fn test_result_does_not_depend_on_input_order() {
        let mut orders = vec![
            order(1, "A", 10.0, 2, "Ann"),
            order(2, "A", 10.0, 1, "Ben"),
            order(3, "B", 5.0, 1, "Cy"),
        ];
        let forward = by_name(&summarize(&orders));
        orders.reverse();
        assert_eq!(by_name(&summarize(&orders)), forward);
    }

    #[test]
    fn test_first_seen_order_is_kept() {
        let orders = vec![
            order(1, "Soup", 3.0, 1, "Ann"),
            order(2, "Rice", 2.0, 1, "Ben"),
            order(3, "Soup", 3.0, 1, "Cy"),
        ];
        let names: Vec<String> = summarize(&orders).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Soup", "Rice"]);
    }

    #[test]
    fn test_fractional_prices_do_not_drift() {
        let orders: Vec<Order> = (1..=10).map(|i| order(i, "Tea", 10.1, 1, "Ann")).collect();
        let summary = summarize(&orders);
        assert_eq!(summary[0].total, 101.0);
        assert_eq!(totals(&summary).amount, 101.0);
    }

    #[test]
    fn test_zero_quantity_counts_as_one() {
        let summary = summarize(&[order(1, "Bun", 15.0, 0, "Ann")]);
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[0].total, 15.0);
        assert_eq!(summary[0].order_details[0].quantity, 1);
    }

    #[test]
    fn test_duplicate_purchasers_and_case_sensitive_names() {
        let orders = vec![
            order(1, "tea", 1.0, 1, "Ann"),
            order(2, "Tea", 1.0, 1, "Ann"),
            order(3, "Tea", 1.0, 1, "Ann"),
        ];
        let summary = summarize(&orders);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[1].order_details.len(), 2);
    }

    #[test]
    fn test_huge_quantities_saturate() {
        let orders = vec![
            order(1, "Tea", 1.0, u32::MAX, "Ann"),
            order(2, "Tea", 1.0, 1, "Ben"),
            order(3, "Bun", 1.0, 5, "Cy"),
        ];
        let summary = summarize(&orders);
        assert_eq!(summary[0].count, u32::MAX);
        assert_eq!(summary[0].order_details.len(), 2);
        assert_eq!(totals(&summary).count, u32::MAX);
    }

    #[test]
    fn test_no_orders_no_rows() {
        assert!(summarize(&[]).is_empty());
        assert_eq!(
            totals(&[]),
            SummaryTotals {
                amount: 0.0,
                count: 0
            }
        );
    }
}
