//! Printable order summary.
//!
//! A plain-text sheet a person can print or paste into a chat when calling the restaurant.

use crate::ordering::{totals, SummaryItem};
use std::fmt::Write;

pub fn render_summary(title: &str, deadline_text: &str, summary: &[SummaryItem]) -> String {
    let mut out = String::new();
    let grand = totals(summary);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "Deadline: {}", deadline_text);
    let _ = writeln!(out, "{}", "-".repeat(40));

    if summary.is_empty() {
        let _ = writeln!(out, "(no orders)");
    }
    for item in summary {
        let _ = writeln!(out, "{}  x{}  ${}", item.name, item.count, item.total);
        let purchasers: Vec<String> = item
            .order_details
            .iter()
            .map(|detail| format!("{}({})", detail.customer_name, detail.quantity))
            .collect();
        let _ = writeln!(out, "    {}", purchasers.join(", "));
    }

    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Total: {} items  ${}", grand.count, grand.amount);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupId, Order, OrderId};
    use crate::ordering::summarize;
    use chrono::Utc;

    #[test]
    fn test_lists_items_purchasers_and_totals() {
        let orders: Vec<Order> = [("Rice", 90.0, 2, "Mei"), ("Rice", 90.0, 1, "Tom"), ("Tea", 30.5, 1, "Mei")]
            .into_iter()
            .enumerate()
            .map(|(i, (item, price, quantity, customer))| Order {
                id: OrderId(i as u32 + 1),
                group_id: GroupId(1),
                item_name: item.to_string(),
                price,
                quantity,
                customer_name: customer.to_string(),
                created_at: Utc::now(),
            })
            .collect();

        let text = render_summary("Golden Wok", "12:30", &summarize(&orders));
        assert!(text.starts_with("Golden Wok\nDeadline: 12:30\n"));
        assert!(text.contains("Rice  x3  $270\n    Mei(2), Tom(1)\n"));
        assert!(text.contains("Tea  x1  $30.5\n"));
        assert!(text.contains("Total: 4 items  $300.5"));
    }

    #[test]
    fn test_empty_summary() {
        let text = render_summary("Golden Wok", "12:30", &[]);
        assert!(text.contains("(no orders)"));
        assert!(text.contains("Total: 0 items  $0"));
    }
}
