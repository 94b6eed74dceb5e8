//! Plain-text views of the cached collections.

use barra_client::Dashboard;
use barra_common::drink::Drink;
use barra_common::order::Order;
use barra_common::premix::Premix;
use barra_common::shortage::ShortageEntry;

pub fn dashboard(view: &Dashboard<'_>) -> String {
    let mut out = String::new();
    section(&mut out, "Shortages", &shortages(view.shortages));
    let pending = view.pending_premixes.iter().copied();
    section(&mut out, "Premixes to make", &premixes(pending));
    section(&mut out, "Orders", &orders(view.orders.iter().map(|line| line.order)));
    out
}

fn section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("== {title} ==\n"));
    if body.is_empty() {
        out.push_str("  (none)\n");
    } else {
        out.push_str(body);
    }
}

pub fn orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> String {
    let mut out = String::new();
    for order in orders {
        let status = if order.is_pending() { "pending" } else { "received" };
        out.push_str(&format!("{}  {}  [{status}]\n", order.id, order.label()));
        for item in &order.items {
            out.push_str(&format!("    {} {} {}\n", item.quantity, item.unit, item.name));
        }
        if let (Some(comment), Some(by)) = (&order.received_comment, &order.received_by) {
            out.push_str(&format!("    received by {by}: {comment}\n"));
        }
    }
    out
}

pub fn premixes<'a>(premixes: impl IntoIterator<Item = &'a Premix>) -> String {
    let mut out = String::new();
    for premix in premixes {
        out.push_str(&format!(
            "{}  {} [{}]  {}\n",
            premix.id,
            premix.name,
            premix.status_label(),
            premix.ingredients.join(", ")
        ));
    }
    out
}

pub fn drinks<'a>(drinks: impl IntoIterator<Item = &'a Drink>) -> String {
    let mut out = String::new();
    for drink in drinks {
        out.push_str(&format!("{}  {}  {}\n", drink.id, drink.name, drink.ingredients.join(", ")));
    }
    out
}

pub fn shortages<'a>(entries: impl IntoIterator<Item = &'a ShortageEntry>) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!("{}  {} ({} {})\n", entry.id, entry.name, entry.quantity, entry.unit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use barra_common::order::{LineItem, OrderId, OrderStatus};
    use barra_common::quantity::Quantity;
    use barra_common::shortage::ShortageId;
    use chrono::{TimeZone, Utc};

    #[test]
    fn received_order_shows_reception() {
        let order = Order {
            id: OrderId::from("o7"),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 18, 5, 0).unwrap(),
            items: vec![LineItem {
                name: "Limes".into(),
                quantity: Quantity::new(0.5).unwrap(),
                unit: "kilo".into(),
            }],
            status: OrderStatus::Received,
            received_comment: Some("one bag short".into()),
            received_by: Some("Ana".into()),
        };

        assert_eq!(
            orders([&order]),
            "o7  09/03/2024 18:05:00  [received]\n    0.5 kilo Limes\n    received by Ana: one bag short\n"
        );
    }

    #[test]
    fn empty_sections_say_none() {
        let entry = ShortageEntry {
            id: ShortageId::from("s1"),
            name: "Ice".into(),
            quantity: Quantity::from(1),
            unit: "unidad".into(),
        };
        let view = Dashboard {
            shortages: std::slice::from_ref(&entry),
            pending_premixes: vec![],
            orders: vec![],
        };

        assert_eq!(
            dashboard(&view),
            "== Shortages ==\ns1  Ice (1 unidad)\n== Premixes to make ==\n  (none)\n== Orders ==\n  (none)\n"
        );
    }
}
